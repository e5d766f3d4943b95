/// Terminal screen — all crossterm drawing lives here.
///
/// The playfield is measured in pixels; the screen squeezes it into the
/// terminal grid between a HUD row on top and a hint row at the bottom.
/// Sprites become filled blocks of one glyph covering every cell the
/// sprite's rectangle touches.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use asteroid_dodge::config::Playfield;
use asteroid_dodge::driver::Notifier;
use asteroid_dodge::entities::Sound;
use asteroid_dodge::geometry::Rect;
use asteroid_dodge::render::{Canvas, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BEST: Color = Color::DarkYellow;
const C_PLAYER: Color = Color::White;
const C_BONUS: Color = Color::Cyan;
const C_HAZARD: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

/// Rows used outside the playfield: HUD, top border, bottom border, hint.
const CHROME_ROWS: u16 = 4;

fn glyph(sprite: Sprite) -> (&'static str, Color) {
    match sprite {
        Sprite::Player => ("▲", C_PLAYER),
        Sprite::Bonus => ("◆", C_BONUS),
        Sprite::Hazard => ("●", C_HAZARD),
    }
}

pub struct Screen<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    playfield: Playfield,
    score: u32,
    best: u32,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, cols: u16, rows: u16, playfield: Playfield) -> Self {
        Screen {
            out,
            cols,
            rows,
            playfield,
            score: 0,
            best: 0,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    fn field_cols(&self) -> u16 {
        self.cols.saturating_sub(2)
    }

    fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(CHROME_ROWS)
    }

    /// Half-open cell span `[first, last)` covered by `[start, start + len)`
    /// pixels on an axis of `extent` pixels mapped onto `cells` cells.
    fn span(start: f32, len: f32, extent: f32, cells: u16) -> (i32, i32) {
        let scale = cells as f32 / extent;
        let first = (start * scale).floor() as i32;
        let last = ((start + len) * scale).ceil() as i32;
        (first, last.max(first + 1))
    }

    // ── Border & HUD ──────────────────────────────────────────────────────────

    fn draw_border(&mut self) -> io::Result<()> {
        let w = self.cols as usize;
        let bottom = self.rows.saturating_sub(2);

        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        self.out.queue(cursor::MoveTo(0, 1))?;
        self.out
            .queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
        self.out.queue(cursor::MoveTo(0, bottom))?;
        self.out
            .queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 2..bottom {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(self.cols.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    fn draw_hud(&mut self) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.out.queue(Print(format!("Score:{:>6}", self.score)))?;

        let best = format!("Best:{:>6}", self.best);
        let bx = self.cols.saturating_sub(best.chars().count() as u16 + 1);
        self.out.queue(cursor::MoveTo(bx, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_BEST))?;
        self.out.queue(Print(best))?;
        Ok(())
    }

    fn draw_controls_hint(&mut self) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(1, self.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out
            .queue(Print("←↑→↓ / WASD : Move   SPACE : Boost   Q : Quit"))?;
        Ok(())
    }
}

impl<W: Write> Canvas for Screen<W> {
    fn clear(&mut self) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()?;
        self.draw_hud()
    }

    fn draw(&mut self, sprite: Sprite, rect: Rect) -> io::Result<()> {
        let (cols, rows) = (self.field_cols(), self.field_rows());
        if cols == 0 || rows == 0 {
            return Ok(());
        }
        let (c0, c1) = Self::span(rect.x, rect.width, self.playfield.width, cols);
        let (r0, r1) = Self::span(rect.y, rect.height, self.playfield.height, rows);
        // Clip to the inside of the border; objects above the top edge are
        // partly or wholly invisible.
        let (c0, c1) = (c0.max(0), c1.min(cols as i32));
        let (r0, r1) = (r0.max(0), r1.min(rows as i32));
        if c0 >= c1 || r0 >= r1 {
            return Ok(());
        }

        let (symbol, color) = glyph(sprite);
        let line = symbol.repeat((c1 - c0) as usize);
        self.out.queue(style::SetForegroundColor(color))?;
        for row in r0..r1 {
            // +1 / +2: skip the left wall and the HUD + top border rows.
            self.out
                .queue(cursor::MoveTo((c0 + 1) as u16, (row + 2) as u16))?;
            self.out.queue(Print(&line))?;
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.draw_controls_hint()?;
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

impl<W: Write> Notifier for Screen<W> {
    /// The terminal bell is the only speaker available.  There is no
    /// background track.
    fn play(&mut self, sound: Sound) -> io::Result<()> {
        match sound {
            Sound::Collect | Sound::Collision => {
                self.out.queue(Print("\x07"))?;
            }
            Sound::Music => {
                log::debug!("no music device in terminal mode");
            }
        }
        Ok(())
    }

    fn set_displayed_score(&mut self, score: u32) -> io::Result<()> {
        self.score = score;
        self.best = self.best.max(score);
        Ok(())
    }
}
