mod display;

use std::collections::HashMap;
use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use asteroid_dodge::compute::init_state;
use asteroid_dodge::config::Tuning;
use asteroid_dodge::driver::{start, Frame, Host, Notifier};
use asteroid_dodge::entities::Sound;
use asteroid_dodge::geometry::Rect;
use asteroid_dodge::input::{Key, KeyState};
use asteroid_dodge::render::{Canvas, Sprite};

use display::Screen;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈128 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Physical keys for each logical key.
fn bindings(key: Key) -> &'static [KeyCode] {
    match key {
        Key::Left => &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
        Key::Right => &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
        Key::Up => &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
        Key::Down => &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
        Key::Boost => &[KeyCode::Char(' ')],
    }
}

// ── Terminal host ─────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event, we record the frame of
/// the last press/repeat event for every key and, once per frame, turn the
/// keys that are still fresh into a `KeyState` snapshot.  On terminals with
/// keyboard enhancement, release events remove keys immediately; elsewhere
/// keys expire after `HOLD_WINDOW` frames of silence.
struct TerminalHost<W: Write> {
    screen: Screen<W>,
    rx: mpsc::Receiver<Event>,
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    started: Instant,
    frame_start: Option<Instant>,
}

impl<W: Write> TerminalHost<W> {
    fn new(screen: Screen<W>, rx: mpsc::Receiver<Event>) -> Self {
        TerminalHost {
            screen,
            rx,
            key_frame: HashMap::new(),
            frame: 0,
            started: Instant::now(),
            frame_start: None,
        }
    }

    /// Sleep off whatever is left of the previous frame's budget.
    fn pace(&mut self) {
        if let Some(frame_start) = self.frame_start {
            let elapsed = frame_start.elapsed();
            if elapsed < FRAME {
                thread::sleep(FRAME - elapsed);
            } else if elapsed > FRAME * 4 {
                log::warn!("frame took {:?}", elapsed);
            }
        }
        self.frame_start = Some(Instant::now());
    }

    /// Drain pending events.  Returns `false` once the player asked to quit.
    fn drain_events(&mut self) -> bool {
        while let Ok(ev) = self.rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return false;
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return false;
                            }
                            _ => {}
                        }
                        self.key_frame.insert(code, self.frame);
                    }
                    KeyEventKind::Repeat => {
                        self.key_frame.insert(code, self.frame);
                    }
                    KeyEventKind::Release => {
                        self.key_frame.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => self.screen.resize(cols, rows),
                _ => {}
            }
        }
        true
    }

    fn snapshot(&self) -> KeyState {
        [Key::Left, Key::Right, Key::Up, Key::Down, Key::Boost]
            .into_iter()
            .filter(|&key| {
                bindings(key)
                    .iter()
                    .any(|code| is_held(&self.key_frame, code, self.frame))
            })
            .collect()
    }
}

impl<W: Write> Canvas for TerminalHost<W> {
    fn clear(&mut self) -> io::Result<()> {
        self.screen.clear()
    }

    fn draw(&mut self, sprite: Sprite, rect: Rect) -> io::Result<()> {
        self.screen.draw(sprite, rect)
    }

    fn present(&mut self) -> io::Result<()> {
        self.screen.present()
    }
}

impl<W: Write> Notifier for TerminalHost<W> {
    fn play(&mut self, sound: Sound) -> io::Result<()> {
        self.screen.play(sound)
    }

    fn set_displayed_score(&mut self, score: u32) -> io::Result<()> {
        self.screen.set_displayed_score(score)
    }
}

impl<W: Write> Host for TerminalHost<W> {
    fn next_frame(&mut self) -> io::Result<Option<Frame>> {
        self.pace();
        self.frame += 1;
        if !self.drain_events() {
            return Ok(None);
        }
        Ok(Some(Frame {
            now_ms: self.started.elapsed().as_millis() as u64,
            keys: self.snapshot(),
        }))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn load_tuning() -> io::Result<Tuning> {
    match std::env::args_os().nth(1) {
        Some(path) => Tuning::load(&PathBuf::from(path)),
        None => Ok(Tuning::default()),
    }
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Bad tuning is reported before the terminal is taken over.
    let tuning = load_tuning()?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut host = match terminal::size() {
        Ok((cols, rows)) => TerminalHost::new(Screen::new(out, cols, rows, tuning.playfield), rx),
        Err(e) => {
            restore(&mut out, keyboard_enhanced);
            return Err(e);
        }
    };

    let mut world = init_state(tuning, 0);
    let result = start(&mut world, &mut host, &mut thread_rng());

    // Always restore the terminal
    restore(host.screen.writer(), keyboard_enhanced);

    result.map(|_| ())
}

fn restore<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}
