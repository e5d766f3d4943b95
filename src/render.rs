/// Rendering step: translates a world into draw calls on a `Canvas`.
///
/// Nothing here changes the world.  The canvas decides what a sprite looks
/// like; this module only decides what is drawn, where, and in which order.

use std::io;

use crate::entities::{FallingObject, ObjectKind, World};
use crate::geometry::Rect;

/// Drawable handles for the three visuals the game uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Player,
    Bonus,
    Hazard,
}

impl From<ObjectKind> for Sprite {
    fn from(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Hazard => Sprite::Hazard,
            ObjectKind::Bonus => Sprite::Bonus,
        }
    }
}

/// A drawing surface measured in playfield pixels.
pub trait Canvas {
    fn clear(&mut self) -> io::Result<()>;

    /// Draw `sprite` stretched over `rect`.
    fn draw(&mut self, sprite: Sprite, rect: Rect) -> io::Result<()>;

    /// Called once after a frame's draw calls.
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn draw_object<C: Canvas + ?Sized>(canvas: &mut C, object: &FallingObject) -> io::Result<()> {
    canvas.draw(object.kind.into(), object.rect())
}

/// Render one complete frame.  Hazards go last so they sit on top.
pub fn render<C: Canvas + ?Sized>(canvas: &mut C, world: &World) -> io::Result<()> {
    canvas.clear()?;
    canvas.draw(Sprite::Player, world.player.rect())?;
    for bonus in &world.bonuses {
        draw_object(canvas, bonus)?;
    }
    for hazard in &world.hazards {
        draw_object(canvas, hazard)?;
    }
    canvas.present()
}
