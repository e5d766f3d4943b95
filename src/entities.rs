/// All game entity types — plain data, the rules live in `compute`.

use crate::config::{Playfield, Tuning};
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    /// Asteroid: touching one resets the session.
    Hazard,
    /// Gem: touching one adds to the score.
    Bonus,
}

/// Sounds the game asks its audio collaborator to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Collect,
    Collision,
    /// Background track, requested once when the loop starts.
    Music,
}

/// Notifications produced by one simulation step, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A bonus was picked up.
    Collected,
    /// A hazard hit the player and the session was reset.
    Collision,
    /// The score changed to the contained value.
    ScoreChanged(u32),
}

impl GameEvent {
    pub fn sound(&self) -> Option<Sound> {
        match self {
            GameEvent::Collected => Some(Sound::Collect),
            GameEvent::Collision => Some(Sound::Collision),
            GameEvent::ScoreChanged(_) => None,
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Unboosted speed.  Never modified, so leaving a boost restores it exactly.
    pub base_speed: f32,
    pub boosted: bool,
    /// Time (ms) the current boost started; meaningless while not boosted.
    pub boost_started_ms: u64,
}

impl Player {
    pub fn speed(&self) -> f32 {
        if self.boosted {
            self.base_speed * 2.0
        } else {
            self.base_speed
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Falling objects ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct FallingObject {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Pixels moved downward per tick.
    pub speed: f32,
    pub kind: ObjectKind,
}

impl FallingObject {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }

    /// Move one tick's worth downward.
    pub fn fall(&mut self) {
        self.y += self.speed;
    }

    /// Past the bottom edge of the playfield.
    pub fn is_below(&self, playfield: &Playfield) -> bool {
        self.y > playfield.height
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

/// Last-spawn clock for one kind of falling object.  Shape, speed range and
/// interval come from the matching `FallerTuning`.
#[derive(Clone, Debug, PartialEq)]
pub struct Spawner {
    pub kind: ObjectKind,
    pub last_spawn_ms: u64,
}

/// Everything one play session owns.  Passed explicitly to the simulation
/// and renderer; several worlds can coexist.
#[derive(Clone, Debug)]
pub struct World {
    pub tuning: Tuning,
    pub player: Player,
    pub hazards: Vec<FallingObject>,
    pub bonuses: Vec<FallingObject>,
    pub hazard_spawner: Spawner,
    pub bonus_spawner: Spawner,
    pub score: u32,
    pub tick_count: u64,
}
