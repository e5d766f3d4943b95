/// Gameplay tuning.
///
/// Defaults reproduce the classic game.  A JSON file may override any subset
/// of fields; missing sections and fields fall back to the defaults.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Size of the play area in pixels.  Fixed for the lifetime of a world.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Playfield { width: 800.0, height: 600.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Pixels moved per tick while a direction key is held.
    pub speed: f32,
    /// How long a boost lasts, in milliseconds.
    pub boost_duration_ms: u64,
    /// Spawn row, measured up from the bottom edge of the playfield.
    pub spawn_offset_y: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        PlayerTuning {
            width: 50.0,
            height: 50.0,
            speed: 5.0,
            boost_duration_ms: 3000,
            spawn_offset_y: 80.0,
        }
    }
}

/// Shape, speed range and spawn cadence of one kind of falling object.
/// A section given in a file must list all four fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FallerTuning {
    pub size: f32,
    /// Lower bound of the fall speed (inclusive), pixels per tick.
    pub speed_min: f32,
    /// Upper bound of the fall speed (exclusive).
    pub speed_max: f32,
    pub spawn_interval_ms: u64,
}

impl FallerTuning {
    pub fn hazard() -> Self {
        FallerTuning {
            size: 40.0,
            speed_min: 3.0,
            speed_max: 5.0,
            spawn_interval_ms: 1500,
        }
    }

    pub fn bonus() -> Self {
        FallerTuning {
            size: 30.0,
            speed_min: 2.0,
            speed_max: 5.0,
            spawn_interval_ms: 2000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield: Playfield,
    pub player: PlayerTuning,
    pub hazard: FallerTuning,
    pub bonus: FallerTuning,
    /// Points awarded per collected bonus.
    pub bonus_reward: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            playfield: Playfield::default(),
            player: PlayerTuning::default(),
            hazard: FallerTuning::hazard(),
            bonus: FallerTuning::bonus(),
            bonus_reward: 10,
        }
    }
}

impl Tuning {
    /// Read and validate a tuning file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&text)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn from_json(text: &str) -> io::Result<Self> {
        let tuning: Tuning = serde_json::from_str(text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot work with: spawn ranges must be
    /// non-empty and every entity must fit inside the playfield.
    pub fn validate(&self) -> io::Result<()> {
        let field = &self.playfield;
        let p = &self.player;
        let floats = [
            field.width,
            field.height,
            p.width,
            p.height,
            p.speed,
            p.spawn_offset_y,
            self.hazard.size,
            self.hazard.speed_min,
            self.hazard.speed_max,
            self.bonus.size,
            self.bonus.speed_min,
            self.bonus.speed_max,
        ];
        // Out-of-range JSON numbers deserialize to infinity.
        if floats.iter().any(|v| !v.is_finite()) {
            return Err(invalid("tuning values must be finite numbers"));
        }
        if !(field.width > 0.0 && field.height > 0.0) {
            return Err(invalid("playfield must have a positive size"));
        }
        if !(p.width > 0.0 && p.height > 0.0 && p.speed > 0.0) {
            return Err(invalid("player size and speed must be positive"));
        }
        if p.width > field.width || p.height > field.height {
            return Err(invalid("player does not fit inside the playfield"));
        }
        if p.spawn_offset_y < p.height || p.spawn_offset_y > field.height {
            return Err(invalid("player spawn row lies outside the playfield"));
        }
        for (name, faller) in [("hazard", &self.hazard), ("bonus", &self.bonus)] {
            if !(faller.size > 0.0) {
                return Err(invalid(&format!("{name} size must be positive")));
            }
            // Spawn x is drawn from [0, width - size), which must not be empty.
            if faller.size >= field.width {
                return Err(invalid(&format!("{name} is wider than the playfield")));
            }
            if !(field.width - faller.size).is_finite() {
                return Err(invalid(&format!("{name} spawn range is not finite")));
            }
            let spread = faller.speed_max - faller.speed_min;
            if !(faller.speed_min > 0.0 && spread > 0.0 && spread.is_finite()) {
                return Err(invalid(&format!(
                    "{name} speed range [{}, {}) is empty or not positive",
                    faller.speed_min, faller.speed_max
                )));
            }
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.to_string())
}
