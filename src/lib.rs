//! Asteroid Dodge: steer a spaceship through falling asteroids and collect gems.
//!
//! - `geometry`: rectangles and the overlap test
//! - `config`: gameplay tuning, optionally loaded from JSON
//! - `input`: logical keys and the per-frame pressed-state snapshot
//! - `entities`: plain game data (player, falling objects, world, events)
//! - `compute`: spawning and the per-frame simulation step
//! - `render`: draws a world onto any `Canvas`
//! - `driver`: the loop that ties a host, the simulation and rendering together

pub mod compute;
pub mod config;
pub mod driver;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod render;
