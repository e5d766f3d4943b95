/// Game rules: player control, spawning and the per-frame simulation step.
///
/// Time is always passed in as milliseconds from an arbitrary monotonic
/// origin, and all randomness comes through an injected `Rng`, so a test can
/// drive the whole game with fixed timestamps and a seeded generator.

use rand::Rng;

use crate::config::{FallerTuning, Playfield, Tuning};
use crate::entities::{FallingObject, GameEvent, ObjectKind, Player, Spawner, World};
use crate::geometry::overlaps;
use crate::input::{Key, KeyState};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Where the player starts and where a collision sends it back to.
pub fn spawn_point(tuning: &Tuning) -> (f32, f32) {
    let field = &tuning.playfield;
    let p = &tuning.player;
    (field.width / 2.0 - p.width / 2.0, field.height - p.spawn_offset_y)
}

/// Build a fresh world.  Both spawn clocks start at `now_ms`, so the first
/// objects appear one interval after the session begins.
pub fn init_state(tuning: Tuning, now_ms: u64) -> World {
    let (x, y) = spawn_point(&tuning);
    let player = Player {
        x,
        y,
        width: tuning.player.width,
        height: tuning.player.height,
        base_speed: tuning.player.speed,
        boosted: false,
        boost_started_ms: 0,
    };
    World {
        tuning,
        player,
        hazards: Vec::new(),
        bonuses: Vec::new(),
        hazard_spawner: Spawner::new(ObjectKind::Hazard, now_ms),
        bonus_spawner: Spawner::new(ObjectKind::Bonus, now_ms),
        score: 0,
        tick_count: 0,
    }
}

// ── Player control ───────────────────────────────────────────────────────────

fn clamp_axis(value: f32, extent: f32, limit: f32) -> f32 {
    value.min(limit - extent).max(0.0)
}

/// Move the player for the held direction keys, then handle boost start and
/// expiry.  Keys that are not held have no effect.
pub fn advance_player(
    player: &mut Player,
    keys: &KeyState,
    now_ms: u64,
    playfield: &Playfield,
    boost_duration_ms: u64,
) {
    let step = player.speed();

    if keys.is_pressed(Key::Left) {
        player.x -= step;
    }
    if keys.is_pressed(Key::Right) {
        player.x += step;
    }
    if keys.is_pressed(Key::Up) {
        player.y -= step;
    }
    if keys.is_pressed(Key::Down) {
        player.y += step;
    }
    player.x = clamp_axis(player.x, player.width, playfield.width);
    player.y = clamp_axis(player.y, player.height, playfield.height);

    if keys.is_pressed(Key::Boost) && !player.boosted {
        player.boosted = true;
        player.boost_started_ms = now_ms;
    }

    if player.boosted && now_ms.saturating_sub(player.boost_started_ms) > boost_duration_ms {
        player.boosted = false;
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

impl Spawner {
    pub fn new(kind: ObjectKind, now_ms: u64) -> Self {
        Spawner {
            kind,
            last_spawn_ms: now_ms,
        }
    }

    /// Produce a new object once more than `spawn_interval_ms` has passed
    /// since the previous one.  The object starts just above the top edge.
    pub fn maybe_spawn(
        &mut self,
        now_ms: u64,
        playfield: &Playfield,
        tuning: &FallerTuning,
        rng: &mut impl Rng,
    ) -> Option<FallingObject> {
        if now_ms.saturating_sub(self.last_spawn_ms) <= tuning.spawn_interval_ms {
            return None;
        }
        self.last_spawn_ms = now_ms;

        let object = FallingObject {
            x: rng.gen_range(0.0..(playfield.width - tuning.size)),
            y: -tuning.size,
            size: tuning.size,
            speed: rng.gen_range(tuning.speed_min..tuning.speed_max),
            kind: self.kind,
        };
        log::debug!(
            "spawned {:?} at x={:.1} speed={:.2}",
            object.kind,
            object.x,
            object.speed
        );
        Some(object)
    }
}

// ── Per-frame step ───────────────────────────────────────────────────────────

/// Put the player back on its spawn point and drop everything in flight.
/// An active boost ends as well.
fn reset_after_collision(world: &mut World) {
    let (x, y) = spawn_point(&world.tuning);
    world.player.x = x;
    world.player.y = y;
    world.player.boosted = false;
    world.score = 0;
    world.hazards.clear();
    world.bonuses.clear();
}

/// Advance the world by one frame and return the notifications it produced.
///
/// Order: player, spawners (hazard then bonus), bonuses, hazards.  Falling
/// objects are moved first and then filtered into a rebuilt collection, so a
/// removal never shifts an unvisited neighbour.  Any number of hazards
/// touching the player in one step cause a single reset.
pub fn tick(
    world: &mut World,
    keys: &KeyState,
    now_ms: u64,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let playfield = world.tuning.playfield;
    world.tick_count += 1;

    // ── 1. Player ────────────────────────────────────────────────────────────
    advance_player(
        &mut world.player,
        keys,
        now_ms,
        &playfield,
        world.tuning.player.boost_duration_ms,
    );

    // ── 2. Spawn ─────────────────────────────────────────────────────────────
    if let Some(hazard) = world
        .hazard_spawner
        .maybe_spawn(now_ms, &playfield, &world.tuning.hazard, rng)
    {
        world.hazards.push(hazard);
    }
    if let Some(bonus) = world
        .bonus_spawner
        .maybe_spawn(now_ms, &playfield, &world.tuning.bonus, rng)
    {
        world.bonuses.push(bonus);
    }

    let player_box = world.player.rect();

    // ── 3. Bonuses: fall, prune, collect ─────────────────────────────────────
    let mut kept = Vec::with_capacity(world.bonuses.len());
    for mut bonus in std::mem::take(&mut world.bonuses) {
        bonus.fall();
        if bonus.is_below(&playfield) {
            continue;
        }
        if overlaps(&player_box, &bonus.rect()) {
            world.score = world.score.saturating_add(world.tuning.bonus_reward);
            log::debug!("bonus collected, score {}", world.score);
            events.push(GameEvent::Collected);
            events.push(GameEvent::ScoreChanged(world.score));
            continue;
        }
        kept.push(bonus);
    }
    world.bonuses = kept;

    // ── 4. Hazards: fall, prune, collide ─────────────────────────────────────
    for hazard in &mut world.hazards {
        hazard.fall();
    }
    world.hazards.retain(|h| !h.is_below(&playfield));

    let hit = world
        .hazards
        .iter()
        .any(|h| overlaps(&player_box, &h.rect()));
    if hit {
        log::info!(
            "collision after {} ticks, score {} lost",
            world.tick_count,
            world.score
        );
        reset_after_collision(world);
        events.push(GameEvent::Collision);
        events.push(GameEvent::ScoreChanged(world.score));
    }

    events
}
