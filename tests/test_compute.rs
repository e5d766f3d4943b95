use asteroid_dodge::compute::*;
use asteroid_dodge::config::Tuning;
use asteroid_dodge::entities::*;
use asteroid_dodge::input::{Key, KeyState};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> World {
    // 800 x 600 playfield, player 50 x 50 spawned at (375, 520), speed 5.
    init_state(Tuning::default(), 0)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn keys(held: &[Key]) -> KeyState {
    held.iter().copied().collect()
}

fn object(kind: ObjectKind, x: f32, y: f32, speed: f32) -> FallingObject {
    let size = match kind {
        ObjectKind::Hazard => 40.0,
        ObjectKind::Bonus => 30.0,
    };
    FallingObject { x, y, size, speed, kind }
}

fn count(events: &[GameEvent], wanted: &GameEvent) -> usize {
    events.iter().filter(|e| *e == wanted).count()
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = make_state();
    assert_eq!(s.player.x, 375.0); // width / 2 - 25
    assert_eq!(s.player.y, 520.0); // height - 80
    assert!(!s.player.boosted);
    assert_eq!(s.player.speed(), 5.0);
}

#[test]
fn init_state_empty_collections() {
    let s = make_state();
    assert!(s.hazards.is_empty());
    assert!(s.bonuses.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.tick_count, 0);
}

#[test]
fn init_state_starts_spawn_clocks_at_creation() {
    let s = init_state(Tuning::default(), 12_345);
    assert_eq!(s.hazard_spawner.last_spawn_ms, 12_345);
    assert_eq!(s.bonus_spawner.last_spawn_ms, 12_345);
    assert_eq!(s.hazard_spawner.kind, ObjectKind::Hazard);
    assert_eq!(s.bonus_spawner.kind, ObjectKind::Bonus);
}

// ── advance_player: movement ──────────────────────────────────────────────────

#[test]
fn move_left_normal() {
    let mut s = make_state();
    let field = s.tuning.playfield;
    advance_player(&mut s.player, &keys(&[Key::Left]), 0, &field, 3000);
    assert_eq!(s.player.x, 370.0);
    assert_eq!(s.player.y, 520.0);
}

#[test]
fn move_diagonal_applies_both_axes() {
    let mut s = make_state();
    let field = s.tuning.playfield;
    advance_player(&mut s.player, &keys(&[Key::Right, Key::Up]), 0, &field, 3000);
    assert_eq!(s.player.x, 380.0);
    assert_eq!(s.player.y, 515.0);
}

#[test]
fn opposite_keys_cancel() {
    let mut s = make_state();
    let field = s.tuning.playfield;
    advance_player(&mut s.player, &keys(&[Key::Left, Key::Right]), 0, &field, 3000);
    assert_eq!(s.player.x, 375.0);
}

#[test]
fn move_left_clamps_at_boundary() {
    let mut s = make_state();
    let field = s.tuning.playfield;
    s.player.x = 2.0;
    advance_player(&mut s.player, &keys(&[Key::Left]), 0, &field, 3000);
    assert_eq!(s.player.x, 0.0);
}

#[test]
fn move_right_clamps_at_boundary() {
    let mut s = make_state();
    let field = s.tuning.playfield;
    s.player.x = 748.0;
    advance_player(&mut s.player, &keys(&[Key::Right]), 0, &field, 3000);
    assert_eq!(s.player.x, 750.0); // 800 - 50
}

#[test]
fn move_down_clamps_at_boundary() {
    let mut s = make_state();
    let field = s.tuning.playfield;
    s.player.y = 548.0;
    advance_player(&mut s.player, &keys(&[Key::Down]), 0, &field, 3000);
    assert_eq!(s.player.y, 550.0); // 600 - 50
}

#[test]
fn no_keys_no_movement() {
    let mut s = make_state();
    let field = s.tuning.playfield;
    let before = s.player.clone();
    advance_player(&mut s.player, &KeyState::new(), 500, &field, 3000);
    assert_eq!(s.player, before);
}

// ── advance_player: boost ─────────────────────────────────────────────────────

#[test]
fn boost_doubles_speed_and_records_start() {
    let mut s = make_state();
    let field = s.tuning.playfield;
    advance_player(&mut s.player, &keys(&[Key::Boost]), 1000, &field, 3000);
    assert!(s.player.boosted);
    assert_eq!(s.player.boost_started_ms, 1000);
    assert_eq!(s.player.speed(), 10.0);
}

#[test]
fn boost_applies_from_next_movement() {
    let mut s = make_state();
    let field = s.tuning.playfield;
    // Movement happens before activation within the same call.
    advance_player(&mut s.player, &keys(&[Key::Left, Key::Boost]), 1000, &field, 3000);
    assert_eq!(s.player.x, 370.0);
    advance_player(&mut s.player, &keys(&[Key::Left]), 1016, &field, 3000);
    assert_eq!(s.player.x, 360.0);
}

#[test]
fn holding_boost_does_not_restart_timer() {
    let mut s = make_state();
    let field = s.tuning.playfield;
    advance_player(&mut s.player, &keys(&[Key::Boost]), 1000, &field, 3000);
    advance_player(&mut s.player, &keys(&[Key::Boost]), 2000, &field, 3000);
    assert_eq!(s.player.boost_started_ms, 1000);
    assert_eq!(s.player.speed(), 10.0);
}

#[test]
fn boost_expires_strictly_after_duration() {
    let mut s = make_state();
    let field = s.tuning.playfield;
    advance_player(&mut s.player, &keys(&[Key::Boost]), 1000, &field, 3000);

    advance_player(&mut s.player, &KeyState::new(), 4000, &field, 3000);
    assert!(s.player.boosted); // exactly 3000 ms is not "more than"

    advance_player(&mut s.player, &KeyState::new(), 4001, &field, 3000);
    assert!(!s.player.boosted);
    assert_eq!(s.player.speed(), 5.0);
}

#[test]
fn repeated_boost_cycles_restore_base_speed() {
    let mut s = make_state();
    let field = s.tuning.playfield;
    let mut now = 0;
    for _ in 0..50 {
        advance_player(&mut s.player, &keys(&[Key::Boost]), now, &field, 3000);
        assert_eq!(s.player.speed(), 10.0);
        now += 3001;
        advance_player(&mut s.player, &KeyState::new(), now, &field, 3000);
        assert_eq!(s.player.speed(), 5.0);
        now += 1;
    }
}

// ── Spawner ───────────────────────────────────────────────────────────────────

#[test]
fn spawner_waits_for_interval() {
    let tuning = Tuning::default();
    let t = 10_000;
    let mut spawner = Spawner::new(ObjectKind::Hazard, t);
    let spawned = spawner.maybe_spawn(t + 1000, &tuning.playfield, &tuning.hazard, &mut seeded_rng());
    assert!(spawned.is_none());
    assert_eq!(spawner.last_spawn_ms, t);
}

#[test]
fn spawner_fires_once_after_interval() {
    let tuning = Tuning::default();
    let t = 10_000;
    let mut rng = seeded_rng();
    let mut spawner = Spawner::new(ObjectKind::Hazard, t);

    let hazard = spawner
        .maybe_spawn(t + 1600, &tuning.playfield, &tuning.hazard, &mut rng)
        .expect("interval elapsed");
    assert_eq!(spawner.last_spawn_ms, t + 1600);
    assert_eq!(hazard.kind, ObjectKind::Hazard);

    // Same instant again: the clock was reset, nothing new.
    assert!(spawner
        .maybe_spawn(t + 1600, &tuning.playfield, &tuning.hazard, &mut rng)
        .is_none());
}

#[test]
fn spawner_interval_is_strict() {
    let tuning = Tuning::default();
    let mut spawner = Spawner::new(ObjectKind::Hazard, 0);
    assert!(spawner
        .maybe_spawn(1500, &tuning.playfield, &tuning.hazard, &mut seeded_rng())
        .is_none());
}

#[test]
fn spawned_hazard_within_ranges() {
    let tuning = Tuning::default();
    let mut rng = seeded_rng();
    let mut spawner = Spawner::new(ObjectKind::Hazard, 0);
    for i in 1..=200u64 {
        let h = spawner
            .maybe_spawn(i * 1501, &tuning.playfield, &tuning.hazard, &mut rng)
            .unwrap();
        assert!(h.x >= 0.0 && h.x < 760.0);
        assert_eq!(h.y, -40.0);
        assert_eq!(h.size, 40.0);
        assert!(h.speed >= 3.0 && h.speed < 5.0);
    }
}

#[test]
fn spawned_bonus_within_ranges() {
    let tuning = Tuning::default();
    let mut rng = seeded_rng();
    let mut spawner = Spawner::new(ObjectKind::Bonus, 0);
    for i in 1..=200u64 {
        let b = spawner
            .maybe_spawn(i * 2001, &tuning.playfield, &tuning.bonus, &mut rng)
            .unwrap();
        assert_eq!(b.kind, ObjectKind::Bonus);
        assert!(b.x >= 0.0 && b.x < 770.0);
        assert_eq!(b.y, -30.0);
        assert!(b.speed >= 2.0 && b.speed < 5.0);
    }
}

// ── tick — spawning ───────────────────────────────────────────────────────────

#[test]
fn tick_increments_counter() {
    let mut s = make_state();
    tick(&mut s, &KeyState::new(), 0, &mut seeded_rng());
    tick(&mut s, &KeyState::new(), 16, &mut seeded_rng());
    assert_eq!(s.tick_count, 2);
}

#[test]
fn tick_spawns_on_independent_clocks() {
    let mut s = make_state();
    let mut rng = seeded_rng();

    tick(&mut s, &KeyState::new(), 1501, &mut rng);
    assert_eq!(s.hazards.len(), 1);
    assert!(s.bonuses.is_empty());

    tick(&mut s, &KeyState::new(), 2001, &mut rng);
    assert_eq!(s.hazards.len(), 1);
    assert_eq!(s.bonuses.len(), 1);
    assert_eq!(s.hazard_spawner.last_spawn_ms, 1501);
    assert_eq!(s.bonus_spawner.last_spawn_ms, 2001);
}

#[test]
fn tick_moves_new_spawn_in_same_step() {
    let mut s = make_state();
    tick(&mut s, &KeyState::new(), 1501, &mut seeded_rng());
    let h = &s.hazards[0];
    assert_eq!(h.y, -40.0 + h.speed);
}

// ── tick — bonuses ────────────────────────────────────────────────────────────

#[test]
fn tick_collects_overlapping_bonus() {
    let mut s = make_state(); // player box (375, 520, 50, 50)
    s.bonuses.push(object(ObjectKind::Bonus, 380.0, 520.0, 2.0));
    let events = tick(&mut s, &KeyState::new(), 0, &mut seeded_rng());

    assert!(s.bonuses.is_empty());
    assert_eq!(s.score, 10);
    assert_eq!(
        events,
        vec![GameEvent::Collected, GameEvent::ScoreChanged(10)]
    );
}

#[test]
fn tick_collects_each_bonus_once() {
    let mut s = make_state();
    s.bonuses.push(object(ObjectKind::Bonus, 380.0, 520.0, 2.0));
    s.bonuses.push(object(ObjectKind::Bonus, 390.0, 530.0, 2.0));
    s.bonuses.push(object(ObjectKind::Bonus, 0.0, 0.0, 2.0)); // far away
    let events = tick(&mut s, &KeyState::new(), 0, &mut seeded_rng());

    assert_eq!(s.score, 20);
    assert_eq!(count(&events, &GameEvent::Collected), 2);
    assert_eq!(s.bonuses.len(), 1);
    assert_eq!(s.bonuses[0].y, 2.0); // moved exactly once
}

#[test]
fn tick_bonus_keeps_falling_when_missed() {
    let mut s = make_state();
    s.bonuses.push(object(ObjectKind::Bonus, 10.0, 100.0, 4.0));
    let events = tick(&mut s, &KeyState::new(), 0, &mut seeded_rng());
    assert!(events.is_empty());
    assert_eq!(s.bonuses[0].y, 104.0);
    assert_eq!(s.score, 0);
}

#[test]
fn tick_adds_reward_to_running_score() {
    let mut s = make_state();
    s.score = 40;
    s.bonuses.push(object(ObjectKind::Bonus, 380.0, 520.0, 2.0));
    let events = tick(&mut s, &KeyState::new(), 0, &mut seeded_rng());
    assert_eq!(s.score, 50);
    assert_eq!(count(&events, &GameEvent::ScoreChanged(50)), 1);
}

// ── tick — hazards ────────────────────────────────────────────────────────────

#[test]
fn tick_hazard_collision_resets_session() {
    let mut s = make_state();
    s.score = 30;
    s.player.x = 100.0;
    s.player.y = 300.0;
    s.hazards.push(object(ObjectKind::Hazard, 110.0, 280.0, 3.0));
    s.hazards.push(object(ObjectKind::Hazard, 600.0, 10.0, 3.0));
    s.bonuses.push(object(ObjectKind::Bonus, 700.0, 10.0, 2.0));

    let events = tick(&mut s, &KeyState::new(), 0, &mut seeded_rng());

    assert_eq!(s.score, 0);
    assert!(s.hazards.is_empty());
    assert!(s.bonuses.is_empty());
    assert_eq!((s.player.x, s.player.y), (375.0, 520.0));
    assert_eq!(
        events,
        vec![GameEvent::Collision, GameEvent::ScoreChanged(0)]
    );
}

#[test]
fn tick_two_hazards_reset_once() {
    let mut s = make_state();
    s.score = 70;
    s.hazards.push(object(ObjectKind::Hazard, 380.0, 500.0, 3.0));
    s.hazards.push(object(ObjectKind::Hazard, 390.0, 510.0, 4.0));

    let events = tick(&mut s, &KeyState::new(), 0, &mut seeded_rng());

    assert_eq!(count(&events, &GameEvent::Collision), 1);
    assert_eq!(count(&events, &GameEvent::ScoreChanged(0)), 1);
    assert!(s.hazards.is_empty());
}

#[test]
fn tick_collision_cancels_boost() {
    let mut s = make_state();
    s.player.boosted = true;
    s.player.boost_started_ms = 0;
    s.hazards.push(object(ObjectKind::Hazard, 380.0, 500.0, 3.0));

    tick(&mut s, &KeyState::new(), 100, &mut seeded_rng());

    assert!(!s.player.boosted);
    assert_eq!(s.player.speed(), 5.0);
}

#[test]
fn tick_collects_before_hazard_reset() {
    let mut s = make_state();
    s.bonuses.push(object(ObjectKind::Bonus, 380.0, 520.0, 2.0));
    s.hazards.push(object(ObjectKind::Hazard, 380.0, 500.0, 3.0));

    let events = tick(&mut s, &KeyState::new(), 0, &mut seeded_rng());

    assert_eq!(
        events,
        vec![
            GameEvent::Collected,
            GameEvent::ScoreChanged(10),
            GameEvent::Collision,
            GameEvent::ScoreChanged(0),
        ]
    );
    assert_eq!(s.score, 0);
}

#[test]
fn tick_collision_uses_moved_player() {
    let mut s = make_state();
    // Hazard sits just left of the player; moving left runs into it.
    s.hazards.push(object(ObjectKind::Hazard, 332.0, 520.0, 0.5));
    let events = tick(&mut s, &keys(&[Key::Left]), 0, &mut seeded_rng());
    assert_eq!(count(&events, &GameEvent::Collision), 1);
}

// ── tick — pruning ────────────────────────────────────────────────────────────

#[test]
fn tick_prunes_objects_below_playfield_silently() {
    let mut s = make_state();
    s.player.x = 0.0;
    s.player.y = 550.0;
    s.hazards.push(object(ObjectKind::Hazard, 10.0, 601.0, 3.0));
    s.bonuses.push(object(ObjectKind::Bonus, 10.0, 599.0, 2.0));

    let events = tick(&mut s, &KeyState::new(), 0, &mut seeded_rng());

    assert!(events.is_empty());
    assert!(s.hazards.is_empty());
    assert!(s.bonuses.is_empty());
    assert_eq!(s.score, 0);
}

#[test]
fn tick_keeps_object_at_bottom_edge() {
    let mut s = make_state();
    s.hazards.push(object(ObjectKind::Hazard, 10.0, 597.0, 3.0)); // lands on 600
    tick(&mut s, &KeyState::new(), 0, &mut seeded_rng());
    assert_eq!(s.hazards.len(), 1);
}

#[test]
fn tick_prunes_without_skipping_neighbours() {
    let mut s = make_state();
    s.hazards.push(object(ObjectKind::Hazard, 10.0, 700.0, 3.0));
    s.hazards.push(object(ObjectKind::Hazard, 60.0, 700.0, 3.0));
    s.hazards.push(object(ObjectKind::Hazard, 110.0, 100.0, 3.0));
    s.hazards.push(object(ObjectKind::Hazard, 160.0, 700.0, 3.0));

    tick(&mut s, &KeyState::new(), 0, &mut seeded_rng());

    assert_eq!(s.hazards.len(), 1);
    assert_eq!(s.hazards[0].x, 110.0);
    assert_eq!(s.hazards[0].y, 103.0);
}
