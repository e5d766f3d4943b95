/// The game loop: one simulation step then one render per host tick.
///
/// The host owns everything platform-specific (clock, keyboard, screen,
/// speaker).  It hands the loop one `Frame` per display refresh and the loop
/// never asks for the next frame until the current one is fully processed.

use std::io;

use rand::Rng;

use crate::compute::tick;
use crate::entities::{GameEvent, Sound, World};
use crate::input::KeyState;
use crate::render::{render, Canvas};

/// Input for one tick: the current time and a snapshot of the held keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub now_ms: u64,
    pub keys: KeyState,
}

/// Audio and score-display collaborators.  Calls are best-effort: the loop
/// logs a failure and carries on.
pub trait Notifier {
    fn play(&mut self, sound: Sound) -> io::Result<()>;
    fn set_displayed_score(&mut self, score: u32) -> io::Result<()>;
}

pub trait Host: Canvas + Notifier {
    /// Wait for the next refresh.  `Ok(None)` means the host is shutting down.
    fn next_frame(&mut self) -> io::Result<Option<Frame>>;
}

fn play<N: Notifier + ?Sized>(notifier: &mut N, sound: Sound) {
    if let Err(e) = notifier.play(sound) {
        log::warn!("could not play {:?}: {}", sound, e);
    }
}

fn show_score<N: Notifier + ?Sized>(notifier: &mut N, score: u32) {
    if let Err(e) = notifier.set_displayed_score(score) {
        log::warn!("could not update score display: {}", e);
    }
}

/// Forward step notifications to the collaborators.
pub fn dispatch<N: Notifier + ?Sized>(notifier: &mut N, events: &[GameEvent]) {
    for event in events {
        if let Some(sound) = event.sound() {
            play(notifier, sound);
        }
        if let GameEvent::ScoreChanged(score) = event {
            show_score(notifier, *score);
        }
    }
}

/// One full tick: simulate, notify, draw.
pub fn run_tick<H: Host + ?Sized>(
    world: &mut World,
    host: &mut H,
    frame: &Frame,
    rng: &mut impl Rng,
) -> io::Result<Vec<GameEvent>> {
    let events = tick(world, &frame.keys, frame.now_ms, rng);
    dispatch(host, &events);
    render(host, world)?;
    Ok(events)
}

/// Run until the host stops.  Returns how many ticks were played.
pub fn start<H: Host + ?Sized>(
    world: &mut World,
    host: &mut H,
    rng: &mut impl Rng,
) -> io::Result<u64> {
    log::info!(
        "starting on a {}x{} playfield",
        world.tuning.playfield.width,
        world.tuning.playfield.height
    );
    play(host, Sound::Music);
    show_score(host, world.score);

    let mut ticks = 0;
    while let Some(frame) = host.next_frame()? {
        run_tick(world, host, &frame, rng)?;
        ticks += 1;
    }

    log::info!("stopped after {} ticks, score {}", ticks, world.score);
    Ok(ticks)
}
