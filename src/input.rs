/// Logical keys the simulation understands, and the snapshot of which are held.
///
/// The host decides which physical keys map to which logical key; the
/// simulation only ever asks `is_pressed`.

use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Boost,
}

/// Pressed-state for one frame.  Built by the host before each tick and read
/// by the simulation, so it is never written while a step is running.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

impl FromIterator<Key> for KeyState {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        KeyState {
            held: iter.into_iter().collect(),
        }
    }
}
