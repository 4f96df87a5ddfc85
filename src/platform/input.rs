//! Keyboard input
//!
//! The host forwards key down/up events here; once per frame the held set is
//! turned into a `TickInput`. Edge detection happens inside the simulation.

use std::collections::HashSet;

use crate::sim::{PlayerControls, PlayerSlot, TickInput};

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    D,
    F,
    B,
    R,
    Up,
    Left,
    Right,
    RightShift,
    Enter,
}

impl Key {
    /// Parse a DOM-style key name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "w" | "W" => Some(Key::W),
            "a" | "A" => Some(Key::A),
            "d" | "D" => Some(Key::D),
            "f" | "F" => Some(Key::F),
            "b" | "B" => Some(Key::B),
            "r" | "R" => Some(Key::R),
            "ArrowUp" => Some(Key::Up),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ShiftRight" => Some(Key::RightShift),
            "Enter" | " " => Some(Key::Enter),
            _ => None,
        }
    }
}

/// Key bindings for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlScheme {
    pub left: Key,
    pub right: Key,
    pub jump: Key,
    pub fire: Key,
}

impl ControlScheme {
    /// Player one: WASD, fire on F
    pub const WASD: Self = Self {
        left: Key::A,
        right: Key::D,
        jump: Key::W,
        fire: Key::F,
    };

    /// Player two: arrows, fire on right shift
    pub const ARROWS: Self = Self {
        left: Key::Left,
        right: Key::Right,
        jump: Key::Up,
        fire: Key::RightShift,
    };

    pub fn for_slot(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::One => Self::WASD,
            PlayerSlot::Two => Self::ARROWS,
        }
    }

    pub fn read(&self, keys: &KeyboardState) -> PlayerControls {
        PlayerControls {
            left: keys.is_held(self.left),
            right: keys.is_held(self.right),
            jump: keys.is_held(self.jump),
            fire: keys.is_held(self.fire),
        }
    }
}

/// Currently held keys
#[derive(Debug, Clone)]
pub struct KeyboardState {
    held: HashSet<Key>,
    schemes: [ControlScheme; 2],
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self {
            held: HashSet::new(),
            schemes: [ControlScheme::WASD, ControlScheme::ARROWS],
        }
    }
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override one player's bindings
    pub fn set_scheme(&mut self, slot: PlayerSlot, scheme: ControlScheme) {
        self.schemes[slot.index()] = scheme;
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Forget everything (focus lost)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Snapshot for this frame
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            players: self.schemes.map(|scheme| scheme.read(self)),
            start: self.is_held(Key::Enter),
            bombs_only: self.is_held(Key::B),
            reset: self.is_held(Key::R),
        }
    }
}
