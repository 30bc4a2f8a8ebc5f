//! Host input collected between frames and drained by the frame loop.

use crate::constants::{KEY_NUDGE, KEY_SLOW_DOWN, KEY_SPEED_UP};
use smallvec::SmallVec;

/// Single-step momentum impulse: `m = m * mult + add` for every star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyboardImpulse {
    pub mult_x: f32,
    pub mult_y: f32,
    pub add_x: f32,
    pub add_y: f32,
}

impl Default for KeyboardImpulse {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl KeyboardImpulse {
    pub const NEUTRAL: KeyboardImpulse = KeyboardImpulse {
        mult_x: 1.0,
        mult_y: 1.0,
        add_x: 0.0,
        add_y: 0.0,
    };

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    #[inline]
    pub fn apply(&self, momentum_x: &mut f32, momentum_y: &mut f32) {
        *momentum_x = *momentum_x * self.mult_x + self.add_x;
        *momentum_y = *momentum_y * self.mult_y + self.add_y;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyCommand {
    Nudge { x: f32, y: f32 },
    ScaleMomentum(f32),
    InvertDrift,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Pointer {
        x: f32,
        y: f32,
        time_ms: f64,
        gesture_start: bool,
    },
    Key(KeyCommand),
}

#[inline]
pub fn command_for_key(key: &str) -> Option<KeyCommand> {
    let half = KEY_NUDGE / 2.0;
    let cmd = match key.to_ascii_lowercase().as_str() {
        "w" => KeyCommand::Nudge { x: 0.0, y: -KEY_NUDGE },
        "a" => KeyCommand::Nudge { x: -KEY_NUDGE, y: 0.0 },
        "s" => KeyCommand::Nudge { x: 0.0, y: KEY_NUDGE },
        "d" => KeyCommand::Nudge { x: KEY_NUDGE, y: 0.0 },
        "q" => KeyCommand::Nudge { x: -half, y: -half },
        "e" => KeyCommand::Nudge { x: half, y: -half },
        "z" => KeyCommand::Nudge { x: -half, y: half },
        "x" => KeyCommand::Nudge { x: half, y: half },
        "g" => KeyCommand::ScaleMomentum(KEY_SPEED_UP),
        "v" => KeyCommand::ScaleMomentum(KEY_SLOW_DOWN),
        "p" => KeyCommand::InvertDrift,
        _ => return None,
    };
    Some(cmd)
}

/// Events pushed by host callbacks, kept in arrival order.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: SmallVec<[InputEvent; 16]>,
}

impl InputQueue {
    pub fn push(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every queued event, leaving the queue empty.
    pub fn drain(&mut self) -> SmallVec<[InputEvent; 16]> {
        std::mem::take(&mut self.events)
    }
}
