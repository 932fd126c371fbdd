//! Keyboard/pointer input mapping and press tracking
//!
//! Browser events are translated into [`InputEvent`]s here. Press state is
//! tracked per key so auto-repeat keydowns collapse into one press.

use std::collections::HashSet;

use crate::consts::FULL_CHARGE_MS;
use crate::sim::{GameMode, HorizontalInput};

/// Keys the game reacts to, by `KeyboardEvent.code`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyW,
    KeyA,
    KeyD,
    Space,
}

impl Key {
    /// Map a `KeyboardEvent.code`; unknown codes are ignored
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "KeyW" => Some(Key::KeyW),
            "KeyA" => Some(Key::KeyA),
            "KeyD" => Some(Key::KeyD),
            "Space" => Some(Key::Space),
            _ => None,
        }
    }

    /// Whether the browser default (page scroll) should be suppressed
    pub fn blocks_scroll(&self) -> bool {
        matches!(
            self,
            Key::Space | Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
        )
    }

    /// Jump keys; Space only jumps in classic mode, where it is not the fire key
    pub fn is_jump(&self, mode: GameMode) -> bool {
        match self {
            Key::ArrowUp | Key::KeyW => true,
            Key::Space => mode == GameMode::Basic,
            _ => false,
        }
    }

    pub fn is_charge(&self, mode: GameMode) -> bool {
        *self == Key::Space && mode == GameMode::Advanced
    }
}

/// Where a pointer or touch landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The canvas itself: jump / start
    Playfield,
    /// The on-screen fire button: charge and release
    FireButton,
}

/// A host input event; touch start/end arrive as pointer down/up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerDown(PointerTarget),
    PointerUp(PointerTarget),
}

/// Held keys and the in-flight charge
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<Key>,
    /// Wall-clock time (ms) the current charge began
    charge_started_at: Option<f64>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns false for an auto-repeat of a held key.
    pub fn press(&mut self, key: Key) -> bool {
        self.pressed.insert(key)
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Held directions for the next tick
    pub fn horizontal(&self) -> HorizontalInput {
        HorizontalInput {
            left: self.is_pressed(Key::ArrowLeft) || self.is_pressed(Key::KeyA),
            right: self.is_pressed(Key::ArrowRight) || self.is_pressed(Key::KeyD),
        }
    }

    /// Begin charging unless a charge is already in progress
    pub fn begin_charge(&mut self, now_ms: f64) -> bool {
        if self.is_charging() {
            return false;
        }
        self.charge_started_at = Some(now_ms);
        true
    }

    /// End the charge, returning how long it was held
    pub fn release_charge(&mut self, now_ms: f64) -> Option<f64> {
        self.charge_started_at
            .take()
            .map(|started| (now_ms - started).max(0.0))
    }

    pub fn is_charging(&self) -> bool {
        self.charge_started_at.is_some()
    }

    /// Charge meter fill, 0-100 (full at one power unit)
    pub fn charge_percent(&self, now_ms: f64) -> f32 {
        match self.charge_started_at {
            Some(started) => {
                (((now_ms - started).max(0.0) / FULL_CHARGE_MS) * 100.0).min(100.0) as f32
            }
            None => 0.0,
        }
    }

    /// Drop all held keys and any charge (new run)
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.charge_started_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code("Space"), Some(Key::Space));
        assert_eq!(Key::from_code("KeyD"), Some(Key::KeyD));
        assert_eq!(Key::from_code("KeyQ"), None);
        assert_eq!(Key::from_code(""), None);
    }

    #[test]
    fn test_space_role_depends_on_mode() {
        assert!(Key::Space.is_jump(GameMode::Basic));
        assert!(!Key::Space.is_jump(GameMode::Advanced));
        assert!(Key::Space.is_charge(GameMode::Advanced));
        assert!(Key::KeyW.is_jump(GameMode::Advanced));
    }

    #[test]
    fn test_repeat_press_is_idempotent() {
        let mut input = InputState::new();
        assert!(input.press(Key::ArrowLeft));
        assert!(!input.press(Key::ArrowLeft));
        assert!(input.horizontal().left);
        input.release(Key::ArrowLeft);
        assert!(!input.horizontal().left);
        assert!(input.press(Key::ArrowLeft));
    }

    #[test]
    fn test_charge_cycle() {
        let mut input = InputState::new();
        assert!(!input.is_charging());
        assert!(input.begin_charge(1000.0));
        assert!(input.is_charging());
        assert!(!input.begin_charge(1200.0));
        assert!((input.charge_percent(1300.0) - 50.0).abs() < 1e-3);
        assert_eq!(input.charge_percent(5000.0), 100.0);
        assert_eq!(input.release_charge(1600.0), Some(600.0));
        assert_eq!(input.release_charge(1700.0), None);
        assert!(!input.is_charging());
        assert_eq!(input.charge_percent(1700.0), 0.0);
    }
}
