//! Per-frame keyboard input resource.
//!
//! Captures the keys the demo reacts to and exposes them to systems via the
//! [`InputState`] resource.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

/// Key state with its keyboard binding.
#[derive(Debug, Clone, Copy)]
pub struct BoolState {
    /// Key is held this frame.
    pub active: bool,
    /// Key went down this frame.
    pub just_pressed: bool,
    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            key_binding,
        }
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound_to(KeyboardKey::KEY_NULL)
    }
}

/// Demo controls.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub toggle_mode7: BoolState,
    pub yaw_left: BoolState,
    pub yaw_right: BoolState,
    pub slant_up: BoolState,
    pub slant_down: BoolState,
    pub enemy_action: BoolState,
    pub enemy_damage: BoolState,
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            toggle_mode7: BoolState::bound_to(KeyboardKey::KEY_M),
            yaw_left: BoolState::bound_to(KeyboardKey::KEY_LEFT),
            yaw_right: BoolState::bound_to(KeyboardKey::KEY_RIGHT),
            slant_up: BoolState::bound_to(KeyboardKey::KEY_UP),
            slant_down: BoolState::bound_to(KeyboardKey::KEY_DOWN),
            enemy_action: BoolState::bound_to(KeyboardKey::KEY_A),
            enemy_damage: BoolState::bound_to(KeyboardKey::KEY_H),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
        }
    }
}

impl InputState {
    /// Every key state, for bulk polling.
    pub fn keys_mut(&mut self) -> [&mut BoolState; 8] {
        [
            &mut self.toggle_mode7,
            &mut self.yaw_left,
            &mut self.yaw_right,
            &mut self.slant_up,
            &mut self.slant_down,
            &mut self.enemy_action,
            &mut self.enemy_damage,
            &mut self.mode_debug,
        ]
    }
}
