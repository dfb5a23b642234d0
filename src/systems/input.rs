//! Input system.
//!
//! [`update_input_state`] reads the demo keys from raylib each frame into
//! [`InputState`] and toggles debug mode on F11.
use bevy_ecs::prelude::*;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;

/// Poll raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    for key in input.keys_mut() {
        key.active = rl.is_key_down(key.key_binding);
        key.just_pressed = rl.is_key_pressed(key.key_binding);
    }
    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}
