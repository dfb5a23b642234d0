//! Event types and observers.
//!
//! Submodules:
//! - [`chipset`] – chipset switch that reloads tile mode character sprites
//! - [`enemyaction`] – start the action pose of an enemy sprite
//! - [`switchdebug`] – toggle the sprite outline overlay on/off
pub mod chipset;
pub mod enemyaction;
pub mod switchdebug;

use bevy_ecs::prelude::*;

/// Register every observer of this module on `world`.
pub fn add_observers(world: &mut World) {
    world.add_observer(chipset::chipset_changed_observer);
    world.add_observer(enemyaction::enemy_action_observer);
    world.add_observer(switchdebug::switch_debug_observer);
    world.flush();
}
