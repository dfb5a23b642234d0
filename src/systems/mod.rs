//! Engine systems.
//!
//! Submodules overview
//! - [`asyncload`] – deliver finished file requests to the sprites bound to them
//! - [`charactersprite`] – identity tracking and draw preparation of map characters
//! - [`enemysprite`] – graphic refresh, frame selection and draw effects of battle enemies
//! - [`gameconfig`] – apply configuration changes to surface and window
//! - [`input`] – read hardware input into [`crate::resources::input::InputState`]
//! - [`render`] – composite sprites into the surface and present it
//!
//! Per frame the sprite systems run in this order: identity/animation
//! update, completion dispatch, draw preparation, composite.

pub mod asyncload;
pub mod charactersprite;
pub mod enemysprite;
pub mod gameconfig;
pub mod input;
pub mod render;

use bevy_ecs::prelude::*;

use crate::systems::asyncload::dispatch_file_requests;
use crate::systems::charactersprite::{prepare_character_sprites, update_character_sprites};
use crate::systems::enemysprite::{
    prepare_enemy_sprites, refresh_enemy_sprites, update_enemy_sprites,
};
use crate::systems::render::render_sprites;

/// Add the sprite pipeline to `schedule`, chained in frame order.
pub fn add_sprite_systems(schedule: &mut Schedule) {
    schedule.add_systems(
        (
            update_character_sprites,
            refresh_enemy_sprites,
            update_enemy_sprites,
            dispatch_file_requests,
            prepare_character_sprites,
            prepare_enemy_sprites,
            render_sprites,
        )
            .chain(),
    );
}
