//! Character sprite systems.
//!
//! - [`update_character_sprites`] follows the character's graphic identity
//!   and issues file requests when it changes.
//! - [`prepare_character_sprites`] writes frame, effects, projected position
//!   and bush depth into the [`ProjectedSprite`] before the render pass.
//! - [`on_char_sprite_ready`] and [`on_tile_sprite_ready`] install a loaded
//!   graphic; the file request dispatcher calls them.
use std::sync::Arc;

use bevy_ecs::prelude::*;
use log::debug;

use crate::bitmap::{Bitmap, BitmapRef, Rect};
use crate::components::charactersprite::CharacterSprite;
use crate::components::gamecharacter::GameCharacter;
use crate::components::projectedsprite::ProjectedSprite;
use crate::projection::{ScreenPoint, bush_depth, project};
use crate::resources::asynchandler::{AsyncHandler, FileCategory, ReadyHandler};
use crate::resources::gamemap::GameMap;
use crate::resources::mode7camera::Mode7Camera;
use crate::resources::screensize::ScreenSize;
use crate::spritesheet::character_rect;

/// Size of the blank tile used when the map has no chipset.
const BLANK_TILE_SIZE: i32 = 16;

/// Re-request graphics whose identity changed and copy visibility and z.
///
/// Sprites whose subject no longer exists are hidden.
pub fn update_character_sprites(
    mut handler: ResMut<AsyncHandler>,
    map: Res<GameMap>,
    characters: Query<&GameCharacter>,
    mut sprites: Query<(Entity, &mut CharacterSprite, &mut ProjectedSprite)>,
) {
    for (entity, mut sprite, mut projected) in sprites.iter_mut() {
        let Ok(character) = characters.get(sprite.subject) else {
            projected.set_visible(false);
            continue;
        };
        if sprite.needs_refresh(character) {
            sprite.sync_identity(character);
            request_graphic(entity, &mut sprite, &mut projected, &mut handler, &map);
        }
        sync_visibility(&sprite, &mut projected, character);
    }
}

fn request_graphic(
    entity: Entity,
    sprite: &mut CharacterSprite,
    projected: &mut ProjectedSprite,
    handler: &mut AsyncHandler,
    map: &GameMap,
) {
    if sprite.uses_charset() {
        debug!(
            "Requesting charset {} #{} for {:?}",
            sprite.character_name, sprite.character_index, entity
        );
        let mut request = handler.request_file(FileCategory::CharSet, &sprite.character_name);
        request.set_graphic_file(true);
        sprite.binding = Some(request.bind(ReadyHandler::CharSprite, entity));
        handler.start(request);
    } else if map.chipset_name.is_empty() {
        // nothing to load; a pending request must not land later
        sprite.binding = None;
        let blank = Arc::new(Bitmap::create(BLANK_TILE_SIZE, BLANK_TILE_SIZE, true));
        on_tile_sprite_ready(sprite, projected, blank);
    } else {
        debug!(
            "Requesting chipset {} for tile {} of {:?}",
            map.chipset_name, sprite.tile_id, entity
        );
        let mut request = handler.request_file(FileCategory::ChipSet, &map.chipset_name);
        request.set_graphic_file(true);
        sprite.binding = Some(request.bind(ReadyHandler::TileSprite, entity));
        handler.start(request);
    }
}

/// Copy visibility and draw order from the character.
pub fn sync_visibility(
    sprite: &CharacterSprite,
    projected: &mut ProjectedSprite,
    character: &GameCharacter,
) {
    projected.set_visible(character.visible);
    projected.set_z(character.screen_z(sprite.y_offset));
}

/// Install a loaded charset: pick the character cell and derive pose size
/// and origin from it.
pub fn on_char_sprite_ready(
    sprite: &mut CharacterSprite,
    projected: &mut ProjectedSprite,
    charset: BitmapRef,
) {
    let cell = character_rect(
        &sprite.character_name,
        sprite.character_index,
        charset.rect(),
        &sprite.settings,
    );
    projected.set_bitmap(Some(charset));
    sprite.chara_width = cell.rect.width / 3;
    sprite.chara_height = cell.rect.height / 4;
    projected.set_ox(sprite.chara_width / 2);
    projected.set_oy(sprite.chara_height);
    projected.set_sprite_rect(cell.rect);
}

/// Install a single chipset tile, anchored at its bottom centre.
pub fn on_tile_sprite_ready(
    sprite: &CharacterSprite,
    projected: &mut ProjectedSprite,
    tile: BitmapRef,
) {
    let t = sprite.settings.tile_size;
    projected.set_bitmap(Some(tile));
    projected.set_src_rect(Rect::new(0, 0, t, t));
    projected.set_ox(t / 2);
    projected.set_oy(t);
}

/// Per-draw preparation: pose, flash, opacity, projection and bush depth.
///
/// Sprites the tilted camera projects past the horizon are hidden.
pub fn prepare_character_sprites(
    camera: Res<Mode7Camera>,
    screen: Res<ScreenSize>,
    characters: Query<&GameCharacter>,
    mut sprites: Query<(&CharacterSprite, &mut ProjectedSprite)>,
) {
    for (sprite, mut projected) in sprites.iter_mut() {
        let Ok(character) = characters.get(sprite.subject) else {
            continue;
        };
        if sprite.uses_charset() {
            projected.set_src_rect(sprite.frame_rect(character));
        }
        projected.set_flash_effect(character.flash);
        projected.set_opacity(character.opacity);

        let point = ScreenPoint {
            x: character.screen_x(),
            y_ground: character.screen_y(false),
            y_head: character.screen_y(true),
        };
        let viewport = screen.viewport(sprite.settings.tile_size);
        let p = project(point, (sprite.x_offset, sprite.y_offset), &camera, &viewport);
        if !(p.zoom.is_finite() && p.zoom > 0.0) {
            // beyond the horizon
            projected.set_visible(false);
            continue;
        }
        projected.set_x(p.x);
        projected.set_y(p.y);
        projected.set_zoom_x(p.zoom);
        projected.set_zoom_y(p.zoom);

        let height = projected.height();
        projected.set_bush_depth(bush_depth(height, character.bush_depth));
    }
}
