//! Enemy sprite systems.
//!
//! - [`refresh_enemy_sprites`] (re)creates the graphic when the enemy's
//!   sheet name or hue changes.
//! - [`update_enemy_sprites`] runs the frame selection state machine.
//! - [`prepare_enemy_sprites`] applies the blink, death and explosion
//!   effects before the render pass.
//! - [`on_monster_sprite_ready`] installs a loaded sheet; the file request
//!   dispatcher calls it.
use std::sync::Arc;

use bevy_ecs::prelude::*;
use log::debug;

use crate::bitmap::{Bitmap, BitmapRef};
use crate::components::enemysprite::{ANIMATED_MARKER, ENEMY_Z_BASE, EnemySprite};
use crate::components::gameenemy::GameEnemy;
use crate::components::projectedsprite::ProjectedSprite;
use crate::resources::asynchandler::{AsyncHandler, FileCategory, ReadyHandler};
use crate::resources::bitmapcache::BitmapCache;
use crate::resources::gamescreen::GameScreen;

/// Blink phase length; the sprite is hidden in the second half.
const BLINK_PERIOD: i32 = 10;
/// Opacity lost per remaining tick of the death fade.
const DEATH_FADE_STEP: i32 = 7;
/// Opacity lost per remaining tick of the explosion.
const EXPLODE_FADE_STEP: i32 = 12;
/// Length of the explosion zoom ramp.
const EXPLODE_ZOOM_TICKS: f64 = 20.0;
/// Opacity factor of transparent enemies, out of 255.
const TRANSPARENT_OPACITY: i32 = 160;

/// Create the graphic of new sprites and of sprites whose enemy changed
/// sheet or hue.
pub fn refresh_enemy_sprites(
    mut handler: ResMut<AsyncHandler>,
    enemies: Query<&GameEnemy>,
    mut sprites: Query<(Entity, &mut EnemySprite, &mut ProjectedSprite)>,
) {
    for (entity, mut sprite, mut projected) in sprites.iter_mut() {
        let Ok(enemy) = enemies.get(sprite.subject) else {
            projected.set_visible(false);
            continue;
        };
        let never_created = sprite.graphic.is_none() && sprite.binding.is_none();
        if never_created || sprite.needs_refresh(enemy) {
            create_sprite(entity, &mut sprite, &mut projected, enemy, &mut handler);
        }
    }
}

fn create_sprite(
    entity: Entity,
    sprite: &mut EnemySprite,
    projected: &mut ProjectedSprite,
    enemy: &GameEnemy,
    handler: &mut AsyncHandler,
) {
    sprite.sprite_name = enemy.sprite_name.clone();
    sprite.hue = enemy.hue;
    projected.set_x(enemy.display_x);
    projected.set_y(enemy.display_y);

    match EnemySprite::file_name(&sprite.sprite_name) {
        None => {
            sprite.animated = false;
            sprite.binding = None;
            let empty: BitmapRef = Arc::new(Bitmap::create(0, 0, true));
            sprite.graphic = Some(empty.clone());
            projected.set_ox(0);
            projected.set_oy(0);
            projected.set_bitmap(Some(empty));
            projected.set_z(ENEMY_Z_BASE + enemy.display_y);
        }
        Some(file) => {
            sprite.animated = sprite.sprite_name.starts_with(ANIMATED_MARKER);
            debug!("Requesting monster {} for {:?}", file, entity);
            let mut request = handler.request_file(FileCategory::Monster, &file);
            request.set_graphic_file(true);
            sprite.binding = Some(request.bind(ReadyHandler::MonsterSprite, entity));
            handler.start(request);
        }
    }
}

/// Install a loaded monster sheet, hue shifted through the cache.
pub fn on_monster_sprite_ready(
    sprite: &mut EnemySprite,
    projected: &mut ProjectedSprite,
    enemy: &GameEnemy,
    cache: &mut BitmapCache,
    base: BitmapRef,
) {
    let graphic = cache.hue_variant(&base, sprite.hue);
    let (ox, oy) = sprite.origin(graphic.width(), graphic.height());
    projected.set_ox(ox);
    projected.set_oy(oy);
    projected.set_bitmap(Some(graphic.clone()));
    sprite.graphic = Some(graphic);
    if let Some(rect) = sprite.frame_rect() {
        projected.set_src_rect(rect);
    }
    projected.set_z(ENEMY_Z_BASE + enemy.display_y);
}

/// Advance the frame selection of animated sheets.
pub fn update_enemy_sprites(
    enemies: Query<&GameEnemy>,
    mut sprites: Query<(&mut EnemySprite, &mut ProjectedSprite)>,
) {
    for (mut sprite, mut projected) in sprites.iter_mut() {
        let Ok(enemy) = enemies.get(sprite.subject) else {
            continue;
        };
        if sprite.advance(enemy).is_none() {
            continue;
        }
        if let Some(rect) = sprite.frame_rect() {
            projected.set_src_rect(rect);
        }
    }
}

/// Opacity and zoom for the enemy's current timers.
pub fn fade_effect(enemy: &GameEnemy) -> (u8, f64) {
    let mut alpha = 255;
    let mut zoom = 1.0;
    if enemy.death_timer > 0 {
        alpha = DEATH_FADE_STEP * enemy.death_timer;
    } else if enemy.explode_timer > 0 {
        alpha = EXPLODE_FADE_STEP * enemy.explode_timer;
        zoom = (EXPLODE_ZOOM_TICKS - enemy.explode_timer as f64) / EXPLODE_ZOOM_TICKS + 1.0;
    }
    if enemy.transparent {
        alpha = TRANSPARENT_OPACITY * alpha / 255;
    }
    (alpha.clamp(0, 255) as u8, zoom)
}

/// Whether the enemy is drawn at all this frame.
pub fn is_shown(enemy: &GameEnemy) -> bool {
    if !enemy.exists() && enemy.death_timer == 0 && enemy.explode_timer == 0 {
        return false;
    }
    enemy.blink_timer % BLINK_PERIOD < BLINK_PERIOD / 2
}

/// Per-draw preparation: visibility, fade, zoom, tone, position, flash
/// and facing.
pub fn prepare_enemy_sprites(
    screen: Res<GameScreen>,
    enemies: Query<&GameEnemy>,
    mut sprites: Query<(&EnemySprite, &mut ProjectedSprite)>,
) {
    for (sprite, mut projected) in sprites.iter_mut() {
        let Ok(enemy) = enemies.get(sprite.subject) else {
            continue;
        };
        if !is_shown(enemy) {
            projected.set_visible(false);
            continue;
        }
        projected.set_visible(true);

        let (opacity, zoom) = fade_effect(enemy);
        projected.set_opacity(opacity);
        projected.set_zoom_x(zoom);
        projected.set_zoom_y(zoom);
        projected.set_tone(screen.tone);
        projected.set_x(enemy.display_x);
        projected.set_y(enemy.display_y);
        projected.set_flash_effect(enemy.flash);
        projected.set_flip_x(sprite.flip_x(enemy));
    }
}
