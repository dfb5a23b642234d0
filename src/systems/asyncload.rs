//! Completion dispatch for asynchronous file requests.
//!
//! [`dispatch_file_requests`] drains finished requests from the
//! [`AsyncHandler`], decodes the graphic through the [`BitmapCache`] and
//! hands it to the sprite that asked for it. A completion is applied only
//! when its binding is still the one the sprite holds; anything else is
//! stale and dropped.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::charactersprite::CharacterSprite;
use crate::components::enemysprite::EnemySprite;
use crate::components::gamecharacter::GameCharacter;
use crate::components::gameenemy::GameEnemy;
use crate::components::projectedsprite::ProjectedSprite;
use crate::resources::asynchandler::{AsyncHandler, FileRequestBinding, ReadyHandler};
use crate::resources::bitmapcache::BitmapCache;
use crate::systems::charactersprite::{on_char_sprite_ready, on_tile_sprite_ready, sync_visibility};
use crate::systems::enemysprite::on_monster_sprite_ready;

/// Accept `binding` if it is the sprite's live one, clearing it.
fn take_binding(live: &mut Option<FileRequestBinding>, binding: FileRequestBinding) -> bool {
    if *live == Some(binding) {
        *live = None;
        true
    } else {
        false
    }
}

/// Deliver finished file requests to their sprites.
pub fn dispatch_file_requests(
    mut handler: ResMut<AsyncHandler>,
    mut cache: ResMut<BitmapCache>,
    characters: Query<&GameCharacter>,
    enemies: Query<&GameEnemy>,
    mut char_sprites: Query<(&mut CharacterSprite, &mut ProjectedSprite)>,
    mut enemy_sprites: Query<(&mut EnemySprite, &mut ProjectedSprite), Without<CharacterSprite>>,
) {
    for result in handler.poll() {
        for binding in result.bindings.iter().copied() {
            match binding.handler {
                ReadyHandler::CharSprite | ReadyHandler::TileSprite => {
                    let Ok((mut sprite, mut projected)) = char_sprites.get_mut(binding.target)
                    else {
                        debug!("Dropping {} for despawned sprite {:?}", result.file, binding.target);
                        continue;
                    };
                    if !take_binding(&mut sprite.binding, binding) {
                        debug!(
                            "Dropping stale {} (request {}) for {:?}",
                            result.file, binding.request_id, binding.target
                        );
                        continue;
                    }
                    if binding.handler == ReadyHandler::CharSprite {
                        let charset = cache.charset(&result.file, result.path.as_deref());
                        on_char_sprite_ready(&mut sprite, &mut projected, charset);
                    } else {
                        cache.chipset(&result.file, result.path.as_deref());
                        let tile = cache.tile(&result.file, sprite.tile_id);
                        on_tile_sprite_ready(&sprite, &mut projected, tile);
                    }
                    if let Ok(character) = characters.get(sprite.subject) {
                        sync_visibility(&sprite, &mut projected, character);
                    }
                }
                ReadyHandler::MonsterSprite => {
                    let Ok((mut sprite, mut projected)) = enemy_sprites.get_mut(binding.target)
                    else {
                        debug!("Dropping {} for despawned sprite {:?}", result.file, binding.target);
                        continue;
                    };
                    if !take_binding(&mut sprite.binding, binding) {
                        debug!(
                            "Dropping stale {} (request {}) for {:?}",
                            result.file, binding.request_id, binding.target
                        );
                        continue;
                    }
                    let Ok(enemy) = enemies.get(sprite.subject) else {
                        continue;
                    };
                    let base = cache.monster(&result.file, result.path.as_deref());
                    on_monster_sprite_ready(&mut sprite, &mut projected, enemy, &mut cache, base);
                }
            }
        }
    }
}
