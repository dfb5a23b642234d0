//! Demo scene setup and simulation.
//!
//! A [`Scene`] lists the map characters and battle enemies to show. It is
//! read from JSON (`--scene`) or falls back to [`Scene::default`]. The
//! [`simulate`] system stands in for the game logic: it walks characters,
//! ticks enemy timers and reacts to the demo keys.

use std::path::Path;

use bevy_ecs::prelude::*;
use log::info;
use serde::{Deserialize, Serialize};

use crate::components::charactersprite::CharacterSprite;
use crate::components::enemysprite::EnemySprite;
use crate::components::gamecharacter::{Facing, GameCharacter};
use crate::components::gameenemy::GameEnemy;
use crate::components::projectedsprite::ProjectedSprite;
use crate::events::enemyaction::EnemyActionEvent;
use crate::resources::asynchandler::{AsyncHandler, LoadMode};
use crate::resources::battle::{Battle, BattleCondition};
use crate::resources::bitmapcache::BitmapCache;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamemap::GameMap;
use crate::resources::gamescreen::GameScreen;
use crate::resources::input::InputState;
use crate::resources::mode7camera::Mode7Camera;
use crate::resources::screensize::ScreenSize;
use crate::resources::screensurface::ScreenSurface;
use crate::resources::spriteserial::SpriteSerial;

const YAW_STEP: i32 = 2;
const MIN_SLANT: i32 = 1;
const MAX_SLANT: i32 = 200;

/// One map character of a scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterDesc {
    /// Charset name; empty to draw `tile_id` from the chipset instead.
    pub sheet: String,
    pub index: i32,
    pub tile_id: i32,
    pub x: i32,
    pub y: i32,
    pub facing: Facing,
    /// Ticks per walking step; 0 stands still.
    pub walk_period: i32,
}

impl Default for CharacterDesc {
    fn default() -> Self {
        Self {
            sheet: String::new(),
            index: 0,
            tile_id: 0,
            x: 0,
            y: 0,
            facing: Facing::Down,
            walk_period: 0,
        }
    }
}

/// One battle enemy of a scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyDesc {
    pub sprite: String,
    pub hue: i32,
    pub hp: i32,
    pub x: i32,
    pub y: i32,
    pub transparent: bool,
}

impl Default for EnemyDesc {
    fn default() -> Self {
        Self {
            sprite: String::new(),
            hue: 0,
            hp: 100,
            x: 0,
            y: 0,
            transparent: false,
        }
    }
}

/// Everything the demo spawns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub chipset: String,
    pub battle_condition: BattleCondition,
    pub characters: Vec<CharacterDesc>,
    pub enemies: Vec<EnemyDesc>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            chipset: "world".to_string(),
            battle_condition: BattleCondition::None,
            characters: vec![
                CharacterDesc {
                    sheet: "hero".to_string(),
                    x: 104,
                    y: 136,
                    walk_period: 12,
                    ..Default::default()
                },
                CharacterDesc {
                    sheet: "townsfolk".to_string(),
                    index: 3,
                    x: 152,
                    y: 120,
                    facing: Facing::Left,
                    walk_period: 16,
                    ..Default::default()
                },
                CharacterDesc {
                    tile_id: 10001,
                    x: 200,
                    y: 152,
                    ..Default::default()
                },
            ],
            enemies: vec![
                EnemyDesc {
                    sprite: "%bat".to_string(),
                    x: 64,
                    y: 72,
                    ..Default::default()
                },
                EnemyDesc {
                    sprite: "%bat".to_string(),
                    hue: 120,
                    x: 120,
                    y: 64,
                    ..Default::default()
                },
                EnemyDesc {
                    sprite: "slime".to_string(),
                    hue: 240,
                    hp: 40,
                    x: 256,
                    y: 80,
                    transparent: true,
                },
            ],
        }
    }
}

impl Scene {
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scene {}: {}", path.display(), e))?;
        Self::from_json(&text)
            .map_err(|e| format!("Failed to parse scene {}: {}", path.display(), e))
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| e.to_string())
    }
}

/// Walks a character in place, turning now and then.
#[derive(Component, Debug, Clone, Copy)]
pub struct Walker {
    pub period: i32,
    pub ticks: i32,
    pub steps: i32,
}

impl Walker {
    pub fn new(period: i32) -> Self {
        Self {
            period: period.max(1),
            ticks: 0,
            steps: 0,
        }
    }

    fn tick(&mut self, character: &mut GameCharacter) {
        self.ticks += 1;
        if self.ticks < self.period {
            return;
        }
        self.ticks = 0;
        self.steps += 1;
        character.anim_frame = character.anim_frame.next();
        if self.steps % 8 == 0 {
            character.facing = match character.facing {
                Facing::Down => Facing::Left,
                Facing::Left => Facing::Up,
                Facing::Up => Facing::Right,
                Facing::Right => Facing::Down,
            };
        }
    }
}

/// Insert every resource the sprite systems need, built from `config`.
pub fn insert_resources(world: &mut World, config: GameConfig, mode: LoadMode) {
    let (w, h) = (config.render_width as i32, config.render_height as i32);
    world.insert_resource(ScreenSize { w, h });
    world.insert_resource(ScreenSurface::new(w, h));
    world.insert_resource(AsyncHandler::new(config.asset_root.clone(), mode));
    world.insert_resource(BitmapCache::new(config.tile_size));
    world.insert_resource(Mode7Camera::default());
    world.insert_resource(GameMap::default());
    world.insert_resource(Battle::default());
    world.insert_resource(GameScreen::default());
    world.insert_resource(SpriteSerial::default());
    world.insert_resource(config);
}

/// Spawn the sprite entity for an existing character entity.
pub fn spawn_character_sprite(
    world: &mut World,
    subject: Entity,
    x_offset: i32,
    y_offset: i32,
) -> Entity {
    let settings = world.resource::<GameConfig>().sprite_settings();
    let serial = world.resource_mut::<SpriteSerial>().next();
    world
        .spawn((
            CharacterSprite::new(subject, x_offset, y_offset, settings),
            ProjectedSprite::new(serial),
        ))
        .id()
}

/// Spawn the sprite entity for an existing enemy entity.
pub fn spawn_enemy_sprite(world: &mut World, subject: Entity) -> Entity {
    let settings = world.resource::<GameConfig>().sprite_settings();
    let condition = world.resource::<Battle>().condition;
    let serial = world.resource_mut::<SpriteSerial>().next();
    world
        .spawn((
            EnemySprite::new(subject, &settings, condition),
            ProjectedSprite::new(serial),
        ))
        .id()
}

/// Spawn the scene's characters and enemies together with their sprites.
pub fn spawn_scene(world: &mut World, scene: &Scene) {
    world.insert_resource(GameMap::new(scene.chipset.clone()));
    world.insert_resource(Battle {
        condition: scene.battle_condition,
    });

    for desc in scene.characters.iter() {
        let mut character = if desc.sheet.is_empty() {
            GameCharacter::with_tile(desc.tile_id, desc.x, desc.y)
        } else {
            GameCharacter::with_charset(desc.sheet.clone(), desc.index, desc.x, desc.y)
        };
        character.facing = desc.facing;
        let mut entity = world.spawn(character);
        if desc.walk_period > 0 {
            entity.insert(Walker::new(desc.walk_period));
        }
        let subject = entity.id();
        spawn_character_sprite(world, subject, 0, 0);
    }

    for (i, desc) in scene.enemies.iter().enumerate() {
        let mut enemy = GameEnemy::new(i as i32, desc.sprite.clone(), desc.hp, desc.x, desc.y);
        enemy.hue = desc.hue;
        enemy.transparent = desc.transparent;
        let subject = world.spawn(enemy).id();
        spawn_enemy_sprite(world, subject);
    }

    info!(
        "Scene spawned: {} characters, {} enemies, chipset '{}'",
        scene.characters.len(),
        scene.enemies.len(),
        scene.chipset
    );
}

/// Demo game logic, run once per frame before the sprite systems.
pub fn simulate(
    input: Res<InputState>,
    mut camera: ResMut<Mode7Camera>,
    mut walkers: Query<(&mut Walker, &mut GameCharacter)>,
    mut enemies: Query<&mut GameEnemy>,
    enemy_sprites: Query<Entity, With<EnemySprite>>,
    mut commands: Commands,
) {
    if input.toggle_mode7.just_pressed {
        camera.enabled = !camera.enabled;
        info!("Mode7 {}", if camera.enabled { "on" } else { "off" });
    }
    if input.yaw_left.active {
        camera.rotate(-YAW_STEP);
    }
    if input.yaw_right.active {
        camera.rotate(YAW_STEP);
    }
    if input.slant_up.active {
        camera.slant = (camera.slant + 1).min(MAX_SLANT);
    }
    if input.slant_down.active {
        camera.slant = (camera.slant - 1).max(MIN_SLANT);
    }

    for (mut walker, mut character) in walkers.iter_mut() {
        walker.tick(&mut character);
    }

    if input.enemy_action.just_pressed {
        let sprites: Vec<Entity> = enemy_sprites.iter().collect();
        if !sprites.is_empty() {
            let sprite = sprites[fastrand::usize(..sprites.len())];
            commands.trigger(EnemyActionEvent::new(sprite, 0));
        }
    }

    let mut alive: Vec<Mut<GameEnemy>> = Vec::new();
    for mut enemy in enemies.iter_mut() {
        enemy.update_timers();
        if enemy.is_dead() && enemy.death_timer == 0 && enemy.explode_timer == 0 {
            // back for another round
            enemy.hp = enemy.max_hp;
        }
        if enemy.exists() {
            alive.push(enemy);
        }
    }
    if input.enemy_damage.just_pressed && !alive.is_empty() {
        let i = fastrand::usize(..alive.len());
        let damage = fastrand::i32(10..=60);
        if damage >= alive[i].hp && fastrand::bool() {
            alive[i].explode();
            info!("Enemy {} explodes", alive[i].troop_member_id);
        } else {
            alive[i].damage(damage);
            info!("Enemy {} takes {} damage", alive[i].troop_member_id, damage);
        }
    }
}
