//! Sprite pipeline integration tests: file requests, stale completions,
//! chipset reloads, enemy frames and compositing.

use std::sync::Arc;

use bevy_ecs::prelude::*;
use raylib::prelude::Color;

use actorsprites::bitmap::{Bitmap, Rect};
use actorsprites::components::charactersprite::CharacterSprite;
use actorsprites::components::enemysprite::{AnimFrame, ENEMY_Z_BASE, EnemySprite};
use actorsprites::components::gamecharacter::{Facing, GameCharacter};
use actorsprites::components::gameenemy::GameEnemy;
use actorsprites::components::projectedsprite::ProjectedSprite;
use actorsprites::events::add_observers;
use actorsprites::events::chipset::ChipsetChangedEvent;
use actorsprites::events::enemyaction::EnemyActionEvent;
use actorsprites::game;
use actorsprites::resources::asynchandler::{AsyncHandler, FileCategory, LoadMode};
use actorsprites::resources::bitmapcache::BitmapCache;
use actorsprites::resources::gameconfig::GameConfig;
use actorsprites::resources::gamemap::GameMap;
use actorsprites::resources::mode7camera::Mode7Camera;
use actorsprites::resources::screensurface::ScreenSurface;
use actorsprites::resources::spriteserial::SpriteSerial;
use actorsprites::systems::asyncload::dispatch_file_requests;
use actorsprites::systems::charactersprite::{
    prepare_character_sprites, update_character_sprites,
};
use actorsprites::systems::enemysprite::{
    prepare_enemy_sprites, refresh_enemy_sprites, update_enemy_sprites,
};
use actorsprites::systems::render::render_sprites;

fn config() -> GameConfig {
    GameConfig {
        asset_root: "./no-such-assets".into(),
        ..GameConfig::new()
    }
}

fn make_world_with(config: GameConfig) -> World {
    let mut world = World::new();
    game::insert_resources(&mut world, config, LoadMode::Deferred);
    add_observers(&mut world);
    world
}

fn make_world() -> World {
    make_world_with(config())
}

fn tick_update(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            update_character_sprites,
            refresh_enemy_sprites,
            update_enemy_sprites,
        )
            .chain(),
    );
    schedule.run(world);
}

fn tick_dispatch(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(dispatch_file_requests);
    schedule.run(world);
}

fn tick_prepare(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((prepare_character_sprites, prepare_enemy_sprites).chain());
    schedule.run(world);
}

fn tick_render(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(render_sprites);
    schedule.run(world);
}

fn resolve_all(world: &mut World) {
    world.resource_mut::<AsyncHandler>().resolve_all();
}

fn pending(world: &World) -> usize {
    world.resource::<AsyncHandler>().pending_count()
}

fn spawn_character(world: &mut World, character: GameCharacter) -> (Entity, Entity) {
    let subject = world.spawn(character).id();
    let sprite = game::spawn_character_sprite(world, subject, 0, 0);
    (subject, sprite)
}

fn spawn_enemy(world: &mut World, enemy: GameEnemy) -> (Entity, Entity) {
    let subject = world.spawn(enemy).id();
    let sprite = game::spawn_enemy_sprite(world, subject);
    (subject, sprite)
}

fn bitmap_id(world: &World, sprite: Entity) -> Option<String> {
    world
        .get::<ProjectedSprite>(sprite)
        .and_then(|p| p.bitmap())
        .map(|b| b.id().to_string())
}

// ==================== Character sprites ====================

#[test]
fn charset_request_completes_on_dispatch() {
    let mut world = make_world();
    let (_, sprite) = spawn_character(&mut world, GameCharacter::with_charset("hero", 0, 40, 80));

    tick_update(&mut world);
    assert_eq!(pending(&world), 1);
    assert!(world.get::<CharacterSprite>(sprite).unwrap().binding.is_some());
    assert_eq!(bitmap_id(&world, sprite), None);

    resolve_all(&mut world);
    tick_dispatch(&mut world);

    let cs = world.get::<CharacterSprite>(sprite).unwrap();
    assert!(cs.binding.is_none());
    // placeholder charset is 288x256: standard 72x128 cells
    assert_eq!((cs.chara_width, cs.chara_height), (24, 32));
    let p = world.get::<ProjectedSprite>(sprite).unwrap();
    assert_eq!(p.bitmap().unwrap().id(), "CharSet/hero");
    assert_eq!(p.sheet_rect(), Rect::new(0, 0, 72, 128));
    assert_eq!((p.ox(), p.oy()), (12, 32));
}

#[test]
fn late_completion_of_replaced_request_is_dropped() {
    let mut world = make_world();
    let (subject, sprite) = spawn_character(&mut world, GameCharacter::with_charset("X", 0, 0, 0));
    tick_update(&mut world);

    world.get_mut::<GameCharacter>(subject).unwrap().sprite_name = "Y".to_string();
    tick_update(&mut world);
    assert_eq!(pending(&world), 2);

    // Y finishes first, X after it
    assert!(world
        .resource_mut::<AsyncHandler>()
        .resolve_file(FileCategory::CharSet, "Y"));
    tick_dispatch(&mut world);
    assert_eq!(bitmap_id(&world, sprite).as_deref(), Some("CharSet/Y"));

    assert!(world
        .resource_mut::<AsyncHandler>()
        .resolve_file(FileCategory::CharSet, "X"));
    tick_dispatch(&mut world);
    assert_eq!(bitmap_id(&world, sprite).as_deref(), Some("CharSet/Y"));
    assert!(world.get::<CharacterSprite>(sprite).unwrap().binding.is_none());
    // X was never decoded
    assert!(world.resource::<BitmapCache>().get("CharSet/X").is_none());
}

#[test]
fn large_charset_uses_quarter_width_cells() {
    let mut world = make_world_with(GameConfig {
        easyrpg_extensions: true,
        ..config()
    });
    world
        .resource_mut::<BitmapCache>()
        .insert(FileCategory::CharSet, "$giant", Bitmap::create(192, 256, true));
    let (_, sprite) = spawn_character(&mut world, GameCharacter::with_charset("$giant", 1, 0, 0));

    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);
    tick_prepare(&mut world);

    let cs = world.get::<CharacterSprite>(sprite).unwrap();
    assert_eq!((cs.chara_width, cs.chara_height), (16, 32));
    let p = world.get::<ProjectedSprite>(sprite).unwrap();
    assert_eq!(p.sheet_rect(), Rect::new(48, 0, 48, 128));
    // facing down, middle step
    assert_eq!(p.src_rect(), Rect::new(16, 64, 16, 32));
    assert_eq!(p.crop_rect(), Rect::new(64, 64, 16, 32));
}

#[test]
fn large_charset_name_ignored_without_extensions() {
    let mut world = make_world();
    world
        .resource_mut::<BitmapCache>()
        .insert(FileCategory::CharSet, "$giant", Bitmap::create(192, 256, true));
    let (_, sprite) = spawn_character(&mut world, GameCharacter::with_charset("$giant", 1, 0, 0));

    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);

    let cs = world.get::<CharacterSprite>(sprite).unwrap();
    assert_eq!((cs.chara_width, cs.chara_height), (24, 32));
    let p = world.get::<ProjectedSprite>(sprite).unwrap();
    // fixed 72x128 cells regardless of the sheet size
    assert_eq!(p.sheet_rect(), Rect::new(72, 0, 72, 128));
}

#[test]
fn chipset_change_reloads_only_tile_sprites() {
    let mut world = make_world();
    world.insert_resource(GameMap::new("world"));
    let (_, charset) = spawn_character(&mut world, GameCharacter::with_charset("hero", 0, 0, 0));
    let (_, tile) = spawn_character(&mut world, GameCharacter::with_tile(10001, 32, 32));

    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);
    assert_eq!(bitmap_id(&world, tile).as_deref(), Some("ChipSet/world,tile=10001"));
    assert_eq!(bitmap_id(&world, charset).as_deref(), Some("CharSet/hero"));

    world.trigger(ChipsetChangedEvent {
        chipset_name: "cave".to_string(),
    });
    world.flush();
    assert_eq!(world.resource::<GameMap>().chipset_name, "cave");
    assert!(world.get::<CharacterSprite>(tile).unwrap().refresh_bitmap);
    assert!(!world.get::<CharacterSprite>(charset).unwrap().refresh_bitmap);

    tick_update(&mut world);
    assert_eq!(pending(&world), 1);
    assert!(world.get::<CharacterSprite>(charset).unwrap().binding.is_none());

    resolve_all(&mut world);
    tick_dispatch(&mut world);
    assert_eq!(bitmap_id(&world, tile).as_deref(), Some("ChipSet/cave,tile=10001"));
    assert_eq!(bitmap_id(&world, charset).as_deref(), Some("CharSet/hero"));

    let p = world.get::<ProjectedSprite>(tile).unwrap();
    assert_eq!(p.src_rect(), Rect::new(0, 0, 16, 16));
    assert_eq!((p.ox(), p.oy()), (8, 16));
}

#[test]
fn tile_sprite_without_chipset_gets_blank_at_once() {
    let mut world = make_world();
    let (_, sprite) = spawn_character(&mut world, GameCharacter::with_tile(10001, 0, 0));

    tick_update(&mut world);

    assert_eq!(pending(&world), 0);
    assert!(world.get::<CharacterSprite>(sprite).unwrap().binding.is_none());
    let p = world.get::<ProjectedSprite>(sprite).unwrap();
    let bitmap = p.bitmap().expect("blank tile installed");
    assert_eq!((bitmap.width(), bitmap.height()), (16, 16));
}

#[test]
fn flat_projection_ignores_camera() {
    let mut world = make_world();
    {
        let mut camera = world.resource_mut::<Mode7Camera>();
        camera.enabled = false;
        camera.yaw = 45;
        camera.slant = 120;
    }
    let subject = world.spawn(GameCharacter::with_charset("hero", 0, 100, 90)).id();
    let sprite = game::spawn_character_sprite(&mut world, subject, 3, -4);

    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);
    tick_prepare(&mut world);

    let p = world.get::<ProjectedSprite>(sprite).unwrap();
    assert_eq!((p.x(), p.y()), (103, 86));
    assert_eq!(p.zoom_x(), 1.0);
    assert_eq!(p.zoom_y(), 1.0);
}

#[test]
fn mode7_projection_scales_then_flat_resets_zoom() {
    let mut world = make_world();
    world.resource_mut::<Mode7Camera>().enabled = true;
    let (_, sprite) = spawn_character(&mut world, GameCharacter::with_charset("hero", 0, 152, 128));

    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);
    tick_prepare(&mut world);
    let zoom = world.get::<ProjectedSprite>(sprite).unwrap().zoom_x();
    assert!(zoom > 0.0);
    assert!((zoom - 1.0).abs() > 0.01);

    world.resource_mut::<Mode7Camera>().enabled = false;
    tick_prepare(&mut world);
    let p = world.get::<ProjectedSprite>(sprite).unwrap();
    assert_eq!(p.zoom_x(), 1.0);
    assert_eq!((p.x(), p.y()), (152, 128));
}

#[test]
fn character_past_mode7_horizon_is_hidden() {
    let mut world = make_world();
    world.insert_resource(Mode7Camera::tilted());
    let (_, far) = spawn_character(&mut world, GameCharacter::with_charset("hero", 0, 152, -150));
    let (_, near) = spawn_character(&mut world, GameCharacter::with_charset("hero", 0, 152, 128));

    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);
    tick_prepare(&mut world);

    assert!(!world.get::<ProjectedSprite>(far).unwrap().visible());
    let p = world.get::<ProjectedSprite>(near).unwrap();
    assert!(p.visible());
    assert!(p.zoom_x() > 0.0);

    // flat again: shown on the next frame
    world.resource_mut::<Mode7Camera>().enabled = false;
    tick_update(&mut world);
    tick_prepare(&mut world);
    let p = world.get::<ProjectedSprite>(far).unwrap();
    assert!(p.visible());
    assert_eq!((p.x(), p.y()), (152, -150));
    assert_eq!(p.zoom_x(), 1.0);
}

#[test]
fn bush_depth_follows_character() {
    let mut world = make_world();
    let mut character = GameCharacter::with_charset("hero", 0, 50, 50);
    character.bush_depth = 2;
    let (_, sprite) = spawn_character(&mut world, character);

    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);
    tick_prepare(&mut world);

    let p = world.get::<ProjectedSprite>(sprite).unwrap();
    assert_eq!(p.height(), 32);
    assert!(p.bush_depth() > 0);
    assert!(p.bush_depth() < 32);
}

#[test]
fn despawned_character_hides_sprite() {
    let mut world = make_world();
    let (subject, sprite) = spawn_character(&mut world, GameCharacter::with_charset("hero", 0, 0, 0));
    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);
    assert!(world.get::<ProjectedSprite>(sprite).unwrap().visible());

    world.despawn(subject);
    tick_update(&mut world);
    assert!(!world.get::<ProjectedSprite>(sprite).unwrap().visible());
}

#[test]
fn completion_for_despawned_sprite_is_ignored() {
    let mut world = make_world();
    let (_, sprite) = spawn_character(&mut world, GameCharacter::with_charset("hero", 0, 0, 0));
    tick_update(&mut world);
    world.despawn(sprite);

    resolve_all(&mut world);
    tick_dispatch(&mut world);
    assert_eq!(pending(&world), 0);
}

#[test]
fn facing_and_step_select_pose() {
    let mut world = make_world();
    let (subject, sprite) = spawn_character(&mut world, GameCharacter::with_charset("hero", 0, 0, 0));
    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);

    {
        let mut c = world.get_mut::<GameCharacter>(subject).unwrap();
        c.facing = Facing::Left;
        c.anim_frame = c.anim_frame.next();
    }
    tick_prepare(&mut world);
    let p = world.get::<ProjectedSprite>(sprite).unwrap();
    // right step, left facing row
    assert_eq!(p.src_rect(), Rect::new(48, 96, 24, 32));
}

// ==================== Enemy sprites ====================

#[test]
fn enemies_sharing_sheet_and_hue_share_bitmap() {
    let mut world = make_world();
    let mut a = GameEnemy::new(0, "slime", 100, 40, 80);
    a.hue = 30;
    let mut b = GameEnemy::new(1, "slime", 100, 120, 80);
    b.hue = 30;
    let (_, sa) = spawn_enemy(&mut world, a);
    let (_, sb) = spawn_enemy(&mut world, b);

    tick_update(&mut world);
    assert_eq!(pending(&world), 1);

    resolve_all(&mut world);
    tick_dispatch(&mut world);

    let ga = world.get::<EnemySprite>(sa).unwrap().graphic.clone().unwrap();
    let gb = world.get::<EnemySprite>(sb).unwrap().graphic.clone().unwrap();
    assert!(Arc::ptr_eq(&ga, &gb));
    assert_eq!(ga.id(), "Monster/slime,hue=30");
    // base sheet plus one variant
    assert_eq!(world.resource::<BitmapCache>().len(), 2);
}

#[test]
fn hue_change_requests_new_graphic() {
    let mut world = make_world();
    let (subject, sprite) = spawn_enemy(&mut world, GameEnemy::new(0, "slime", 100, 0, 0));
    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);
    assert_eq!(bitmap_id(&world, sprite).as_deref(), Some("Monster/slime"));

    tick_update(&mut world);
    assert!(world.get::<EnemySprite>(sprite).unwrap().binding.is_none());

    world.get_mut::<GameEnemy>(subject).unwrap().hue = 90;
    tick_update(&mut world);
    assert!(world.get::<EnemySprite>(sprite).unwrap().binding.is_some());
    tick_dispatch(&mut world);
    assert_eq!(bitmap_id(&world, sprite).as_deref(), Some("Monster/slime,hue=90"));
}

#[test]
fn late_monster_completion_of_replaced_request_is_dropped() {
    let mut world = make_world();
    let (subject, sprite) = spawn_enemy(&mut world, GameEnemy::new(0, "X", 100, 0, 0));
    tick_update(&mut world);

    world.get_mut::<GameEnemy>(subject).unwrap().sprite_name = "Y".to_string();
    tick_update(&mut world);
    assert_eq!(pending(&world), 2);

    assert!(world
        .resource_mut::<AsyncHandler>()
        .resolve_file(FileCategory::Monster, "Y"));
    tick_dispatch(&mut world);
    assert_eq!(bitmap_id(&world, sprite).as_deref(), Some("Monster/Y"));

    assert!(world
        .resource_mut::<AsyncHandler>()
        .resolve_file(FileCategory::Monster, "X"));
    tick_dispatch(&mut world);
    assert_eq!(bitmap_id(&world, sprite).as_deref(), Some("Monster/Y"));
    let es = world.get::<EnemySprite>(sprite).unwrap();
    assert!(es.binding.is_none());
    assert_eq!(es.graphic.as_ref().map(|g| g.id()), Some("Monster/Y"));
    assert!(world.resource::<BitmapCache>().get("Monster/X").is_none());
}

#[test]
fn animated_enemy_requests_anim_sheet_once() {
    let mut world = make_world();
    let (_, sprite) = spawn_enemy(&mut world, GameEnemy::new(0, "%bat", 100, 60, 70));
    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);

    assert_eq!(bitmap_id(&world, sprite).as_deref(), Some("Monster/%bat_anim"));
    let es = world.get::<EnemySprite>(sprite).unwrap();
    assert!(es.animated);
    assert_eq!(es.sprite_name, "%bat");

    tick_update(&mut world);
    assert_eq!(pending(&world), 0);
    assert!(world.get::<EnemySprite>(sprite).unwrap().binding.is_none());
}

#[test]
fn dead_enemy_shows_damage_frame_over_action() {
    let mut world = make_world();
    let (subject, sprite) = spawn_enemy(&mut world, GameEnemy::new(0, "%bat", 100, 60, 70));
    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);

    let p = world.get::<ProjectedSprite>(sprite).unwrap();
    // 48 wide placeholder, five frames
    assert_eq!((p.ox(), p.oy()), (4, 24));
    assert_eq!(p.z(), ENEMY_Z_BASE + 70);

    world.trigger(EnemyActionEvent::new(sprite, 1));
    world.flush();
    world.get_mut::<GameEnemy>(subject).unwrap().hp = 0;
    tick_update(&mut world);

    let es = world.get::<EnemySprite>(sprite).unwrap();
    assert_eq!(es.frame, AnimFrame::Damage);
    assert!(es.action.is_some());
    let p = world.get::<ProjectedSprite>(sprite).unwrap();
    assert_eq!(p.src_rect(), Rect::new(27, 0, 9, 48));
}

#[test]
fn action_frame_until_duration_runs_out() {
    let mut world = make_world();
    let (_, sprite) = spawn_enemy(&mut world, GameEnemy::new(0, "%bat", 100, 0, 0));
    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);

    world.trigger(EnemyActionEvent {
        sprite,
        kind: 2,
        duration: 2,
    });
    world.flush();

    tick_update(&mut world);
    assert_eq!(world.get::<EnemySprite>(sprite).unwrap().frame, AnimFrame::Action);
    tick_update(&mut world);
    let es = world.get::<EnemySprite>(sprite).unwrap();
    assert_eq!(es.frame, AnimFrame::Action);
    assert!(es.action.is_none());
    tick_update(&mut world);
    let frame = world.get::<EnemySprite>(sprite).unwrap().frame;
    assert!(frame == AnimFrame::Idle1 || frame == AnimFrame::Idle2);
}

#[test]
fn weak_enemy_shows_hurt_frame() {
    let mut world = make_world();
    let (subject, sprite) = spawn_enemy(&mut world, GameEnemy::new(0, "%bat", 100, 0, 0));
    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);

    world.get_mut::<GameEnemy>(subject).unwrap().hp = 9;
    tick_update(&mut world);
    assert_eq!(world.get::<EnemySprite>(sprite).unwrap().frame, AnimFrame::Hurt);
    let p = world.get::<ProjectedSprite>(sprite).unwrap();
    assert_eq!(p.src_rect().x, 36);
}

#[test]
fn dying_enemy_fades_and_explosion_zooms() {
    let mut world = make_world();
    let (subject, sprite) = spawn_enemy(&mut world, GameEnemy::new(0, "slime", 100, 0, 0));
    tick_update(&mut world);
    resolve_all(&mut world);
    tick_dispatch(&mut world);

    {
        let mut enemy = world.get_mut::<GameEnemy>(subject).unwrap();
        enemy.hp = 0;
        enemy.death_timer = 10;
    }
    tick_prepare(&mut world);
    let p = world.get::<ProjectedSprite>(sprite).unwrap();
    assert!(p.visible());
    assert_eq!(p.opacity(), 70);
    assert_eq!(p.zoom_x(), 1.0);

    {
        let mut enemy = world.get_mut::<GameEnemy>(subject).unwrap();
        enemy.death_timer = 0;
        enemy.explode_timer = 15;
    }
    tick_prepare(&mut world);
    let p = world.get::<ProjectedSprite>(sprite).unwrap();
    assert_eq!(p.opacity(), 180);
    assert_eq!(p.zoom_x(), 1.25);
    assert_eq!(p.zoom_y(), 1.25);

    world.get_mut::<GameEnemy>(subject).unwrap().explode_timer = 0;
    tick_prepare(&mut world);
    assert!(!world.get::<ProjectedSprite>(sprite).unwrap().visible());
}

#[test]
fn enemy_without_sheet_gets_empty_bitmap() {
    let mut world = make_world();
    let (_, sprite) = spawn_enemy(&mut world, GameEnemy::new(0, "", 100, 10, 55));

    tick_update(&mut world);

    assert_eq!(pending(&world), 0);
    let p = world.get::<ProjectedSprite>(sprite).unwrap();
    let bitmap = p.bitmap().expect("empty bitmap installed");
    assert_eq!((bitmap.width(), bitmap.height()), (0, 0));
    assert_eq!(p.z(), ENEMY_Z_BASE + 55);

    // stays put on later ticks
    tick_update(&mut world);
    assert_eq!(pending(&world), 0);
}

// ==================== Compositing ====================

fn spawn_square(world: &mut World, color: Color, z: i32) -> Entity {
    let serial = world.resource_mut::<SpriteSerial>().next();
    let mut sprite = ProjectedSprite::new(serial);
    sprite.set_bitmap(Some(Arc::new(Bitmap::filled(4, 4, color))));
    sprite.set_x(10);
    sprite.set_y(10);
    sprite.set_z(z);
    world.spawn(sprite).id()
}

#[test]
fn render_orders_by_z_then_serial() {
    let mut world = make_world();
    let red = Color::new(255, 0, 0, 255);
    let blue = Color::new(0, 0, 255, 255);
    let first = spawn_square(&mut world, red, 5);
    spawn_square(&mut world, blue, 5);

    tick_render(&mut world);
    // same z: later serial on top
    assert_eq!(world.resource::<ScreenSurface>().bitmap.pixel(11, 11), Some(blue));

    world.get_mut::<ProjectedSprite>(first).unwrap().set_z(6);
    tick_render(&mut world);
    assert_eq!(world.resource::<ScreenSurface>().bitmap.pixel(11, 11), Some(red));
}

#[test]
fn hidden_sprite_is_not_drawn() {
    let mut world = make_world();
    let red = Color::new(255, 0, 0, 255);
    let square = spawn_square(&mut world, red, 0);
    world.get_mut::<ProjectedSprite>(square).unwrap().set_visible(false);

    tick_render(&mut world);
    assert_ne!(world.resource::<ScreenSurface>().bitmap.pixel(11, 11), Some(red));
}
