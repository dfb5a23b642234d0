//! Actor sprites demo.
//!
//! Opens a raylib window and shows map characters and battle enemies drawn
//! by the sprite systems of the `actorsprites` library.
//!
//! # Main Loop
//!
//! 1. Load `config.ini` and the scene, create the window and render target
//! 2. Insert resources, register observers and spawn the scene
//! 3. Every frame: read input, run the demo simulation, run the sprite
//!    pipeline (update, dispatch, prepare, composite) and present the surface
//! 4. Stop the file finder thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --assets ./assets --mode7
//! ```
//!
//! Keys: `M` toggles Mode7, `Left/Right` rotate, `Up/Down` slant, `A` enemy
//! action, `H` damage an enemy, `F11` debug outlines.

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use actorsprites::events::add_observers;
use actorsprites::game::{self, Scene};
use actorsprites::resources::asynchandler::{AsyncHandler, LoadMode};
use actorsprites::resources::gameconfig::GameConfig;
use actorsprites::resources::input::InputState;
use actorsprites::resources::mode7camera::Mode7Camera;
use actorsprites::resources::rendertarget::RenderTarget;
use actorsprites::resources::windowsize::WindowSize;
use actorsprites::systems::add_sprite_systems;
use actorsprites::systems::gameconfig::{apply_gameconfig_changes, apply_window_config};
use actorsprites::systems::input::update_input_state;
use actorsprites::systems::render::present_surface;
use bevy_ecs::prelude::*;
use clap::Parser;

/// Actor sprites demo
#[derive(Parser)]
#[command(version, about = "Map character and battle enemy sprites, flat or Mode7.")]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding the CharSet, ChipSet and Monster folders.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// JSON scene to show instead of the built-in one.
    #[arg(long, value_name = "FILE")]
    scene: Option<PathBuf>,

    /// Start with the tilted camera.
    #[arg(long)]
    mode7: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if let Some(assets) = cli.assets {
        config.asset_root = assets;
    }

    let scene = match cli.scene {
        Some(path) => Scene::load_from_file(&path).unwrap_or_else(|e| {
            log::error!("{}; using built-in scene", e);
            Scene::default()
        }),
        None => Scene::default(),
    };

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Actor Sprites")
        .build();
    rl.set_target_fps(config.target_fps);

    let render_target =
        match RenderTarget::new(&mut rl, &thread, config.render_width, config.render_height) {
            Ok(target) => target,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        };

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    game::insert_resources(&mut world, config, LoadMode::Background);
    world.resource_mut::<Mode7Camera>().enabled = cli.mode7;
    world.insert_resource(InputState::default());
    world.insert_resource(WindowSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_non_send_resource(render_target);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    add_observers(&mut world);
    game::spawn_scene(&mut world, &scene);

    let mut update = Schedule::default();
    update.add_systems(
        (
            apply_gameconfig_changes,
            apply_window_config,
            update_input_state,
            game::simulate,
        )
            .chain(),
    );
    let mut draw = Schedule::default();
    add_sprite_systems(&mut draw);
    let mut present = Schedule::default();
    present.add_systems(present_surface);

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        update.run(&mut world);
        draw.run(&mut world);
        present.run(&mut world);

        world.clear_trackers();

        let (new_w, new_h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        let mut window_size = world.resource_mut::<WindowSize>();
        window_size.w = new_w;
        window_size.h = new_h;
    }

    world.resource_mut::<AsyncHandler>().shutdown();
}
