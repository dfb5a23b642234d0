//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 320
//! height = 240
//! tile_size = 16
//!
//! [window]
//! width = 640
//! height = 480
//! target_fps = 60
//! vsync = true
//!
//! [features]
//! easyrpg_extensions = false
//! fixed_enemy_facing = none
//!
//! [battle]
//! idle_cycle_length = 40
//!
//! [assets]
//! root = ./assets
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::enemysprite::FixedFacing;

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 320;
const DEFAULT_RENDER_HEIGHT: u32 = 240;
const DEFAULT_TILE_SIZE: i32 = 16;
const DEFAULT_WINDOW_WIDTH: u32 = 640;
const DEFAULT_WINDOW_HEIGHT: u32 = 480;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_IDLE_CYCLE_LENGTH: i32 = 40;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_ASSET_ROOT: &str = "./assets";

/// Sprite-facing flags captured when a sprite is constructed.
///
/// Sprites copy these values at spawn time instead of reading the global
/// configuration while they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteSettings {
    /// Map tile size in pixels; 16 is the native size.
    pub tile_size: i32,
    /// Allow engine extensions such as large `$` charsets.
    pub easyrpg_extensions: bool,
    /// Fixed enemy facing requested by the configuration.
    pub fixed_enemy_facing: FixedFacing,
    /// Ticks of one enemy idle cycle (two idle poses).
    pub idle_cycle_length: i32,
}

impl SpriteSettings {
    /// Ratio of the tile size to the native 16 pixel tile.
    pub fn tile_scale(&self) -> i32 {
        (self.tile_size / 16).max(1)
    }
}

impl Default for SpriteSettings {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            easyrpg_extensions: false,
            fixed_enemy_facing: FixedFacing::Disabled,
            idle_cycle_length: DEFAULT_IDLE_CYCLE_LENGTH,
        }
    }
}

/// Game configuration resource.
///
/// Stores render resolution, window settings and the sprite feature flags.
/// The [`apply_gameconfig_changes`] system reacts when it changes.
///
/// [`apply_gameconfig_changes`]: crate::systems::gameconfig::apply_gameconfig_changes
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Internal render width in pixels.
    pub render_width: u32,
    /// Internal render height in pixels.
    pub render_height: u32,
    /// Map tile size in pixels.
    pub tile_size: i32,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Enable engine extensions (large charsets).
    pub easyrpg_extensions: bool,
    /// Fixed facing for enemies in normal/initiative battles.
    pub fixed_enemy_facing: FixedFacing,
    /// Length of the enemy idle animation cycle in ticks.
    pub idle_cycle_length: i32,
    /// Directory holding the `CharSet`, `ChipSet` and `Monster` folders.
    pub asset_root: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            easyrpg_extensions: false,
            fixed_enemy_facing: FixedFacing::Disabled,
            idle_cycle_length: DEFAULT_IDLE_CYCLE_LENGTH,
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} render, tile={}, {}x{} window, fps={}, vsync={}, extensions={}, fixed_facing={:?}, idle_cycle={}",
            self.render_width,
            self.render_height,
            self.tile_size,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.easyrpg_extensions,
            self.fixed_enemy_facing,
            self.idle_cycle_length
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [render] section
        if let Some(width) = config.getuint("render", "width").ok().flatten() {
            self.render_width = width as u32;
        }
        if let Some(height) = config.getuint("render", "height").ok().flatten() {
            self.render_height = height as u32;
        }
        if let Some(tile_size) = config.getuint("render", "tile_size").ok().flatten() {
            if tile_size >= 16 {
                self.tile_size = tile_size as i32;
            } else {
                warn!("tile_size {} is below 16, keeping {}", tile_size, self.tile_size);
            }
        }

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [features] section
        if let Some(ext) = config.getbool("features", "easyrpg_extensions").ok().flatten() {
            self.easyrpg_extensions = ext;
        }
        if let Some(facing) = config.get("features", "fixed_enemy_facing") {
            match FixedFacing::parse(&facing) {
                Some(facing) => self.fixed_enemy_facing = facing,
                None => warn!("Unknown fixed_enemy_facing '{}', ignoring", facing),
            }
        }

        // [battle] section
        if let Some(cycle) = config.getint("battle", "idle_cycle_length").ok().flatten() {
            if cycle >= 2 && cycle % 2 == 0 {
                self.idle_cycle_length = cycle as i32;
            } else {
                warn!(
                    "idle_cycle_length must be even and at least 2, got {}",
                    cycle
                );
            }
        }

        // [assets] section
        if let Some(root) = config.get("assets", "root") {
            self.asset_root = PathBuf::from(root);
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("render", "width", Some(self.render_width.to_string()));
        config.set("render", "height", Some(self.render_height.to_string()));
        config.set("render", "tile_size", Some(self.tile_size.to_string()));

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        config.set(
            "features",
            "easyrpg_extensions",
            Some(self.easyrpg_extensions.to_string()),
        );
        config.set(
            "features",
            "fixed_enemy_facing",
            Some(self.fixed_enemy_facing.as_str().to_string()),
        );

        config.set(
            "battle",
            "idle_cycle_length",
            Some(self.idle_cycle_length.to_string()),
        );

        config.set(
            "assets",
            "root",
            Some(self.asset_root.display().to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Flags sprites capture at construction time.
    pub fn sprite_settings(&self) -> SpriteSettings {
        SpriteSettings {
            tile_size: self.tile_size,
            easyrpg_extensions: self.easyrpg_extensions,
            fixed_enemy_facing: self.fixed_enemy_facing,
            idle_cycle_length: self.idle_cycle_length,
        }
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
