//! Game configuration change detection systems.
//!
//! Monitor [`GameConfig`] and apply its settings when it is added or
//! modified: [`apply_gameconfig_changes`] resizes the screen surface, and
//! [`apply_window_config`] updates the raylib side (render target, vsync,
//! target FPS).

use bevy_ecs::prelude::*;
use log::{error, info};
use raylib::ffi;

use crate::resources::gameconfig::GameConfig;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensize::ScreenSize;
use crate::resources::screensurface::ScreenSurface;

/// Keep [`ScreenSize`] and [`ScreenSurface`] at the configured render size.
pub fn apply_gameconfig_changes(
    config: Res<GameConfig>,
    mut screen_size: ResMut<ScreenSize>,
    mut surface: ResMut<ScreenSurface>,
) {
    if !config.is_changed() {
        return;
    }
    let (w, h) = (config.render_width as i32, config.render_height as i32);
    if screen_size.w != w || screen_size.h != h {
        info!(
            "Render size {}x{} -> {}x{}",
            screen_size.w, screen_size.h, w, h
        );
        screen_size.w = w;
        screen_size.h = h;
    }
    surface.resize(w, h);
}

/// Apply render target size, vsync and FPS to the window.
pub fn apply_window_config(
    config: Res<GameConfig>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    mut render_target: NonSendMut<RenderTarget>,
) {
    if !config.is_changed() {
        return;
    }
    if render_target.game_width != config.render_width
        || render_target.game_height != config.render_height
    {
        if let Err(e) =
            render_target.recreate(&mut rl, &th, config.render_width, config.render_height)
        {
            error!("Failed to resize render target: {}", e);
        }
    }

    unsafe {
        if config.vsync {
            ffi::SetWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
        } else {
            ffi::ClearWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
        }
    }
    rl.set_target_fps(config.target_fps);
    info!(
        "Window config applied (vsync: {}, fps: {})",
        config.vsync, config.target_fps
    );
}
