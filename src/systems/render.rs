//! Render systems.
//!
//! [`render_sprites`] composites every visible [`ProjectedSprite`] into the
//! [`ScreenSurface`], lowest z first, ties broken by spawn serial. When
//! [`DebugMode`] is present each sprite's screen rectangle is outlined.
//!
//! [`present_surface`] uploads the surface to the GPU and scales it into the
//! window; it is only used by the binary.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::projectedsprite::ProjectedSprite;
use crate::resources::debugmode::DebugMode;
use crate::resources::mode7camera::Mode7Camera;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensurface::ScreenSurface;
use crate::resources::windowsize::WindowSize;

const OUTLINE_COLOR: Color = Color {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};

/// Composite all sprites into the screen surface.
pub fn render_sprites(
    mut surface: ResMut<ScreenSurface>,
    sprites: Query<&ProjectedSprite>,
    debug: Option<Res<DebugMode>>,
) {
    surface.clear();

    let mut to_draw: Vec<&ProjectedSprite> = sprites
        .iter()
        .filter(|s| s.visible() && s.bitmap().is_some())
        .collect();
    to_draw.sort_by_key(|s| (s.z(), s.serial()));

    for sprite in to_draw.iter() {
        sprite.draw(&mut surface.bitmap);
    }

    if debug.is_some() {
        for sprite in to_draw.iter() {
            surface.bitmap.stroke_rect(sprite.screen_rect(), OUTLINE_COLOR);
        }
    }
}

/// Upload the surface and draw it letterboxed into the window.
pub fn present_surface(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    mut target: NonSendMut<RenderTarget>,
    surface: Res<ScreenSurface>,
    window: Res<WindowSize>,
    camera: Res<Mode7Camera>,
    debug: Option<Res<DebugMode>>,
) {
    if let Err(e) = target.upload(&surface.rgba_bytes()) {
        log::error!("{}", e);
    }

    let dest = window.calculate_letterbox(target.game_width, target.game_height);
    let mut d = rl.begin_drawing(&th);
    d.clear_background(Color::BLACK);
    d.draw_texture_pro(
        &target.texture,
        target.source_rect(),
        dest,
        Vector2::zero(),
        0.0,
        Color::WHITE,
    );
    if debug.is_some() {
        let text = format!(
            "DEBUG (F11) | FPS: {} | mode7: {} yaw: {} slant: {}",
            d.get_fps(),
            camera.enabled,
            camera.yaw,
            camera.slant
        );
        d.draw_text(&text, 10, 10, 10, Color::WHITE);
    }
}
