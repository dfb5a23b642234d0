//! GPU texture the screen surface is presented through.
//!
//! Holds a texture at the game's internal resolution. Each frame the
//! [`ScreenSurface`](super::screensurface::ScreenSurface) pixels are uploaded
//! into it and the texture is scaled to fit the window with
//! letterboxing/pillarboxing as needed.

use std::ffi::c_void;

use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;

/// Presentation texture for the CPU surface.
///
/// # Note
/// This is a NonSend resource because `Texture2D` holds GPU resources that
/// must be accessed from the main thread.
pub struct RenderTarget {
    pub texture: Texture2D,
    /// Game's internal render width in pixels.
    pub game_width: u32,
    /// Game's internal render height in pixels.
    pub game_height: u32,
}

impl RenderTarget {
    /// Create a render target at the given game resolution.
    pub fn new(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = Self::blank_texture(rl, th, width, height)
            .map_err(|e| format!("Failed to create render target: {}", e))?;
        let mut target = Self {
            texture,
            game_width: width,
            game_height: height,
        };
        target.apply_filter();
        Ok(target)
    }

    fn blank_texture(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<Texture2D, String> {
        let image = Image::gen_image_color(width as i32, height as i32, Color::BLACK);
        rl.load_texture_from_image(th, &image)
            .map_err(|e| e.to_string())
    }

    /// Point filtering keeps pixels sharp when scaled up.
    fn apply_filter(&mut self) {
        unsafe {
            ffi::SetTextureFilter(*self.texture, TextureFilter::TEXTURE_FILTER_POINT as i32);
        }
    }

    /// Recreate the texture at a new resolution.
    pub fn recreate(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<(), String> {
        self.texture = Self::blank_texture(rl, th, width, height)
            .map_err(|e| format!("Failed to recreate render target: {}", e))?;
        self.game_width = width;
        self.game_height = height;
        self.apply_filter();
        Ok(())
    }

    /// Replace the texture contents with RGBA bytes of the game resolution.
    pub fn upload(&mut self, rgba: &[u8]) -> Result<(), String> {
        let expected = self.game_width as usize * self.game_height as usize * 4;
        if rgba.len() != expected {
            return Err(format!(
                "Surface upload size mismatch: got {} bytes, expected {}",
                rgba.len(),
                expected
            ));
        }
        unsafe {
            ffi::UpdateTexture(*self.texture, rgba.as_ptr() as *const c_void);
        }
        Ok(())
    }

    /// Source rectangle covering the whole texture.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.game_width as f32,
            height: self.game_height as f32,
        }
    }
}
