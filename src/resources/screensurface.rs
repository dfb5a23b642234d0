//! CPU side frame surface.
//!
//! Sprites composite into this bitmap every frame. The binary uploads it to
//! the [`RenderTarget`](super::rendertarget::RenderTarget) texture; tests
//! read its pixels directly.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Color;

use crate::bitmap::Bitmap;

/// Colour the surface is cleared to before sprites are drawn.
pub const CLEAR_COLOR: Color = Color {
    r: 24,
    g: 20,
    b: 37,
    a: 255,
};

#[derive(Resource, Debug)]
pub struct ScreenSurface {
    pub bitmap: Bitmap,
}

impl ScreenSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            bitmap: Bitmap::filled(width, height, CLEAR_COLOR),
        }
    }

    /// Reallocate at a new size if it differs from the current one.
    pub fn resize(&mut self, width: i32, height: i32) {
        if self.bitmap.width() != width || self.bitmap.height() != height {
            self.bitmap = Bitmap::filled(width, height, CLEAR_COLOR);
        }
    }

    pub fn clear(&mut self) {
        self.bitmap.clear(CLEAR_COLOR);
    }

    /// Pixels as tightly packed RGBA bytes.
    pub fn rgba_bytes(&self) -> Vec<u8> {
        self.bitmap
            .pixels()
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, c.a])
            .collect()
    }
}
