//! Screen size resource.
//!
//! Stores the internal render resolution in pixels. Sprite projection
//! centres the tilted camera on it, and the screen surface is allocated at
//! this size.

use bevy_ecs::prelude::Resource;

use crate::projection::Viewport;

/// Internal render resolution in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenSize {
    /// Projection viewport for maps with `tile_size` pixel tiles.
    pub fn viewport(&self, tile_size: i32) -> Viewport {
        Viewport {
            width: self.w,
            height: self.h,
            half_tile: tile_size / 2,
        }
    }
}
