//! Window size resource.
//!
//! Tracks the OS window dimensions, which may differ from the game's render
//! resolution. Updated each frame to follow window resizes.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Rectangle;

/// Current window size in pixels.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WindowSize {
    pub w: i32,
    pub h: i32,
}

impl WindowSize {
    /// Destination rectangle that fits the game resolution in the window,
    /// centred, keeping its aspect ratio.
    pub fn calculate_letterbox(&self, game_width: u32, game_height: u32) -> Rectangle {
        let game_w = game_width as f32;
        let game_h = game_height as f32;
        let window_w = self.w as f32;
        let window_h = self.h as f32;

        if window_w / window_h > game_w / game_h {
            // bars left and right
            let scaled_w = game_w * window_h / game_h;
            Rectangle {
                x: (window_w - scaled_w) / 2.0,
                y: 0.0,
                width: scaled_w,
                height: window_h,
            }
        } else {
            // bars top and bottom
            let scaled_h = game_h * window_w / game_w;
            Rectangle {
                x: 0.0,
                y: (window_h - scaled_h) / 2.0,
                width: window_w,
                height: scaled_h,
            }
        }
    }
}
