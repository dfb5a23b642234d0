//! Drawable sprite component.
//!
//! [`ProjectedSprite`] holds everything needed to composite one crop of a
//! shared bitmap onto a target surface: screen position, origin, sheet and
//! frame rectangles, zoom, opacity, tone, flash, horizontal flip, bush depth
//! and z order. Kind specific components
//! ([`CharacterSprite`](super::charactersprite::CharacterSprite),
//! [`EnemySprite`](super::enemysprite::EnemySprite)) write into it every
//! frame; the render pass only reads it.
//!
//! The backing bitmap may be absent until the first load completes; such a
//! sprite draws nothing.

use bevy_ecs::prelude::Component;
use log::warn;

use crate::bitmap::{Bitmap, BitmapRef, Rect};
use crate::components::tone::{FlashColor, Tone};

/// Drawable crop of a shared bitmap placed on screen.
#[derive(Component, Clone, Debug)]
pub struct ProjectedSprite {
    x: i32,
    y: i32,
    ox: i32,
    oy: i32,
    /// Region of the bitmap this sprite is allowed to show (a charset cell).
    sheet_rect: Rect,
    /// Frame rectangle, relative to `sheet_rect`.
    src_rect: Rect,
    opacity: u8,
    zoom_x: f64,
    zoom_y: f64,
    flip_x: bool,
    tone: Tone,
    flash: FlashColor,
    z: i32,
    bush_depth: i32,
    visible: bool,
    bitmap: Option<BitmapRef>,
    serial: u64,
}

impl ProjectedSprite {
    /// Create an empty sprite. `serial` breaks z ties in draw order and
    /// should grow with spawn order.
    pub fn new(serial: u64) -> Self {
        Self {
            x: 0,
            y: 0,
            ox: 0,
            oy: 0,
            sheet_rect: Rect::default(),
            src_rect: Rect::default(),
            opacity: 255,
            zoom_x: 1.0,
            zoom_y: 1.0,
            flip_x: false,
            tone: Tone::default(),
            flash: FlashColor::default(),
            z: 0,
            bush_depth: 0,
            visible: true,
            bitmap: None,
            serial,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    pub fn ox(&self) -> i32 {
        self.ox
    }

    pub fn oy(&self) -> i32 {
        self.oy
    }

    pub fn set_ox(&mut self, ox: i32) {
        self.ox = ox;
    }

    pub fn set_oy(&mut self, oy: i32) {
        self.oy = oy;
    }

    pub fn bitmap(&self) -> Option<&BitmapRef> {
        self.bitmap.as_ref()
    }

    /// Replace the backing bitmap. The sheet rectangle resets to the whole
    /// bitmap and the frame rectangle is re-clipped.
    pub fn set_bitmap(&mut self, bitmap: Option<BitmapRef>) {
        self.sheet_rect = bitmap.as_ref().map(|b| b.rect()).unwrap_or_default();
        self.bitmap = bitmap;
        self.src_rect = if self.bitmap.is_some() {
            self.sheet_rect
        } else {
            Rect::default()
        };
    }

    pub fn sheet_rect(&self) -> Rect {
        self.sheet_rect
    }

    /// Restrict the sprite to a sub-region of the bitmap. The frame rectangle
    /// becomes the whole region.
    pub fn set_sprite_rect(&mut self, rect: Rect) {
        self.sheet_rect = match &self.bitmap {
            Some(bitmap) => rect.intersect(&bitmap.rect()),
            None => rect,
        };
        self.src_rect = Rect::new(0, 0, self.sheet_rect.width, self.sheet_rect.height);
    }

    pub fn src_rect(&self) -> Rect {
        self.src_rect
    }

    /// Set the frame rectangle, relative to the sheet rectangle. It is clipped
    /// so the effective crop never leaves the bitmap.
    pub fn set_src_rect(&mut self, rect: Rect) {
        if self.bitmap.is_none() {
            self.src_rect = rect;
            return;
        }
        let bounds = Rect::new(0, 0, self.sheet_rect.width, self.sheet_rect.height);
        self.src_rect = rect.intersect(&bounds);
    }

    /// Effective crop in bitmap coordinates.
    pub fn crop_rect(&self) -> Rect {
        self.src_rect
            .translated(self.sheet_rect.x, self.sheet_rect.y)
            .intersect(&self.sheet_rect)
    }

    /// Width of the current frame in bitmap pixels.
    pub fn width(&self) -> i32 {
        self.src_rect.width
    }

    /// Height of the current frame in bitmap pixels.
    pub fn height(&self) -> i32 {
        self.src_rect.height
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: u8) {
        self.opacity = opacity;
    }

    pub fn zoom_x(&self) -> f64 {
        self.zoom_x
    }

    pub fn zoom_y(&self) -> f64 {
        self.zoom_y
    }

    /// Zoom must stay strictly positive; other values are ignored.
    pub fn set_zoom_x(&mut self, zoom: f64) {
        if zoom > 0.0 {
            self.zoom_x = zoom;
        } else {
            warn!("Ignoring non positive horizontal zoom {}", zoom);
        }
    }

    /// Zoom must stay strictly positive; other values are ignored.
    pub fn set_zoom_y(&mut self, zoom: f64) {
        if zoom > 0.0 {
            self.zoom_y = zoom;
        } else {
            warn!("Ignoring non positive vertical zoom {}", zoom);
        }
    }

    pub fn flip_x(&self) -> bool {
        self.flip_x
    }

    pub fn set_flip_x(&mut self, flip: bool) {
        self.flip_x = flip;
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.tone = tone;
    }

    pub fn flash(&self) -> FlashColor {
        self.flash
    }

    pub fn set_flash_effect(&mut self, flash: FlashColor) {
        self.flash = flash;
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    pub fn set_z(&mut self, z: i32) {
        self.z = z;
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn bush_depth(&self) -> i32 {
        self.bush_depth
    }

    pub fn set_bush_depth(&mut self, depth: i32) {
        self.bush_depth = depth.max(0);
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Destination rectangle on screen after origin and zoom.
    pub fn screen_rect(&self) -> Rect {
        let width = (self.src_rect.width as f64 * self.zoom_x).round() as i32;
        let height = (self.src_rect.height as f64 * self.zoom_y).round() as i32;
        let left = self.x - (self.ox as f64 * self.zoom_x) as i32;
        let top = self.y - (self.oy as f64 * self.zoom_y) as i32;
        Rect::new(left, top, width, height)
    }

    /// Composite the current crop onto `dst`.
    ///
    /// Rows inside the bush band at the bottom of the sprite are drawn with
    /// half opacity.
    pub fn draw(&self, dst: &mut Bitmap) {
        if !self.visible || self.opacity == 0 {
            return;
        }
        let Some(bitmap) = self.bitmap.as_ref() else {
            return;
        };
        let crop = self.crop_rect().intersect(&bitmap.rect());
        if crop.is_empty() {
            return;
        }

        let dest = self.screen_rect();
        if dest.is_empty() {
            return;
        }
        let bush_start = if self.bush_depth > 0 {
            dest.height - (self.bush_depth as f64 * self.zoom_y) as i32
        } else {
            dest.height
        };
        let bush_opacity = self.opacity / 2;

        for dy in 0..dest.height {
            let ty = dest.y + dy;
            if ty < 0 || ty >= dst.height() {
                continue;
            }
            let sy = crop.y + ((dy as f64 / self.zoom_y) as i32).min(crop.height - 1);
            let opacity = if dy >= bush_start {
                bush_opacity
            } else {
                self.opacity
            };
            for dx in 0..dest.width {
                let tx = dest.x + dx;
                if tx < 0 || tx >= dst.width() {
                    continue;
                }
                let mut col = ((dx as f64 / self.zoom_x) as i32).min(crop.width - 1);
                if self.flip_x {
                    col = crop.width - 1 - col;
                }
                let Some(color) = bitmap.pixel(crop.x + col, sy) else {
                    continue;
                };
                if color.a == 0 {
                    continue;
                }
                let color = self.flash.apply(self.tone.apply(color));
                dst.blend_pixel(tx, ty, color, opacity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use raylib::prelude::Color;

    use super::*;

    fn two_tone_bitmap() -> BitmapRef {
        // left column red, right column blue, 2x2
        let mut b = Bitmap::create(2, 2, true);
        for y in 0..2 {
            b.set_pixel(0, y, Color::new(255, 0, 0, 255));
            b.set_pixel(1, y, Color::new(0, 0, 255, 255));
        }
        Arc::new(b)
    }

    fn rgb(c: Color) -> (u8, u8, u8) {
        (c.r, c.g, c.b)
    }

    #[test]
    fn test_new_sprite_defaults() {
        let s = ProjectedSprite::new(3);
        assert_eq!(s.opacity(), 255);
        assert_eq!(s.zoom_x(), 1.0);
        assert_eq!(s.zoom_y(), 1.0);
        assert!(s.bitmap().is_none());
        assert_eq!(s.serial(), 3);
    }

    #[test]
    fn test_zoom_rejects_non_positive() {
        let mut s = ProjectedSprite::new(0);
        s.set_zoom_x(2.0);
        s.set_zoom_x(0.0);
        s.set_zoom_y(-1.0);
        s.set_zoom_y(f64::NAN);
        assert_eq!(s.zoom_x(), 2.0);
        assert_eq!(s.zoom_y(), 1.0);
    }

    #[test]
    fn test_src_rect_is_clipped_to_bitmap() {
        let mut s = ProjectedSprite::new(0);
        s.set_bitmap(Some(Arc::new(Bitmap::create(10, 10, true))));
        s.set_src_rect(Rect::new(8, 8, 5, 5));
        assert_eq!(s.src_rect(), Rect::new(8, 8, 2, 2));
    }

    #[test]
    fn test_sprite_rect_offsets_crop() {
        let mut s = ProjectedSprite::new(0);
        s.set_bitmap(Some(Arc::new(Bitmap::create(100, 100, true))));
        s.set_sprite_rect(Rect::new(40, 20, 30, 40));
        s.set_src_rect(Rect::new(10, 10, 10, 10));
        assert_eq!(s.crop_rect(), Rect::new(50, 30, 10, 10));
    }

    #[test]
    fn test_draw_without_bitmap_is_noop() {
        let s = ProjectedSprite::new(0);
        let mut dst = Bitmap::create(4, 4, false);
        s.draw(&mut dst);
        assert_eq!(rgb(dst.pixel(0, 0).unwrap()), (0, 0, 0));
    }

    #[test]
    fn test_draw_places_origin_at_position() {
        let mut s = ProjectedSprite::new(0);
        s.set_bitmap(Some(two_tone_bitmap()));
        s.set_ox(1);
        s.set_oy(2);
        s.set_x(3);
        s.set_y(3);
        let mut dst = Bitmap::create(6, 6, false);
        s.draw(&mut dst);
        // top left of the sprite lands at (2, 1)
        assert_eq!(rgb(dst.pixel(2, 1).unwrap()), (255, 0, 0));
        assert_eq!(rgb(dst.pixel(3, 2).unwrap()), (0, 0, 255));
        assert_eq!(rgb(dst.pixel(1, 1).unwrap()), (0, 0, 0));
    }

    #[test]
    fn test_draw_flip_x_mirrors_columns() {
        let mut s = ProjectedSprite::new(0);
        s.set_bitmap(Some(two_tone_bitmap()));
        s.set_flip_x(true);
        let mut dst = Bitmap::create(2, 2, false);
        s.draw(&mut dst);
        assert_eq!(rgb(dst.pixel(0, 0).unwrap()), (0, 0, 255));
        assert_eq!(rgb(dst.pixel(1, 0).unwrap()), (255, 0, 0));
    }

    #[test]
    fn test_draw_zoom_doubles_size() {
        let mut s = ProjectedSprite::new(0);
        s.set_bitmap(Some(two_tone_bitmap()));
        s.set_zoom_x(2.0);
        s.set_zoom_y(2.0);
        assert_eq!(s.screen_rect(), Rect::new(0, 0, 4, 4));
        let mut dst = Bitmap::create(4, 4, false);
        s.draw(&mut dst);
        assert_eq!(rgb(dst.pixel(1, 3).unwrap()), (255, 0, 0));
        assert_eq!(rgb(dst.pixel(2, 3).unwrap()), (0, 0, 255));
    }

    #[test]
    fn test_draw_bush_band_is_half_transparent() {
        let mut s = ProjectedSprite::new(0);
        s.set_bitmap(Some(Arc::new(Bitmap::filled(1, 2, Color::new(255, 255, 255, 255)))));
        s.set_bush_depth(1);
        let mut dst = Bitmap::create(1, 2, false);
        s.draw(&mut dst);
        assert_eq!(dst.pixel(0, 0).unwrap().r, 255);
        assert_eq!(dst.pixel(0, 1).unwrap().r, 127);
    }

    #[test]
    fn test_invisible_sprite_draws_nothing() {
        let mut s = ProjectedSprite::new(0);
        s.set_bitmap(Some(two_tone_bitmap()));
        s.set_visible(false);
        let mut dst = Bitmap::create(2, 2, false);
        s.draw(&mut dst);
        assert_eq!(rgb(dst.pixel(0, 0).unwrap()), (0, 0, 0));
    }
}
