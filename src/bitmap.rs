//! CPU bitmaps shared between the cache and sprites.
//!
//! A [`Bitmap`] is an immutable-once-shared RGBA pixel buffer. Sprites and
//! the [`BitmapCache`](crate::resources::bitmapcache::BitmapCache) hold them
//! through [`BitmapRef`] (`Arc<Bitmap>`); derived variants such as hue shifts
//! are always new bitmaps, never in-place edits of a shared one.
//!
//! Pixels use raylib's [`Color`] so the composed surface can be uploaded to a
//! texture without conversion.

use std::path::Path;
use std::sync::Arc;

use raylib::prelude::{Color, Image};

/// Shared, reference-counted bitmap handle.
pub type BitmapRef = Arc<Bitmap>;

/// Integer pixel rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// True when `other` lies fully inside `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Intersection of two rectangles; empty (zero sized) when disjoint.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return Rect::new(x, y, 0, 0);
        }
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Same rectangle moved by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// RGBA pixel buffer with a cache identifier.
#[derive(Clone, Debug)]
pub struct Bitmap {
    id: String,
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl Bitmap {
    /// Create a bitmap filled with transparent pixels, or opaque black when
    /// `transparent` is false.
    pub fn create(width: i32, height: i32, transparent: bool) -> Self {
        let fill = if transparent {
            Color::new(0, 0, 0, 0)
        } else {
            Color::new(0, 0, 0, 255)
        };
        Self::filled(width, height, fill)
    }

    /// Create a bitmap where every pixel is `color`.
    pub fn filled(width: i32, height: i32, color: Color) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            id: String::new(),
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    /// Wrap an existing row-major pixel buffer.
    pub fn from_pixels(width: i32, height: i32, pixels: Vec<Color>) -> Result<Self, String> {
        if width < 0 || height < 0 || pixels.len() != (width * height) as usize {
            return Err(format!(
                "Pixel buffer of {} entries does not match {}x{}",
                pixels.len(),
                width,
                height
            ));
        }
        Ok(Self {
            id: String::new(),
            width,
            height,
            pixels,
        })
    }

    /// Magenta/black checkerboard used when a graphic cannot be resolved.
    pub fn placeholder(width: i32, height: i32) -> Self {
        let mut bitmap = Self::create(width, height, true);
        for y in 0..bitmap.height {
            for x in 0..bitmap.width {
                let color = if ((x / 4) + (y / 4)) % 2 == 0 {
                    Color::new(255, 0, 255, 255)
                } else {
                    Color::new(0, 0, 0, 255)
                };
                bitmap.set_pixel(x, y, color);
            }
        }
        bitmap
    }

    /// Decode an image file through raylib.
    pub fn load(path: &Path) -> Result<Self, String> {
        let path_str = path
            .to_str()
            .ok_or_else(|| format!("Non UTF-8 image path: {}", path.display()))?;
        let image = Image::load_image(path_str)
            .map_err(|e| format!("Failed to load image {}: {}", path.display(), e))?;
        let width = image.width();
        let height = image.height();
        let pixels: Vec<Color> = image.get_image_data().to_vec();
        let mut bitmap = Self::from_pixels(width, height, pixels)?;
        bitmap.set_id(path.display().to_string());
        Ok(bitmap)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Full bitmap bounds at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Alpha-blend `src` over the pixel at `(x, y)`, scaling the source alpha
    /// by `opacity`.
    pub fn blend_pixel(&mut self, x: i32, y: i32, src: Color, opacity: u8) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let a = (src.a as u32 * opacity as u32) / 255;
        if a == 0 {
            return;
        }
        let dst = self.pixels[i];
        let na = 255 - a;
        let out_a = a + (dst.a as u32 * na) / 255;
        self.pixels[i] = Color::new(
            ((src.r as u32 * a + dst.r as u32 * na) / 255) as u8,
            ((src.g as u32 * a + dst.g as u32 * na) / 255) as u8,
            ((src.b as u32 * a + dst.b as u32 * na) / 255) as u8,
            out_a.min(255) as u8,
        );
    }

    /// Copy `src_rect` of `src` to `(dst_x, dst_y)` rotating every pixel's hue
    /// by `hue` degrees. Alpha is preserved.
    pub fn hue_change_blit(&mut self, dst_x: i32, dst_y: i32, src: &Bitmap, src_rect: Rect, hue: i32) {
        let src_rect = src_rect.intersect(&src.rect());
        for y in 0..src_rect.height {
            for x in 0..src_rect.width {
                if let Some(color) = src.pixel(src_rect.x + x, src_rect.y + y) {
                    self.set_pixel(dst_x + x, dst_y + y, rotate_hue(color, hue));
                }
            }
        }
    }

    /// Copy of `rect` as a standalone bitmap. Areas outside the source stay
    /// transparent.
    pub fn crop(&self, rect: Rect) -> Bitmap {
        let mut out = Bitmap::create(rect.width, rect.height, true);
        for y in 0..out.height {
            for x in 0..out.width {
                if let Some(color) = self.pixel(rect.x + x, rect.y + y) {
                    out.set_pixel(x, y, color);
                }
            }
        }
        out
    }

    /// One pixel outline, used by the debug overlay.
    pub fn stroke_rect(&mut self, rect: Rect, color: Color) {
        for x in rect.x..rect.right() {
            self.set_pixel(x, rect.y, color);
            self.set_pixel(x, rect.bottom() - 1, color);
        }
        for y in rect.y..rect.bottom() {
            self.set_pixel(rect.x, y, color);
            self.set_pixel(rect.right() - 1, y, color);
        }
    }
}

/// Rotate the hue of a color in HSV space.
pub fn rotate_hue(color: Color, hue: i32) -> Color {
    if hue.rem_euclid(360) == 0 {
        return color;
    }
    let r = color.r as f32 / 255.0;
    let g = color.g as f32 / 255.0;
    let b = color.b as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if delta <= f32::EPSILON {
        // grey has no hue
        return color;
    }

    let h = if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = delta / max;
    let v = max;

    let h = (h + hue as f32).rem_euclid(360.0);
    let sector = (h / 60.0).floor();
    let f = h / 60.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match sector as i32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Color::new(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        color.a,
    )
}
