//! Color tone and flash applied to sprites while compositing.
//!
//! - [`Tone`] scales each channel around a neutral value of 128 and can
//!   desaturate through its `gray` channel. The screen tone is shared by all
//!   battlers; see [`GameScreen`](crate::resources::gamescreen::GameScreen).
//! - [`FlashColor`] blends every opaque pixel toward a color with a given
//!   strength. Characters and enemies expose their current flash.

use raylib::prelude::Color;

/// Neutral channel value of a [`Tone`].
pub const TONE_NEUTRAL: u8 = 128;

/// Per-channel color tone. 128 on every channel leaves colors unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tone {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub gray: u8,
}

impl Tone {
    pub fn new(red: u8, green: u8, blue: u8, gray: u8) -> Self {
        Self {
            red,
            green,
            blue,
            gray,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the tone to a color. Alpha is untouched.
    pub fn apply(&self, color: Color) -> Color {
        if self.is_neutral() {
            return color;
        }
        let mut r = color.r as i32;
        let mut g = color.g as i32;
        let mut b = color.b as i32;
        if self.gray != TONE_NEUTRAL {
            let lum = (r + g + b) / 3;
            let gray = self.gray as i32;
            r = lum + (r - lum) * gray / TONE_NEUTRAL as i32;
            g = lum + (g - lum) * gray / TONE_NEUTRAL as i32;
            b = lum + (b - lum) * gray / TONE_NEUTRAL as i32;
        }
        let scale = |c: i32, t: u8| (c * t as i32 / TONE_NEUTRAL as i32).clamp(0, 255) as u8;
        Color::new(
            scale(r, self.red),
            scale(g, self.green),
            scale(b, self.blue),
            color.a,
        )
    }
}

impl Default for Tone {
    fn default() -> Self {
        Self::new(TONE_NEUTRAL, TONE_NEUTRAL, TONE_NEUTRAL, TONE_NEUTRAL)
    }
}

/// Flash overlay: every pixel moves toward `color` by `strength / 255`.
#[derive(Clone, Copy, Debug)]
pub struct FlashColor {
    pub color: Color,
    pub strength: u8,
}

impl FlashColor {
    pub fn new(r: u8, g: u8, b: u8, strength: u8) -> Self {
        Self {
            color: Color::new(r, g, b, 255),
            strength,
        }
    }

    pub fn is_active(&self) -> bool {
        self.strength > 0
    }

    /// Blend a color toward the flash color. Alpha is untouched.
    pub fn apply(&self, color: Color) -> Color {
        if !self.is_active() {
            return color;
        }
        let k = self.strength as i32;
        let mix = |c: u8, f: u8| (c as i32 + (f as i32 - c as i32) * k / 255) as u8;
        Color::new(
            mix(color.r, self.color.r),
            mix(color.g, self.color.g),
            mix(color.b, self.color.b),
            color.a,
        )
    }
}

impl Default for FlashColor {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}
