//! Charset layout resolution.
//!
//! A standard charset holds 4x2 characters, each a 3x4 grid of poses
//! (3 animation steps by 4 facings). Sheets whose name starts with
//! [`LARGE_CHARSET_MARKER`] may instead be laid out from the bitmap size when
//! the engine extensions are enabled.

use log::debug;

use crate::bitmap::Rect;
use crate::resources::gameconfig::SpriteSettings;

/// Name prefix of charsets laid out from the bitmap size.
pub const LARGE_CHARSET_MARKER: char = '$';

/// Character cells per charset row.
pub const CHARSET_COLUMNS: i32 = 4;

/// Which layout produced a charset rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharsetLayout {
    /// Fixed 72x128 cells, scaled by the tile size.
    Standard,
    /// Cells sized from the bitmap (`width / 4`, `height / 2`).
    Large,
    /// Large charset requested while extensions are off; standard cells used.
    LargeIgnored,
}

/// Rectangle of one character cell inside its charset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharsetCell {
    pub rect: Rect,
    pub layout: CharsetLayout,
}

/// Resolve the cell of character `index` (row-major, 4 per row) of charset
/// `name` whose bitmap spans `bitmap_rect`.
pub fn character_rect(
    name: &str,
    index: i32,
    bitmap_rect: Rect,
    settings: &SpriteSettings,
) -> CharsetCell {
    let scale = settings.tile_scale();
    let mut rect = Rect::new(0, 0, 24 * scale * 3, 32 * scale * 4);
    let mut layout = CharsetLayout::Standard;

    if name.starts_with(LARGE_CHARSET_MARKER) {
        if settings.easyrpg_extensions {
            rect.width = bitmap_rect.width * scale / 4;
            rect.height = bitmap_rect.height * scale / 2;
            layout = CharsetLayout::Large;
        } else {
            debug!(
                "Ignoring large charset {}. EasyRPG Extension not enabled.",
                name
            );
            layout = CharsetLayout::LargeIgnored;
        }
    }

    rect.x = (index % CHARSET_COLUMNS) * rect.width;
    rect.y = (index / CHARSET_COLUMNS) * rect.height;
    CharsetCell { rect, layout }
}
