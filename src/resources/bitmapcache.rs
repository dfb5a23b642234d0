//! Shared bitmap cache.
//!
//! Bitmaps are keyed by `"<Category>/<name>"` and handed out as
//! [`BitmapRef`]s, so every sprite showing the same graphic shares one
//! allocation. Derived bitmaps (hue shifts, chipset tiles) are cached under
//! composite identifiers and reused the same way.

use std::path::Path;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::bitmap::{Bitmap, BitmapRef, Rect};
use crate::resources::asynchandler::FileCategory;

/// Size of the placeholder shown for a graphic that could not be loaded;
/// large enough to hold a full sheet of its category.
fn placeholder_size(category: FileCategory) -> (i32, i32) {
    match category {
        FileCategory::CharSet => (288, 256),
        FileCategory::ChipSet => (480, 256),
        FileCategory::Monster => (48, 48),
    }
}

/// Lower layer tiles (block E) start at this id.
pub const BLOCK_E_INDEX: i32 = 5000;
/// Upper layer tiles (block F) start at this id.
pub const BLOCK_F_INDEX: i32 = 10000;

/// Cache of decoded and derived bitmaps.
#[derive(Resource)]
pub struct BitmapCache {
    map: FxHashMap<String, BitmapRef>,
    tile_size: i32,
}

impl BitmapCache {
    pub fn new(tile_size: i32) -> Self {
        Self {
            map: FxHashMap::default(),
            tile_size,
        }
    }

    fn key(category: FileCategory, name: &str) -> String {
        format!("{}/{}", category.dir_name(), name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<BitmapRef> {
        self.map.get(id).cloned()
    }

    /// Register an already decoded bitmap. Its id becomes the cache key.
    pub fn insert(&mut self, category: FileCategory, name: &str, mut bitmap: Bitmap) -> BitmapRef {
        let key = Self::key(category, name);
        bitmap.set_id(key.clone());
        let bitmap = Arc::new(bitmap);
        self.map.insert(key, bitmap.clone());
        bitmap
    }

    /// Cached bitmap for `name`, decoding `path` on first use. Missing or
    /// broken files yield a placeholder so the sprite still shows something.
    pub fn load(&mut self, category: FileCategory, name: &str, path: Option<&Path>) -> BitmapRef {
        let key = Self::key(category, name);
        if let Some(bitmap) = self.map.get(&key) {
            return bitmap.clone();
        }
        let (pw, ph) = placeholder_size(category);
        let bitmap = match path.map(Bitmap::load) {
            Some(Ok(bitmap)) => bitmap,
            Some(Err(e)) => {
                warn!("{}; using placeholder", e);
                Bitmap::placeholder(pw, ph)
            }
            None => {
                warn!("No file for {}; using placeholder", key);
                Bitmap::placeholder(pw, ph)
            }
        };
        debug!("Cached {} ({}x{})", key, bitmap.width(), bitmap.height());
        self.insert(category, name, bitmap)
    }

    pub fn charset(&mut self, name: &str, path: Option<&Path>) -> BitmapRef {
        self.load(FileCategory::CharSet, name, path)
    }

    pub fn chipset(&mut self, name: &str, path: Option<&Path>) -> BitmapRef {
        self.load(FileCategory::ChipSet, name, path)
    }

    pub fn monster(&mut self, name: &str, path: Option<&Path>) -> BitmapRef {
        self.load(FileCategory::Monster, name, path)
    }

    /// Position of `tile_id` inside a chipset.
    pub fn tile_rect(&self, tile_id: i32) -> Rect {
        let sub_tile_id = if tile_id >= BLOCK_F_INDEX {
            tile_id - BLOCK_F_INDEX + 0x90
        } else if tile_id >= BLOCK_E_INDEX {
            tile_id - BLOCK_E_INDEX + 0x12
        } else {
            0
        };
        let t = self.tile_size;
        Rect::new(
            ((sub_tile_id % 6) + (sub_tile_id / 96) * 6) * t,
            ((sub_tile_id / 6) % 16) * t,
            t,
            t,
        )
    }

    /// Single tile `tile_id` of the chipset `chipset_name`. The chipset must
    /// have been loaded already; otherwise a transparent tile is returned.
    pub fn tile(&mut self, chipset_name: &str, tile_id: i32) -> BitmapRef {
        let id = format!("{},tile={}", Self::key(FileCategory::ChipSet, chipset_name), tile_id);
        if let Some(tile) = self.map.get(&id) {
            return tile.clone();
        }
        let mut tile = match self.map.get(&Self::key(FileCategory::ChipSet, chipset_name)) {
            Some(chipset) => chipset.crop(self.tile_rect(tile_id)),
            None => {
                warn!("Chipset {} not loaded; blank tile {}", chipset_name, tile_id);
                Bitmap::create(self.tile_size, self.tile_size, true)
            }
        };
        tile.set_id(id.clone());
        let tile = Arc::new(tile);
        self.map.insert(id, tile.clone());
        tile
    }

    /// Hue rotated copy of `base`, cached as `"<base id>,hue=<hue>"`.
    ///
    /// Repeated calls with the same base and hue return the same bitmap.
    pub fn hue_variant(&mut self, base: &BitmapRef, hue: i32) -> BitmapRef {
        if hue == 0 {
            return base.clone();
        }
        let id = format!("{},hue={}", base.id(), hue);
        if let Some(variant) = self.map.get(&id) {
            return variant.clone();
        }
        let mut variant = Bitmap::create(base.width(), base.height(), true);
        variant.hue_change_blit(0, 0, base, base.rect(), hue);
        variant.set_id(id.clone());
        let variant = Arc::new(variant);
        self.map.insert(id, variant.clone());
        variant
    }
}
