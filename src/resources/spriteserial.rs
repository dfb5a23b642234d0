//! Sprite insertion order.

use bevy_ecs::prelude::Resource;

/// Hands out increasing serial numbers to new sprites. Sprites with equal z
/// are drawn in serial order.
#[derive(Resource, Debug, Default)]
pub struct SpriteSerial {
    next: u64,
}

impl SpriteSerial {
    pub fn next(&mut self) -> u64 {
        let serial = self.next;
        self.next += 1;
        serial
    }
}
