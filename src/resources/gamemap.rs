//! Current map state shared with character sprites.

use bevy_ecs::prelude::Resource;

/// Map level data the sprites depend on.
///
/// Tile mode character sprites crop their graphic from the chipset named
/// here. Changing it goes through
/// [`ChipsetChangedEvent`](crate::events::chipset::ChipsetChangedEvent) so
/// those sprites reload.
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub struct GameMap {
    /// Chipset of the current map; empty when the map has none.
    pub chipset_name: String,
}

impl GameMap {
    pub fn new(chipset_name: impl Into<String>) -> Self {
        Self {
            chipset_name: chipset_name.into(),
        }
    }
}
