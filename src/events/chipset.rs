//! Chipset change notification.
//!
//! Triggering a [`ChipsetChangedEvent`] switches the map's chipset and marks
//! every tile mode character sprite for a reload. Charset sprites keep their
//! graphic.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::charactersprite::CharacterSprite;
use crate::resources::gamemap::GameMap;

/// The current map now uses `chipset_name`.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ChipsetChangedEvent {
    pub chipset_name: String,
}

/// Store the new chipset and flag tile sprites for refresh.
pub fn chipset_changed_observer(
    trigger: On<ChipsetChangedEvent>,
    mut map: ResMut<GameMap>,
    mut sprites: Query<&mut CharacterSprite>,
) {
    let name = &trigger.event().chipset_name;
    info!("Chipset changed: '{}' -> '{}'", map.chipset_name, name);
    map.chipset_name = name.clone();
    for mut sprite in sprites.iter_mut() {
        sprite.chipset_updated();
    }
}
