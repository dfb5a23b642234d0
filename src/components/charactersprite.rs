//! Map sprite state of a character.
//!
//! A character is drawn either from a cell of a charset ("charset mode")
//! or from a single chipset tile ("tile mode"). The mode follows the sprite
//! name: a non-empty name selects the charset.

use bevy_ecs::prelude::{Component, Entity};

use crate::bitmap::Rect;
use crate::components::gamecharacter::{GameCharacter, StepFrame};
use crate::resources::asynchandler::FileRequestBinding;
use crate::resources::gameconfig::SpriteSettings;

#[derive(Component, Clone, Debug)]
pub struct CharacterSprite {
    /// Entity holding the [`GameCharacter`] shown by this sprite.
    pub subject: Entity,
    /// Identity the current graphic was requested for. `tile_id` starts at
    /// -1 so the first update always requests.
    pub tile_id: i32,
    pub character_name: String,
    pub character_index: i32,
    /// Size of one pose inside the charset cell.
    pub chara_width: i32,
    pub chara_height: i32,
    /// Render offset added to the character's screen position.
    pub x_offset: i32,
    pub y_offset: i32,
    /// Set when the chipset changed under a tile mode sprite.
    pub refresh_bitmap: bool,
    pub settings: SpriteSettings,
    /// Request the sprite is waiting for.
    pub binding: Option<FileRequestBinding>,
}

impl CharacterSprite {
    pub fn new(subject: Entity, x_offset: i32, y_offset: i32, settings: SpriteSettings) -> Self {
        Self {
            subject,
            tile_id: -1,
            character_name: String::new(),
            character_index: 0,
            chara_width: 0,
            chara_height: 0,
            x_offset,
            y_offset,
            refresh_bitmap: false,
            settings,
            binding: None,
        }
    }

    pub fn uses_charset(&self) -> bool {
        !self.character_name.is_empty()
    }

    /// The character's graphic identity differs from the loaded one, or a
    /// refresh was requested.
    pub fn needs_refresh(&self, character: &GameCharacter) -> bool {
        self.tile_id != character.tile_id
            || self.character_name != character.sprite_name
            || self.character_index != character.sprite_index
            || self.refresh_bitmap
    }

    /// Adopt the character's graphic identity and clear the refresh flag.
    pub fn sync_identity(&mut self, character: &GameCharacter) {
        self.tile_id = character.tile_id;
        self.character_name = character.sprite_name.clone();
        self.character_index = character.sprite_index;
        self.refresh_bitmap = false;
    }

    /// Ask for a bitmap reload after a chipset change. Charset sprites do
    /// not depend on the chipset and ignore it.
    pub fn chipset_updated(&mut self) {
        if !self.uses_charset() {
            self.refresh_bitmap = true;
        }
    }

    /// Pose rectangle relative to the charset cell.
    pub fn frame_rect(&self, character: &GameCharacter) -> Rect {
        let frame = match character.anim_frame {
            StepFrame::Middle2 => StepFrame::Middle,
            other => other,
        };
        Rect::new(
            frame.column() * self.chara_width,
            character.facing.row() * self.chara_height,
            self.chara_width,
            self.chara_height,
        )
    }
}
