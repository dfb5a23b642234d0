//! Map character state read by character sprites.
//!
//! [`GameCharacter`] is owned by the simulation; sprites only read it
//! through the `subject` handle stored in
//! [`CharacterSprite`](super::charactersprite::CharacterSprite).

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::tone::FlashColor;

/// Z distance between draw priority layers.
pub const Z_LAYER_STRIDE: i32 = 1_000_000;

/// Facing direction; also the charset row of the pose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Up,
    Right,
    #[default]
    Down,
    Left,
}

impl Facing {
    /// Row of this facing in a character cell.
    pub fn row(&self) -> i32 {
        match self {
            Facing::Up => 0,
            Facing::Right => 1,
            Facing::Down => 2,
            Facing::Left => 3,
        }
    }
}

/// Walking animation step; also the charset column of the pose.
///
/// `Middle2` looks exactly like `Middle`; it only exists so the walk cycle
/// has four steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepFrame {
    Left,
    #[default]
    Middle,
    Right,
    Middle2,
}

impl StepFrame {
    pub fn column(&self) -> i32 {
        match self {
            StepFrame::Left => 0,
            StepFrame::Middle => 1,
            StepFrame::Right => 2,
            StepFrame::Middle2 => 3,
        }
    }

    /// Next step of the walk cycle.
    pub fn next(&self) -> StepFrame {
        match self {
            StepFrame::Left => StepFrame::Middle,
            StepFrame::Middle => StepFrame::Right,
            StepFrame::Right => StepFrame::Middle2,
            StepFrame::Middle2 => StepFrame::Left,
        }
    }
}

/// Draw priority relative to other characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Below,
    #[default]
    Same,
    Above,
}

/// Simulation state of a map character.
#[derive(Component, Clone, Debug)]
pub struct GameCharacter {
    pub facing: Facing,
    pub anim_frame: StepFrame,
    /// Screen x of the tile centre the character stands on.
    pub screen_x: i32,
    /// Screen y of the ground point.
    pub screen_y: i32,
    /// Lift above the ground, e.g. while jumping.
    pub jump_height: i32,
    pub priority: Priority,
    pub visible: bool,
    pub opacity: u8,
    pub flash: FlashColor,
    /// 0 when not in a bush, up to 3 for the deepest bush.
    pub bush_depth: i32,
    /// Tile graphic used when `sprite_name` is empty.
    pub tile_id: i32,
    pub sprite_name: String,
    pub sprite_index: i32,
}

impl GameCharacter {
    /// Character using cell `sprite_index` of charset `sprite_name`.
    pub fn with_charset(sprite_name: impl Into<String>, sprite_index: i32, x: i32, y: i32) -> Self {
        Self {
            sprite_name: sprite_name.into(),
            sprite_index,
            ..Self::with_tile(0, x, y)
        }
    }

    /// Character drawn with a single chipset tile.
    pub fn with_tile(tile_id: i32, x: i32, y: i32) -> Self {
        Self {
            facing: Facing::default(),
            anim_frame: StepFrame::default(),
            screen_x: x,
            screen_y: y,
            jump_height: 0,
            priority: Priority::default(),
            visible: true,
            opacity: 255,
            flash: FlashColor::default(),
            bush_depth: 0,
            tile_id,
            sprite_name: String::new(),
            sprite_index: 0,
        }
    }

    pub fn screen_x(&self) -> i32 {
        self.screen_x
    }

    /// Screen y, lifted by the jump height when `apply_jump` is set.
    pub fn screen_y(&self, apply_jump: bool) -> i32 {
        if apply_jump {
            self.screen_y - self.jump_height
        } else {
            self.screen_y
        }
    }

    /// Draw order key: priority layer first, then ground y.
    pub fn screen_z(&self, y_offset: i32) -> i32 {
        let layer = match self.priority {
            Priority::Below => 0,
            Priority::Same => 1,
            Priority::Above => 2,
        };
        layer * Z_LAYER_STRIDE + self.screen_y + y_offset
    }
}
