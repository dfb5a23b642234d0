//! Screen wide effects applied to battle sprites.

use bevy_ecs::prelude::Resource;

use crate::components::tone::Tone;

/// Screen tone shared by every enemy sprite.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct GameScreen {
    pub tone: Tone,
}
