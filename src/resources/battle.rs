//! Battle setup resource.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Formation the battle started in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleCondition {
    #[default]
    None,
    Initiative,
    Back,
    Surround,
    Pincers,
}

/// Battle wide state read when enemy sprites are created.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct Battle {
    pub condition: BattleCondition,
}
