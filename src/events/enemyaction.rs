//! Battle action requests for enemy sprites.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::enemysprite::{DEFAULT_ACTION_DURATION, EnemySprite};

/// Show the action pose on `sprite` for `duration` ticks.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyActionEvent {
    /// Entity carrying the [`EnemySprite`].
    pub sprite: Entity,
    pub kind: i32,
    pub duration: i32,
}

impl EnemyActionEvent {
    pub fn new(sprite: Entity, kind: i32) -> Self {
        Self {
            sprite,
            kind,
            duration: DEFAULT_ACTION_DURATION,
        }
    }
}

pub fn enemy_action_observer(trigger: On<EnemyActionEvent>, mut sprites: Query<&mut EnemySprite>) {
    let event = trigger.event();
    match sprites.get_mut(event.sprite) {
        Ok(mut sprite) => sprite.set_action(event.kind, event.duration),
        Err(_) => debug!("Action {} for {:?} ignored: not an enemy sprite", event.kind, event.sprite),
    }
}
