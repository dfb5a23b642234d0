//! Battle enemy state read by enemy sprites.
//!
//! The battle simulation owns [`GameEnemy`] and advances its timers; the
//! sprite side only reads it.

use bevy_ecs::prelude::Component;

use crate::components::tone::FlashColor;

/// Ticks of the damage blink.
pub const BLINK_DURATION: i32 = 20;
/// Ticks of the death fade.
pub const DEATH_FADE_DURATION: i32 = 36;
/// Ticks of the explosion.
pub const EXPLODE_DURATION: i32 = 20;

/// Simulation state of one troop member.
#[derive(Component, Clone, Debug)]
pub struct GameEnemy {
    pub troop_member_id: i32,
    /// Battle graphic; a leading `%` selects the animated sheet.
    pub sprite_name: String,
    /// Hue rotation in degrees applied to the graphic.
    pub hue: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub hidden: bool,
    pub blink_timer: i32,
    pub death_timer: i32,
    pub explode_timer: i32,
    pub transparent: bool,
    pub direction_flipped: bool,
    pub display_x: i32,
    pub display_y: i32,
    pub flash: FlashColor,
}

impl GameEnemy {
    pub fn new(troop_member_id: i32, sprite_name: impl Into<String>, max_hp: i32, x: i32, y: i32) -> Self {
        Self {
            troop_member_id,
            sprite_name: sprite_name.into(),
            hue: 0,
            hp: max_hp,
            max_hp,
            hidden: false,
            blink_timer: 0,
            death_timer: 0,
            explode_timer: 0,
            transparent: false,
            direction_flipped: false,
            display_x: x,
            display_y: y,
            flash: FlashColor::default(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Alive and not hidden.
    pub fn exists(&self) -> bool {
        !self.hidden && !self.is_dead()
    }

    /// Apply damage, starting the blink and, on death, the fade out.
    pub fn damage(&mut self, amount: i32) {
        if self.is_dead() {
            return;
        }
        self.hp = (self.hp - amount).max(0);
        self.blink_timer = BLINK_DURATION;
        if self.is_dead() {
            self.death_timer = DEATH_FADE_DURATION;
        }
    }

    /// Kill the enemy with the explosion effect instead of the fade.
    pub fn explode(&mut self) {
        self.hp = 0;
        self.explode_timer = EXPLODE_DURATION;
    }

    /// Advance every running timer by one tick.
    pub fn update_timers(&mut self) {
        self.blink_timer = (self.blink_timer - 1).max(0);
        self.death_timer = (self.death_timer - 1).max(0);
        self.explode_timer = (self.explode_timer - 1).max(0);
    }
}
