//! Battle sprite state of an enemy.
//!
//! [`EnemySprite`] lives next to a
//! [`ProjectedSprite`](super::projectedsprite::ProjectedSprite) and picks the
//! frame of animated monster sheets from the enemy's combat state. Animated
//! sheets hold [`ANIMATED_FRAMES`] poses side by side, in [`AnimFrame`]
//! order.

use bevy_ecs::prelude::{Component, Entity};

use crate::bitmap::{BitmapRef, Rect};
use crate::components::gameenemy::GameEnemy;
use crate::resources::asynchandler::FileRequestBinding;
use crate::resources::battle::BattleCondition;
use crate::resources::gameconfig::SpriteSettings;

/// Poses in an animated monster sheet.
pub const ANIMATED_FRAMES: i32 = 5;
/// Ticks an action pose is held when no duration is given.
pub const DEFAULT_ACTION_DURATION: i32 = 20;
/// Name prefix of animated monster sheets.
pub const ANIMATED_MARKER: char = '%';
/// Appended to animated sheet names to form the file name.
pub const ANIMATED_SUFFIX: &str = "_anim";
/// Base z of battle sprites; the display y is added on top.
pub const ENEMY_Z_BASE: i32 = 1000;

/// Below this hp percentage an enemy shows the hurt pose.
const WEAK_HP_PERCENT: i32 = 10;

/// Configured fixed facing of battle enemies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FixedFacing {
    #[default]
    Disabled,
    Left,
    Right,
}

impl FixedFacing {
    /// Parse a config value (`none`, `left`, `right`), ignoring case.
    pub fn parse(value: &str) -> Option<FixedFacing> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "disabled" => Some(FixedFacing::Disabled),
            "left" => Some(FixedFacing::Left),
            "right" => Some(FixedFacing::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FixedFacing::Disabled => "none",
            FixedFacing::Left => "left",
            FixedFacing::Right => "right",
        }
    }

    /// Horizontal flip forced by this facing, if any. Monster graphics face
    /// left natively.
    pub fn flip_x(&self) -> Option<bool> {
        match self {
            FixedFacing::Disabled => None,
            FixedFacing::Left => Some(false),
            FixedFacing::Right => Some(true),
        }
    }
}

/// Pose index inside an animated sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimFrame {
    #[default]
    Idle1,
    Idle2,
    Action,
    Damage,
    Hurt,
}

impl AnimFrame {
    pub fn index(&self) -> i32 {
        match self {
            AnimFrame::Idle1 => 0,
            AnimFrame::Idle2 => 1,
            AnimFrame::Action => 2,
            AnimFrame::Damage => 3,
            AnimFrame::Hurt => 4,
        }
    }
}

/// Action pose currently being held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveAction {
    pub kind: i32,
    pub remaining: i32,
}

/// Enemy frame selection and graphic identity.
#[derive(Component, Clone, Debug)]
pub struct EnemySprite {
    /// Entity holding the [`GameEnemy`] shown by this sprite.
    pub subject: Entity,
    /// Sheet name and hue the current graphic was requested for.
    pub sprite_name: String,
    pub hue: i32,
    /// Sheet uses the animated layout.
    pub animated: bool,
    pub cycle: i32,
    pub frame: AnimFrame,
    pub action: Option<ActiveAction>,
    pub fixed_facing: FixedFacing,
    pub cycle_length: i32,
    /// Request the sprite is waiting for.
    pub binding: Option<FileRequestBinding>,
    /// Graphic after hue shifting, once loaded.
    pub graphic: Option<BitmapRef>,
}

impl EnemySprite {
    /// Sprite for `subject`. The fixed facing only applies to normal and
    /// initiative battles.
    pub fn new(subject: Entity, settings: &SpriteSettings, condition: BattleCondition) -> Self {
        let fixed_facing = match condition {
            BattleCondition::None | BattleCondition::Initiative => settings.fixed_enemy_facing,
            _ => FixedFacing::Disabled,
        };
        let cycle_length = if settings.idle_cycle_length >= 2 && settings.idle_cycle_length % 2 == 0 {
            settings.idle_cycle_length
        } else {
            SpriteSettings::default().idle_cycle_length
        };
        Self {
            subject,
            sprite_name: String::new(),
            hue: 0,
            animated: false,
            cycle: 0,
            frame: AnimFrame::default(),
            action: None,
            fixed_facing,
            cycle_length,
            binding: None,
            graphic: None,
        }
    }

    /// Sheet name and hue differ from what the graphic was built for.
    pub fn needs_refresh(&self, enemy: &GameEnemy) -> bool {
        self.sprite_name != enemy.sprite_name || self.hue != enemy.hue
    }

    /// File to request for the enemy's sheet; `None` for an empty name.
    pub fn file_name(sprite_name: &str) -> Option<String> {
        if sprite_name.is_empty() {
            None
        } else if sprite_name.starts_with(ANIMATED_MARKER) {
            Some(format!("{}{}", sprite_name, ANIMATED_SUFFIX))
        } else {
            Some(sprite_name.to_string())
        }
    }

    /// Hold the action pose for `duration` ticks. A negative `kind` means
    /// no action and clears any running one.
    pub fn set_action(&mut self, kind: i32, duration: i32) {
        self.action = (kind >= 0).then_some(ActiveAction {
            kind,
            remaining: duration,
        });
    }

    /// Select the frame for this tick. Returns the new frame for animated
    /// sheets and `None` for static ones.
    ///
    /// First match wins: dead, blinking, weak, acting, idle.
    pub fn advance(&mut self, enemy: &GameEnemy) -> Option<AnimFrame> {
        if !self.animated {
            return None;
        }
        let frame = if enemy.is_dead() || enemy.blink_timer > 0 {
            AnimFrame::Damage
        } else if enemy.max_hp > 0 && enemy.hp * 100 / enemy.max_hp < WEAK_HP_PERCENT {
            AnimFrame::Hurt
        } else if let Some(action) = self.action.as_mut() {
            action.remaining -= 1;
            if action.remaining <= 0 {
                self.action = None;
            }
            AnimFrame::Action
        } else {
            self.cycle = (self.cycle + 1) % self.cycle_length;
            if self.cycle / (self.cycle_length / 2) == 0 {
                AnimFrame::Idle1
            } else {
                AnimFrame::Idle2
            }
        };
        self.frame = frame;
        Some(frame)
    }

    /// Source rectangle of the current frame, for animated sheets.
    pub fn frame_rect(&self) -> Option<Rect> {
        let graphic = self.graphic.as_ref().filter(|_| self.animated)?;
        let w = graphic.width() / ANIMATED_FRAMES;
        Some(Rect::new(w * self.frame.index(), 0, w, graphic.height()))
    }

    /// Sprite origin for a graphic of the given size.
    pub fn origin(&self, width: i32, height: i32) -> (i32, i32) {
        if self.animated {
            (width / (ANIMATED_FRAMES * 2), height / 2)
        } else {
            (width / 2, height / 2)
        }
    }

    /// Flip applied when drawing `enemy`.
    pub fn flip_x(&self, enemy: &GameEnemy) -> bool {
        self.fixed_facing
            .flip_x()
            .unwrap_or(enemy.direction_flipped)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bevy_ecs::world::World;

    use super::*;
    use crate::bitmap::Bitmap;

    fn sprite(settings: &SpriteSettings) -> EnemySprite {
        let subject = World::new().spawn_empty().id();
        let mut s = EnemySprite::new(subject, settings, BattleCondition::None);
        s.animated = true;
        s
    }

    #[test]
    fn test_fixed_facing_parse() {
        assert_eq!(FixedFacing::parse("LEFT"), Some(FixedFacing::Left));
        assert_eq!(FixedFacing::parse(" right "), Some(FixedFacing::Right));
        assert_eq!(FixedFacing::parse("none"), Some(FixedFacing::Disabled));
        assert_eq!(FixedFacing::parse("up"), None);
    }

    #[test]
    fn test_fixed_facing_only_in_plain_battles() {
        let settings = SpriteSettings {
            fixed_enemy_facing: FixedFacing::Right,
            ..Default::default()
        };
        let subject = World::new().spawn_empty().id();
        let plain = EnemySprite::new(subject, &settings, BattleCondition::Initiative);
        let surround = EnemySprite::new(subject, &settings, BattleCondition::Surround);
        assert_eq!(plain.fixed_facing, FixedFacing::Right);
        assert_eq!(surround.fixed_facing, FixedFacing::Disabled);
    }

    #[test]
    fn test_dead_beats_everything() {
        let mut s = sprite(&SpriteSettings::default());
        let mut enemy = GameEnemy::new(0, "%bat", 100, 0, 0);
        enemy.hp = 0;
        enemy.blink_timer = 5;
        s.set_action(1, 10);
        assert_eq!(s.advance(&enemy), Some(AnimFrame::Damage));
        // the action timer does not run while a higher priority pose shows
        assert_eq!(s.action.map(|a| a.remaining), Some(10));
    }

    #[test]
    fn test_blink_beats_weak() {
        let mut s = sprite(&SpriteSettings::default());
        let mut enemy = GameEnemy::new(0, "%bat", 100, 0, 0);
        enemy.hp = 5;
        enemy.blink_timer = 3;
        assert_eq!(s.advance(&enemy), Some(AnimFrame::Damage));
        enemy.blink_timer = 0;
        assert_eq!(s.advance(&enemy), Some(AnimFrame::Hurt));
    }

    #[test]
    fn test_weak_beats_action() {
        let mut s = sprite(&SpriteSettings::default());
        let mut enemy = GameEnemy::new(0, "%bat", 100, 0, 0);
        enemy.hp = 9;
        s.set_action(1, 10);
        assert_eq!(s.advance(&enemy), Some(AnimFrame::Hurt));
        enemy.hp = 10;
        assert_eq!(s.advance(&enemy), Some(AnimFrame::Action));
    }

    #[test]
    fn test_negative_action_kind_stays_idle() {
        let mut s = sprite(&SpriteSettings::default());
        let enemy = GameEnemy::new(0, "%bat", 100, 0, 0);
        s.set_action(-1, 20);
        assert!(s.action.is_none());
        assert_eq!(s.advance(&enemy), Some(AnimFrame::Idle1));

        s.set_action(2, 20);
        assert_eq!(s.advance(&enemy), Some(AnimFrame::Action));
        s.set_action(-1, 20);
        assert!(s.action.is_none());
        assert_ne!(s.advance(&enemy), Some(AnimFrame::Action));
    }

    #[test]
    fn test_zero_max_hp_is_not_weak() {
        let mut s = sprite(&SpriteSettings::default());
        let mut enemy = GameEnemy::new(0, "%bat", 0, 0, 0);
        enemy.hp = 1;
        assert_eq!(s.advance(&enemy), Some(AnimFrame::Idle1));
    }

    #[test]
    fn test_action_expires() {
        let mut s = sprite(&SpriteSettings::default());
        let enemy = GameEnemy::new(0, "%bat", 100, 0, 0);
        s.set_action(7, 2);
        assert_eq!(s.advance(&enemy), Some(AnimFrame::Action));
        assert!(s.action.is_some());
        assert_eq!(s.advance(&enemy), Some(AnimFrame::Action));
        assert!(s.action.is_none());
        assert_ne!(s.advance(&enemy), Some(AnimFrame::Action));
    }

    #[test]
    fn test_idle_cycle_halves() {
        let settings = SpriteSettings {
            idle_cycle_length: 4,
            ..Default::default()
        };
        let mut s = sprite(&settings);
        let enemy = GameEnemy::new(0, "%bat", 100, 0, 0);
        let frames: Vec<_> = (0..8).map(|_| s.advance(&enemy).unwrap()).collect();
        use AnimFrame::*;
        assert_eq!(
            frames,
            vec![Idle1, Idle2, Idle2, Idle1, Idle1, Idle2, Idle2, Idle1]
        );
        assert!(s.cycle < 4);
    }

    #[test]
    fn test_invalid_cycle_length_uses_default() {
        let settings = SpriteSettings {
            idle_cycle_length: 7,
            ..Default::default()
        };
        assert_eq!(sprite(&settings).cycle_length, 40);
    }

    #[test]
    fn test_static_sheet_never_animates() {
        let mut s = sprite(&SpriteSettings::default());
        s.animated = false;
        let enemy = GameEnemy::new(0, "bat", 100, 0, 0);
        assert_eq!(s.advance(&enemy), None);
    }

    #[test]
    fn test_frame_rect_and_origin() {
        let mut s = sprite(&SpriteSettings::default());
        s.graphic = Some(Arc::new(Bitmap::create(200, 48, true)));
        s.frame = AnimFrame::Damage;
        assert_eq!(s.frame_rect(), Some(Rect::new(120, 0, 40, 48)));
        assert_eq!(s.origin(200, 48), (20, 24));
        s.animated = false;
        assert_eq!(s.frame_rect(), None);
        assert_eq!(s.origin(200, 48), (100, 24));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(EnemySprite::file_name("%bat").as_deref(), Some("%bat_anim"));
        assert_eq!(EnemySprite::file_name("slime").as_deref(), Some("slime"));
        assert_eq!(EnemySprite::file_name(""), None);
    }
}
