//! ECS components.
//!
//! Simulation state read by sprites, the sprite kinds that track it, and the
//! drawable they write into.
//!
//! Submodules overview:
//! - [`charactersprite`] – graphic identity and pose size of a map character sprite
//! - [`enemysprite`] – frame selection state of a battle enemy sprite
//! - [`gamecharacter`] – map character state (position, facing, step, effects)
//! - [`gameenemy`] – battle enemy state (hp, timers, display position)
//! - [`projectedsprite`] – drawable crop of a shared bitmap with effects and z order
//! - [`tone`] – colour tone and flash effects

pub mod charactersprite;
pub mod enemysprite;
pub mod gamecharacter;
pub mod gameenemy;
pub mod projectedsprite;
pub mod tone;
