//! Actor sprite library.
//!
//! Turns map characters and battle enemies into drawable sprites: frame
//! selection, flat and Mode7 projection, asynchronous graphic loading and
//! software compositing. Exposes the ECS components, resources, systems and
//! events for the demo binary and the integration tests.

pub mod bitmap;
pub mod components;
pub mod events;
pub mod game;
pub mod projection;
pub mod resources;
pub mod spritesheet;
pub mod systems;
