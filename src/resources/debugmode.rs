//! Debug toggle resource.
//!
//! While this resource is present the render pass outlines the screen
//! rectangle of every drawn sprite. Remove it to turn the overlay off.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, sprite outlines are drawn.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode {}
