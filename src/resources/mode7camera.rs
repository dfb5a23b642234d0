//! Tilted ("Mode7") map camera resource.
//!
//! Holds the global parameters of the pseudo-3D projection used by map
//! character sprites. When `enabled` is false every parameter is ignored and
//! sprites are placed with a flat offset.

use bevy_ecs::prelude::Resource;

/// ECS resource with the tilted camera parameters.
///
/// `slant` and `scale` must keep the projected distance non-zero; the
/// projection does not guard against degenerate values.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Mode7Camera {
    /// Tilted projection on/off.
    pub enabled: bool,
    /// Rotation around the screen centre, in degrees.
    pub yaw: i32,
    /// Camera tilt.
    pub slant: i32,
    /// Horizon line offset in pixels.
    pub horizon: i32,
    /// Baseline offset added to the screen centre.
    pub baseline: i32,
    /// Perspective scale.
    pub scale: f64,
}

impl Default for Mode7Camera {
    fn default() -> Self {
        Self {
            enabled: false,
            yaw: 0,
            slant: 60,
            horizon: 20,
            baseline: 0,
            scale: 200.0,
        }
    }
}

impl Mode7Camera {
    /// Camera with the default tilt, enabled.
    pub fn tilted() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Rotate by `degrees`, keeping the yaw within `[0, 360)`.
    pub fn rotate(&mut self, degrees: i32) {
        self.yaw = (self.yaw + degrees).rem_euclid(360);
    }
}
