//! Screen projection of map characters.
//!
//! [`project`] turns an entity's raw screen coordinates and render offset
//! into the final draw position and zoom, either with a flat offset or with
//! the tilted camera of [`Mode7Camera`]. Intermediate values are truncated to
//! whole pixels at the same points as the tilted map layer so sprites line up
//! with it pixel for pixel.
//!
//! Degenerate cameras (`scale == 0`, or parameters that make the projected
//! distance zero) give non-finite results; keeping them valid is up to the
//! caller.

use std::f64::consts::PI;

use crate::resources::mode7camera::Mode7Camera;

/// Constant pulled off the projected y so the horizon sits at the top of the
/// view.
pub const MODE7_VERTICAL_BIAS: f64 = 124.0;

/// Raw screen position of an entity.
///
/// `y_ground` is where the entity touches the map; `y_head` includes any
/// vertical lift such as a jump. Both are equal for grounded entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y_ground: i32,
    pub y_head: i32,
}

impl ScreenPoint {
    pub fn grounded(x: i32, y: i32) -> Self {
        Self {
            x,
            y_ground: y,
            y_head: y,
        }
    }
}

/// Screen dimensions used to centre the tilted projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    /// Half a map tile; characters are anchored at tile centres.
    pub half_tile: i32,
}

impl Viewport {
    pub fn center(&self) -> (i32, i32) {
        (
            self.width / 2 - self.half_tile,
            self.height / 2 + self.half_tile,
        )
    }
}

/// Final draw position and uniform zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub x: i32,
    pub y: i32,
    pub zoom: f64,
}

/// Project `point` with render `offset` through `camera`.
pub fn project(
    point: ScreenPoint,
    offset: (i32, i32),
    camera: &Mode7Camera,
    viewport: &Viewport,
) -> Projection {
    let (ox, oy) = offset;
    if !camera.enabled {
        return Projection {
            x: point.x + ox,
            y: point.y_head + oy,
            zoom: 1.0,
        };
    }

    // Billboard offsets follow the lift above the ground plane.
    let oy = oy + (point.y_head - point.y_ground);
    let (center_x, center_y) = viewport.center();
    let baseline = center_y + camera.baseline;
    let slant = camera.slant as f64;
    let horizon = camera.horizon as f64;
    let scale = camera.scale;
    let depth = (baseline + camera.horizon) as f64;

    // Rotate around the view centre.
    let angle = camera.yaw as f64 * (2.0 * PI) / 360.0;
    let xx = (point.x - center_x) as f64;
    let yy = (point.y_ground - center_y) as f64;
    let cos_a = (-angle).cos();
    let sin_a = (-angle).sin();
    let rotated_x = (cos_a * xx + sin_a * yy).trunc();
    let rotated_y = (cos_a * yy - sin_a * xx).trunc();

    // Perspective divide.
    let i_const = 1.0 + (slant / depth).trunc();
    let distance_base = slant * scale / depth;
    let distance = (distance_base * 2.0 - rotated_y) / 2.0;
    let zoom = (i_const - distance / scale) * 2.0;
    let sy = ((slant * scale) / distance - horizon - MODE7_VERTICAL_BIAS).trunc();
    let sx = (rotated_x * zoom).trunc();

    Projection {
        x: (center_x as f64 + sx + ox as f64 * zoom) as i32,
        y: (center_y as f64 + sy + oy as f64 * zoom) as i32,
        zoom,
    }
}

/// Height of the half-transparent bush band for a sprite of `sprite_height`
/// standing at bush level `bush_depth` (0 = none, 3 = deepest).
pub fn bush_depth(sprite_height: i32, bush_depth: i32) -> i32 {
    let split = 4 - bush_depth;
    if split > 3 {
        return 0;
    }
    sprite_height / split.max(1)
}
