//! Where the model sits and where the camera stands.
//!
//! Framing only looks at the model's own (unposed) bounds and the viewport
//! class, so it can be repeated after every load and every resize without
//! the result creeping.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::geometry::Aabb;
use crate::units::{Degrees, Radians};
use crate::viewport::ViewportClass;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FramingConfig {
    /// Share of the model width it is pushed right on desktop, leaving room for the copy
    pub horizontal_offset: f32,
    /// Share of the model height it is lifted, balancing the shadow below
    pub vertical_bias: f32,
    pub desktop_tilt: Degrees,
    /// Share of the model width the camera moves right on desktop
    pub camera_offset: f32,
    pub mobile_distance: f32,
    pub desktop_distance: f32,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            horizontal_offset: 0.45,
            vertical_bias: 0.085,
            desktop_tilt: Degrees(25.0),
            camera_offset: 0.18,
            mobile_distance: 2.2,
            desktop_distance: 1.45,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub object_position: Vec3,
    /// Rotation about Z applied beneath the spin
    pub tilt: Radians,
    pub camera_position: Vec3,
    pub look_at: Vec3,
}

pub fn frame(bounds: &Aabb, class: ViewportClass, config: &FramingConfig) -> Frame {
    let size = bounds.size();
    let center = bounds.center();
    let mobile = class.is_mobile();
    let horizontal_offset = if mobile {
        0.0
    } else {
        size.x * config.horizontal_offset
    };
    let object_position = Vec3::new(
        -center.x + horizontal_offset,
        -center.y + size.y * config.vertical_bias,
        -center.z,
    );
    let tilt = if mobile {
        Radians(0.0)
    } else {
        config.desktop_tilt.to_radians()
    };
    let distance = if mobile {
        config.mobile_distance
    } else {
        config.desktop_distance
    };
    let camera_position = Vec3::new(
        if mobile { 0.0 } else { size.x * config.camera_offset },
        0.0,
        size.max_element() * distance,
    );
    Frame {
        object_position,
        tilt,
        camera_position,
        look_at: Vec3::ZERO,
    }
}
