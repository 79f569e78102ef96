use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::constants::EARTH_RADIUS_KM;

/// Earth-centered position in the physical frame, km.
///
/// Right-handed: the orbit plane of a zero-inclination orbit is (x, y), z
/// points along the equatorial pole. Returned by the elements-based path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InertialPosition {
    pub pos: Vector3<f64>, // km
}

/// Earth-centered position in the rendering frame.
///
/// Units are Earth radii (Earth has radius 1) and the up axis is y: the
/// physical z and y components are exchanged. Returned by the record-based path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderPosition {
    pub pos: Vector3<f64>, // Earth radii, y-up
}

impl InertialPosition {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { pos: Vector3::new(x, y, z) }
    }

    /// Distance from Earth's center, km.
    pub fn radius(&self) -> f64 {
        self.pos.norm()
    }

    /// Height above the mean Earth sphere, km.
    pub fn altitude(&self) -> f64 {
        self.radius() - EARTH_RADIUS_KM
    }

    /// Rescale by `1 / EARTH_RADIUS_KM` and swap y and z.
    pub fn to_render(&self) -> RenderPosition {
        let p = self.pos / EARTH_RADIUS_KM;
        RenderPosition { pos: Vector3::new(p.x, p.z, p.y) }
    }
}

impl RenderPosition {
    /// Undo [`InertialPosition::to_render`].
    pub fn to_inertial(&self) -> InertialPosition {
        let p = self.pos * EARTH_RADIUS_KM;
        InertialPosition { pos: Vector3::new(p.x, p.z, p.y) }
    }
}
