use serde::{Deserialize, Serialize};

use super::angles::wrap_degrees;
use super::elements::{position_from_elements, OrbitalElements};
use super::frames::InertialPosition;
use super::record::{inertial_position_from_record, ElementRecord};
use crate::error::{OrbitError, Result};

/// Latitude/longitude of the point beneath a satellite.
///
/// Measured in the physical frame without Earth rotation: longitude is the
/// azimuth in the equatorial (x, y) plane, latitude the elevation above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPosition {
    pub latitude_deg: f64,  // [-90, 90]
    pub longitude_deg: f64, // [0, 360)
}

impl GeodeticPosition {
    /// Subpoint of a physical-frame position.
    pub fn from_inertial(position: &InertialPosition) -> Result<Self> {
        let p = position.pos;
        let r = p.norm();
        if r <= 0.0 || !r.is_finite() {
            return Err(OrbitError::domain("radius", r, "degenerate position, no direction"));
        }
        Ok(GeodeticPosition {
            latitude_deg: (p.z / r).clamp(-1.0, 1.0).asin().to_degrees(),
            longitude_deg: wrap_degrees(p.y.atan2(p.x).to_degrees() + 360.0),
        })
    }
}

/// Ground track of a satellite described by classical elements.
pub fn ground_track_from_elements(elements: &OrbitalElements, at_millis: i64) -> Result<GeodeticPosition> {
    GeodeticPosition::from_inertial(&position_from_elements(elements, at_millis)?)
}

/// Ground track of a satellite described by an element record.
///
/// Uses [`inertial_position_from_record`] (km, z toward the pole), not the
/// [`RenderPosition`](super::frames::RenderPosition) that `position_from_record`
/// returns: that one is rescaled to Earth radii and has y and z swapped, so its
/// y axis would be read as the pole. Both ground-track entry points therefore
/// share one latitude/longitude convention.
pub fn ground_track_from_record(record: &ElementRecord, at_millis: i64) -> Result<GeodeticPosition> {
    GeodeticPosition::from_inertial(&inertial_position_from_record(record, at_millis)?)
}
