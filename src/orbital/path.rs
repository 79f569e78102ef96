use serde::{Deserialize, Serialize};
use tracing::trace;

use super::constants::MS_PER_MINUTE;
use super::elements::{position_from_elements, OrbitalElements};
use super::frames::{InertialPosition, RenderPosition};
use super::ground_track::{ground_track_from_elements, ground_track_from_record, GeodeticPosition};
use super::record::{position_from_record, ElementRecord};
use crate::error::{OrbitError, Result};

// ---------------------------------------------------------------------------
// Sampling configuration
// ---------------------------------------------------------------------------

/// Spacing and count of samples along an orbit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub step_minutes: f64, // time between samples, min
    pub samples: usize,    // number of samples, first one at the start time
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            step_minutes: 5.0, // 72 x 5 min covers six hours of overlay
            samples: 72,
        }
    }
}

impl PathConfig {
    /// Spread `samples` points evenly over `duration_minutes`.
    pub fn spanning(duration_minutes: f64, samples: usize) -> Self {
        Self { step_minutes: duration_minutes / samples.max(1) as f64, samples }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.step_minutes.is_finite() || self.step_minutes <= 0.0 {
            return Err(OrbitError::domain("step_minutes", self.step_minutes, "sample step must be positive"));
        }
        Ok(())
    }

    /// Timestamps of every sample, ms.
    ///
    /// A sample that would land outside the `i64` ms range is a domain error.
    pub fn times(&self, start_millis: i64) -> Result<Vec<i64>> {
        self.validate()?;
        let step = self.step_minutes * MS_PER_MINUTE;
        (0..self.samples)
            .map(|i| {
                let offset = (i as f64 * step).round();
                // i64::MAX as f64 rounds up to 2^63
                (offset < i64::MAX as f64)
                    .then(|| start_millis.checked_add(offset as i64))
                    .flatten()
                    .ok_or_else(|| {
                        OrbitError::domain("start_millis", start_millis as f64, "sample time outside the i64 ms range")
                    })
            })
            .collect()
    }
}

/// Ground-track point at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSample {
    pub time_millis: i64,
    pub geodetic: GeodeticPosition,
}

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

/// Positions along an orbit from classical elements, physical frame in km.
pub fn orbit_path_from_elements(
    elements: &OrbitalElements,
    start_millis: i64,
    config: &PathConfig,
) -> Result<Vec<InertialPosition>> {
    let path = config
        .times(start_millis)?
        .into_iter()
        .map(|t| position_from_elements(elements, t))
        .collect::<Result<Vec<_>>>()?;
    trace!(points = path.len(), "sampled orbit path from elements");
    Ok(path)
}

/// Positions along an orbit from a record, rendering frame.
pub fn orbit_path_from_record(
    record: &ElementRecord,
    start_millis: i64,
    config: &PathConfig,
) -> Result<Vec<RenderPosition>> {
    let path = config
        .times(start_millis)?
        .into_iter()
        .map(|t| position_from_record(record, t))
        .collect::<Result<Vec<_>>>()?;
    trace!(points = path.len(), name = ?record.name, "sampled orbit path from record");
    Ok(path)
}

pub fn ground_track_series_from_elements(
    elements: &OrbitalElements,
    start_millis: i64,
    config: &PathConfig,
) -> Result<Vec<TrackSample>> {
    config
        .times(start_millis)?
        .into_iter()
        .map(|t| -> Result<TrackSample> {
            Ok(TrackSample { time_millis: t, geodetic: ground_track_from_elements(elements, t)? })
        })
        .collect()
}

pub fn ground_track_series_from_record(
    record: &ElementRecord,
    start_millis: i64,
    config: &PathConfig,
) -> Result<Vec<TrackSample>> {
    config
        .times(start_millis)?
        .into_iter()
        .map(|t| -> Result<TrackSample> {
            Ok(TrackSample { time_millis: t, geodetic: ground_track_from_record(record, t)? })
        })
        .collect()
}
