use serde::{Deserialize, Serialize};
use tracing::warn;

use super::angles::{rotate_2d, wrap_degrees, wrapped_radians};
use super::constants::MS_PER_MINUTE;
use super::frames::InertialPosition;
use crate::error::{OrbitError, Result};

/// Classical orbital elements with a fixed period.
///
/// Missing fields deserialize to ISS-like defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitalElements {
    pub semi_major_axis: f64,     // km
    pub eccentricity: f64,        // only scales the radius, anomaly stays circular
    pub inclination_deg: f64,     // deg
    pub right_ascension_deg: f64, // right ascension of ascending node, deg
    pub arg_of_perigee_deg: f64,  // deg
    pub mean_anomaly_deg: f64,    // deg, at epoch
    pub period_minutes: f64,      // min, must be > 0
    pub epoch_millis: i64,        // ms since the Unix epoch
}

impl Default for OrbitalElements {
    fn default() -> Self {
        Self {
            semi_major_axis: 7000.0,
            eccentricity: 0.0,
            inclination_deg: 51.6,
            right_ascension_deg: 0.0,
            arg_of_perigee_deg: 0.0,
            mean_anomaly_deg: 0.0,
            period_minutes: 90.0,
            epoch_millis: 0,
        }
    }
}

impl OrbitalElements {
    /// Circular orbit with the given radius and inclination, everything else default.
    pub fn circular(semi_major_axis: f64, inclination_deg: f64) -> Self {
        Self { semi_major_axis, inclination_deg, ..Self::default() }
    }

    /// Reject elements that would make the position undefined.
    ///
    /// Every field must be finite, the period positive, and the angular rate
    /// `360 / period_minutes` representable.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("semi_major_axis", self.semi_major_axis),
            ("eccentricity", self.eccentricity),
            ("inclination_deg", self.inclination_deg),
            ("right_ascension_deg", self.right_ascension_deg),
            ("arg_of_perigee_deg", self.arg_of_perigee_deg),
            ("mean_anomaly_deg", self.mean_anomaly_deg),
        ];
        if let Some(&(name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            warn!(parameter = name, value, "rejecting orbital elements");
            return Err(OrbitError::domain(name, value, "orbital element must be finite"));
        }
        if !self.period_minutes.is_finite()
            || self.period_minutes <= 0.0
            || !(360.0 / self.period_minutes).is_finite()
        {
            warn!(period_minutes = self.period_minutes, "rejecting orbital elements");
            return Err(OrbitError::domain(
                "period_minutes",
                self.period_minutes,
                "orbital period must be positive and finite",
            ));
        }
        Ok(())
    }

    /// Orbital period, ms.
    pub fn period_millis(&self) -> f64 {
        self.period_minutes * MS_PER_MINUTE
    }

    /// Mean anomaly at `at_millis`, degrees in `[0, 360)`.
    ///
    /// Advances linearly at `360 / period_minutes` deg/min from the epoch value.
    pub fn mean_anomaly_at(&self, at_millis: i64) -> Result<f64> {
        self.validate()?;
        let elapsed_minutes = (i128::from(at_millis) - i128::from(self.epoch_millis)) as f64 / MS_PER_MINUTE;
        Ok(wrap_degrees(
            self.mean_anomaly_deg + elapsed_minutes * (360.0 / self.period_minutes),
        ))
    }
}

/// Position from classical elements, physical frame in km (not rescaled).
///
/// The true anomaly is taken equal to the mean anomaly; eccentricity only
/// shrinks or stretches the radius as `a * (1 - e cos(nu))`.
pub fn position_from_elements(elements: &OrbitalElements, at_millis: i64) -> Result<InertialPosition> {
    let true_anom = elements.mean_anomaly_at(at_millis)?.to_radians();

    let inc = wrapped_radians(elements.inclination_deg);
    let raan = wrapped_radians(elements.right_ascension_deg);
    let argp = wrapped_radians(elements.arg_of_perigee_deg);

    let r = elements.semi_major_axis * (1.0 - elements.eccentricity * true_anom.cos());

    // Orbital plane
    let x_orbit = r * true_anom.cos();
    let y_orbit = r * true_anom.sin();

    // Argument of perigee, then inclination tilt, then RAAN about z
    let (x_peri, y_peri) = rotate_2d(x_orbit, y_orbit, argp);
    let (x_incl, y_incl, z_incl) = (x_peri, y_peri * inc.cos(), y_peri * inc.sin());
    let (x, y) = rotate_2d(x_incl, y_incl, raan);

    let position = InertialPosition::new(x, y, z_incl);
    if !position.pos.iter().all(|c| c.is_finite()) {
        warn!(radius = r, "position overflowed");
        return Err(OrbitError::domain("semi_major_axis", elements.semi_major_axis, "position is not finite"));
    }
    Ok(position)
}
