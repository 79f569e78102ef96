//! Two-line element records.
//!
//! Fixed-column text is parsed once into a typed [`ElementRecord`] so malformed
//! input fails at the boundary, before any orbit math runs.

use std::f64::consts::TAU;
use std::ops::Range;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::angles::{rotate_2d, wrap, wrapped_radians};
use super::constants::{EARTH_RADIUS_KM, MS_PER_DAY, MS_PER_MINUTE, RECORD_CENTURY, SMA_PROXY};
use super::frames::{InertialPosition, RenderPosition};
use crate::error::{OrbitError, Result};

// ---------------------------------------------------------------------------
// Column layout (0-based, end-exclusive)
// ---------------------------------------------------------------------------

const EPOCH_YEAR: Range<usize> = 18..20;
const EPOCH_DAY: Range<usize> = 20..32;

const INCLINATION: Range<usize> = 8..16;
const RAAN: Range<usize> = 17..25;
const ECCENTRICITY: Range<usize> = 26..33;
const ARG_OF_PERIGEE: Range<usize> = 34..42;
const MEAN_ANOMALY: Range<usize> = 43..51;
const MEAN_MOTION: Range<usize> = 52..63;

/// Raw record text, as stored in satellite catalogues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLines {
    pub line1: String,
    pub line2: String,
}

/// Parsed two-line element record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub name: Option<String>,
    pub epoch_year: i32,          // full year, 2000 + yy
    pub epoch_day: f64,           // day of year with fraction, 1.0 = Jan 1 00:00 UTC
    pub inclination_deg: f64,     // deg
    pub right_ascension_deg: f64, // deg
    pub eccentricity: f64,        // implied leading "0."
    pub arg_of_perigee_deg: f64,  // deg, informational only
    pub mean_anomaly_deg: f64,    // deg, at epoch
    pub mean_motion: f64,         // rev/day, must be > 0
}

impl ElementRecord {
    /// Parse the two fixed-width lines of a record.
    ///
    /// Years are read as `2000 + yy`, so epochs from 2057 onwards in the usual
    /// two-digit convention are not distinguished from 1957..1999.
    pub fn parse(line1: &str, line2: &str) -> Result<Self> {
        let yy = parse_year(line1)?;
        let epoch_day = parse_decimal(line1, 1, "epoch day", EPOCH_DAY)?;

        let inclination_deg = parse_decimal(line2, 2, "inclination", INCLINATION)?;
        let right_ascension_deg = parse_decimal(line2, 2, "right ascension", RAAN)?;
        let eccentricity = parse_implied_fraction(line2, 2, "eccentricity", ECCENTRICITY)?;
        let arg_of_perigee_deg = parse_decimal(line2, 2, "argument of perigee", ARG_OF_PERIGEE)?;
        let mean_anomaly_deg = parse_decimal(line2, 2, "mean anomaly", MEAN_ANOMALY)?;
        let mean_motion = parse_decimal(line2, 2, "mean motion", MEAN_MOTION)?;

        let record = ElementRecord {
            name: None,
            epoch_year: RECORD_CENTURY + yy,
            epoch_day,
            inclination_deg,
            right_ascension_deg,
            eccentricity,
            arg_of_perigee_deg,
            mean_anomaly_deg,
            mean_motion,
        };
        record.validate()?;

        debug!(
            epoch_year = record.epoch_year,
            epoch_day = record.epoch_day,
            mean_motion = record.mean_motion,
            "parsed element record"
        );
        Ok(record)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Reject records whose fields leave the period or radius undefined.
    pub fn validate(&self) -> Result<()> {
        if !self.mean_motion.is_finite() || self.mean_motion <= 0.0 {
            warn!(mean_motion = self.mean_motion, name = ?self.name, "rejecting element record");
            return Err(OrbitError::domain(
                "mean_motion",
                self.mean_motion,
                "mean motion must be positive, the period is undefined",
            ));
        }
        let fields = [
            ("epoch_day", self.epoch_day),
            ("inclination_deg", self.inclination_deg),
            ("right_ascension_deg", self.right_ascension_deg),
            ("eccentricity", self.eccentricity),
            ("mean_anomaly_deg", self.mean_anomaly_deg),
        ];
        if let Some(&(name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            warn!(parameter = name, value, name = ?self.name, "rejecting element record");
            return Err(OrbitError::domain(name, value, "record field must be finite"));
        }
        if !self.raw_semi_major_axis().is_finite() {
            warn!(mean_motion = self.mean_motion, name = ?self.name, "semi-major axis overflows");
            return Err(OrbitError::domain(
                "mean_motion",
                self.mean_motion,
                "mean motion too small, semi-major axis is not finite",
            ));
        }
        Ok(())
    }

    /// Epoch as ms since the Unix epoch (UTC).
    pub fn epoch_millis(&self) -> Result<i64> {
        let jan1 = NaiveDate::from_yo_opt(self.epoch_year, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| {
                OrbitError::domain("epoch_year", f64::from(self.epoch_year), "year outside the calendar range")
            })?;
        let offset = ((self.epoch_day - 1.0) * MS_PER_DAY).round();
        let out_of_range = || OrbitError::domain("epoch_day", self.epoch_day, "epoch instant outside the i64 ms range");
        // i64::MAX as f64 rounds up to 2^63, so the bound is exclusive
        if !offset.is_finite() || offset.abs() >= i64::MAX as f64 {
            return Err(out_of_range());
        }
        jan1.and_utc()
            .timestamp_millis()
            .checked_add(offset as i64)
            .ok_or_else(out_of_range)
    }

    /// Orbital period, ms.
    pub fn period_millis(&self) -> Result<f64> {
        self.validate()?;
        Ok(MS_PER_DAY / self.mean_motion)
    }

    pub fn period_minutes(&self) -> Result<f64> {
        Ok(self.period_millis()? / MS_PER_MINUTE)
    }

    /// Semi-major axis estimate from mean motion, km.
    ///
    /// `cbrt(SMA_PROXY / (n * 2pi)^2)`: a fixed approximation, not derived from GM.
    pub fn semi_major_axis_km(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.raw_semi_major_axis())
    }

    fn raw_semi_major_axis(&self) -> f64 {
        let w = self.mean_motion * TAU;
        (SMA_PROXY / (w * w)).cbrt()
    }

    /// Height of the estimated orbit above the mean Earth sphere, km.
    pub fn altitude_km(&self) -> Result<f64> {
        Ok(self.semi_major_axis_km()? - EARTH_RADIUS_KM)
    }

    /// Mean anomaly at `at_millis`, radians.
    ///
    /// The phase since epoch is reduced with a true modulo over the period, so
    /// queries before the epoch still advance in the right direction.
    pub fn mean_anomaly_at(&self, at_millis: i64) -> Result<f64> {
        let period = self.period_millis()?;
        let since_epoch = (i128::from(at_millis) - i128::from(self.epoch_millis()?)) as f64;
        Ok(wrapped_radians(self.mean_anomaly_deg) + TAU * wrap(since_epoch, period) / period)
    }
}

impl FromStr for ElementRecord {
    type Err = OrbitError;

    /// Accepts two lines, or three with a leading satellite name.
    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.trim().is_empty())
            .collect();
        match lines.as_slice() {
            [l1, l2] => ElementRecord::parse(l1, l2),
            [name, l1, l2] => Ok(ElementRecord::parse(l1, l2)?.with_name(name.trim())),
            _ => Err(OrbitError::parse(0, "line count", lines.len().to_string())),
        }
    }
}

impl TryFrom<&RecordLines> for ElementRecord {
    type Error = OrbitError;

    fn try_from(lines: &RecordLines) -> Result<Self> {
        ElementRecord::parse(&lines.line1, &lines.line2)
    }
}

/// Position from a record, physical frame in km.
///
/// Records carry no argument of perigee in this model: the orbit-plane point
/// is tilted by inclination then rotated by RAAN.
pub fn inertial_position_from_record(record: &ElementRecord, at_millis: i64) -> Result<InertialPosition> {
    let m = record.mean_anomaly_at(at_millis)?;
    let inc = wrapped_radians(record.inclination_deg);
    let raan = wrapped_radians(record.right_ascension_deg);

    let altitude = record.altitude_km()?;
    let radius = EARTH_RADIUS_KM + altitude;

    let x = radius * m.cos();
    let y = radius * m.sin();

    let (x_inc, y_inc, z_inc) = (x, y * inc.cos(), y * inc.sin());
    let (x_eci, y_eci) = rotate_2d(x_inc, y_inc, raan);

    let position = InertialPosition::new(x_eci, y_eci, z_inc);
    if !position.pos.iter().all(|c| c.is_finite()) {
        warn!(radius, name = ?record.name, "record position is not finite");
        return Err(OrbitError::domain("radius", radius, "position is not finite"));
    }
    Ok(position)
}

/// Position from a record in the rendering frame (Earth radii, y-up).
pub fn position_from_record(record: &ElementRecord, at_millis: i64) -> Result<RenderPosition> {
    Ok(inertial_position_from_record(record, at_millis)?.to_render())
}

// ---------------------------------------------------------------------------
// Field parsing
// ---------------------------------------------------------------------------

/// Slice a fixed-column field; a line ending inside the field yields the part present.
fn field<'a>(line: &'a str, line_no: u8, name: &'static str, cols: Range<usize>) -> Result<&'a str> {
    let end = cols.end.min(line.len());
    line.get(cols.start..end)
        .filter(|_| cols.start < end)
        .ok_or_else(|| {
            warn!(line = line_no, field = name, "record line too short");
            OrbitError::parse(line_no, name, "")
        })
}

/// Plain fixed-point syntax: `[+-]digits[.digits]`, also `.digits`. No exponents.
fn is_plain_decimal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    !(int.is_empty() && frac.is_empty())
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}

fn parse_decimal(line: &str, line_no: u8, name: &'static str, cols: Range<usize>) -> Result<f64> {
    let raw = field(line, line_no, name, cols)?.trim();
    match raw.parse::<f64>() {
        Ok(v) if is_plain_decimal(raw) && v.is_finite() => Ok(v),
        _ => {
            warn!(line = line_no, field = name, value = raw, "malformed record field");
            Err(OrbitError::parse(line_no, name, raw))
        }
    }
}

/// Digits read as the fraction `0.<digits>`.
fn parse_implied_fraction(line: &str, line_no: u8, name: &'static str, cols: Range<usize>) -> Result<f64> {
    let raw = field(line, line_no, name, cols)?.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        warn!(line = line_no, field = name, value = raw, "malformed record field");
        return Err(OrbitError::parse(line_no, name, raw));
    }
    format!("0.{raw}")
        .parse::<f64>()
        .map_err(|_| OrbitError::parse(line_no, name, raw))
}

fn parse_year(line1: &str) -> Result<i32> {
    let raw = field(line1, 1, "epoch year", EPOCH_YEAR)?.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        warn!(line = 1, field = "epoch year", value = raw, "malformed record field");
        return Err(OrbitError::parse(1, "epoch year", raw));
    }
    raw.parse::<i32>().map_err(|_| OrbitError::parse(1, "epoch year", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE1: &str = "1 25544U 98067A   24123.50000000  .00016717  00000-0  10270-3 0  9992";
    const LINE2: &str = "2 25544 051.6400 012.3456 0001234 000.0000 123.4567 15.50000000 12345";

    // 2024-05-02 12:00:00 UTC
    const EPOCH_MS: i64 = 1_714_651_200_000;

    fn equatorial() -> ElementRecord {
        ElementRecord {
            inclination_deg: 0.0,
            right_ascension_deg: 0.0,
            mean_anomaly_deg: 0.0,
            ..ElementRecord::parse(LINE1, LINE2).unwrap()
        }
    }

    #[test]
    fn parses_line2_fields() {
        let r = ElementRecord::parse(LINE1, LINE2).unwrap();
        assert!((r.inclination_deg - 51.64).abs() < 1e-12);
        assert!((r.right_ascension_deg - 12.3456).abs() < 1e-12);
        assert!((r.eccentricity - 0.0001234).abs() < 1e-15);
        assert!((r.mean_anomaly_deg - 123.4567).abs() < 1e-12);
        assert!((r.mean_motion - 15.5).abs() < 1e-12);
        assert_eq!(r.arg_of_perigee_deg, 0.0);
        assert_eq!(r.name, None);
    }

    #[test]
    fn epoch_reconstruction() {
        let r = ElementRecord::parse(LINE1, LINE2).unwrap();
        assert_eq!(r.epoch_year, 2024);
        assert!((r.epoch_day - 123.5).abs() < 1e-12);
        assert_eq!(r.epoch_millis().unwrap(), EPOCH_MS);
    }

    #[test]
    fn derived_period_and_axis() {
        let r = ElementRecord::parse(LINE1, LINE2).unwrap();
        let period = r.period_millis().unwrap();
        assert!((period - 86_400_000.0 / 15.5).abs() < 1e-6);
        assert!((r.period_minutes().unwrap() - 1440.0 / 15.5).abs() < 1e-9);

        let w = 15.5 * TAU;
        let expected = (6378.137_f64 * 6378.137 * 86400.0 / (w * w)).cbrt();
        let a = r.semi_major_axis_km().unwrap();
        assert!((a - expected).abs() < 1e-9, "a = {a}");
        assert!((r.altitude_km().unwrap() - (a - 6371.0)).abs() < 1e-9);
    }

    #[test]
    fn non_numeric_field_is_parse_error() {
        let bad = LINE2.replace("123.4567", "12x.4567");
        match ElementRecord::parse(LINE1, &bad) {
            Err(OrbitError::Parse { line, field, value }) => {
                assert_eq!(line, 2);
                assert_eq!(field, "mean anomaly");
                assert_eq!(value, "12x.4567");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn nan_text_is_parse_error() {
        let bad = LINE2.replace("051.6400", "     NaN");
        assert!(matches!(
            ElementRecord::parse(LINE1, &bad),
            Err(OrbitError::Parse { field: "inclination", .. })
        ));
    }

    #[test]
    fn eccentricity_must_be_digits() {
        let bad = LINE2.replace("0001234", "-001234");
        assert!(matches!(
            ElementRecord::parse(LINE1, &bad),
            Err(OrbitError::Parse { field: "eccentricity", .. })
        ));
    }

    #[test]
    fn malformed_epoch_is_parse_error_on_line1() {
        let bad = LINE1.replace("24123.5", "2A123.5");
        assert!(matches!(
            ElementRecord::parse(&bad, LINE2),
            Err(OrbitError::Parse { line: 1, field: "epoch year", .. })
        ));
        let bad = LINE1.replace("123.50000000", "123.5000O000");
        assert!(matches!(
            ElementRecord::parse(&bad, LINE2),
            Err(OrbitError::Parse { line: 1, field: "epoch day", .. })
        ));
    }

    #[test]
    fn truncated_line_is_parse_error() {
        assert!(matches!(
            ElementRecord::parse(LINE1, &LINE2[..40]),
            Err(OrbitError::Parse { line: 2, field: "mean anomaly", .. })
        ));
        // Mean motion running to end of line is fine
        let r = ElementRecord::parse(LINE1, &LINE2[..63]).unwrap();
        assert!((r.mean_motion - 15.5).abs() < 1e-12);
    }

    #[test]
    fn zero_mean_motion_is_domain_error() {
        let bad = LINE2.replace("15.50000000", "00.00000000");
        assert!(matches!(
            ElementRecord::parse(LINE1, &bad),
            Err(OrbitError::Domain { parameter: "mean_motion", .. })
        ));

        let hand_built = ElementRecord { mean_motion: 0.0, ..equatorial() };
        assert!(matches!(
            position_from_record(&hand_built, EPOCH_MS),
            Err(OrbitError::Domain { .. })
        ));
    }

    #[test]
    fn exponent_text_is_parse_error() {
        let bad = LINE2.replace("15.50000000", "     1e-300");
        assert!(matches!(
            ElementRecord::parse(LINE1, &bad),
            Err(OrbitError::Parse { line: 2, field: "mean motion", .. })
        ));
        let bad = LINE2.replace("051.6400", "    1e10");
        assert!(matches!(
            ElementRecord::parse(LINE1, &bad),
            Err(OrbitError::Parse { field: "inclination", .. })
        ));
        let bad = LINE2.replace("051.6400", "     inf");
        assert!(ElementRecord::parse(LINE1, &bad).is_err());
    }

    #[test]
    fn plain_decimal_forms() {
        for ok in ["15.5", "+1.0", "-0.5", ".25", "7.", "42"] {
            assert!(is_plain_decimal(ok), "{ok}");
        }
        for bad in ["", ".", "-", "1e5", "1.5E-3", "nan", "inf", "1.2.3", "0x10"] {
            assert!(!is_plain_decimal(bad), "{bad}");
        }
    }

    #[test]
    fn tiny_mean_motion_is_domain_error() {
        let hand_built = ElementRecord { mean_motion: 1e-300, ..equatorial() };
        assert!(matches!(
            hand_built.semi_major_axis_km(),
            Err(OrbitError::Domain { parameter: "mean_motion", .. })
        ));
        assert!(matches!(
            position_from_record(&hand_built, EPOCH_MS),
            Err(OrbitError::Domain { parameter: "mean_motion", .. })
        ));
    }

    #[test]
    fn non_finite_fields_are_domain_errors() {
        let cases = [
            ElementRecord { inclination_deg: f64::NAN, ..equatorial() },
            ElementRecord { right_ascension_deg: f64::INFINITY, ..equatorial() },
            ElementRecord { mean_anomaly_deg: f64::NAN, ..equatorial() },
            ElementRecord { epoch_day: f64::NEG_INFINITY, ..equatorial() },
            ElementRecord { eccentricity: f64::NAN, ..equatorial() },
        ];
        for r in cases {
            assert!(
                matches!(position_from_record(&r, EPOCH_MS), Err(OrbitError::Domain { .. })),
                "accepted {r:?}"
            );
        }
    }

    #[test]
    fn epoch_out_of_range_is_domain_error() {
        let r = ElementRecord { epoch_year: i32::MAX, ..equatorial() };
        assert!(matches!(
            r.epoch_millis(),
            Err(OrbitError::Domain { parameter: "epoch_year", .. })
        ));
        assert!(matches!(
            position_from_record(&r, EPOCH_MS),
            Err(OrbitError::Domain { parameter: "epoch_year", .. })
        ));

        let r = ElementRecord { epoch_day: 1e300, ..equatorial() };
        assert!(matches!(
            r.epoch_millis(),
            Err(OrbitError::Domain { parameter: "epoch_day", .. })
        ));
        let r = ElementRecord { epoch_day: -1e17, ..equatorial() };
        assert!(matches!(
            r.epoch_millis(),
            Err(OrbitError::Domain { parameter: "epoch_day", .. })
        ));
    }

    #[test]
    fn extreme_query_times_do_not_overflow() {
        let r = ElementRecord::parse(LINE1, LINE2).unwrap();
        let a = r.semi_major_axis_km().unwrap();
        for t in [i64::MIN, i64::MAX] {
            let p = inertial_position_from_record(&r, t).unwrap();
            assert!((p.radius() - a).abs() < 1e-6, "r = {} at t = {t}", p.radius());
        }
    }

    #[test]
    fn from_str_with_name() {
        let text = format!("ISS (ZARYA)\n{LINE1}\r\n{LINE2}\n");
        let r: ElementRecord = text.parse().unwrap();
        assert_eq!(r.name.as_deref(), Some("ISS (ZARYA)"));

        let r: ElementRecord = format!("{LINE1}\n{LINE2}").parse().unwrap();
        assert_eq!(r.name, None);

        assert!(matches!(
            LINE1.parse::<ElementRecord>(),
            Err(OrbitError::Parse { field: "line count", .. })
        ));
    }

    #[test]
    fn from_record_lines() {
        let lines = RecordLines { line1: LINE1.into(), line2: LINE2.into() };
        let r = ElementRecord::try_from(&lines).unwrap();
        assert!((r.mean_motion - 15.5).abs() < 1e-12);
    }

    #[test]
    fn render_frame_at_epoch_and_quarter_period() {
        let r = equatorial();
        let a = r.semi_major_axis_km().unwrap();

        let p = position_from_record(&r, EPOCH_MS).unwrap();
        assert!((p.pos.x - a / EARTH_RADIUS_KM).abs() < 1e-12);
        assert!(p.pos.y.abs() < 1e-12 && p.pos.z.abs() < 1e-12);

        // In-plane motion shows up on the render z axis
        let quarter = EPOCH_MS + (r.period_millis().unwrap() / 4.0).round() as i64;
        let p = position_from_record(&r, quarter).unwrap();
        assert!(p.pos.x.abs() < 1e-6, "x = {}", p.pos.x);
        assert!(p.pos.y.abs() < 1e-12, "y = {}", p.pos.y);
        assert!((p.pos.z - a / EARTH_RADIUS_KM).abs() < 1e-6, "z = {}", p.pos.z);
    }

    #[test]
    fn radius_equals_semi_major_axis() {
        let r = ElementRecord::parse(LINE1, LINE2).unwrap();
        let a = r.semi_major_axis_km().unwrap();
        for k in -20..20 {
            let t = EPOCH_MS + k * 1_234_567;
            let eci = inertial_position_from_record(&r, t).unwrap();
            assert!((eci.radius() - a).abs() < 1e-9, "r = {} at k = {k}", eci.radius());
            let render = position_from_record(&r, t).unwrap();
            assert!((render.pos.norm() - a / EARTH_RADIUS_KM).abs() < 1e-12);
        }
    }

    #[test]
    fn query_before_epoch_matches_one_period_later() {
        let r = ElementRecord::parse(LINE1, LINE2).unwrap();
        let period = r.period_millis().unwrap();
        let before = EPOCH_MS - 1_000_000;
        let m_before = r.mean_anomaly_at(before).unwrap();
        let m_after = r.mean_anomaly_at(before + period.round() as i64).unwrap();
        let diff = wrap(m_before - m_after + std::f64::consts::PI, TAU) - std::f64::consts::PI;
        assert!(diff.abs() < 1e-6, "phase difference {diff}");
        assert!(m_before >= wrapped_radians(r.mean_anomaly_deg));
    }
}
