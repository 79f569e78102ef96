use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result as OrbitResult;
use crate::orbital::{ElementRecord, TrackSample};

/// Catalogue-style summary of an element record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSummary {
    pub name: Option<String>,
    pub epoch_millis: i64,
    pub period_minutes: f64,
    pub inclination_deg: f64,
    pub eccentricity: f64,
    pub semi_major_axis_km: f64,
    pub altitude_km: f64,
}

impl RecordSummary {
    pub fn from_record(record: &ElementRecord) -> OrbitResult<Self> {
        Ok(RecordSummary {
            name: record.name.clone(),
            epoch_millis: record.epoch_millis()?,
            period_minutes: record.period_minutes()?,
            inclination_deg: record.inclination_deg,
            eccentricity: record.eccentricity,
            semi_major_axis_km: record.semi_major_axis_km()?,
            altitude_km: record.altitude_km()?,
        })
    }
}

/// Track export: the satellite summary plus its sampled ground track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackExport {
    pub satellite: RecordSummary,
    pub track: Vec<TrackSample>,
}

/// Write a track export as pretty-printed JSON.
pub fn write_track<W: Write>(writer: &mut W, export: &TrackExport) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, export)?;
    writeln!(writer).map_err(serde_json::Error::io)
}

/// Write a track export JSON to a file.
pub fn write_track_file(path: impl AsRef<Path>, export: &TrackExport) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_track(&mut file, export).map_err(std::io::Error::from)
}
