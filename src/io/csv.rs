use std::io::{self, Write};
use std::path::Path;

use crate::orbital::{RenderPosition, TrackSample};

/// Write a ground track as CSV.
///
/// Columns: time_ms, latitude_deg, longitude_deg
pub fn write_track<W: Write>(writer: &mut W, track: &[TrackSample]) -> io::Result<()> {
    writeln!(writer, "time_ms,latitude_deg,longitude_deg")?;

    for s in track {
        writeln!(
            writer,
            "{},{:.6},{:.6}",
            s.time_millis, s.geodetic.latitude_deg, s.geodetic.longitude_deg,
        )?;
    }

    Ok(())
}

/// Write a ground track to a CSV file at the given path.
pub fn write_track_file(path: impl AsRef<Path>, track: &[TrackSample]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_track(&mut file, track)
}

/// Write render-frame orbit points as CSV, one `x,y,z` row each (Earth radii).
pub fn write_render_path<W: Write>(writer: &mut W, path: &[RenderPosition]) -> io::Result<()> {
    writeln!(writer, "x,y,z")?;
    for p in path {
        writeln!(writer, "{:.6},{:.6},{:.6}", p.pos.x, p.pos.y, p.pos.z)?;
    }
    Ok(())
}
