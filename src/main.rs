use std::env;
use std::fs;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use sat_orbit::io::json::RecordSummary;
use sat_orbit::orbital::{
    ground_track_from_elements, ground_track_from_record, position_from_elements, position_from_record,
    ElementRecord, OrbitalElements, PathConfig,
};

const SAMPLE_RECORD: &str = "ISS (ZARYA)
1 25544U 98067A   24123.50000000  .00016717  00000-0  10270-3 0  9992
2 25544  51.6400  12.3456 0001234   0.0000 123.4567 15.50000000 12345";

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // -----------------------------------------------------------------------
    // Input: record file from argv, or the built-in sample
    // -----------------------------------------------------------------------
    let text = match env::args().nth(1) {
        Some(path) => fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => SAMPLE_RECORD.to_string(),
    };
    let record: ElementRecord = text.parse().context("parsing element record")?;
    let summary = RecordSummary::from_record(&record)?;

    let now = Utc::now().timestamp_millis();
    let elements = OrbitalElements::default();

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  ORBIT REPORT — {}", record.name.as_deref().unwrap_or("unnamed"));
    println!("====================================================================");
    println!();
    println!("  Record");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Epoch:         {}", format_millis(summary.epoch_millis));
    println!(
        "  Period:        {:>8.2} min   Inclination:  {:>8.3} deg",
        summary.period_minutes, summary.inclination_deg
    );
    println!(
        "  Semi-major:    {:>8.1} km    Altitude:     {:>8.1} km",
        summary.semi_major_axis_km, summary.altitude_km
    );
    println!("  Eccentricity:  {:>10.7}", summary.eccentricity);
    println!();

    println!("  Now ({})", format_millis(now));
    println!("  ──────────────────────────────────────────────────────────────────");
    let render = position_from_record(&record, now)?;
    let track = ground_track_from_record(&record, now)?;
    println!(
        "  Record    render=({:>7.4}, {:>7.4}, {:>7.4}) R_E   lat={:>7.2}  lon={:>7.2}",
        render.pos.x, render.pos.y, render.pos.z, track.latitude_deg, track.longitude_deg
    );
    let eci = position_from_elements(&elements, now)?;
    let track = ground_track_from_elements(&elements, now)?;
    println!(
        "  Elements  eci=({:>9.1}, {:>9.1}, {:>9.1}) km   lat={:>7.2}  lon={:>7.2}",
        eci.pos.x, eci.pos.y, eci.pos.z, track.latitude_deg, track.longitude_deg
    );
    println!();

    // -----------------------------------------------------------------------
    // Ground track over one period (sampled)
    // -----------------------------------------------------------------------
    println!("  Ground Track (one period)");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  {:>8}  {:>9}  {:>9}  {:>8}  {:>8}  {:>8}", "t (min)", "lat (deg)", "lon (deg)", "x", "y", "z");
    println!("  {}", "─".repeat(60));

    let config = PathConfig::spanning(summary.period_minutes, 24);
    for t in config.times(now)? {
        let g = ground_track_from_record(&record, t)?;
        let p = position_from_record(&record, t)?;
        println!(
            "  {:>8.1}  {:>9.3}  {:>9.3}  {:>8.4}  {:>8.4}  {:>8.4}",
            (t - now) as f64 / 60_000.0,
            g.latitude_deg,
            g.longitude_deg,
            p.pos.x,
            p.pos.y,
            p.pos.z
        );
    }

    println!();
    println!("  Samples: {}, step={:.2} min", config.samples, config.step_minutes);
    println!("====================================================================");
    println!();
    Ok(())
}

fn format_millis(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("{ms} ms"))
}
