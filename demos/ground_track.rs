use sat_orbit::io::csv;
use sat_orbit::io::json::{self, RecordSummary, TrackExport};
use sat_orbit::orbital::{ground_track_series_from_record, ElementRecord, PathConfig};

const RECORD: &str = "NOAA 19
1 33591U 09005A   24120.25000000  .00000123  00000-0  89012-4 0  9990
2 33591  99.1900 150.2500 0013456 210.0000 149.8765 14.12500000 12345";

fn main() {
    tracing_subscriber::fmt::init();

    let record: ElementRecord = RECORD.parse().expect("valid record");
    let summary = RecordSummary::from_record(&record).expect("positive mean motion");
    println!(
        "{}: period {:.1} min, inclination {:.2} deg",
        summary.name.as_deref().unwrap_or("unnamed"),
        summary.period_minutes,
        summary.inclination_deg
    );

    // Two orbits starting at the record epoch, one sample per minute
    let config = PathConfig {
        step_minutes: 1.0,
        samples: (2.0 * summary.period_minutes).ceil() as usize,
    };
    let track = ground_track_series_from_record(&record, summary.epoch_millis, &config)
        .expect("propagation");
    println!("Sampled {} ground-track points", track.len());

    csv::write_track_file("ground_track.csv", &track).expect("Failed to write CSV");
    json::write_track_file("ground_track.json", &TrackExport { satellite: summary, track })
        .expect("Failed to write JSON");

    println!("Exported: ground_track.csv, ground_track.json");
}
