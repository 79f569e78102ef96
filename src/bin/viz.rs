use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};

use sat_orbit::orbital::{
    ground_track_series_from_elements, ground_track_series_from_record, orbit_path_from_record, ElementRecord,
    OrbitalElements, PathConfig, RenderPosition, TrackSample,
};

const SAMPLE_RECORD: &str = "ISS (ZARYA)
1 25544U 98067A   24123.50000000  .00016717  00000-0  10270-3 0  9992
2 25544  51.6400  12.3456 0001234   0.0000 123.4567 15.50000000 12345";

fn main() -> eframe::Result {
    tracing_subscriber::fmt::init();

    let record: ElementRecord = match SAMPLE_RECORD.parse() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("sample record rejected: {e}");
            std::process::exit(1);
        }
    };
    let elements = OrbitalElements::default();
    let start = chrono::Utc::now().timestamp_millis();

    let app = match TrackViz::new(record, elements, start) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("propagation failed: {e}");
            std::process::exit(1);
        }
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Satellite Ground Track", options, Box::new(|_| Ok(Box::new(app))))
}

struct TrackViz {
    name: String,
    record_track: Vec<TrackSample>,
    elements_track: Vec<TrackSample>,
    render_path: Vec<RenderPosition>,
}

impl TrackViz {
    fn new(record: ElementRecord, elements: OrbitalElements, start: i64) -> sat_orbit::Result<Self> {
        let period = record.period_minutes()?;
        let config = PathConfig::spanning(3.0 * period, 540);
        Ok(Self {
            name: record.name.clone().unwrap_or_else(|| "unnamed".into()),
            record_track: ground_track_series_from_record(&record, start, &config)?,
            elements_track: ground_track_series_from_elements(&elements, start, &config)?,
            render_path: orbit_path_from_record(&record, start, &PathConfig::spanning(period, 72))?,
        })
    }
}

/// Longitude shifted into [-180, 180) so the plot reads like a map.
fn map_point(s: &TrackSample) -> [f64; 2] {
    let lon = if s.geodetic.longitude_deg >= 180.0 {
        s.geodetic.longitude_deg - 360.0
    } else {
        s.geodetic.longitude_deg
    };
    [lon, s.geodetic.latitude_deg]
}

impl eframe::App for TrackViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Satellite: {}", self.name));
            ui.label(format!(
                "Track samples: {}  |  Orbit overlay points: {}",
                self.record_track.len(),
                self.render_path.len(),
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;

            ui.horizontal(|ui| {
                // Ground tracks
                ui.vertical(|ui| {
                    ui.label("Ground Track (deg)");
                    let record_pts: PlotPoints = self.record_track.iter().map(map_point).collect();
                    let elements_pts: PlotPoints = self.elements_track.iter().map(map_point).collect();
                    Plot::new("ground_track")
                        .width(half_w)
                        .height(available.y - 24.0)
                        .x_axis_label("Longitude (deg)")
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            plot_ui.points(Points::new("Record", record_pts).radius(1.5));
                            plot_ui.points(Points::new("Elements", elements_pts).radius(1.5));
                        });
                });

                // Render-frame overlay, viewed from above the y-up axis
                ui.vertical(|ui| {
                    ui.label("Orbit Overlay (Earth radii, x/z plane)");
                    let path: PlotPoints = self.render_path.iter().map(|p| [p.pos.x, p.pos.z]).collect();
                    let earth: PlotPoints = (0..=72)
                        .map(|i| {
                            let a = i as f64 / 72.0 * std::f64::consts::TAU;
                            [a.cos(), a.sin()]
                        })
                        .collect();
                    Plot::new("overlay")
                        .width(half_w)
                        .height(available.y - 24.0)
                        .x_axis_label("x")
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Earth", earth));
                            plot_ui.line(Line::new("Orbit", path));
                        });
                });
            });
        });
    }
}
