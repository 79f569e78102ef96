pub mod angles;
pub mod constants;
pub mod elements;
pub mod frames;
pub mod ground_track;
pub mod path;
pub mod record;

pub use elements::{position_from_elements, OrbitalElements};
pub use frames::{InertialPosition, RenderPosition};
pub use ground_track::{ground_track_from_elements, ground_track_from_record, GeodeticPosition};
pub use path::{
    ground_track_series_from_elements, ground_track_series_from_record, orbit_path_from_elements,
    orbit_path_from_record, PathConfig, TrackSample,
};
pub use record::{inertial_position_from_record, position_from_record, ElementRecord, RecordLines};
