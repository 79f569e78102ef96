//! Satellite position estimation from orbital elements and two-line element records.
//!
//! Two output frames coexist and are kept apart by type:
//! [`InertialPosition`] (km, physical axes) from [`position_from_elements`], and
//! [`RenderPosition`] (Earth radii, y-up) from [`position_from_record`].

pub mod error;
pub mod io;
pub mod orbital;

pub use error::{OrbitError, Result};
pub use orbital::{
    ground_track_from_elements, ground_track_from_record, position_from_elements, position_from_record,
    ElementRecord, GeodeticPosition, InertialPosition, OrbitalElements, PathConfig, RenderPosition,
};
