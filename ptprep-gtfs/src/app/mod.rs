mod gtfs_app;
mod gtfs_operation;

pub use gtfs_app::GtfsApp;
pub use gtfs_operation::{run_conversion, ConversionRun, GtfsOperation};
