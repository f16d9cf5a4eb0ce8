pub mod app;
pub mod convert;
pub mod crs;
pub mod feed;
pub mod fleet;
mod gtfs_conversion_error;
mod missing_stop_location_policy;
pub mod network_filter;
pub mod post_process;
pub mod pseudo_network;
pub mod service_calendar;

pub use gtfs_conversion_error::GtfsConversionError;
pub use missing_stop_location_policy::MissingStopLocationPolicy;
