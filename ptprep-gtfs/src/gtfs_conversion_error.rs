use ptprep::{
    io::IoError,
    model::{LineId, LinkId, RouteId, StopId, VehicleTypeId},
};

#[derive(thiserror::Error, Debug)]
pub enum GtfsConversionError {
    #[error("Failed to parse gtfs bundle file into `Gtfs` struct: {0}")]
    BundleReadError(#[from] gtfs_structures::Error),
    #[error("Failed to read route types from {0}: {1}")]
    RouteTypeReadError(String, String),
    #[error("Missing lon,lat data and parent_location for stop: {0}")]
    MissingStopLocationAndParentError(String),
    #[error("route '{0}' references stop '{1}' which is not in the schedule")]
    UnknownStop(RouteId, StopId),
    #[error("route '{0}' references link '{1}' which is not in the network")]
    UnknownLink(RouteId, LinkId),
    #[error("unknown transit mode for line '{line_id}', gtfs route type was '{route_type}'")]
    UnknownRouteType { line_id: LineId, route_type: String },
    #[error("vehicle type '{0}' is not defined in the fleet configuration")]
    UnknownVehicleType(VehicleTypeId),
    #[error("transit schedule and/or network invalid, found {0} error(s)")]
    InvalidSchedule(usize),
    #[error("{0}")]
    CoordinateTransformError(String),
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error(transparent)]
    IoError {
        #[from]
        source: IoError,
    },
}
