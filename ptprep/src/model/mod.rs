//! value model of a transit scenario: the stops, lines, routes and departures of a
//! [`Schedule`], the [`Network`] those routes drive on and the [`Vehicles`] that serve them.
//!
//! all types are immutable once built. transformations produce new values and share
//! untouched parts through [`std::sync::Arc`].
mod ids;
mod line;
mod link_path;
mod network;
mod route;
mod schedule;
mod schedule_error;
mod stop;
mod vehicles;

pub use ids::{DepartureId, LineId, LinkId, NodeId, RouteId, StopId, VehicleId, VehicleTypeId};
pub use line::Line;
pub use link_path::LinkPath;
pub use network::{Link, Network, Node};
pub use route::{Departure, Route, RouteStop};
pub use schedule::Schedule;
pub use schedule_error::ScheduleError;
pub use stop::Stop;
pub use vehicles::{DoorOperationMode, Vehicle, VehicleType, Vehicles};
