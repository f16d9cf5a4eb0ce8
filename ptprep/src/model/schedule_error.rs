use super::{LinkId, RouteId};

#[derive(thiserror::Error, Debug)]
pub enum ScheduleError {
    #[error("route '{0}' has an empty link path")]
    EmptyLinkPath(RouteId),
    #[error("route '{route_id}' references link '{link_id}' which is not in the network")]
    UnknownLink { route_id: RouteId, link_id: LinkId },
    #[error("route '{route_id}' is disconnected between links '{from}' and '{to}'")]
    DisconnectedLinkPath {
        route_id: RouteId,
        from: LinkId,
        to: LinkId,
    },
    #[error("route '{route_id}' is malformed: {message}")]
    MalformedRoute { route_id: RouteId, message: String },
    #[error("keep mask of length {mask} does not match the {stops} stops of route '{route_id}'")]
    KeepMaskLengthMismatch {
        route_id: RouteId,
        mask: usize,
        stops: usize,
    },
}
