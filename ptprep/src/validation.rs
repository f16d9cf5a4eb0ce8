//! structural checks of a schedule, optionally against the network its routes drive
//! on. validation never fails: every problem found is reported in a [`ValidationResult`].
use crate::model::{DepartureId, LineId, LinkId, Network, Route, RouteId, Schedule, StopId};

/// problems that make a schedule unusable for simulation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("route {line_id}/{route_id} references unknown stop '{stop_id}'")]
    UnknownStop {
        line_id: LineId,
        route_id: RouteId,
        stop_id: StopId,
    },
    #[error("route {line_id}/{route_id} has no stops")]
    RouteWithoutStops { line_id: LineId, route_id: RouteId },
    #[error("route {line_id}/{route_id} has an empty link path")]
    EmptyLinkPath { line_id: LineId, route_id: RouteId },
    #[error("route {line_id}/{route_id} uses link '{link_id}' which is not in the network")]
    UnknownLink {
        line_id: LineId,
        route_id: RouteId,
        link_id: LinkId,
    },
    #[error("stop '{stop_id}' refers to link '{link_id}' which is not in the network")]
    UnknownStopLink { stop_id: StopId, link_id: LinkId },
}

/// suspicious but simulatable properties of a schedule
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    #[error("route {line_id}/{route_id} has {links} links for {stops} stops")]
    LinkPathLength {
        line_id: LineId,
        route_id: RouteId,
        links: usize,
        stops: usize,
    },
    #[error("route {line_id}/{route_id} is not connected between links '{from}' and '{to}'")]
    DisconnectedLinks {
        line_id: LineId,
        route_id: RouteId,
        from: LinkId,
        to: LinkId,
    },
    #[error("route {line_id}/{route_id} has decreasing offsets at stop '{stop_id}'")]
    DecreasingOffsets {
        line_id: LineId,
        route_id: RouteId,
        stop_id: StopId,
    },
    #[error("departure '{departure_id}' of route {line_id}/{route_id} has no vehicle")]
    DepartureWithoutVehicle {
        line_id: LineId,
        route_id: RouteId,
        departure_id: DepartureId,
    },
    #[error("line '{0}' has no routes")]
    LineWithoutRoutes(LineId),
}

#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// writes every issue to the log, errors at error level and warnings at warn level
    pub fn log_issues(&self) {
        for error in self.errors.iter() {
            log::error!("{error}");
        }
        for warning in self.warnings.iter() {
            log::warn!("{warning}");
        }
        log::info!(
            "schedule validation finished with {} error(s) and {} warning(s)",
            self.errors.len(),
            self.warnings.len()
        );
    }
}

/// runs every schedule check. network checks are skipped when no network is given.
pub fn validate_all(schedule: &Schedule, network: Option<&Network>) -> ValidationResult {
    let mut result = ValidationResult::default();

    if let Some(network) = network {
        for stop in schedule.stops.values() {
            if let Some(link_id) = &stop.link_id {
                if network.get_link(link_id).is_none() {
                    result.errors.push(ValidationError::UnknownStopLink {
                        stop_id: stop.id.clone(),
                        link_id: link_id.clone(),
                    });
                }
            }
        }
    }

    for line in schedule.lines.values() {
        if line.routes.is_empty() {
            result
                .warnings
                .push(ValidationWarning::LineWithoutRoutes(line.id.clone()));
        }
        for route in line.routes.values() {
            validate_route(schedule, network, &line.id, route, &mut result);
        }
    }
    result
}

fn validate_route(
    schedule: &Schedule,
    network: Option<&Network>,
    line_id: &LineId,
    route: &Route,
    result: &mut ValidationResult,
) {
    let route_id = &route.id;
    if route.stops.is_empty() {
        result.errors.push(ValidationError::RouteWithoutStops {
            line_id: line_id.clone(),
            route_id: route_id.clone(),
        });
    }
    for stop_id in route.stop_ids() {
        if schedule.get_stop(stop_id).is_none() {
            result.errors.push(ValidationError::UnknownStop {
                line_id: line_id.clone(),
                route_id: route_id.clone(),
                stop_id: stop_id.clone(),
            });
        }
    }

    if route.link_path.is_empty() {
        result.errors.push(ValidationError::EmptyLinkPath {
            line_id: line_id.clone(),
            route_id: route_id.clone(),
        });
    } else if route.link_path.len() != route.stops.len() + 1 {
        result.warnings.push(ValidationWarning::LinkPathLength {
            line_id: line_id.clone(),
            route_id: route_id.clone(),
            links: route.link_path.len(),
            stops: route.stops.len(),
        });
    }

    if let Some(network) = network {
        let mut all_known = true;
        for link_id in route.link_path.iter() {
            if network.get_link(link_id).is_none() {
                all_known = false;
                result.errors.push(ValidationError::UnknownLink {
                    line_id: line_id.clone(),
                    route_id: route_id.clone(),
                    link_id: link_id.clone(),
                });
            }
        }
        if all_known {
            if let Some((from, to)) = network.first_disconnect(&route.link_path.0) {
                result.warnings.push(ValidationWarning::DisconnectedLinks {
                    line_id: line_id.clone(),
                    route_id: route_id.clone(),
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }
    }

    let mut previous: Option<u32> = None;
    for stop in route.stops.iter() {
        let offsets = [stop.arrival_offset, stop.departure_offset];
        let mut decreasing = false;
        for offset in offsets.into_iter().flatten() {
            if previous.is_some_and(|p| offset < p) {
                decreasing = true;
            }
            previous = Some(offset);
        }
        if decreasing {
            result.warnings.push(ValidationWarning::DecreasingOffsets {
                line_id: line_id.clone(),
                route_id: route_id.clone(),
                stop_id: stop.stop_id.clone(),
            });
        }
    }

    for departure in route.departures.values() {
        if departure.vehicle_id.is_none() {
            result
                .warnings
                .push(ValidationWarning::DepartureWithoutVehicle {
                    line_id: line_id.clone(),
                    route_id: route_id.clone(),
                    departure_id: departure.id.clone(),
                });
        }
    }
}
