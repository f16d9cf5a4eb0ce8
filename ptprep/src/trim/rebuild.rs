use super::{KeepMask, LinkAlignment};
use crate::model::{LinkId, LinkPath, Network, Route, ScheduleError};

/// reconstitutes routes from keep masks. the surviving link path is rebuilt through
/// [`LinkPath::build`], so a network (when given) validates every rebuilt route.
#[derive(Debug, Clone, Copy)]
pub struct RouteRebuilder<'a> {
    pub network: Option<&'a Network>,
    pub alignment: LinkAlignment,
    pub require_connected: bool,
}

impl<'a> RouteRebuilder<'a> {
    pub fn new(
        network: Option<&'a Network>,
        alignment: LinkAlignment,
        require_connected: bool,
    ) -> RouteRebuilder<'a> {
        RouteRebuilder {
            network,
            alignment,
            require_connected,
        }
    }

    /// builds a new route from the stops (and aligned links) kept by `mask`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` if the mask keeps no stop, the route should be omitted
    /// * `Ok(Some(route))` with the id, mode, description and departures of the
    ///   original route. stop offsets and departure times are copied as-is.
    /// * an error if the route or its rebuilt link path are malformed
    pub fn rebuild(&self, route: &Route, mask: &KeepMask) -> Result<Option<Route>, ScheduleError> {
        if mask.len() != route.stops.len() {
            return Err(ScheduleError::KeepMaskLengthMismatch {
                route_id: route.id.clone(),
                mask: mask.len(),
                stops: route.stops.len(),
            });
        }
        let kept = mask.kept_indices();
        if kept.is_empty() {
            return Ok(None);
        }

        let links = self.select_links(route, &kept)?;
        let stops = kept.iter().map(|idx| route.stops[*idx].clone()).collect();
        let link_path = LinkPath::build(&route.id, links, self.network, self.require_connected)?;

        let mut route_new = Route::new(route.id.clone(), link_path, stops, &route.transport_mode);
        route_new.description = route.description.clone();
        // TODO: shift stop offsets and departure times when leading stops are discarded
        route_new.departures = route.departures.clone();
        Ok(Some(route_new))
    }

    fn select_links(&self, route: &Route, kept: &[usize]) -> Result<Vec<LinkId>, ScheduleError> {
        let n_stops = route.stops.len();
        let path = &route.link_path.0;
        match self.alignment {
            LinkAlignment::Aligned => {
                if path.len() != n_stops + 1 {
                    return Err(ScheduleError::MalformedRoute {
                        route_id: route.id.clone(),
                        message: format!(
                            "expected {} links for {} stops, found {}",
                            n_stops + 1,
                            n_stops,
                            path.len()
                        ),
                    });
                }
                let following = kept.last().map(|last| path[last + 1].clone());
                Ok(kept
                    .iter()
                    .map(|idx| path[*idx].clone())
                    .chain(following)
                    .collect())
            }
            LinkAlignment::Literal => {
                if path.len() < n_stops {
                    return Err(ScheduleError::MalformedRoute {
                        route_id: route.id.clone(),
                        message: format!(
                            "expected at least {} links for {} stops, found {}",
                            n_stops,
                            n_stops,
                            path.len()
                        ),
                    });
                }
                Ok(kept.iter().map(|idx| path[*idx].clone()).collect())
            }
        }
    }
}
