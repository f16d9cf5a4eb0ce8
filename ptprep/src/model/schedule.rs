use super::{Line, LineId, Route, Stop, StopId};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};

/// top-level transit schedule: the universe of stops and the lines serving them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub stops: BTreeMap<StopId, Arc<Stop>>,
    #[serde(default)]
    pub lines: BTreeMap<LineId, Arc<Line>>,
}

impl Schedule {
    pub fn add_stop(&mut self, stop: Arc<Stop>) {
        self.stops.insert(stop.id.clone(), stop);
    }

    pub fn add_line(&mut self, line: Arc<Line>) {
        self.lines.insert(line.id.clone(), line);
    }

    pub fn get_stop(&self, stop_id: &StopId) -> Option<&Arc<Stop>> {
        self.stops.get(stop_id)
    }

    /// a new schedule holding the same stops but no lines
    pub fn with_stops_only(&self) -> Schedule {
        Schedule {
            stops: self.stops.clone(),
            lines: BTreeMap::new(),
        }
    }

    pub fn routes(&self) -> impl Iterator<Item = (&Line, &Route)> {
        self.lines
            .values()
            .flat_map(|line| line.routes.values().map(move |route| (line.as_ref(), route.as_ref())))
    }

    pub fn route_count(&self) -> usize {
        self.lines.values().map(|l| l.routes.len()).sum()
    }
}
