use super::{LineId, Route, RouteId};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};

/// a named collection of routes, such as the two directions of a bus line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub routes: BTreeMap<RouteId, Arc<Route>>,
}

impl Line {
    pub fn new(id: LineId) -> Line {
        Line {
            id,
            attributes: BTreeMap::new(),
            routes: BTreeMap::new(),
        }
    }

    /// creates an empty line sharing the id and attributes of this one
    pub fn empty_copy(&self) -> Line {
        Line {
            id: self.id.clone(),
            attributes: self.attributes.clone(),
            routes: BTreeMap::new(),
        }
    }

    pub fn add_route(&mut self, route: Arc<Route>) {
        self.routes.insert(route.id.clone(), route);
    }
}
