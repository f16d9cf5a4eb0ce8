use super::{LinkId, NodeId};
use geo::Coord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub coord: Coord<f64>,
}

impl Node {
    pub fn new(id: NodeId, coord: Coord<f64>) -> Node {
        Node { id, coord }
    }
}

/// a directed network link. length in meters, freespeed in meters per second,
/// capacity in vehicles per hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub from: NodeId,
    pub to: NodeId,
    pub length: f64,
    pub freespeed: f64,
    pub capacity: f64,
    pub lanes: f64,
    #[serde(default)]
    pub modes: BTreeSet<String>,
}

impl Link {
    pub fn new(id: LinkId, from: NodeId, to: NodeId) -> Link {
        Link {
            id,
            from,
            to,
            length: 0.0,
            freespeed: 1.0,
            capacity: 1.0,
            lanes: 1.0,
            modes: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub nodes: BTreeMap<NodeId, Node>,
    pub links: BTreeMap<LinkId, Link>,
}

impl Network {
    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn add_link(&mut self, link: Link) {
        self.links.insert(link.id.clone(), link);
    }

    pub fn get_link(&self, link_id: &LinkId) -> Option<&Link> {
        self.links.get(link_id)
    }

    pub fn get_node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// true if a vehicle leaving `a` can continue directly onto `b`. unknown links never connect.
    pub fn connects(&self, a: &LinkId, b: &LinkId) -> bool {
        match (self.links.get(a), self.links.get(b)) {
            (Some(a), Some(b)) => a.to == b.from,
            _ => false,
        }
    }

    /// the first pair of consecutive links in `links` that does not connect, if any.
    pub fn first_disconnect<'a>(&self, links: &'a [LinkId]) -> Option<(&'a LinkId, &'a LinkId)> {
        links
            .windows(2)
            .find(|pair| !self.connects(&pair[0], &pair[1]))
            .map(|pair| (&pair[0], &pair[1]))
    }
}
