use super::{LinkId, Network, RouteId, ScheduleError};
use serde::{Deserialize, Serialize};

/// ordered walk of network links driven by a route. in normalized form the first
/// entry is the start link, the last entry the end link and everything in between
/// the interior links. a well-formed route of `n` stops has `n + 1` links, where
/// link `i` arrives at stop `i` and link `n` continues past the last stop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkPath(pub Vec<LinkId>);

impl LinkPath {
    pub fn new(links: Vec<LinkId>) -> LinkPath {
        LinkPath(links)
    }

    /// network route construction. checks that the path is non-empty and, if a network
    /// is provided, that every link exists in it. with `require_connected`, each link
    /// must also end where the next one begins.
    pub fn build(
        route_id: &RouteId,
        links: Vec<LinkId>,
        network: Option<&Network>,
        require_connected: bool,
    ) -> Result<LinkPath, ScheduleError> {
        if links.is_empty() {
            return Err(ScheduleError::EmptyLinkPath(route_id.clone()));
        }
        if let Some(network) = network {
            for link_id in links.iter() {
                if network.get_link(link_id).is_none() {
                    return Err(ScheduleError::UnknownLink {
                        route_id: route_id.clone(),
                        link_id: link_id.clone(),
                    });
                }
            }
            if require_connected {
                if let Some((from, to)) = network.first_disconnect(&links) {
                    return Err(ScheduleError::DisconnectedLinkPath {
                        route_id: route_id.clone(),
                        from: from.clone(),
                        to: to.clone(),
                    });
                }
            }
        }
        Ok(LinkPath(links))
    }

    pub fn start(&self) -> Option<&LinkId> {
        self.0.first()
    }

    pub fn end(&self) -> Option<&LinkId> {
        self.0.last()
    }

    /// links strictly between the start and end link
    pub fn interior(&self) -> &[LinkId] {
        if self.0.len() <= 2 {
            &[]
        } else {
            &self.0[1..self.0.len() - 1]
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkId> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&LinkId> {
        self.0.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Link, Node, NodeId};
    use geo::Coord;

    fn line_network() -> Network {
        let mut network = Network::default();
        for (id, x) in [("a", 0.0), ("b", 1.0), ("c", 2.0)] {
            network.add_node(Node::new(NodeId::from(id), Coord { x, y: 0.0 }));
        }
        network.add_link(Link::new(LinkId::from("ab"), NodeId::from("a"), NodeId::from("b")));
        network.add_link(Link::new(LinkId::from("bc"), NodeId::from("b"), NodeId::from("c")));
        network.add_link(Link::new(LinkId::from("ca"), NodeId::from("c"), NodeId::from("a")));
        network
    }

    fn ids(links: &[&str]) -> Vec<LinkId> {
        links.iter().map(|l| LinkId::from(*l)).collect()
    }

    #[test]
    fn test_normalized_parts() {
        let path = LinkPath::new(ids(&["ab", "bc", "ca"]));
        assert_eq!(path.start(), Some(&LinkId::from("ab")));
        assert_eq!(path.end(), Some(&LinkId::from("ca")));
        assert_eq!(path.interior(), &[LinkId::from("bc")]);

        let single = LinkPath::new(ids(&["ab"]));
        assert_eq!(single.start(), single.end());
        assert!(single.interior().is_empty());
    }

    #[test]
    fn test_build_rejects_empty_path() {
        let result = LinkPath::build(&RouteId::from("r"), vec![], None, false);
        assert!(matches!(result, Err(ScheduleError::EmptyLinkPath(_))));
    }

    #[test]
    fn test_build_rejects_unknown_link() {
        let network = line_network();
        let result = LinkPath::build(&RouteId::from("r"), ids(&["ab", "zz"]), Some(&network), false);
        match result {
            Err(ScheduleError::UnknownLink { link_id, .. }) => assert_eq!(link_id, LinkId::from("zz")),
            other => panic!("expected unknown link error, found {other:?}"),
        }
    }

    #[test]
    fn test_build_connectivity_only_when_required() {
        let network = line_network();
        let gap = ids(&["ab", "ca"]);
        assert!(LinkPath::build(&RouteId::from("r"), gap.clone(), Some(&network), false).is_ok());
        let result = LinkPath::build(&RouteId::from("r"), gap, Some(&network), true);
        assert!(matches!(result, Err(ScheduleError::DisconnectedLinkPath { .. })));
        let walk = ids(&["ab", "bc", "ca"]);
        assert!(LinkPath::build(&RouteId::from("r"), walk, Some(&network), true).is_ok());
    }
}
