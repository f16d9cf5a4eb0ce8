use ptprep::model::Network;

/// removes the links and nodes whose id contains `identifier`, such as the transit
/// links of an earlier pseudo network. links attached to a removed node are removed too.
pub fn remove_links_and_nodes(network: &Network, identifier: &str) -> Network {
    let mut result = Network::default();
    for node in network.nodes.values() {
        if !node.id.as_str().contains(identifier) {
            result.add_node(node.clone());
        }
    }
    for link in network.links.values() {
        let keep = !link.id.as_str().contains(identifier)
            && result.get_node(&link.from).is_some()
            && result.get_node(&link.to).is_some();
        if keep {
            result.add_link(link.clone());
        }
    }
    log::info!(
        "removed {} node(s) and {} link(s) matching '{identifier}'",
        network.nodes.len() - result.nodes.len(),
        network.links.len() - result.links.len()
    );
    result
}
