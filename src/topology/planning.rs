//! Parameter-to-topology mapping.
//!
//! Normalizes the requested client count, picks the interconnect shape and
//! names every node deterministically.

use super::types::{NodePlan, TopologyPlan, TopologyShape};
use crate::rspec::NodeKind;
use log::warn;

/// Maximum number of client nodes a request may contain
pub const MAX_CLIENTS: usize = 3;

/// Normalize a requested client count
///
/// Counts below 1 mean "server only". Counts above [`MAX_CLIENTS`] are
/// silently reduced to the maximum rather than rejected.
///
/// # Examples
/// ```
/// use rspecgen::topology::effective_client_count;
///
/// assert_eq!(effective_client_count(-1), 0);
/// assert_eq!(effective_client_count(2), 2);
/// assert_eq!(effective_client_count(100), 3);
/// ```
pub fn effective_client_count(node_count: i64) -> usize {
    if node_count < 1 {
        return 0;
    }
    usize::try_from(node_count).map_or(MAX_CLIENTS, |count| count.min(MAX_CLIENTS))
}

/// Name of the node at `index`; index 0 is always the server
pub fn node_name(index: usize, use_vms: bool) -> String {
    match (index, use_vms) {
        (0, false) => "server".to_string(),
        (0, true) => "server-vm".to_string(),
        (i, false) => format!("client{}", i),
        (i, true) => format!("client-vm{}", i),
    }
}

/// Build the node plan for `client_count` clients plus the server
pub fn plan_nodes(client_count: usize, use_vms: bool) -> Vec<NodePlan> {
    let kind = if use_vms { NodeKind::XenVm } else { NodeKind::RawPc };
    (0..=client_count)
        .map(|index| NodePlan { name: node_name(index, use_vms), kind })
        .collect()
}

/// Plan the whole topology from the raw requested client count
pub fn plan_topology(node_count: i64, use_vms: bool) -> TopologyPlan {
    let client_count = effective_client_count(node_count);
    if node_count > MAX_CLIENTS as i64 {
        warn!(
            "Requested {} clients, limited to {} client nodes",
            node_count, MAX_CLIENTS
        );
    }

    let nodes = plan_nodes(client_count, use_vms);
    let shape = TopologyShape::for_total_nodes(nodes.len());
    TopologyPlan { client_count, shape, nodes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_client_count_below_one() {
        for count in [i64::MIN, -100, -1, 0] {
            assert_eq!(effective_client_count(count), 0);
        }
    }

    #[test]
    fn test_effective_client_count_clamps() {
        assert_eq!(effective_client_count(1), 1);
        assert_eq!(effective_client_count(3), 3);
        for count in [4, 100, 1000, i64::MAX] {
            assert_eq!(effective_client_count(count), MAX_CLIENTS);
        }
    }

    #[test]
    fn test_node_names() {
        let names: Vec<String> = (0..4).map(|i| node_name(i, false)).collect();
        assert_eq!(names, vec!["server", "client1", "client2", "client3"]);

        let names: Vec<String> = (0..4).map(|i| node_name(i, true)).collect();
        assert_eq!(names, vec!["server-vm", "client-vm1", "client-vm2", "client-vm3"]);
    }

    #[test]
    fn test_shape_selection() {
        assert_eq!(plan_topology(0, false).shape, TopologyShape::Isolated);
        assert_eq!(plan_topology(1, false).shape, TopologyShape::PointToPoint);
        assert_eq!(plan_topology(2, false).shape, TopologyShape::Lan);
        assert_eq!(plan_topology(7, false).shape, TopologyShape::Lan);
    }

    #[test]
    fn test_plan_node_kinds() {
        let plan = plan_topology(5, true);
        assert_eq!(plan.client_count, 3);
        assert_eq!(plan.total_nodes(), 4);
        assert!(plan.nodes.iter().all(|n| n.kind == NodeKind::XenVm));

        let plan = plan_topology(1, false);
        assert!(plan.nodes.iter().all(|n| n.kind == NodeKind::RawPc));
    }

    #[test]
    fn test_shape_link_kind() {
        assert_eq!(TopologyShape::Isolated.link_kind(), None);
        assert!(!TopologyShape::PointToPoint.is_best_effort());
        assert!(TopologyShape::Lan.is_best_effort());
    }
}
