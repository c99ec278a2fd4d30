//! Topology type definitions.
//!
//! This file contains the shapes a profile topology can take and the
//! per-node plan produced from the bound parameters.

use crate::rspec::{LinkKind, NodeKind};

/// How the nodes of a request are interconnected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyShape {
    /// A single server node with no link and no interface
    Isolated,
    /// Two nodes joined by a point-to-point link
    PointToPoint,
    /// Three or more nodes on a best-effort LAN
    Lan,
}

impl TopologyShape {
    /// Select the shape for a total node count
    pub fn for_total_nodes(total_nodes: usize) -> Self {
        match total_nodes {
            0 | 1 => Self::Isolated,
            2 => Self::PointToPoint,
            _ => Self::Lan,
        }
    }

    /// The link to create for this shape, if any
    pub fn link_kind(&self) -> Option<LinkKind> {
        match self {
            Self::Isolated => None,
            Self::PointToPoint => Some(LinkKind::Link),
            Self::Lan => Some(LinkKind::Lan),
        }
    }

    /// Whether the link carries no bandwidth reservation
    pub fn is_best_effort(&self) -> bool {
        matches!(self, Self::Lan)
    }
}

/// A node to be created, in creation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePlan {
    pub name: String,
    pub kind: NodeKind,
}

/// The full topology plan for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyPlan {
    /// Effective number of clients after normalization
    pub client_count: usize,
    pub shape: TopologyShape,
    /// Server first, then clients in index order
    pub nodes: Vec<NodePlan>,
}

impl TopologyPlan {
    pub fn total_nodes(&self) -> usize {
        self.nodes.len()
    }
}
