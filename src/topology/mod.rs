//! Network topology module.
//!
//! This module maps the bound profile parameters onto a topology plan:
//! how many nodes, what they are called, and how they are interconnected.

pub mod types;
pub mod planning;

// Re-export key types and functions for easier access
pub use types::{NodePlan, TopologyPlan, TopologyShape};
pub use planning::{effective_client_count, node_name, plan_nodes, plan_topology, MAX_CLIENTS};
