//! Append-only request builder.
//!
//! Nodes, links and attachments are added through typed handles; the
//! document becomes a read-only [`Request`] once [`TopologyBuilder::build`]
//! has checked it.

use super::types::{
    Blockstore, BlockstoreSize, ExecuteService, Interface, Link, LinkKind, Node, NodeKind,
    Placement, Request, Tour,
};
use log::debug;

/// Handle to a node added to a builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// Handle to a link added to a builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkId(usize);

/// Errors raised while assembling a request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("Node '{0}' already exists in the request")]
    DuplicateNode(String),
    #[error("Unknown node handle {0}")]
    UnknownNode(usize),
    #[error("Unknown link handle {0}")]
    UnknownLink(usize),
    #[error("Interface '{0}' already exists")]
    DuplicateInterface(String),
    #[error("Node '{0}' already has a blockstore")]
    DuplicateBlockstore(String),
    #[error("{kind:?} '{link}' has {interfaces} interface(s), expected {expected}")]
    LinkArity {
        link: String,
        kind: LinkKind,
        interfaces: usize,
        expected: &'static str,
    },
}

/// Builder for a request document
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    nodes: Vec<Node>,
    links: Vec<Link>,
    tour: Option<Tour>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; names must be unique within the request
    pub fn add_node(&mut self, name: &str, kind: NodeKind) -> Result<NodeId, BuildError> {
        if self.nodes.iter().any(|node| node.client_id == name) {
            return Err(BuildError::DuplicateNode(name.to_string()));
        }
        debug!("Adding {} node '{}'", kind.sliver_type(), name);
        self.nodes.push(Node::new(name.to_string(), kind));
        Ok(NodeId(self.nodes.len() - 1))
    }

    pub fn set_disk_image(&mut self, node: NodeId, image: &str) -> Result<(), BuildError> {
        self.node_mut(node)?.disk_image = Some(image.to_string());
        Ok(())
    }

    pub fn set_hardware_type(&mut self, node: NodeId, hardware_type: &str) -> Result<(), BuildError> {
        self.node_mut(node)?.hardware_type = Some(hardware_type.to_string());
        Ok(())
    }

    /// Add a link or LAN; ids are numbered per kind (`link-0`, `lan-0`, ...)
    pub fn add_link(&mut self, kind: LinkKind) -> LinkId {
        let index = self.links.iter().filter(|link| link.kind == kind).count();
        let client_id = format!("{}-{}", kind.id_prefix(), index);
        debug!("Adding {:?} '{}'", kind, client_id);
        self.links.push(Link {
            client_id,
            kind,
            best_effort: false,
            interface_refs: Vec::new(),
        });
        LinkId(self.links.len() - 1)
    }

    pub fn set_best_effort(&mut self, link: LinkId, best_effort: bool) -> Result<(), BuildError> {
        self.link_mut(link)?.best_effort = best_effort;
        Ok(())
    }

    /// Create interface `ifname` on `node` and bind it to `link`
    pub fn connect(&mut self, node: NodeId, link: LinkId, ifname: &str) -> Result<(), BuildError> {
        // Resolve the link first so a bad handle leaves the node untouched
        self.link_mut(link)?;

        let node = self.node_mut(node)?;
        let client_id = format!("{}:{}", node.client_id, ifname);
        if node.interfaces.iter().any(|iface| iface.client_id == client_id) {
            return Err(BuildError::DuplicateInterface(client_id));
        }
        node.interfaces.push(Interface { client_id: client_id.clone() });

        self.link_mut(link)?.interface_refs.push(client_id);
        Ok(())
    }

    /// Attach the node's single ephemeral blockstore
    pub fn attach_blockstore(
        &mut self,
        node: NodeId,
        mount: &str,
        size: BlockstoreSize,
        placement: Placement,
    ) -> Result<(), BuildError> {
        let node = self.node_mut(node)?;
        if !node.blockstores.is_empty() {
            return Err(BuildError::DuplicateBlockstore(node.client_id.clone()));
        }
        node.blockstores.push(Blockstore {
            name: format!("{}-bs", node.client_id),
            mount: mount.to_string(),
            size,
            placement,
        });
        Ok(())
    }

    /// Attach a command executed once at boot
    pub fn attach_bootstrap(&mut self, node: NodeId, service: ExecuteService) -> Result<(), BuildError> {
        self.node_mut(node)?.services.push(service);
        Ok(())
    }

    pub fn set_tour(&mut self, tour: Tour) {
        self.tour = Some(tour);
    }

    /// Check link arity and freeze the request
    pub fn build(self) -> Result<Request, BuildError> {
        for link in &self.links {
            let interfaces = link.interface_refs.len();
            let (valid, expected) = match link.kind {
                LinkKind::Link => (interfaces == 2, "exactly 2"),
                LinkKind::Lan => (interfaces >= 2, "at least 2"),
            };
            if !valid {
                return Err(BuildError::LinkArity {
                    link: link.client_id.clone(),
                    kind: link.kind,
                    interfaces,
                    expected,
                });
            }
        }

        debug!(
            "Built request with {} node(s) and {} link(s)",
            self.nodes.len(),
            self.links.len()
        );
        Ok(Request {
            nodes: self.nodes,
            links: self.links,
            tour: self.tour,
        })
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut Node, BuildError> {
        self.nodes.get_mut(node.0).ok_or(BuildError::UnknownNode(node.0))
    }

    fn link_mut(&mut self, link: LinkId) -> Result<&mut Link, BuildError> {
        self.links.get_mut(link.0).ok_or(BuildError::UnknownLink(link.0))
    }
}
