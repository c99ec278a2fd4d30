//! Request RSpec type definitions.
//!
//! This module contains the in-memory request document: nodes with their
//! attachments, the links joining them, and the tour shown by the portal.
//! A [`Request`] is only produced by freezing a
//! [`TopologyBuilder`](super::TopologyBuilder) and exposes read-only accessors.

use serde::Serialize;

// ============================================================================
// Node Types
// ============================================================================

/// Kind of machine a node is allocated as.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Exclusive bare-metal machine
    #[serde(rename = "raw-pc")]
    RawPc,
    /// Shared XEN virtual machine
    #[serde(rename = "emulab-xen")]
    XenVm,
}

impl NodeKind {
    /// Sliver type name used in the RSpec
    pub fn sliver_type(&self) -> &'static str {
        match self {
            NodeKind::RawPc => "raw-pc",
            NodeKind::XenVm => "emulab-xen",
        }
    }

    /// Whether the node is allocated exclusively to the experiment
    pub fn exclusive(&self) -> bool {
        matches!(self, NodeKind::RawPc)
    }
}

/// A network interface on a node.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Interface id, `<node>:<ifname>`
    pub client_id: String,
}

/// Size of an ephemeral blockstore.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockstoreSize {
    /// Use all space available on the node
    #[serde(rename = "0GB")]
    AllAvailable,
}

impl BlockstoreSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockstoreSize::AllAvailable => "0GB",
        }
    }
}

/// Where the testbed may place a blockstore.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Any,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Any => "any",
        }
    }
}

/// An ephemeral local blockstore mounted on a node.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Blockstore {
    /// Blockstore name, `<node>-bs`
    pub name: String,
    pub mount: String,
    pub size: BlockstoreSize,
    pub placement: Placement,
}

/// A command executed once when the node boots.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExecuteService {
    pub shell: String,
    pub command: String,
}

/// A node in the request.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) client_id: String,
    pub(crate) kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) disk_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hardware_type: Option<String>,
    pub(crate) interfaces: Vec<Interface>,
    pub(crate) blockstores: Vec<Blockstore>,
    pub(crate) services: Vec<ExecuteService>,
}

impl Node {
    pub(crate) fn new(client_id: String, kind: NodeKind) -> Self {
        Self {
            client_id,
            kind,
            disk_image: None,
            hardware_type: None,
            interfaces: Vec::new(),
            blockstores: Vec::new(),
            services: Vec::new(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn disk_image(&self) -> Option<&str> {
        self.disk_image.as_deref()
    }

    pub fn hardware_type(&self) -> Option<&str> {
        self.hardware_type.as_deref()
    }

    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    pub fn blockstores(&self) -> &[Blockstore] {
        &self.blockstores
    }

    pub fn services(&self) -> &[ExecuteService] {
        &self.services
    }
}

// ============================================================================
// Link Types
// ============================================================================

/// Kind of connecting object.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Point-to-point link joining exactly two interfaces
    Link,
    /// Shared LAN joining two or more interfaces
    Lan,
}

impl LinkKind {
    /// Prefix of generated link ids (`link-0`, `lan-0`)
    pub fn id_prefix(&self) -> &'static str {
        match self {
            LinkKind::Link => "link",
            LinkKind::Lan => "lan",
        }
    }
}

/// A link or LAN joining node interfaces.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub(crate) client_id: String,
    pub(crate) kind: LinkKind,
    /// No bandwidth reservation is made for a best-effort link
    pub(crate) best_effort: bool,
    pub(crate) interface_refs: Vec<String>,
}

impl Link {
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    pub fn best_effort(&self) -> bool {
        self.best_effort
    }

    /// Interface ids bound to this link, in connection order
    pub fn interface_refs(&self) -> &[String] {
        &self.interface_refs
    }
}

// ============================================================================
// Request Document
// ============================================================================

/// Portal tour: markdown description and instructions.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    pub description: String,
    pub instructions: String,
}

/// A frozen request document, ready to be serialized.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Request {
    pub(crate) nodes: Vec<Node>,
    pub(crate) links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tour: Option<Tour>,
}

impl Request {
    /// Nodes in creation order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn tour(&self) -> Option<&Tour> {
        self.tour.as_ref()
    }

    /// Look up a node by client id
    pub fn node(&self, client_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.client_id == client_id)
    }

    /// Serialize the request as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
