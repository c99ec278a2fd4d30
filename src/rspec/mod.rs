//! # Request RSpec Module
//!
//! This module holds the request document produced for the testbed portal
//! and the builder used to assemble it.
//!
//! ## Key Components
//!
//! - `types.rs`: Request, node, link and attachment data structures
//! - `builder.rs`: Append-only `TopologyBuilder` that freezes into a `Request`
//! - `xml.rs`: GENI v3 request RSpec serialization
//!
//! ## Data Flow
//!
//! 1. **Assembly**: Nodes, links, interfaces and attachments are added to a builder
//! 2. **Freeze**: `build()` checks link arity and returns a read-only `Request`
//! 3. **Serialization**: The request is written once as XML (or JSON for inspection)
//!
//! ## Example Generated Structure
//!
//! ```xml
//! <rspec xmlns="http://www.geni.net/resources/rspec/3" type="request">
//!   <node client_id="server" exclusive="true">
//!     <sliver_type name="raw-pc">
//!       <disk_image name="urn:publicid:IDN+emulab.net+image+emulab-ops//UBUNTU18-64-STD"/>
//!     </sliver_type>
//!     <interface client_id="server:eth1"/>
//!     <emulab:blockstore name="server-bs" mountpoint="/mydata" class="local" size="0GB" placement="any"/>
//!   </node>
//!   <link client_id="link-0">
//!     <interface_ref client_id="server:eth1"/>
//!     <interface_ref client_id="client1:eth1"/>
//!   </link>
//! </rspec>
//! ```

pub mod builder;
pub mod types;
pub mod xml;

// Re-export commonly used types for convenience
pub use builder::{BuildError, LinkId, NodeId, TopologyBuilder};
pub use types::{
    Blockstore,
    BlockstoreSize,
    ExecuteService,
    Interface,
    Link,
    LinkKind,
    Node,
    NodeKind,
    Placement,
    Request,
    Tour,
};
