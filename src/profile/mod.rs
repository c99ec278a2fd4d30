//! Profile request builder.
//!
//! This module drives the whole generation: it plans the topology from the
//! bound parameters and assembles the request node by node through a
//! [`TopologyBuilder`].

pub mod tour;

use crate::params::{Parameters, Variant};
use crate::rspec::{BlockstoreSize, ExecuteService, Placement, Request, TopologyBuilder};
use crate::topology::plan_topology;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info};

/// Installer invoked on every node of the LEAF profile
pub const LEAF_INSTALL_COMMAND: &str = "/usr/bin/sudo chmod +x /local/repository/bin/leaf_install.sh && /usr/bin/sudo /local/repository/bin/leaf_install.sh";

/// Shell used to run the bootstrap command
pub const BOOTSTRAP_SHELL: &str = "bash";

/// Interface created on each connected node
pub const INTERFACE_NAME: &str = "eth1";

/// Static configuration of a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
    pub variant: Variant,
    /// Command run once at boot on each node when the variant uses an installer
    pub install_command: String,
}

impl ProfileConfig {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            install_command: LEAF_INSTALL_COMMAND.to_string(),
        }
    }

    fn bootstrap(&self) -> Option<ExecuteService> {
        self.variant.runs_installer().then(|| ExecuteService {
            shell: BOOTSTRAP_SHELL.to_string(),
            command: self.install_command.clone(),
        })
    }
}

/// Build the request document for a set of bound parameters
pub fn build_request(config: &ProfileConfig, params: &Parameters) -> Result<Request> {
    let plan = plan_topology(params.node_count, params.use_vms);
    info!(
        "Building {} request: {} client(s), {} node(s) total, {:?} topology",
        config.variant,
        plan.client_count,
        plan.total_nodes(),
        plan.shape
    );

    let mut builder = TopologyBuilder::new();

    let link = plan.shape.link_kind().map(|kind| builder.add_link(kind));
    if let Some(link) = link {
        builder.set_best_effort(link, plan.shape.is_best_effort())?;
    }

    let bootstrap = config.bootstrap();

    for node_plan in &plan.nodes {
        let node = builder.add_node(&node_plan.name, node_plan.kind)?;

        if !params.os_image.is_empty() {
            builder.set_disk_image(node, &params.os_image)?;
        }

        if let Some(link) = link {
            builder.connect(node, link, INTERFACE_NAME)?;
        }

        if !params.phystype.is_empty() {
            builder.set_hardware_type(node, &params.phystype)?;
        }

        if params.temp_fs_max {
            builder.attach_blockstore(
                node,
                &params.temp_fs_mount,
                BlockstoreSize::AllAvailable,
                Placement::Any,
            )?;
        }

        if let Some(service) = &bootstrap {
            builder.attach_bootstrap(node, service.clone())?;
        }

        debug!("Planned node '{}'", node_plan.name);
    }

    builder.set_tour(tour::for_variant(config.variant));

    builder
        .build()
        .wrap_err_with(|| format!("Failed to assemble {} request", config.variant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rspec::{LinkKind, NodeKind};

    fn params(variant: Variant) -> Parameters {
        Parameters::defaults(variant)
    }

    #[test]
    fn test_default_ibm_fl_request() {
        let request = build_request(&ProfileConfig::new(Variant::IbmFl), &params(Variant::IbmFl)).unwrap();

        assert_eq!(request.nodes().len(), 1);
        assert!(request.links().is_empty());

        let server = request.node("server").unwrap();
        assert_eq!(server.kind(), NodeKind::RawPc);
        assert!(server.interfaces().is_empty());
        assert_eq!(server.blockstores().len(), 1);
        assert_eq!(server.blockstores()[0].mount, "/mydata");
        assert!(server.services().is_empty());
        assert!(request.tour().unwrap().instructions.contains("IBM"));
    }

    #[test]
    fn test_leaf_attaches_installer() {
        let mut p = params(Variant::Leaf);
        p.node_count = 2;
        let request = build_request(&ProfileConfig::new(Variant::Leaf), &p).unwrap();

        assert_eq!(request.nodes().len(), 3);
        for node in request.nodes() {
            assert_eq!(node.services().len(), 1);
            assert_eq!(node.services()[0].command, LEAF_INSTALL_COMMAND);
            assert_eq!(node.services()[0].shell, "bash");
            assert!(node.blockstores().is_empty());
        }
    }

    #[test]
    fn test_injected_install_command() {
        let config = ProfileConfig {
            variant: Variant::Leaf,
            install_command: "/bin/true".to_string(),
        };
        let request = build_request(&config, &params(Variant::Leaf)).unwrap();
        assert_eq!(request.nodes()[0].services()[0].command, "/bin/true");
    }

    #[test]
    fn test_point_to_point_link() {
        let mut p = params(Variant::IbmFl);
        p.node_count = 1;
        let request = build_request(&ProfileConfig::new(Variant::IbmFl), &p).unwrap();

        assert_eq!(request.links().len(), 1);
        let link = &request.links()[0];
        assert_eq!(link.kind(), LinkKind::Link);
        assert!(!link.best_effort());
        assert_eq!(link.interface_refs(), ["server:eth1", "client1:eth1"]);
    }

    #[test]
    fn test_phystype_applied_to_all_nodes() {
        let mut p = params(Variant::IbmFl);
        p.node_count = 3;
        p.phystype = "d430".to_string();
        let request = build_request(&ProfileConfig::new(Variant::IbmFl), &p).unwrap();
        assert!(request.nodes().iter().all(|n| n.hardware_type() == Some("d430")));
    }
}
