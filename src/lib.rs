//! # rspecgen - Request RSpec generator for Emulab/GENI testbed profiles
//!
//! This library turns the parameters of a testbed profile into a GENI v3
//! request RSpec: the XML resource-reservation descriptor the provisioning
//! portal consumes to allocate and image nodes.
//!
//! ## Overview
//!
//! A profile declares a handful of user-facing parameters (client count, OS
//! image, hardware type, VM flag, temporary filesystem options). The bound
//! values are mapped onto a topology of one server plus up to three clients,
//! joined by a point-to-point link or a best-effort LAN, and every node gets
//! its disk image, hardware constraint, blockstore and bootstrap command.
//!
//! ## Architecture
//!
//! - `params`: Parameter declarations, binding and verification
//! - `params_loader`: YAML parameter file loading
//! - `topology`: Client count normalization, node naming and shape selection
//! - `rspec`: Request document model, builder and XML serialization
//! - `profile`: Request assembly for each profile variant
//! - `utils`: Validation and XML escaping helpers
//!
//! ## Example Usage
//!
//! ```rust
//! use rspecgen::params::{ParameterInput, ParameterSchema, Variant};
//! use rspecgen::profile::{build_request, ProfileConfig};
//!
//! let schema = ParameterSchema::for_variant(Variant::IbmFl);
//! let input = ParameterInput { node_count: Some(2), ..Default::default() };
//! let params = schema.bind(&input)?;
//!
//! let request = build_request(&ProfileConfig::new(Variant::IbmFl), &params)?;
//! assert_eq!(request.nodes().len(), 3);
//!
//! let xml = request.to_xml();
//! assert!(xml.contains("<link client_id=\"lan-0\">"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Parameter Format
//!
//! Parameter files use YAML with the portal's parameter names:
//!
//! ```yaml
//! nodeCount: 3
//! osImage: "urn:publicid:IDN+emulab.net+image+emulab-ops//UBUNTU18-64-STD"
//! phystype: d430
//! useVMs: false
//! tempFileSystemMax: true
//! tempFileSystemMount: /mydata
//! ```
//!
//! ## Error Handling
//!
//! Parameter problems are collected into `ParameterErrors`, each tied to the
//! parameters it concerns. Application-level functions return
//! `color_eyre::Result` with context attached.

pub mod params;
pub mod params_loader;
pub mod profile;
pub mod rspec;
pub mod topology;
pub mod utils;
