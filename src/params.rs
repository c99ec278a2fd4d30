//! Profile parameter declaration, binding and verification.
//!
//! A profile declares a fixed set of user-facing parameters. The portal
//! renders them as a form, the user fills some of them in, and the bound
//! values drive topology construction. Every parameter has a default, so
//! an empty input always binds to a valid single-node request.

use crate::utils::validation::{validate_choice, validate_mount_point};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Disk images offered by the `osImage` parameter, first entry is the default
pub const IMAGE_LIST: &[(&str, &str)] = &[
    ("urn:publicid:IDN+emulab.net+image+emulab-ops//UBUNTU18-64-STD", "UBUNTU 18.04"),
    ("urn:publicid:IDN+emulab.net+image+emulab-ops//UBUNTU16-64-STD", "UBUNTU 16.04"),
];

/// Frameworks offered by the `framework` parameter of the IBM-FL profile
pub const FRAMEWORK_LIST: &[(&str, &str)] = &[("IBM-FL", "IBM-FL")];

/// Default mount point of the temporary filesystem
pub const DEFAULT_TEMP_FS_MOUNT: &str = "/mydata";

/// Profile variants sharing the same parameter-to-topology pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// IBM Federated Learning profile: framework choice, max temp filesystem on by default
    IbmFl,
    /// LEAF profile: runs the LEAF installer on every node at boot
    Leaf,
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::IbmFl => "ibm-fl",
            Variant::Leaf => "leaf",
        }
    }

    /// Whether nodes of this variant run the installer bootstrap command
    pub fn runs_installer(&self) -> bool {
        matches!(self, Variant::Leaf)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Portal parameter types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Integer,
    String,
    Image,
    Boolean,
}

/// A legal `(value, label)` choice of an enumerated parameter
#[derive(Debug, Clone, Serialize)]
pub struct LegalValue {
    pub value: &'static str,
    pub label: &'static str,
}

/// Declaration of a single profile parameter
#[derive(Debug, Clone, Serialize)]
pub struct ParameterDecl {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    pub default: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub legal_values: Vec<LegalValue>,
    pub long_description: &'static str,
    pub advanced: bool,
}

fn legal_values(list: &[(&'static str, &'static str)]) -> Vec<LegalValue> {
    list.iter()
        .map(|&(value, label)| LegalValue { value, label })
        .collect()
}

/// Ordered parameter declarations of one profile variant
#[derive(Debug, Clone)]
pub struct ParameterSchema {
    variant: Variant,
    decls: Vec<ParameterDecl>,
}

impl ParameterSchema {
    /// Declare the parameters of a profile variant
    pub fn for_variant(variant: Variant) -> Self {
        let defaults = Parameters::defaults(variant);
        let mut decls = vec![ParameterDecl {
            name: "nodeCount",
            description: "Number of Clients",
            kind: ParameterType::Integer,
            default: json!(defaults.node_count),
            legal_values: Vec::new(),
            long_description: "Leave as 0 for just the server. \
                NOTE: As of now, this is limited to 3 client nodes.",
            advanced: false,
        }];

        if variant == Variant::IbmFl {
            decls.push(ParameterDecl {
                name: "framework",
                description: "Select a Framework",
                kind: ParameterType::String,
                default: json!(defaults.framework),
                legal_values: legal_values(FRAMEWORK_LIST),
                long_description: "Pick your favorite framework.",
                advanced: false,
            });
        }

        decls.extend([
            ParameterDecl {
                name: "osImage",
                description: "Select OS image",
                kind: ParameterType::Image,
                default: json!(defaults.os_image),
                legal_values: legal_values(IMAGE_LIST),
                long_description: "Pick your favorite image.",
                advanced: false,
            },
            ParameterDecl {
                name: "phystype",
                description: "Optional physical node type",
                kind: ParameterType::String,
                default: json!(defaults.phystype),
                legal_values: Vec::new(),
                long_description: "Specify a physical node type (pc3000,d430,d710,etc) \
                    instead of letting the resource mapper choose for you.",
                advanced: false,
            },
            ParameterDecl {
                name: "useVMs",
                description: "Use VMs",
                kind: ParameterType::Boolean,
                default: json!(defaults.use_vms),
                legal_values: Vec::new(),
                long_description: "Create XEN VMs instead of allocating bare metal nodes.",
                advanced: false,
            },
            ParameterDecl {
                name: "tempFileSystemMax",
                description: "Temp Filesystem Max Space",
                kind: ParameterType::Boolean,
                default: json!(defaults.temp_fs_max),
                legal_values: Vec::new(),
                long_description: "Allocate all available disk space on each node \
                    to a temporary filesystem.",
                advanced: true,
            },
            ParameterDecl {
                name: "tempFileSystemMount",
                description: "Temporary Filesystem Mount Point",
                kind: ParameterType::String,
                default: json!(defaults.temp_fs_mount),
                legal_values: Vec::new(),
                long_description: "Mount the temporary file system at this mount point; \
                    in general you do not need to change this, but we provide the option \
                    just in case your software is finicky.",
                advanced: true,
            },
        ]);

        Self { variant, decls }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn decls(&self) -> &[ParameterDecl] {
        &self.decls
    }

    /// Look up a declaration by parameter name
    pub fn get(&self, name: &str) -> Option<&ParameterDecl> {
        self.decls.iter().find(|decl| decl.name == name)
    }

    /// Dump the declarations as pretty JSON for the portal form
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.decls)
    }

    /// Bind user input against this schema
    ///
    /// Missing values take their declared defaults. All problems are
    /// collected and reported together; `nodeCount` is never rejected since
    /// out-of-range counts are normalized during topology planning.
    pub fn bind(&self, input: &ParameterInput) -> Result<Parameters, ParameterErrors> {
        let defaults = Parameters::defaults(self.variant);
        let mut errors = ParameterErrors::default();

        let framework = match (self.variant, &input.framework) {
            (Variant::IbmFl, Some(framework)) => {
                if let Err(msg) = validate_choice(framework, FRAMEWORK_LIST) {
                    errors.report(ParameterError::new(format!("Framework {}", msg), &["framework"]));
                }
                Some(framework.clone())
            }
            (Variant::IbmFl, None) => defaults.framework,
            (Variant::Leaf, Some(_)) => {
                errors.report(ParameterError::new(
                    "The leaf profile has no framework parameter",
                    &["framework"],
                ));
                None
            }
            (Variant::Leaf, None) => None,
        };

        let os_image = input.os_image.clone().unwrap_or(defaults.os_image);
        if let Err(msg) = validate_choice(&os_image, IMAGE_LIST) {
            errors.report(ParameterError::new(format!("OS image {}", msg), &["osImage"]));
        }

        // Free-form; any non-empty value becomes the hardware constraint as given
        let phystype = input.phystype.clone().unwrap_or(defaults.phystype);
        if phystype.trim() != phystype {
            log::warn!("Physical node type {:?} has surrounding whitespace", phystype);
        }

        let temp_fs_max = input.temp_file_system_max.unwrap_or(defaults.temp_fs_max);
        let temp_fs_mount = input
            .temp_file_system_mount
            .clone()
            .unwrap_or(defaults.temp_fs_mount);
        // The mount point is only used when a blockstore is created
        if !temp_fs_max {
            log::debug!("Temporary filesystem disabled, mount point {:?} unused", temp_fs_mount);
        } else if let Err(msg) = validate_mount_point(&temp_fs_mount) {
            errors.report(ParameterError::new(
                msg,
                &["tempFileSystemMount", "tempFileSystemMax"],
            ));
        }

        let params = Parameters {
            node_count: input.node_count.unwrap_or(defaults.node_count),
            framework,
            os_image,
            phystype,
            use_vms: input.use_vms.unwrap_or(defaults.use_vms),
            temp_fs_max,
            temp_fs_mount,
        };

        if errors.is_empty() {
            log::debug!("Bound {} parameters: {:?}", self.variant, params);
            Ok(params)
        } else {
            Err(errors)
        }
    }
}

/// Raw parameter input as supplied by a parameter file or the command line
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParameterInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phystype: Option<String>,
    #[serde(rename = "useVMs", skip_serializing_if = "Option::is_none")]
    pub use_vms: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_file_system_max: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_file_system_mount: Option<String>,
}

impl ParameterInput {
    /// Layer `overrides` on top of this input; set fields in `overrides` win
    pub fn merge(self, overrides: ParameterInput) -> ParameterInput {
        ParameterInput {
            node_count: overrides.node_count.or(self.node_count),
            framework: overrides.framework.or(self.framework),
            os_image: overrides.os_image.or(self.os_image),
            phystype: overrides.phystype.or(self.phystype),
            use_vms: overrides.use_vms.or(self.use_vms),
            temp_file_system_max: overrides.temp_file_system_max.or(self.temp_file_system_max),
            temp_file_system_mount: overrides.temp_file_system_mount.or(self.temp_file_system_mount),
        }
    }
}

/// Bound parameter values with defaults applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameters {
    /// Raw requested client count; normalized by the topology planner
    pub node_count: i64,
    pub framework: Option<String>,
    pub os_image: String,
    /// Hardware type constraint, empty means unconstrained
    pub phystype: String,
    pub use_vms: bool,
    pub temp_fs_max: bool,
    pub temp_fs_mount: String,
}

impl Parameters {
    /// Default values of a profile variant
    pub fn defaults(variant: Variant) -> Self {
        Self {
            node_count: 0,
            framework: match variant {
                Variant::IbmFl => Some(FRAMEWORK_LIST[0].0.to_string()),
                Variant::Leaf => None,
            },
            os_image: IMAGE_LIST[0].0.to_string(),
            phystype: String::new(),
            use_vms: false,
            temp_fs_max: variant == Variant::IbmFl,
            temp_fs_mount: DEFAULT_TEMP_FS_MOUNT.to_string(),
        }
    }
}

/// An error tied to one or more named parameters
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message} [{}]", .parameters.join(", "))]
pub struct ParameterError {
    pub message: String,
    pub parameters: Vec<String>,
}

impl ParameterError {
    pub fn new(message: impl Into<String>, parameters: &[&str]) -> Self {
        Self {
            message: message.into(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// All parameter errors reported while binding
#[derive(Debug, Default, Clone, PartialEq, thiserror::Error)]
#[error("Invalid profile parameters: {}", join_errors(.errors))]
pub struct ParameterErrors {
    pub errors: Vec<ParameterError>,
}

fn join_errors(errors: &[ParameterError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ParameterErrors {
    pub fn report(&mut self, error: ParameterError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any reported error names the given parameter
    pub fn mentions(&self, parameter: &str) -> bool {
        self.errors
            .iter()
            .any(|e| e.parameters.iter().any(|p| p == parameter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_binds_to_defaults() {
        for variant in [Variant::IbmFl, Variant::Leaf] {
            let schema = ParameterSchema::for_variant(variant);
            let params = schema.bind(&ParameterInput::default()).unwrap();
            assert_eq!(params, Parameters::defaults(variant));
        }
    }

    #[test]
    fn test_variant_defaults() {
        let ibm = Parameters::defaults(Variant::IbmFl);
        assert!(ibm.temp_fs_max);
        assert_eq!(ibm.framework.as_deref(), Some("IBM-FL"));

        let leaf = Parameters::defaults(Variant::Leaf);
        assert!(!leaf.temp_fs_max);
        assert_eq!(leaf.framework, None);

        assert_eq!(leaf.os_image, IMAGE_LIST[0].0);
        assert_eq!(leaf.temp_fs_mount, "/mydata");
        assert_eq!(leaf.node_count, 0);
    }

    #[test]
    fn test_schema_declarations() {
        let ibm = ParameterSchema::for_variant(Variant::IbmFl);
        let names: Vec<&str> = ibm.decls().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec!["nodeCount", "framework", "osImage", "phystype", "useVMs",
                 "tempFileSystemMax", "tempFileSystemMount"]
        );
        assert_eq!(ibm.get("tempFileSystemMax").unwrap().default, json!(true));
        assert!(ibm.get("tempFileSystemMount").unwrap().advanced);

        let leaf = ParameterSchema::for_variant(Variant::Leaf);
        assert!(leaf.get("framework").is_none());
        assert_eq!(leaf.get("tempFileSystemMax").unwrap().default, json!(false));
        assert_eq!(leaf.get("osImage").unwrap().legal_values.len(), IMAGE_LIST.len());
    }

    #[test]
    fn test_schema_json_dump() {
        let json = ParameterSchema::for_variant(Variant::IbmFl).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let decls = value.as_array().unwrap();
        assert_eq!(decls[0]["name"], "nodeCount");
        assert_eq!(decls[0]["type"], "integer");
        assert_eq!(decls[2]["type"], "image");
        assert!(decls[0].get("legal_values").is_none());
    }

    #[test]
    fn test_node_count_is_never_rejected() {
        let schema = ParameterSchema::for_variant(Variant::IbmFl);
        for count in [-5, 0, 3, 1000] {
            let input = ParameterInput { node_count: Some(count), ..Default::default() };
            assert_eq!(schema.bind(&input).unwrap().node_count, count);
        }
    }

    #[test]
    fn test_unknown_image_rejected() {
        let schema = ParameterSchema::for_variant(Variant::Leaf);
        let input = ParameterInput {
            os_image: Some("urn:publicid:IDN+emulab.net+image+emulab-ops//CENTOS7".to_string()),
            ..Default::default()
        };
        let errors = schema.bind(&input).unwrap_err();
        assert_eq!(errors.errors.len(), 1);
        assert!(errors.mentions("osImage"));
    }

    #[test]
    fn test_framework_on_leaf_rejected() {
        let schema = ParameterSchema::for_variant(Variant::Leaf);
        let input = ParameterInput { framework: Some("IBM-FL".to_string()), ..Default::default() };
        assert!(schema.bind(&input).unwrap_err().mentions("framework"));
    }

    #[test]
    fn test_all_errors_reported_together() {
        let schema = ParameterSchema::for_variant(Variant::IbmFl);
        let input = ParameterInput {
            framework: Some("PySyft".to_string()),
            os_image: Some("urn:publicid:IDN+emulab.net+image+emulab-ops//CENTOS7".to_string()),
            temp_file_system_max: Some(true),
            temp_file_system_mount: Some(String::new()),
            ..Default::default()
        };
        let errors = schema.bind(&input).unwrap_err();
        assert_eq!(errors.errors.len(), 3);
        assert!(errors.mentions("framework"));
        assert!(errors.mentions("osImage"));
        assert!(errors.mentions("tempFileSystemMount"));

        let message = errors.to_string();
        assert!(message.starts_with("Invalid profile parameters: "));
        assert!(message.contains("[osImage]"));
    }

    #[test]
    fn test_phystype_is_free_form() {
        let schema = ParameterSchema::for_variant(Variant::IbmFl);
        for phystype in ["d430,d710", "d430 please", "<m510>"] {
            let input = ParameterInput { phystype: Some(phystype.to_string()), ..Default::default() };
            assert_eq!(schema.bind(&input).unwrap().phystype, phystype);
        }
    }

    #[test]
    fn test_mount_point_unchecked_without_temp_fs() {
        let schema = ParameterSchema::for_variant(Variant::Leaf);
        let input = ParameterInput {
            temp_file_system_max: Some(false),
            temp_file_system_mount: Some("scratch".to_string()),
            ..Default::default()
        };
        let params = schema.bind(&input).unwrap();
        assert!(!params.temp_fs_max);
        assert_eq!(params.temp_fs_mount, "scratch");

        let input = ParameterInput { temp_file_system_max: Some(true), ..input };
        assert!(schema.bind(&input).unwrap_err().mentions("tempFileSystemMount"));
    }

    #[test]
    fn test_schema_variant() {
        assert_eq!(ParameterSchema::for_variant(Variant::Leaf).variant(), Variant::Leaf);
        assert_eq!(ParameterSchema::for_variant(Variant::IbmFl).variant(), Variant::IbmFl);
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = ParameterInput {
            node_count: Some(2),
            phystype: Some("d430".to_string()),
            ..Default::default()
        };
        let cli = ParameterInput {
            node_count: Some(3),
            use_vms: Some(true),
            ..Default::default()
        };
        let merged = file.merge(cli);
        assert_eq!(merged.node_count, Some(3));
        assert_eq!(merged.phystype.as_deref(), Some("d430"));
        assert_eq!(merged.use_vms, Some(true));
        assert_eq!(merged.os_image, None);
    }

    #[test]
    fn test_parse_input_yaml() {
        let yaml = r#"
nodeCount: 2
useVMs: true
tempFileSystemMount: /scratch
"#;
        let input: ParameterInput = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(input.node_count, Some(2));
        assert_eq!(input.use_vms, Some(true));
        assert_eq!(input.temp_file_system_mount.as_deref(), Some("/scratch"));

        assert!(serde_yaml::from_str::<ParameterInput>("linkSpeed: 100").is_err());
    }
}
