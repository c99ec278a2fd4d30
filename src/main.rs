use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::{error, info};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use rspecgen::params::{ParameterErrors, ParameterInput, ParameterSchema, Variant};
use rspecgen::params_loader::load_parameters;
use rspecgen::profile::{build_request, ProfileConfig};

/// Serialization of the generated request
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// GENI v3 request RSpec
    Xml,
    /// Request document as JSON, for inspection
    Json,
}

/// Request RSpec generator for Emulab/GENI testbed profiles
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML parameter file
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Profile variant to generate
    #[arg(long, value_enum, default_value_t = Variant::IbmFl)]
    variant: Variant,

    /// Number of client nodes (0 for just the server, at most 3)
    #[arg(long, allow_negative_numbers = true)]
    node_count: Option<i64>,

    /// Framework to install (ibm-fl profile only)
    #[arg(long)]
    framework: Option<String>,

    /// Disk image URN for all nodes
    #[arg(long)]
    os_image: Option<String>,

    /// Physical node type for all nodes (e.g. d430)
    #[arg(long)]
    phystype: Option<String>,

    /// Allocate XEN VMs instead of bare metal nodes
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    use_vms: Option<bool>,

    /// Allocate all available disk space to a temporary filesystem
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    temp_fs_max: Option<bool>,

    /// Mount point of the temporary filesystem
    #[arg(long)]
    temp_fs_mount: Option<String>,

    /// Override the bootstrap command run by the leaf profile
    #[arg(long)]
    install_command: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Xml)]
    format: OutputFormat,

    /// Write the request to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the parameter declarations as JSON and exit
    #[arg(long)]
    dump_params: bool,
}

impl Args {
    /// Parameter values given on the command line
    fn overrides(&self) -> ParameterInput {
        ParameterInput {
            node_count: self.node_count,
            framework: self.framework.clone(),
            os_image: self.os_image.clone(),
            phystype: self.phystype.clone(),
            use_vms: self.use_vms,
            temp_file_system_max: self.temp_fs_max,
            temp_file_system_mount: self.temp_fs_mount.clone(),
        }
    }

    fn profile_config(&self) -> ProfileConfig {
        let mut config = ProfileConfig::new(self.variant);
        if let Some(command) = &self.install_command {
            config.install_command = command.clone();
        }
        config
    }
}

fn emit(document: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, document)
                .wrap_err_with(|| format!("Failed to write request to '{}'", path.display()))?;
            info!("Wrote request to {:?}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .wrap_err("Failed to write request to standard output")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// One line per parameter error; these are the only report of a failed bind
fn parameter_error_lines(errors: &ParameterErrors) -> Vec<String> {
    errors.errors.iter().map(ToString::to_string).collect()
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Logs go to stderr; stdout carries only the request
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let schema = ParameterSchema::for_variant(args.variant);

    if args.dump_params {
        let json = schema.to_json().wrap_err("Failed to serialize parameter declarations")?;
        return emit(&format!("{}\n", json), args.output.as_ref());
    }

    info!("Generating {} profile request", schema.variant());

    let file_input = match &args.params {
        Some(path) => load_parameters(path)?,
        None => ParameterInput::default(),
    };
    let input = file_input.merge(args.overrides());

    let params = match schema.bind(&input) {
        Ok(params) => params,
        Err(errors) => {
            for line in parameter_error_lines(&errors) {
                error!("{}", line);
            }
            process::exit(2);
        }
    };

    let request = build_request(&args.profile_config(), &params)?;

    let document = match args.format {
        OutputFormat::Xml => request.to_xml(),
        OutputFormat::Json => {
            let json = request.to_json().wrap_err("Failed to serialize request")?;
            format!("{}\n", json)
        }
    };
    emit(&document, args.output.as_ref())?;

    info!("Request generated: {} node(s), {} link(s)", request.nodes().len(), request.links().len());
    Ok(())
}
