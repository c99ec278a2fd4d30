use crate::params::ParameterInput;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use std::fs;
use std::path::Path;

/// Load profile parameters from a YAML file
pub fn load_parameters(params_path: &Path) -> Result<ParameterInput> {
    info!("Loading parameters from: {:?}", params_path);

    let content = fs::read_to_string(params_path)
        .wrap_err_with(|| format!("Failed to read parameter file '{}'", params_path.display()))?;

    // An empty file is a valid "all defaults" parameter set
    if content.trim().is_empty() {
        warn!("Parameter file {:?} is empty, using profile defaults", params_path);
        return Ok(ParameterInput::default());
    }

    let input: ParameterInput = serde_yaml::from_str(&content)
        .wrap_err_with(|| format!("Invalid parameters in '{}'", params_path.display()))?;

    info!("Loaded parameters: {:?}", input);
    Ok(input)
}
