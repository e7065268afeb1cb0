//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{CircuitModelKindConfig, FabricConfig, MuxStructureConfig};
use std::collections::HashSet;
use std::path::Path;

/// File name looked up when a directory is given instead of a file.
pub const CONFIG_FILE_NAME: &str = "weft.toml";

/// Loads and validates a fabric description.
///
/// `path` may name the file itself or a directory containing `weft.toml`.
pub fn load_config(path: &Path) -> Result<FabricConfig, ConfigError> {
    let config_path = if path.is_dir() {
        path.join(CONFIG_FILE_NAME)
    } else {
        path.to_path_buf()
    };
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a fabric description from a string.
pub fn load_config_from_str(content: &str) -> Result<FabricConfig, ConfigError> {
    let config: FabricConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks required fields and local consistency of every section.
///
/// Cross references (pass gate names, fabric usages) are checked by
/// [`resolve`](crate::resolve) and by the circuit catalog builder.
fn validate_config(config: &FabricConfig) -> Result<(), ConfigError> {
    let mut names = HashSet::new();
    for (i, model) in config.circuit_models.iter().enumerate() {
        if model.name.is_empty() {
            return Err(ConfigError::MissingField(format!("circuit_model[{i}].name")));
        }
        if !names.insert(model.name.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "circuit model '{}' is defined more than once",
                model.name
            )));
        }
        match model.kind {
            CircuitModelKindConfig::Mux => {
                if model.pass_gate.is_none() {
                    return Err(ConfigError::MissingField(format!(
                        "circuit_model[{i}].pass_gate"
                    )));
                }
                if model.structure == MuxStructureConfig::MultiLevel {
                    match model.num_levels {
                        None => {
                            return Err(ConfigError::MissingField(format!(
                                "circuit_model[{i}].num_levels"
                            )))
                        }
                        Some(0) => {
                            return Err(ConfigError::Invalid(format!(
                                "circuit model '{}' needs at least one level",
                                model.name
                            )))
                        }
                        Some(_) => {}
                    }
                }
            }
            CircuitModelKindConfig::Gate => {
                if model.gate_type.is_none() {
                    return Err(ConfigError::MissingField(format!(
                        "circuit_model[{i}].gate_type"
                    )));
                }
            }
            CircuitModelKindConfig::PassGate => {}
        }
        for port in &model.ports {
            if port.size == 0 {
                return Err(ConfigError::Invalid(format!(
                    "port '{}' of circuit model '{}' has zero width",
                    port.name, model.name
                )));
            }
        }
    }

    for usage in &config.fabric.muxes {
        if let Some(size) = usage.sizes.iter().find(|&&s| s < 2) {
            return Err(ConfigError::Invalid(format!(
                "multiplexer '{}' has size {size}; sizes must be at least 2",
                usage.model
            )));
        }
    }
    Ok(())
}
