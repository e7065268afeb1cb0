//! Resolution of the fabric's multiplexer usages against the catalog.

use crate::error::ConfigError;
use crate::types::{CircuitModelKindConfig, FabricConfig};
use std::collections::HashSet;

/// One distinct `(model, size)` multiplexer used somewhere in the fabric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMux {
    /// Name of the multiplexer circuit model.
    pub model: String,
    /// Number of multiplexer inputs.
    pub size: usize,
}

/// Flattens `[[fabric.mux]]` entries into distinct `(model, size)` pairs.
///
/// Entries keep declaration order; sizes within one entry are emitted in
/// ascending order. Repeated pairs are dropped, so the result is the set of
/// multiplexers that need netlists. Each referenced model must exist and be a
/// multiplexer.
pub fn resolve_mux_usages(config: &FabricConfig) -> Result<Vec<ResolvedMux>, ConfigError> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for usage in &config.fabric.muxes {
        let model = config
            .circuit_models
            .iter()
            .find(|m| m.name == usage.model)
            .ok_or_else(|| ConfigError::UnknownModel(usage.model.clone()))?;
        if model.kind != CircuitModelKindConfig::Mux {
            return Err(ConfigError::Invalid(format!(
                "circuit model '{}' is used as a multiplexer but is not of kind \"mux\"",
                model.name
            )));
        }

        let mut sizes = usage.sizes.clone();
        sizes.sort_unstable();
        for size in sizes {
            if seen.insert((usage.model.as_str(), size)) {
                resolved.push(ResolvedMux {
                    model: usage.model.clone(),
                    size,
                });
            }
        }
    }

    Ok(resolved)
}
