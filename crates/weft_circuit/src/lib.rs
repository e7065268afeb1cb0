//! Read-only circuit model catalog.
//!
//! The [`CircuitLibrary`] answers the questions the generator asks about a
//! primitive: its ports by kind, its design technology, the pass gate a
//! multiplexer is built from, and the default value of its configuration
//! ports.

#![warn(missing_docs)]

pub mod ids;
pub mod types;

pub use ids::CircuitModelId;
pub use types::{
    CircuitModel, CircuitModelKind, CircuitPort, DesignTechnology, GateKind, MuxStructure,
    PortKind,
};

use std::collections::HashMap;
use weft_common::Arena;
use weft_config::{
    CircuitModelConfig, CircuitModelKindConfig, CircuitPortKindConfig, ConfigError, FabricConfig,
    GateTypeConfig, MuxStructureConfig,
};

/// The circuit model catalog of one fabric.
#[derive(Debug, Default)]
pub struct CircuitLibrary {
    models: Arena<CircuitModelId, CircuitModel>,
    by_name: HashMap<String, CircuitModelId>,
}

impl CircuitLibrary {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the catalog from a parsed fabric description.
    ///
    /// Pass gate references are resolved by name; a multiplexer may only
    /// reference a pass gate or a gate model.
    pub fn from_config(config: &FabricConfig) -> Result<Self, ConfigError> {
        let mut library = Self::new();
        for model in &config.circuit_models {
            library.add_model(convert_model(model));
        }

        for model in &config.circuit_models {
            let Some(pass_gate) = &model.pass_gate else {
                continue;
            };
            let gate_id = library
                .find_model(pass_gate)
                .ok_or_else(|| ConfigError::UnknownModel(pass_gate.clone()))?;
            match library.model(gate_id).kind {
                CircuitModelKind::PassGate | CircuitModelKind::Gate(_) => {}
                CircuitModelKind::Mux => {
                    return Err(ConfigError::Invalid(format!(
                        "circuit model '{}' uses multiplexer '{pass_gate}' as its pass gate",
                        model.name
                    )))
                }
            }
            // Every name was inserted by the first pass.
            let id = library.by_name[&model.name];
            library.models[id].pass_gate = Some(gate_id);
        }

        Ok(library)
    }

    /// Adds a model, returning the existing ID if the name is already taken.
    pub fn add_model(&mut self, model: CircuitModel) -> CircuitModelId {
        if let Some(&id) = self.by_name.get(&model.name) {
            return id;
        }
        let name = model.name.clone();
        let id = self.models.alloc(model);
        self.by_name.insert(name, id);
        id
    }

    /// Looks up a model by name.
    pub fn find_model(&self, name: &str) -> Option<CircuitModelId> {
        self.by_name.get(name).copied()
    }

    /// Returns a model.
    ///
    /// # Panics
    ///
    /// Panics if the ID does not belong to this catalog.
    pub fn model(&self, id: CircuitModelId) -> &CircuitModel {
        &self.models[id]
    }

    /// Returns the name of a model.
    pub fn model_name(&self, id: CircuitModelId) -> &str {
        &self.models[id].name
    }

    /// Iterates over all models in declaration order.
    pub fn models(&self) -> impl Iterator<Item = (CircuitModelId, &CircuitModel)> {
        self.models.iter()
    }

    /// Returns the number of models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Returns the design technology of a model.
    pub fn design_technology(&self, id: CircuitModelId) -> &DesignTechnology {
        &self.models[id].technology
    }

    /// Returns the pass gate a multiplexer model is built from.
    pub fn pass_gate_model(&self, id: CircuitModelId) -> Option<CircuitModelId> {
        self.models[id].pass_gate
    }

    /// Returns the non-global ports of the given kind, in declaration order.
    pub fn ports_by_kind(&self, id: CircuitModelId, kind: PortKind) -> Vec<&CircuitPort> {
        self.models[id]
            .ports
            .iter()
            .filter(|p| p.kind == kind && !p.global)
            .collect()
    }

    /// Returns the global ports of the given kind, in declaration order.
    pub fn global_ports_by_kind(&self, id: CircuitModelId, kind: PortKind) -> Vec<&CircuitPort> {
        self.models[id]
            .ports
            .iter()
            .filter(|p| p.kind == kind && p.global)
            .collect()
    }

    /// Returns the SRAM ports that control paths (not operating modes).
    pub fn path_sram_ports(&self, id: CircuitModelId) -> Vec<&CircuitPort> {
        self.ports_by_kind(id, PortKind::Sram)
            .into_iter()
            .filter(|p| !p.mode_select)
            .collect()
    }

    /// Returns `true` if the model is a two-input multiplexer standard cell.
    pub fn is_mux2_gate(&self, id: CircuitModelId) -> bool {
        self.models[id].kind == CircuitModelKind::Gate(GateKind::Mux2)
    }
}

fn convert_model(config: &CircuitModelConfig) -> CircuitModel {
    let kind = match config.kind {
        CircuitModelKindConfig::Mux => CircuitModelKind::Mux,
        CircuitModelKindConfig::PassGate => CircuitModelKind::PassGate,
        CircuitModelKindConfig::Gate => CircuitModelKind::Gate(match config.gate_type {
            Some(GateTypeConfig::And) => GateKind::And,
            Some(GateTypeConfig::Or) => GateKind::Or,
            // The loader rejects gates without a type; MUX2 is the only gate
            // the multiplexer generator cares about.
            Some(GateTypeConfig::Mux2) | None => GateKind::Mux2,
        }),
    };
    let structure = match config.structure {
        MuxStructureConfig::Tree => MuxStructure::Tree,
        MuxStructureConfig::OneLevel => MuxStructure::OneLevel,
        MuxStructureConfig::MultiLevel => MuxStructure::MultiLevel {
            levels: config.num_levels.unwrap_or(1),
        },
    };
    let ports = config
        .ports
        .iter()
        .map(|p| CircuitPort {
            name: p.name.clone(),
            kind: match p.kind {
                CircuitPortKindConfig::Input => PortKind::Input,
                CircuitPortKindConfig::Output => PortKind::Output,
                CircuitPortKindConfig::Sram => PortKind::Sram,
                CircuitPortKindConfig::Clock => PortKind::Clock,
            },
            size: p.size,
            default_value: p.default_value,
            mode_select: p.mode_select,
            global: p.global,
        })
        .collect();

    CircuitModel {
        name: config.name.clone(),
        kind,
        technology: DesignTechnology::from_tag(&config.design_technology),
        structure,
        structural_verilog: config.structural_verilog,
        explicit_port_map: config.explicit_port_map,
        pass_gate: None,
        ports,
    }
}
