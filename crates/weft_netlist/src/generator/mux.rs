//! Multiplexer branch module generation.
//!
//! [`GenerationEngine::build_mux_branch_module`] turns one basis graph into a
//! [`ModuleDef`]. The module interface is always the same:
//!
//! | port      | width       | role   |
//! |-----------|-------------|--------|
//! | globals   | per port    | global |
//! | `in`      | inputs      | input  |
//! | `out`     | 1           | output |
//! | `mem`     | memory bits | input  |
//! | `mem_inv` | memory bits | input  |
//!
//! where the globals are the global input ports of the pass gate. The body is
//! either one pass-gate instance per graph edge (structural) or a case table
//! over `mem` (behavioral).

use crate::desc::{Body, CaseArm, CaseTable, Connection, Instance, ModuleDef};
use crate::error::GenError;
use crate::ids::ModuleId;
use crate::module::{Net, Port, PortRole};
use crate::naming::mux_basis_module_name;
use crate::registry::ModuleRegistry;
use std::collections::{HashMap, HashSet};
use weft_circuit::{
    CircuitLibrary, CircuitModelId, CircuitModelKind, DesignTechnology, GateKind, PortKind,
};
use weft_common::{ArenaId, InternalError, Logic};
use weft_mux::MuxGraph;

/// Data input bus of a branch module.
pub const INPUT_PORT: &str = "in";
/// Output bus of a branch module.
pub const OUTPUT_PORT: &str = "out";
/// Configuration memory bus.
pub const MEM_PORT: &str = "mem";
/// Complemented configuration memory bus.
pub const MEM_INV_PORT: &str = "mem_inv";
/// Output register of a behavioral body.
pub const OUTPUT_REG: &str = "out_reg";

/// What generating one branch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchOutcome {
    /// A new module, ready to be written.
    Generated(ModuleDef),
    /// The module name is already registered; nothing new to write.
    AlreadyDefined {
        /// The existing module.
        module: ModuleId,
    },
    /// The branch is a MUX2 standard cell, written by the essential-gate
    /// generator.
    EssentialGate,
    /// The design technology is recognized but has no generator yet.
    NotImplemented {
        /// The multiplexer circuit model.
        model: String,
    },
}

/// Builds multiplexer branch modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationEngine {
    force_structural: bool,
}

impl GenerationEngine {
    /// Creates an engine that follows each model's `structural_verilog` flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits structural bodies for every model.
    pub fn force_structural(mut self, force: bool) -> Self {
        self.force_structural = force;
        self
    }

    /// Builds the branch module of `basis` for a `mux_size`-input multiplexer
    /// of circuit model `model`, registering the module and its ports.
    ///
    /// Child instances are not recorded here; the Verilog writer records
    /// them as it prints them.
    pub fn build_mux_branch_module(
        &self,
        registry: &mut ModuleRegistry,
        catalog: &CircuitLibrary,
        model: CircuitModelId,
        mux_size: usize,
        basis: &MuxGraph,
    ) -> Result<BranchOutcome, GenError> {
        let circuit = catalog.model(model);
        match catalog.design_technology(model) {
            DesignTechnology::Cmos => {}
            DesignTechnology::Rram => {
                return Ok(BranchOutcome::NotImplemented {
                    model: circuit.name.clone(),
                })
            }
            DesignTechnology::Unrecognized(tag) => {
                return Err(GenError::UnsupportedDesignTechnology {
                    model: circuit.name.clone(),
                    technology: tag.clone(),
                })
            }
        }

        let tgate = catalog
            .pass_gate_model(model)
            .ok_or_else(|| GenError::InvalidPrimitive {
                model: circuit.name.clone(),
                reason: "multiplexer has no pass gate".to_string(),
            })?;
        match catalog.model(tgate).kind {
            CircuitModelKind::PassGate => {}
            CircuitModelKind::Gate(GateKind::Mux2) => return Ok(BranchOutcome::EssentialGate),
            CircuitModelKind::Gate(_) | CircuitModelKind::Mux => {
                return Err(GenError::InvalidPrimitive {
                    model: catalog.model_name(tgate).to_string(),
                    reason: "only pass gates and MUX2 gates can implement a branch".to_string(),
                })
            }
        }

        basis.check_basis()?;

        let name = mux_basis_module_name(catalog, model, mux_size, basis.num_inputs());
        if let Some(module) = registry.find_module(&name) {
            return Ok(BranchOutcome::AlreadyDefined { module });
        }
        let input = Port::new(INPUT_PORT, basis.num_inputs());
        let output = Port::new(OUTPUT_PORT, basis.num_outputs());
        let mem = Port::new(MEM_PORT, basis.num_memory_bits());
        let mem_inv = Port::new(MEM_INV_PORT, basis.num_memory_bits());

        let structural = self.force_structural || circuit.structural_verilog;
        let body = if structural {
            let nets = BranchNets {
                input: &input,
                output: &output,
                mem: &mem,
                mem_inv: &mem_inv,
            };
            Body::Structural(structural_body(registry, catalog, tgate, basis, &nets)?)
        } else {
            Body::Behavioral(behavioral_body(catalog, model, basis)?)
        };

        // Register only once the body is known to be valid.
        let module = registry.add_module(&name);
        for port in catalog.global_ports_by_kind(tgate, PortKind::Input) {
            registry.add_port(module, Port::new(port.name.clone(), port.size), PortRole::Global);
        }
        registry.add_port(module, input, PortRole::Input);
        registry.add_port(module, output, PortRole::Output);
        registry.add_port(module, mem, PortRole::Input);
        registry.add_port(module, mem_inv, PortRole::Input);

        tracing::debug!(
            module = %name,
            inputs = basis.num_inputs(),
            mems = basis.num_memory_bits(),
            structural,
            "built multiplexer branch"
        );
        Ok(BranchOutcome::Generated(ModuleDef {
            id: module,
            name,
            ports: registry.ports(module).to_vec(),
            body,
        }))
    }
}

struct BranchNets<'a> {
    input: &'a Port,
    output: &'a Port,
    mem: &'a Port,
    mem_inv: &'a Port,
}

fn structural_body(
    registry: &ModuleRegistry,
    catalog: &CircuitLibrary,
    tgate: CircuitModelId,
    basis: &MuxGraph,
    nets: &BranchNets<'_>,
) -> Result<Vec<Instance>, GenError> {
    let tgate_name = catalog.model_name(tgate);
    let child = registry
        .find_module(tgate_name)
        .ok_or_else(|| GenError::MissingPrimitiveModule {
            name: tgate_name.to_string(),
        })?;

    let inputs = catalog.ports_by_kind(tgate, PortKind::Input);
    let outputs = catalog.ports_by_kind(tgate, PortKind::Output);
    let ([data, ctrl, ctrl_inv], [out]) = (inputs.as_slice(), outputs.as_slice()) else {
        return Err(GenError::InvalidPrimitive {
            model: tgate_name.to_string(),
            reason: format!(
                "expected 3 inputs and 1 output, found {} and {}",
                inputs.len(),
                outputs.len()
            ),
        });
    };
    let explicit_port_map = catalog.model(tgate).explicit_port_map;

    let mut instances = Vec::with_capacity(basis.num_edges());
    for &src in basis.inputs() {
        for &sink in basis.outputs() {
            let Some(edge) = basis.find_edges(src, sink)? else {
                continue;
            };
            let bit = basis.edge_mem(edge).index();
            let (on, off) = if basis.is_edge_inverted(edge) {
                (nets.mem_inv.bit(bit), nets.mem.bit(bit))
            } else {
                (nets.mem.bit(bit), nets.mem_inv.bit(bit))
            };

            let mut bound: HashMap<&str, Net> = HashMap::new();
            bound.insert(&data.name, nets.input.bit(basis.node(src).index));
            bound.insert(&out.name, nets.output.bit(basis.node(sink).index));
            bound.insert(&ctrl.name, on);
            bound.insert(&ctrl_inv.name, off);

            let connections = registry
                .ports(child)
                .iter()
                .map(|p| {
                    let net = match bound.remove(p.port.name.as_str()) {
                        Some(net) => net,
                        None if p.role == PortRole::Global => p.port.whole(),
                        None => {
                            return Err(GenError::InvalidPrimitive {
                                model: tgate_name.to_string(),
                                reason: format!("port '{}' has no connection", p.port.name),
                            })
                        }
                    };
                    Ok(Connection {
                        port: p.port.name.clone(),
                        net,
                    })
                })
                .collect::<Result<Vec<_>, GenError>>()?;

            instances.push(Instance {
                child,
                child_name: tgate_name.to_string(),
                connections,
                explicit_port_map,
            });
        }
    }
    Ok(instances)
}

/// Reads the default bit of the multiplexer's path-selecting SRAM port.
fn sram_default(catalog: &CircuitLibrary, model: CircuitModelId) -> Result<Logic, GenError> {
    let invalid = |reason: String| GenError::InvalidSramDefault {
        model: catalog.model_name(model).to_string(),
        reason,
    };
    let srams = catalog.path_sram_ports(model);
    let [sram] = srams.as_slice() else {
        return Err(invalid(format!(
            "expected 1 SRAM port that is not a mode select, found {}",
            srams.len()
        )));
    };
    let text = sram.default_value.to_string();
    let mut chars = text.chars();
    match (chars.next().and_then(Logic::from_char), chars.next()) {
        (Some(bit @ (Logic::Zero | Logic::One)), None) => Ok(bit),
        _ => Err(invalid(format!(
            "default value {} of port '{}' is not a single bit",
            sram.default_value, sram.name
        ))),
    }
}

fn behavioral_body(
    catalog: &CircuitLibrary,
    model: CircuitModelId,
    basis: &MuxGraph,
) -> Result<CaseTable, GenError> {
    let default_bit = sram_default(catalog, model)?;
    let width = basis.num_memory_bits();

    let mut arms = Vec::with_capacity(basis.num_edges());
    let mut patterns = HashSet::new();
    for &src in basis.inputs() {
        for &sink in basis.outputs() {
            let Some(edge) = basis.find_edges(src, sink)? else {
                continue;
            };
            let mut pattern = vec![default_bit; width];
            pattern[basis.edge_mem(edge).index()] =
                Logic::from_bool(!basis.is_edge_inverted(edge));
            if !patterns.insert(pattern.clone()) {
                return Err(InternalError::new(format!(
                    "two paths of a {}-input branch share select pattern {}",
                    basis.num_inputs(),
                    weft_common::logic::verilog_literal(&pattern)
                ))
                .into());
            }
            arms.push(CaseArm {
                pattern,
                input: basis.node(src).index,
            });
        }
    }

    Ok(CaseTable {
        input: INPUT_PORT.to_string(),
        output: OUTPUT_PORT.to_string(),
        select: MEM_PORT.to_string(),
        output_width: basis.num_outputs(),
        arms,
        default: vec![Logic::Z; basis.num_outputs()],
    })
}
