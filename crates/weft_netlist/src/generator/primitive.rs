//! Registration of primitive cell modules.
//!
//! Pass gates and standard-cell gates are written by the essential-gate
//! generator; multiplexer generation only needs their interfaces in the
//! registry so it can instantiate them.

use crate::module::{Port, PortRole};
use crate::registry::ModuleRegistry;
use weft_circuit::{CircuitLibrary, CircuitModelKind, PortKind};

/// Registers one module per pass-gate and gate model of the catalog, with
/// the model's ports in declaration order. Returns the number of modules
/// created; names already in the registry are left alone.
pub fn register_primitive_modules(registry: &mut ModuleRegistry, catalog: &CircuitLibrary) -> usize {
    let mut created = 0;
    for (_, model) in catalog.models() {
        if model.kind == CircuitModelKind::Mux {
            continue;
        }
        let (module, is_new) = registry.get_or_add_module(&model.name);
        if !is_new {
            continue;
        }
        for port in &model.ports {
            let role = match (port.global, port.kind) {
                (true, _) => PortRole::Global,
                (false, PortKind::Output) => PortRole::Output,
                (false, PortKind::Input | PortKind::Sram | PortKind::Clock) => PortRole::Input,
            };
            registry.add_port(module, Port::new(port.name.clone(), port.size), role);
        }
        tracing::trace!(name = %model.name, ports = model.ports.len(), "registered primitive");
        created += 1;
    }
    created
}
