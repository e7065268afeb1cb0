//! Module naming.
//!
//! Names are derived only from the circuit model, the multiplexer size and
//! the branch fan-in, so two generators asking for the same branch get the
//! same name and the registry deduplicates them.

use weft_circuit::{CircuitLibrary, CircuitModelId};

/// Suffix separating a basis module name from its multiplexer's name.
pub const BASIS_POSTFIX: &str = "_basis";

/// Name of a full multiplexer: `<model>_size<mux_size>`.
pub fn mux_module_name(model_name: &str, mux_size: usize) -> String {
    format!("{model_name}_size{mux_size}")
}

/// Name of a multiplexer branch module.
///
/// A branch built from a MUX2 standard cell is that cell, so the cell's own
/// name is returned.
pub fn mux_basis_module_name(
    catalog: &CircuitLibrary,
    model: CircuitModelId,
    mux_size: usize,
    branch_inputs: usize,
) -> String {
    if let Some(gate) = catalog.pass_gate_model(model) {
        if catalog.is_mux2_gate(gate) {
            return catalog.model_name(gate).to_string();
        }
    }
    format!(
        "{}{BASIS_POSTFIX}_size{branch_inputs}",
        mux_module_name(catalog.model_name(model), mux_size)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_circuit::{CircuitModel, CircuitModelKind, GateKind};

    #[test]
    fn basis_name_layout() {
        let mut lib = CircuitLibrary::new();
        let mux = lib.add_model(CircuitModel::new("mux_2level", CircuitModelKind::Mux));
        assert_eq!(mux_module_name("mux_2level", 16), "mux_2level_size16");
        assert_eq!(
            mux_basis_module_name(&lib, mux, 16, 4),
            "mux_2level_size16_basis_size4"
        );
    }

    #[test]
    fn same_inputs_same_name() {
        let mut lib = CircuitLibrary::new();
        let mux = lib.add_model(CircuitModel::new("m", CircuitModelKind::Mux));
        assert_eq!(
            mux_basis_module_name(&lib, mux, 8, 2),
            mux_basis_module_name(&lib, mux, 8, 2)
        );
        assert_ne!(
            mux_basis_module_name(&lib, mux, 8, 2),
            mux_basis_module_name(&lib, mux, 9, 2)
        );
    }

    #[test]
    fn mux2_pass_gate_uses_cell_name() {
        let mut lib = CircuitLibrary::new();
        let cell = lib.add_model(CircuitModel::new(
            "sky_mux2",
            CircuitModelKind::Gate(GateKind::Mux2),
        ));
        let mut mux = CircuitModel::new("mux_tree", CircuitModelKind::Mux);
        mux.pass_gate = Some(cell);
        let mux = lib.add_model(mux);
        assert_eq!(mux_basis_module_name(&lib, mux, 8, 2), "sky_mux2");
    }
}
