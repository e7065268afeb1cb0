//! The set of distinct multiplexers a fabric uses.

use crate::error::MuxError;
use crate::graph::MuxGraph;
use crate::ids::MuxId;
use std::collections::HashMap;
use weft_circuit::{CircuitLibrary, CircuitModelId, CircuitModelKind};
use weft_common::Arena;
use weft_config::ResolvedMux;

#[derive(Debug)]
struct MuxEntry {
    graph: MuxGraph,
    model: CircuitModelId,
    size: usize,
}

/// Distinct `(circuit model, size)` multiplexers, each with its graph.
///
/// Iteration follows insertion order.
#[derive(Debug, Default)]
pub struct MuxLibrary {
    muxes: Arena<MuxId, MuxEntry>,
    by_key: HashMap<(CircuitModelId, usize), MuxId>,
    max_mux_size: usize,
}

impl MuxLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a library from resolved fabric usages.
    pub fn from_usages(catalog: &CircuitLibrary, usages: &[ResolvedMux]) -> Result<Self, MuxError> {
        let mut library = Self::new();
        for usage in usages {
            let model = catalog
                .find_model(&usage.model)
                .ok_or_else(|| MuxError::UnknownModel(usage.model.clone()))?;
            library.add_mux(catalog, model, usage.size)?;
        }
        Ok(library)
    }

    /// Adds a multiplexer, returning the existing ID for a repeated
    /// `(model, size)` pair.
    pub fn add_mux(
        &mut self,
        catalog: &CircuitLibrary,
        model: CircuitModelId,
        size: usize,
    ) -> Result<MuxId, MuxError> {
        if let Some(&id) = self.by_key.get(&(model, size)) {
            return Ok(id);
        }
        let circuit = catalog.model(model);
        if circuit.kind != CircuitModelKind::Mux {
            return Err(MuxError::NotAMux(circuit.name.clone()));
        }

        let graph = MuxGraph::for_structure(&circuit.structure, size)?;
        tracing::debug!(
            model = %circuit.name,
            size,
            levels = graph.num_levels(),
            mems = graph.num_memory_bits(),
            "built multiplexer graph"
        );
        let id = self.muxes.alloc(MuxEntry { graph, model, size });
        self.by_key.insert((model, size), id);
        self.max_mux_size = self.max_mux_size.max(size);
        Ok(id)
    }

    /// Iterates over multiplexer IDs in insertion order.
    pub fn muxes(&self) -> impl Iterator<Item = MuxId> + '_ {
        self.muxes.ids()
    }

    /// Returns a multiplexer's graph.
    pub fn mux_graph(&self, id: MuxId) -> &MuxGraph {
        &self.muxes[id].graph
    }

    /// Returns the circuit model a multiplexer instantiates.
    pub fn mux_circuit_model(&self, id: MuxId) -> CircuitModelId {
        self.muxes[id].model
    }

    /// Returns a multiplexer's input count.
    pub fn mux_size(&self, id: MuxId) -> usize {
        self.muxes[id].size
    }

    /// Returns the largest input count in the library, or 0 when empty.
    pub fn max_mux_size(&self) -> usize {
        self.max_mux_size
    }

    /// Returns the number of distinct multiplexers.
    pub fn len(&self) -> usize {
        self.muxes.len()
    }

    /// Returns `true` if no multiplexer was added.
    pub fn is_empty(&self) -> bool {
        self.muxes.is_empty()
    }
}
