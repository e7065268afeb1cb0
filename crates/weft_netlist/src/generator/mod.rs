//! Netlist generators.

pub mod mux;
pub mod primitive;
