//! Module registry and multiplexer netlist generation.
//!
//! The [`ModuleRegistry`] tracks every module of a fabric with its ports and
//! children. [`GenerationEngine`] builds one [`ModuleDef`] per multiplexer
//! basis graph, the [`verilog`] writer prints it, and
//! [`generate_mux_submodules`] drives both over a whole [`weft_mux::MuxLibrary`].

#![warn(missing_docs)]

pub mod desc;
pub mod error;
pub mod generator;
pub mod ids;
pub mod module;
pub mod naming;
pub mod registry;
pub mod sram;
pub mod submodules;
pub mod verilog;

pub use desc::{Body, CaseArm, CaseTable, Connection, Instance, ModuleDef};
pub use error::GenError;
pub use generator::mux::{BranchOutcome, GenerationEngine};
pub use generator::primitive::register_primitive_modules;
pub use ids::ModuleId;
pub use module::{ChildRef, Module, ModulePort, Net, Port, PortRole};
pub use registry::ModuleRegistry;
pub use sram::SramOrganization;
pub use submodules::{
    generate_mux_submodules, write_mux_submodules, MuxSubmoduleOptions, MuxSubmoduleReport,
    MUXES_FILE_NAME,
};
