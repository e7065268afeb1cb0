//! Circuit model data types.
//!
//! These describe the primitives a fabric is built from: the routing
//! multiplexers themselves, the pass gates that implement one selectable path,
//! and standard-cell gates. They are produced once from the fabric description
//! and never mutated afterwards.

use crate::ids::CircuitModelId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The circuit implementation family of a model.
///
/// Unknown tags are kept rather than rejected at load time so that the
/// generator can name the offending model when it reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DesignTechnology {
    /// Standard CMOS transmission gates or pass transistors.
    Cmos,
    /// Resistive-memory based switches.
    Rram,
    /// A tag this generator does not know.
    Unrecognized(String),
}

impl DesignTechnology {
    /// Classifies a technology tag, ignoring ASCII case.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "cmos" => DesignTechnology::Cmos,
            "rram" => DesignTechnology::Rram,
            _ => DesignTechnology::Unrecognized(tag.to_string()),
        }
    }
}

impl fmt::Display for DesignTechnology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignTechnology::Cmos => write!(f, "cmos"),
            DesignTechnology::Rram => write!(f, "rram"),
            DesignTechnology::Unrecognized(tag) => write!(f, "{tag}"),
        }
    }
}

/// The function of a gate model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Two-input AND.
    And,
    /// Two-input OR.
    Or,
    /// Two-input multiplexer standard cell.
    Mux2,
}

/// What a circuit model is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CircuitModelKind {
    /// A routing multiplexer.
    Mux,
    /// A pass gate implementing one path of a multiplexer.
    PassGate,
    /// A logic gate standard cell.
    Gate(GateKind),
}

/// Topology a multiplexer model is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MuxStructure {
    /// Binary tree of 2:1 branches.
    Tree,
    /// One N:1 level.
    OneLevel,
    /// A fixed number of levels of equal fan-in.
    MultiLevel {
        /// Number of levels between inputs and output.
        levels: usize,
    },
}

/// The kind of a circuit model port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortKind {
    /// Signal input.
    Input,
    /// Signal output.
    Output,
    /// Configuration memory input.
    Sram,
    /// Clock input.
    Clock,
}

/// One port of a circuit model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitPort {
    /// Port name as it appears on the Verilog module.
    pub name: String,
    /// Port kind.
    pub kind: PortKind,
    /// Width in bits.
    pub size: usize,
    /// Default value of configuration ports.
    pub default_value: u32,
    /// SRAM port that selects an operating mode rather than a path.
    pub mode_select: bool,
    /// Port wired to a fabric-wide global net.
    pub global: bool,
}

impl CircuitPort {
    /// Creates a one-bit, non-global port with a zero default.
    pub fn new(name: impl Into<String>, kind: PortKind) -> Self {
        Self {
            name: name.into(),
            kind,
            size: 1,
            default_value: 0,
            mode_select: false,
            global: false,
        }
    }

    /// Sets the width.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: u32) -> Self {
        self.default_value = value;
        self
    }

    /// Marks the port as global.
    pub fn global(mut self) -> Self {
        self.global = true;
        self
    }

    /// Marks the port as a mode-select SRAM port.
    pub fn mode_select(mut self) -> Self {
        self.mode_select = true;
        self
    }
}

/// A circuit model from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitModel {
    /// Unique name, also the Verilog module name of primitives.
    pub name: String,
    /// What the model is.
    pub kind: CircuitModelKind,
    /// Circuit implementation family.
    pub technology: DesignTechnology,
    /// Multiplexer topology (ignored for non-multiplexers).
    pub structure: MuxStructure,
    /// Emit structural rather than behavioral bodies.
    pub structural_verilog: bool,
    /// Instantiate with named port connections.
    pub explicit_port_map: bool,
    /// Pass gate used for each multiplexer path.
    pub pass_gate: Option<CircuitModelId>,
    /// Ports in declaration order.
    pub ports: Vec<CircuitPort>,
}

impl CircuitModel {
    /// Creates a CMOS model of the given kind with no ports.
    pub fn new(name: impl Into<String>, kind: CircuitModelKind) -> Self {
        Self {
            name: name.into(),
            kind,
            technology: DesignTechnology::Cmos,
            structure: MuxStructure::Tree,
            structural_verilog: false,
            explicit_port_map: false,
            pass_gate: None,
            ports: Vec::new(),
        }
    }

    /// Appends a port.
    pub fn with_port(mut self, port: CircuitPort) -> Self {
        self.ports.push(port);
        self
    }
}
