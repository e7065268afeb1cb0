//! Immutable descriptions of generated modules.
//!
//! Generators build a [`ModuleDef`]; the [`verilog`](crate::verilog) writer
//! turns it into text. Keeping the two apart lets tests inspect what was
//! generated without parsing Verilog.

use crate::ids::ModuleId;
use crate::module::{ModulePort, Net};
use serde::Serialize;
use weft_common::Logic;

/// A generated module: its interface and body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDef {
    /// The registry record this definition belongs to.
    pub id: ModuleId,
    /// The module name.
    pub name: String,
    /// Ports in declaration order.
    pub ports: Vec<ModulePort>,
    /// The module body.
    pub body: Body,
}

impl ModuleDef {
    /// Returns the port called `name`.
    pub fn port(&self, name: &str) -> Option<&ModulePort> {
        self.ports.iter().find(|p| p.port.name == name)
    }
}

/// The two ways a branch module body can be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Body {
    /// Pass-gate instances, one per graph edge.
    Structural(Vec<Instance>),
    /// A case table over the memory bus.
    Behavioral(CaseTable),
}

/// One instance of a child module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instance {
    /// The instantiated module.
    pub child: ModuleId,
    /// The instantiated module's name.
    pub child_name: String,
    /// Connections in the child's port order.
    pub connections: Vec<Connection>,
    /// Print `.port(net)` pairs instead of positional nets.
    pub explicit_port_map: bool,
}

/// A child port bound to a net of the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    /// The child port name.
    pub port: String,
    /// The parent net.
    pub net: Net,
}

/// A `case` statement selecting one input onto the output register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseTable {
    /// The data input bus.
    pub input: String,
    /// The output bus.
    pub output: String,
    /// The select (memory) bus.
    pub select: String,
    /// Width of the output bus.
    pub output_width: usize,
    /// One arm per path.
    pub arms: Vec<CaseArm>,
    /// Value driven when no arm matches.
    pub default: Vec<Logic>,
}

/// One `case` arm: `pattern: out_reg <= in[input];`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseArm {
    /// Select bus value, leftmost entry is bit 0.
    pub pattern: Vec<Logic>,
    /// Selected input bit.
    pub input: usize,
}
