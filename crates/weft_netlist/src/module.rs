//! Module records held by the registry.

use crate::ids::ModuleId;
use serde::{Deserialize, Serialize};
use std::fmt;
use weft_common::Ident;

/// How a port participates in the module hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortRole {
    /// A fabric-wide signal (clock, reset, configuration enable) that every
    /// instance connects to by name.
    Global,
    /// A module input.
    Input,
    /// A module output.
    Output,
}

/// A named bus `[0:width-1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Port {
    /// The port name.
    pub name: String,
    /// Number of bits.
    pub width: usize,
}

impl Port {
    /// Creates a port.
    pub fn new(name: impl Into<String>, width: usize) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }

    /// Returns a reference to bit `index` of this port.
    pub fn bit(&self, index: usize) -> Net {
        Net::Bit {
            port: self.name.clone(),
            index,
        }
    }

    /// Returns a reference to the whole port.
    pub fn whole(&self) -> Net {
        Net::Whole(self.name.clone())
    }
}

/// A port on a module boundary with its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePort {
    /// Name and width.
    pub port: Port,
    /// Direction or global role.
    pub role: PortRole,
}

/// A signal reference inside a module body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Net {
    /// One bit of a port, `name[index]`.
    Bit {
        /// Port name.
        port: String,
        /// Bit index.
        index: usize,
    },
    /// An entire port.
    Whole(String),
}

impl fmt::Display for Net {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Net::Bit { port, index } => write!(f, "{port}[{index}]"),
            Net::Whole(port) => write!(f, "{port}"),
        }
    }
}

/// A child module used by a parent, with the number of instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRef {
    /// The instantiated module.
    pub module: ModuleId,
    /// How many times the parent instantiates it.
    pub instances: usize,
}

/// A module in the fabric hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// The unique module name.
    pub name: Ident,
    /// Ports in declaration order.
    pub ports: Vec<ModulePort>,
    /// Children in order of first instantiation.
    pub children: Vec<ChildRef>,
}
