//! Multiplexer architecture graphs.
//!
//! A [`MuxGraph`] describes the branch structure of one configurable
//! multiplexer. Graphs are built from a circuit model's structure
//! ([`MuxGraph::for_structure`]) and split into single-level basis graphs by
//! [`MuxGraph::decompose`]; the netlist generator emits one module per basis
//! graph. [`MuxLibrary`] collects the distinct multiplexers of a fabric.

#![warn(missing_docs)]

pub mod decompose;
pub mod error;
pub mod graph;
pub mod ids;
pub mod library;
pub mod structures;

pub use error::MuxError;
pub use graph::{MuxEdge, MuxGraph, MuxGraphBuilder, MuxNode, MuxNodeKind};
pub use ids::{MuxEdgeId, MuxId, MuxMemId, MuxNodeId};
pub use library::MuxLibrary;
