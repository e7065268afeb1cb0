//! The multiplexer architecture graph.
//!
//! A [`MuxGraph`] models one configurable multiplexer as a tree of branch
//! points. Signals enter at input nodes and leave at output nodes; every edge
//! is a path that conducts when its configuration memory bit (or, for an
//! inverted edge, the complement of that bit) is set.
//!
//! Levels count edges from the outputs: outputs are level 0 and an input that
//! reaches an output through two branches is level 2. `num_levels` is the
//! largest level in the graph.

use crate::ids::{MuxEdgeId, MuxMemId, MuxNodeId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use weft_common::{Arena, ArenaId, ContentHash, ContentHasher, InternalError, WeftResult};

/// The role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MuxNodeKind {
    /// A multiplexer input.
    Input,
    /// A branch point between levels.
    Internal,
    /// A multiplexer output.
    Output,
}

/// A node of a [`MuxGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MuxNode {
    /// The role of the node.
    pub kind: MuxNodeKind,
    /// Dense ordinal among nodes of the same kind (input id, output id).
    pub index: usize,
    /// Distance in edges from the output side.
    pub level: usize,
    /// Edges driving this node, in creation order.
    pub in_edges: Vec<MuxEdgeId>,
    /// Edges this node drives, in creation order.
    pub out_edges: Vec<MuxEdgeId>,
}

/// A path from `source` to `sink` gated by one memory bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MuxEdge {
    /// The driving node.
    pub source: MuxNodeId,
    /// The driven node.
    pub sink: MuxNodeId,
    /// The memory bit controlling the path.
    pub mem: MuxMemId,
    /// The path conducts when the bit is `0` rather than `1`.
    pub inverted: bool,
}

/// A multiplexer graph. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuxGraph {
    nodes: Arena<MuxNodeId, MuxNode>,
    edges: Arena<MuxEdgeId, MuxEdge>,
    inputs: Vec<MuxNodeId>,
    outputs: Vec<MuxNodeId>,
    num_mems: usize,
    num_levels: usize,
}

impl MuxGraph {
    /// Returns the number of inputs.
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Returns the number of outputs.
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Returns the depth of the graph in edges.
    pub fn num_levels(&self) -> usize {
        self.num_levels
    }

    /// Returns the width of the configuration memory bus.
    pub fn num_memory_bits(&self) -> usize {
        self.num_mems
    }

    /// Returns the number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Input nodes ordered by input id.
    pub fn inputs(&self) -> &[MuxNodeId] {
        &self.inputs
    }

    /// Output nodes ordered by output id.
    pub fn outputs(&self) -> &[MuxNodeId] {
        &self.outputs
    }

    /// Returns a node.
    pub fn node(&self, id: MuxNodeId) -> &MuxNode {
        &self.nodes[id]
    }

    /// Returns an edge.
    pub fn edge(&self, id: MuxEdgeId) -> &MuxEdge {
        &self.edges[id]
    }

    /// Iterates over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = (MuxNodeId, &MuxNode)> {
        self.nodes.iter()
    }

    /// Iterates over all edges.
    pub fn edges(&self) -> impl Iterator<Item = (MuxEdgeId, &MuxEdge)> {
        self.edges.iter()
    }

    /// Returns the memory bit gating an edge.
    pub fn edge_mem(&self, edge: MuxEdgeId) -> MuxMemId {
        self.edges[edge].mem
    }

    /// Returns `true` if the edge conducts on the complemented memory bit.
    pub fn is_edge_inverted(&self, edge: MuxEdgeId) -> bool {
        self.edges[edge].inverted
    }

    /// Finds the edge from `source` to `sink`.
    ///
    /// A well-formed graph has at most one edge per node pair; finding two
    /// means the graph was built incorrectly upstream.
    pub fn find_edges(&self, source: MuxNodeId, sink: MuxNodeId) -> WeftResult<Option<MuxEdgeId>> {
        let mut found = self.nodes[source]
            .out_edges
            .iter()
            .copied()
            .filter(|&e| self.edges[e].sink == sink);
        let first = found.next();
        let extra = found.count();
        if extra > 0 {
            return Err(InternalError::new(format!(
                "{} edges between node {} and node {}",
                extra + 1,
                source.as_raw(),
                sink.as_raw()
            )));
        }
        Ok(first)
    }

    /// Returns `true` if this is a basis graph: one level, one output.
    pub fn is_basis(&self) -> bool {
        self.num_levels == 1 && self.outputs.len() == 1
    }

    /// Fails unless this is a basis graph.
    pub fn check_basis(&self) -> WeftResult<()> {
        if self.num_levels != 1 {
            return Err(InternalError::new(format!(
                "basis graph has {} levels, expected 1",
                self.num_levels
            )));
        }
        if self.outputs.len() != 1 {
            return Err(InternalError::new(format!(
                "basis graph has {} outputs, expected 1",
                self.outputs.len()
            )));
        }
        Ok(())
    }

    /// Structural fingerprint.
    ///
    /// Equal graphs built in the same order hash equal, which lets callers
    /// cache [`decompose`](Self::decompose) results.
    pub fn fingerprint(&self) -> ContentHash {
        let mut hasher = ContentHasher::new();
        hasher
            .write_u32(self.nodes.len() as u32)
            .write_u32(self.num_mems as u32);
        for node in self.nodes.values() {
            let kind = match node.kind {
                MuxNodeKind::Input => 0,
                MuxNodeKind::Internal => 1,
                MuxNodeKind::Output => 2,
            };
            hasher.write_u32(kind).write_u32(node.index as u32);
        }
        for edge in self.edges.values() {
            hasher
                .write_u32(edge.source.as_raw())
                .write_u32(edge.sink.as_raw())
                .write_u32(edge.mem.as_raw())
                .write_bool(edge.inverted);
        }
        hasher.finish()
    }
}

/// Incremental constructor for a [`MuxGraph`].
///
/// The builder does not reject parallel edges; [`MuxGraph::find_edges`]
/// reports them when a consumer walks the graph.
#[derive(Debug, Default)]
pub struct MuxGraphBuilder {
    nodes: Arena<MuxNodeId, MuxNode>,
    edges: Arena<MuxEdgeId, MuxEdge>,
    inputs: Vec<MuxNodeId>,
    outputs: Vec<MuxNodeId>,
    num_internal: usize,
    num_mems: usize,
}

impl MuxGraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn add_node(&mut self, kind: MuxNodeKind, index: usize) -> MuxNodeId {
        self.nodes.alloc(MuxNode {
            kind,
            index,
            level: 0,
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        })
    }

    /// Adds an input; its input id is the number of inputs added before it.
    pub fn add_input(&mut self) -> MuxNodeId {
        let id = self.add_node(MuxNodeKind::Input, self.inputs.len());
        self.inputs.push(id);
        id
    }

    /// Adds a branch point.
    pub fn add_internal(&mut self) -> MuxNodeId {
        let id = self.add_node(MuxNodeKind::Internal, self.num_internal);
        self.num_internal += 1;
        id
    }

    /// Adds an output; its output id is the number of outputs added before it.
    pub fn add_output(&mut self) -> MuxNodeId {
        let id = self.add_node(MuxNodeKind::Output, self.outputs.len());
        self.outputs.push(id);
        id
    }

    /// Allocates the next memory bit.
    pub fn add_mem(&mut self) -> MuxMemId {
        let id = MuxMemId::from_raw(self.num_mems as u32);
        self.num_mems += 1;
        id
    }

    /// Connects `source` to `sink` through a path gated by `mem`.
    pub fn connect(
        &mut self,
        source: MuxNodeId,
        sink: MuxNodeId,
        mem: MuxMemId,
        inverted: bool,
    ) -> MuxEdgeId {
        let id = self.edges.alloc(MuxEdge {
            source,
            sink,
            mem,
            inverted,
        });
        self.nodes[source].out_edges.push(id);
        self.nodes[sink].in_edges.push(id);
        id
    }

    /// Validates the graph and computes node levels.
    pub fn build(mut self) -> WeftResult<MuxGraph> {
        for (id, edge) in self.edges.iter() {
            if edge.mem.index() >= self.num_mems {
                return Err(InternalError::new(format!(
                    "edge {} uses memory bit {} of {}",
                    id.as_raw(),
                    edge.mem.as_raw(),
                    self.num_mems
                )));
            }
            if self.nodes[edge.sink].kind == MuxNodeKind::Input
                || self.nodes[edge.source].kind == MuxNodeKind::Output
            {
                return Err(InternalError::new(format!(
                    "edge {} runs against the input-to-output direction",
                    id.as_raw()
                )));
            }
        }

        let num_levels = assign_levels(&mut self.nodes, &self.edges)?;
        Ok(MuxGraph {
            nodes: self.nodes,
            edges: self.edges,
            inputs: self.inputs,
            outputs: self.outputs,
            num_mems: self.num_mems,
            num_levels,
        })
    }
}

/// Sets every node's level to its longest distance from a sink-less node and
/// returns the largest level.
fn assign_levels(
    nodes: &mut Arena<MuxNodeId, MuxNode>,
    edges: &Arena<MuxEdgeId, MuxEdge>,
) -> WeftResult<usize> {
    let mut pending: Vec<usize> = nodes.values().map(|n| n.out_edges.len()).collect();
    let mut queue: VecDeque<MuxNodeId> = nodes
        .iter()
        .filter(|(_, n)| n.out_edges.is_empty())
        .map(|(id, _)| id)
        .collect();

    let mut visited = 0;
    let mut max_level = 0;
    while let Some(id) = queue.pop_front() {
        visited += 1;
        let level = nodes[id].level;
        max_level = max_level.max(level);
        for i in 0..nodes[id].in_edges.len() {
            let source = edges[nodes[id].in_edges[i]].source;
            let node = &mut nodes[source];
            node.level = node.level.max(level + 1);
            pending[source.index()] -= 1;
            if pending[source.index()] == 0 {
                queue.push_back(source);
            }
        }
    }

    if visited != nodes.len() {
        return Err(InternalError::new("multiplexer graph contains a cycle"));
    }
    Ok(max_level)
}
