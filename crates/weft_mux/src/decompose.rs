//! Decomposition of a multiplexer graph into basis graphs.

use crate::graph::{MuxGraph, MuxGraphBuilder, MuxNodeKind};
use crate::ids::{MuxMemId, MuxNodeId};
use std::collections::{BTreeSet, HashMap};
use weft_common::WeftResult;

impl MuxGraph {
    /// Splits the graph into one basis graph per distinct branch fan-in.
    ///
    /// Branch points are visited by `(level, node id)`, so the output's branch
    /// comes first. Each basis graph copies the edges of the first branch
    /// with its fan-in: inputs in edge order, memory bits renumbered from 0 in
    /// order of first use, polarity preserved. The result only depends on the
    /// graph, never on previous calls.
    pub fn decompose(&self) -> WeftResult<Vec<MuxGraph>> {
        let mut branches: Vec<(usize, MuxNodeId)> = self
            .nodes()
            .filter(|(_, node)| node.kind != MuxNodeKind::Input && !node.in_edges.is_empty())
            .map(|(id, node)| (node.level, id))
            .collect();
        branches.sort();

        let mut seen = BTreeSet::new();
        let mut basis_graphs = Vec::new();
        for (_, branch) in branches {
            let in_edges = &self.node(branch).in_edges;
            if !seen.insert(in_edges.len()) {
                continue;
            }

            let mut builder = MuxGraphBuilder::new();
            let inputs: Vec<MuxNodeId> = in_edges.iter().map(|_| builder.add_input()).collect();
            let output = builder.add_output();
            let mut mems: HashMap<MuxMemId, MuxMemId> = HashMap::new();
            for (input, &edge_id) in inputs.iter().zip(in_edges) {
                let edge = self.edge(edge_id);
                let mem = *mems.entry(edge.mem).or_insert_with(|| builder.add_mem());
                builder.connect(*input, output, mem, edge.inverted);
            }

            let basis = builder.build()?;
            basis.check_basis()?;
            tracing::trace!(
                inputs = basis.num_inputs(),
                mems = basis.num_memory_bits(),
                "extracted basis graph"
            );
            basis_graphs.push(basis);
        }

        Ok(basis_graphs)
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{MuxGraph, MuxGraphBuilder};

    #[test]
    fn basis_decomposes_to_itself() {
        let g = MuxGraph::one_level(4).unwrap();
        let parts = g.decompose().unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0], g);
    }

    #[test]
    fn tree_yields_single_two_input_basis() {
        let g = MuxGraph::tree(8).unwrap();
        let parts = g.decompose().unwrap();
        assert_eq!(parts.len(), 1);
        let basis = &parts[0];
        assert_eq!(basis.num_inputs(), 2);
        assert_eq!(basis.num_memory_bits(), 1);
        let polarity: Vec<bool> = basis.edges().map(|(_, e)| e.inverted).collect();
        assert_eq!(polarity, vec![false, true]);
    }

    #[test]
    fn mems_are_renumbered_locally() {
        let g = MuxGraph::multi_level(9, 2).unwrap();
        for basis in g.decompose().unwrap() {
            let mems: Vec<u32> = basis.edges().map(|(_, e)| e.mem.as_raw()).collect();
            let expected: Vec<u32> = (0..basis.num_inputs() as u32).collect();
            assert_eq!(mems, expected);
        }
    }

    #[test]
    fn uneven_multi_level_yields_one_basis_per_fan_in() {
        // 5 inputs over 2 levels: branches of 3 and 2 feed a 2-input output.
        let g = MuxGraph::multi_level(5, 2).unwrap();
        let sizes: Vec<usize> = g
            .decompose()
            .unwrap()
            .iter()
            .map(|b| b.num_inputs())
            .collect();
        assert_eq!(sizes, vec![2, 3]);
    }

    #[test]
    fn decompose_is_deterministic() {
        let g = MuxGraph::multi_level(12, 2).unwrap();
        let first = g.decompose().unwrap();
        let second = g.decompose().unwrap();
        assert_eq!(first, second);
        let again = MuxGraph::multi_level(12, 2).unwrap().decompose().unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn every_basis_passes_check() {
        for size in 2..20 {
            for g in [
                MuxGraph::tree(size).unwrap(),
                MuxGraph::one_level(size).unwrap(),
                MuxGraph::multi_level(size, 3).unwrap(),
            ] {
                for basis in g.decompose().unwrap() {
                    assert!(basis.is_basis());
                    assert_eq!(basis.num_outputs(), 1);
                }
            }
        }
    }

    #[test]
    fn shared_mem_stays_shared() {
        let mut b = MuxGraphBuilder::new();
        let i0 = b.add_input();
        let i1 = b.add_input();
        let i2 = b.add_input();
        let out = b.add_output();
        let _unused = b.add_mem();
        let m = b.add_mem();
        let n = b.add_mem();
        b.connect(i0, out, m, false);
        b.connect(i1, out, m, true);
        b.connect(i2, out, n, false);
        let g = b.build().unwrap();
        let basis = &g.decompose().unwrap()[0];
        assert_eq!(basis.num_memory_bits(), 2);
        let mems: Vec<(u32, bool)> = basis
            .edges()
            .map(|(_, e)| (e.mem.as_raw(), e.inverted))
            .collect();
        assert_eq!(mems, vec![(0, false), (0, true), (1, false)]);
    }
}
