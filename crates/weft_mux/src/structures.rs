//! Graph builders for the multiplexer structures a circuit model can select.

use crate::error::MuxError;
use crate::graph::{MuxGraph, MuxGraphBuilder};
use crate::ids::{MuxMemId, MuxNodeId};
use weft_circuit::MuxStructure;

/// How the branches of one level are gated.
#[derive(Clone, Copy, PartialEq, Eq)]
enum MemScheme {
    /// One bit per level; branch input 0 on the bit, input 1 on its complement.
    Shared,
    /// One bit per branch input position.
    OneHot,
}

impl MuxGraph {
    /// Builds the graph a circuit model's structure calls for.
    pub fn for_structure(structure: &MuxStructure, size: usize) -> Result<MuxGraph, MuxError> {
        match *structure {
            MuxStructure::Tree => Self::tree(size),
            MuxStructure::OneLevel => Self::one_level(size),
            MuxStructure::MultiLevel { levels } => Self::multi_level(size, levels),
        }
    }

    /// A single branch of `size` inputs with one-hot memory: edge `i` is
    /// gated by bit `i`.
    pub fn one_level(size: usize) -> Result<MuxGraph, MuxError> {
        check_size(size)?;
        build_levels(size, size, MemScheme::OneHot)
    }

    /// A binary tree of 2:1 branches sharing one memory bit per level.
    pub fn tree(size: usize) -> Result<MuxGraph, MuxError> {
        check_size(size)?;
        build_levels(size, 2, MemScheme::Shared)
    }

    /// At most `levels` levels of equal fan-in branches with one-hot memory
    /// per level.
    ///
    /// The fan-in is the smallest `k >= 2` with `k^levels >= size`.
    pub fn multi_level(size: usize, levels: usize) -> Result<MuxGraph, MuxError> {
        check_size(size)?;
        if levels == 0 {
            return Err(MuxError::InvalidLevels { levels });
        }
        let exponent = u32::try_from(levels).unwrap_or(u32::MAX);
        let mut fan_in = 2usize;
        while fan_in
            .checked_pow(exponent)
            .is_some_and(|reach| reach < size)
        {
            fan_in += 1;
        }
        build_levels(size, fan_in, MemScheme::OneHot)
    }
}

fn check_size(size: usize) -> Result<(), MuxError> {
    if size < 2 {
        return Err(MuxError::InvalidSize { size });
    }
    Ok(())
}

/// Groups nodes bottom-up into branches of `fan_in` until one branch can
/// drive the output. A lone node left over at the end of a level moves up
/// unchanged.
fn build_levels(size: usize, fan_in: usize, scheme: MemScheme) -> Result<MuxGraph, MuxError> {
    let mut builder = MuxGraphBuilder::new();
    let mut current: Vec<MuxNodeId> = (0..size).map(|_| builder.add_input()).collect();

    while current.len() > fan_in {
        let widest = current.len().min(fan_in);
        let mems = level_mems(&mut builder, scheme, widest);
        let mut next = Vec::with_capacity(current.len() / fan_in + 1);
        for group in current.chunks(fan_in) {
            if let [lone] = group {
                next.push(*lone);
                continue;
            }
            let branch = builder.add_internal();
            connect_branch(&mut builder, scheme, &mems, group, branch);
            next.push(branch);
        }
        current = next;
    }

    let output = builder.add_output();
    let mems = level_mems(&mut builder, scheme, current.len());
    connect_branch(&mut builder, scheme, &mems, &current, output);

    Ok(builder.build()?)
}

fn level_mems(builder: &mut MuxGraphBuilder, scheme: MemScheme, width: usize) -> Vec<MuxMemId> {
    match scheme {
        MemScheme::Shared => vec![builder.add_mem()],
        MemScheme::OneHot => (0..width).map(|_| builder.add_mem()).collect(),
    }
}

fn connect_branch(
    builder: &mut MuxGraphBuilder,
    scheme: MemScheme,
    mems: &[MuxMemId],
    sources: &[MuxNodeId],
    sink: MuxNodeId,
) {
    for (position, &source) in sources.iter().enumerate() {
        match scheme {
            MemScheme::Shared => {
                builder.connect(source, sink, mems[0], position % 2 == 1);
            }
            MemScheme::OneHot => {
                builder.connect(source, sink, mems[position], false);
            }
        }
    }
}
