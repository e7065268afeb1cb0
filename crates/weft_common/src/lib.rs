//! Shared foundational types used across the Weft fabric generator.
//!
//! This crate provides interned identifiers, dense ID-indexed arenas, content
//! hashing for graph fingerprints, 4-state logic values and the internal error
//! type used to report broken structural invariants.

#![warn(missing_docs)]

pub mod arena;
pub mod hash;
pub mod ident;
pub mod logic;
pub mod result;

pub use arena::{Arena, ArenaId};
pub use hash::{ContentHash, ContentHasher};
pub use ident::{Ident, Interner};
pub use logic::Logic;
pub use result::{InternalError, WeftResult};
