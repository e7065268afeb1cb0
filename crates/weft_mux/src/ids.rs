//! Opaque ID newtypes for multiplexer graph entities.

use serde::{Deserialize, Serialize};
use weft_common::ArenaId;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// A node (input, internal branch point, or output) of a [`MuxGraph`](crate::MuxGraph).
    MuxNodeId
);

define_id!(
    /// An edge of a [`MuxGraph`](crate::MuxGraph): one path gated by one memory bit.
    MuxEdgeId
);

define_id!(
    /// A configuration memory bit of a [`MuxGraph`](crate::MuxGraph).
    ///
    /// The raw index is the bit position on the `mem`/`mem_inv` buses.
    MuxMemId
);

define_id!(
    /// A distinct multiplexer in a [`MuxLibrary`](crate::MuxLibrary).
    MuxId
);
