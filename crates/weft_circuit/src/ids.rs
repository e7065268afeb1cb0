//! Opaque ID newtypes for catalog entities.

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
    /// Opaque, copyable ID for a circuit model in a [`CircuitLibrary`](crate::CircuitLibrary).
    CircuitModelId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn id_roundtrip() {
        let id = CircuitModelId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
    }

    #[test]
    fn id_hash_in_set() {
        let mut set = HashSet::new();
        set.insert(CircuitModelId::from_raw(1));
        set.insert(CircuitModelId::from_raw(2));
        set.insert(CircuitModelId::from_raw(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = CircuitModelId::from_raw(9);
        let json = serde_json::to_string(&id).unwrap();
        let restored: CircuitModelId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }
}
