//! Configuration memory organization bookkeeping.

use weft_config::SramOrganizationKind;

/// The fabric's configuration memory organization and the bit/word lines
/// reserved for multiplexers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SramOrganization {
    kind: SramOrganizationKind,
    reserved_bl: usize,
    reserved_wl: usize,
}

impl SramOrganization {
    /// Creates an organization with nothing reserved.
    pub fn new(kind: SramOrganizationKind) -> Self {
        Self {
            kind,
            reserved_bl: 0,
            reserved_wl: 0,
        }
    }

    /// Returns the organization kind.
    pub fn kind(&self) -> SramOrganizationKind {
        self.kind
    }

    /// Reserved bit lines.
    pub fn reserved_bl(&self) -> usize {
        self.reserved_bl
    }

    /// Reserved word lines.
    pub fn reserved_wl(&self) -> usize {
        self.reserved_wl
    }

    /// Raises the reserved bit and word line counts.
    ///
    /// Only a memory bank addresses bits through BL/WL, so other
    /// organizations are left untouched. Counts never decrease and at least
    /// one line of each is reserved.
    pub fn try_update_reserved_blwl(&mut self, num_bl: usize, num_wl: usize) {
        if self.kind != SramOrganizationKind::MemoryBank {
            return;
        }
        self.reserved_bl = self.reserved_bl.max(num_bl.max(1));
        self.reserved_wl = self.reserved_wl.max(num_wl.max(1));
        tracing::debug!(
            bl = self.reserved_bl,
            wl = self.reserved_wl,
            "updated reserved bit/word lines"
        );
    }
}
