use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

type RawSnapshotId = u64;

/// Logical clock value supplied by the sequencer with every operation.
pub type BlockNumber = u64;

/// Identifier of a balance snapshot.
///
/// Ids are allocated densely starting from 1.  Zero means "no snapshot has
/// been taken yet" and is never a valid query target.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
#[serde(transparent)]
pub struct SnapshotId(RawSnapshotId);

impl_opaque_thin_wrapper!(SnapshotId => RawSnapshotId);

impl SnapshotId {
    /// The "no snapshot yet" id.
    pub const fn zero() -> Self {
        Self(0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the next id, or `None` if the id space is exhausted.
    pub fn incr(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incr() {
        assert_eq!(SnapshotId::zero().incr(), Some(SnapshotId::new(1)));
        assert_eq!(SnapshotId::new(u64::MAX).incr(), None);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&SnapshotId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
