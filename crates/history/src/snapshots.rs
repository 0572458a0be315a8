//! Snapshot bookkeeping.
//!
//! Total supply is recorded eagerly when a snapshot is taken.  Account
//! balances are recorded lazily: the first time an account's balance is
//! about to change after a snapshot, its pre-change balance is written under
//! the latest snapshot id.  That value is then the account's balance for
//! every snapshot since its previous record, which is why lookups search
//! forward for the first record at or after the queried id.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use votecoin_identifiers::{SnapshotId, TokenAmount};

use crate::errors::{HistoryError, HistoryResult};

/// Allocates snapshot ids and stores the total supply of each.
#[derive(
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct SnapshotRegistry {
    /// Total supply per snapshot, where id `n` is at index `n - 1`.
    total_supplies: Vec<TokenAmount>,
}

impl SnapshotRegistry {
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Returns the latest allocated id, or zero if none were taken.
    pub fn current_id(&self) -> SnapshotId {
        SnapshotId::new(self.total_supplies.len() as u64)
    }

    /// Checks that `id` refers to an allocated snapshot.
    pub fn contains(&self, id: SnapshotId) -> bool {
        !id.is_zero() && id <= self.current_id()
    }

    /// Allocates the next id, recording the current total supply under it.
    pub fn take(&mut self, total_supply: TokenAmount) -> HistoryResult<SnapshotId> {
        let id = self
            .current_id()
            .incr()
            .ok_or(HistoryError::SnapshotIdExhausted)?;
        self.total_supplies.push(total_supply);
        Ok(id)
    }

    pub fn total_supply_at(&self, id: SnapshotId) -> Option<TokenAmount> {
        if !self.contains(id) {
            return None;
        }
        self.total_supplies.get(*id.inner() as usize - 1).copied()
    }
}

#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
struct SnapshotEntry {
    id: SnapshotId,
    value: TokenAmount,
}

/// Lazily recorded per-account values, ordered by snapshot id.
#[derive(
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct SnapshotTrace {
    entries: Vec<SnapshotEntry>,
}

impl SnapshotTrace {
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the id of the latest record, or zero if there is none.
    pub fn last_recorded_id(&self) -> SnapshotId {
        self.entries
            .last()
            .map(|e| e.id)
            .unwrap_or(SnapshotId::zero())
    }

    /// Records `value` under `current` unless it already has a record there
    /// or no snapshot exists yet.  Returns whether a record was written.
    pub fn record(&mut self, current: SnapshotId, value: TokenAmount) -> HistoryResult<bool> {
        if current.is_zero() {
            return Ok(false);
        }

        let last = self.last_recorded_id();
        if last > current {
            return Err(HistoryError::SnapshotIdRegression { last, got: current });
        }
        if last == current {
            return Ok(false);
        }

        self.entries.push(SnapshotEntry { id: current, value });
        Ok(true)
    }

    /// Looks up the value as of snapshot `id`.
    ///
    /// Returns `None` if the value has not changed since that snapshot, in
    /// which case the caller's current value applies.
    pub fn lookup(&self, id: SnapshotId) -> Option<TokenAmount> {
        let idx = self.entries.partition_point(|e| e.id < id);
        self.entries.get(idx).map(|e| e.value)
    }
}
