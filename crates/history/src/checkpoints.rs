//! Block-keyed value history.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use votecoin_identifiers::{BlockNumber, TokenAmount};

use crate::errors::{HistoryError, HistoryResult};

/// A value as it was from `logged_at` until the next checkpoint.
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
pub struct Checkpoint {
    logged_at: BlockNumber,
    value: TokenAmount,
}

impl Checkpoint {
    pub fn new(logged_at: BlockNumber, value: TokenAmount) -> Self {
        Self { logged_at, value }
    }

    pub fn logged_at(&self) -> BlockNumber {
        self.logged_at
    }

    pub fn value(&self) -> TokenAmount {
        self.value
    }
}

/// Ordered sequence of checkpoints with strictly increasing keys.
///
/// Writes at the block of the latest checkpoint overwrite it instead of
/// appending, so there is at most one checkpoint per block.
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
pub struct CheckpointTrace {
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointTrace {
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Creates a trace holding a single checkpoint.
    pub fn new_initial(at: BlockNumber, value: TokenAmount) -> Self {
        Self {
            checkpoints: vec![Checkpoint::new(at, value)],
        }
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Gets the checkpoint at a position in the sequence.
    pub fn get(&self, pos: usize) -> Option<&Checkpoint> {
        self.checkpoints.get(pos)
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn latest_checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }

    /// Returns the latest value, or zero if nothing was ever written.
    pub fn latest(&self) -> TokenAmount {
        self.latest_checkpoint()
            .map(Checkpoint::value)
            .unwrap_or(TokenAmount::ZERO)
    }

    /// Checks whether a write at `at` would be accepted.
    pub fn check_push(&self, at: BlockNumber) -> HistoryResult<()> {
        match self.latest_checkpoint() {
            Some(last) if last.logged_at > at => {
                Err(HistoryError::DecreasingKey(last.logged_at, at))
            }
            _ => Ok(()),
        }
    }

    /// Writes `value` as of block `at`, returning the previous latest value
    /// and the new one.
    pub fn push(
        &mut self,
        at: BlockNumber,
        value: TokenAmount,
    ) -> HistoryResult<(TokenAmount, TokenAmount)> {
        self.check_push(at)?;
        let prev = self.latest();

        match self.checkpoints.last_mut() {
            Some(last) if last.logged_at == at => last.value = value,
            _ => self.checkpoints.push(Checkpoint::new(at, value)),
        }

        Ok((prev, value))
    }

    /// Returns the value of the latest checkpoint with `logged_at <= at`, or
    /// zero if there is none.
    pub fn upper_lookup(&self, at: BlockNumber) -> TokenAmount {
        let idx = self.checkpoints.partition_point(|c| c.logged_at <= at);
        match idx {
            0 => TokenAmount::ZERO,
            _ => self.checkpoints[idx - 1].value,
        }
    }
}
