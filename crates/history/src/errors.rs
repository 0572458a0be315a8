use thiserror::Error;
use votecoin_identifiers::{BlockNumber, SnapshotId};

pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors from writing historical records out of order.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum HistoryError {
    /// A checkpoint was pushed with a key lower than the latest one.
    ///
    /// (latest key, pushed key)
    #[error("checkpoint key decreased from {0} to {1}")]
    DecreasingKey(BlockNumber, BlockNumber),

    /// A snapshot value was recorded under an id older than the latest
    /// recorded one.
    #[error("snapshot id went backwards from {last} to {got}")]
    SnapshotIdRegression { last: SnapshotId, got: SnapshotId },

    #[error("snapshot id space exhausted")]
    SnapshotIdExhausted,
}
