//! Historical state containers.
//!
//! Two shapes of history are kept by the token:
//!
//! - [`CheckpointTrace`]: values keyed by block number, used for voting power
//!   and total supply, queried with "latest checkpoint at or before block".
//! - [`SnapshotTrace`] and [`SnapshotRegistry`]: values keyed by snapshot id,
//!   recorded lazily for balances and eagerly for total supply.
//!
//! Both are append-only and never pruned.

mod checkpoints;
mod errors;
mod snapshots;

pub use checkpoints::{Checkpoint, CheckpointTrace};
pub use errors::{HistoryError, HistoryResult};
pub use snapshots::{SnapshotRegistry, SnapshotTrace};
