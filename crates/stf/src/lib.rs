//! Token state transition functions.
//!
//! This crate implements the operations on a [`TokenState`], including:
//! - Capped minting, burning, transfers and allowances
//! - Lazy balance snapshots
//! - Delegated voting power with per-block checkpoints
//! - Single-owner access control
//!
//! ## Architecture
//!
//! - `ledger`: balance movement, with snapshot and vote bookkeeping hooked in
//! - `snapshot`: snapshot allocation and historical balance lookups
//! - `votes`: delegation, vote checkpoints and historical vote lookups
//! - `access`: the owner gate
//! - `tx`: operations as data, dispatched by [`process_tx`]
//!
//! Every operation checks all its preconditions before touching the state, so
//! a rejected operation leaves no trace.
//!
//! [`TokenState`]: votecoin_state_types::TokenState

pub mod access;
pub mod context;
pub mod errors;
mod handle;
pub mod ledger;
pub mod logs;
pub mod output;
pub mod snapshot;
mod tx;
pub mod votes;

#[cfg(test)]
mod test_utils;


pub use context::{TxExecContext, TxInfo};
pub use errors::{ExecError, ExecResult};
pub use handle::TokenHandle;
pub use logs::TokenLog;
pub use output::ExecOutput;
pub use tx::{TokenTx, process_tx};
