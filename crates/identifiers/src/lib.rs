//! Core identifier and amount types shared by every votecoin crate.

#[macro_use]
mod macros;

mod acct;
mod amount;
mod errors;
mod snapshot;

pub use acct::{ACCT_ID_LEN, AccountId};
pub use amount::{DECIMALS, TokenAmount};
pub use errors::ParseError;
pub use snapshot::{BlockNumber, SnapshotId};
