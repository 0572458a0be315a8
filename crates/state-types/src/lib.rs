//! Token state types.

mod account;
mod ledger;
mod toplevel;

pub use account::*;
pub use ledger::*;
pub use toplevel::*;
