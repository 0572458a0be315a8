//! Logs emitted by successful operations.

use serde::{Deserialize, Serialize};
use votecoin_identifiers::{AccountId, SnapshotId, TokenAmount};

/// A domain event.  The null account stands in for "nobody" in `from`/`to`
/// and delegate fields.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TokenLog {
    /// Tokens moved, minted (`from` is null) or burned (`to` is null).
    Transfer {
        from: AccountId,
        to: AccountId,
        value: TokenAmount,
    },

    /// An allowance was set to `value`.
    Approval {
        owner: AccountId,
        spender: AccountId,
        value: TokenAmount,
    },

    /// A snapshot was taken.
    Snapshot { id: SnapshotId },

    /// `delegator` moved its voting power from `from_delegate` to
    /// `to_delegate`, whose votes went from `old_power` to `new_power`.
    DelegateChanged {
        delegator: AccountId,
        from_delegate: AccountId,
        to_delegate: AccountId,
        old_power: TokenAmount,
        new_power: TokenAmount,
    },

    /// A delegate's votes checkpoint was written.
    DelegateVotesChanged {
        delegate: AccountId,
        previous_votes: TokenAmount,
        new_votes: TokenAmount,
    },

    OwnershipTransferred {
        previous_owner: AccountId,
        new_owner: AccountId,
    },
}
