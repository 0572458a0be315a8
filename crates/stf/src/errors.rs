use thiserror::Error;
use votecoin_history::HistoryError;
use votecoin_identifiers::{AccountId, BlockNumber, SnapshotId, TokenAmount};

pub type ExecResult<T> = Result<T, ExecError>;

/// Errors rejecting a token operation.
///
/// A rejected operation leaves the state untouched and emits no logs.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ExecError {
    /// Caller is not the owner.
    #[error("caller {0} is not the owner")]
    Unauthorized(AccountId),

    #[error("minting {amount} on top of supply {supply} exceeds max supply {cap}")]
    CapExceeded {
        supply: TokenAmount,
        amount: TokenAmount,
        cap: TokenAmount,
    },

    #[error("amount must be nonzero")]
    ZeroAmount,

    #[error("account {account} has balance {balance}, needs {needed}")]
    InsufficientBalance {
        account: AccountId,
        balance: TokenAmount,
        needed: TokenAmount,
    },

    #[error("spender {spender} has allowance {allowance} from {owner}, needs {needed}")]
    InsufficientAllowance {
        owner: AccountId,
        spender: AccountId,
        allowance: TokenAmount,
        needed: TokenAmount,
    },

    #[error("allowance would overflow")]
    AllowanceOverflow,

    #[error("allowance would go below zero")]
    AllowanceBelowZero,

    #[error("sender is the null account")]
    InvalidSender,

    #[error("recipient is the null account")]
    InvalidRecipient,

    #[error("spender is the null account")]
    InvalidSpender,

    #[error("new owner is the null account")]
    InvalidOwner,

    #[error("snapshot {id} does not exist (latest is {current})")]
    NonexistentSnapshot { id: SnapshotId, current: SnapshotId },

    /// Historical query at or after the current block.
    ///
    /// (queried block, current block)
    #[error("block {0} is not yet finalized (current block {1})")]
    FutureQuery(BlockNumber, BlockNumber),

    #[error("delegating {account} to {to} would create a delegation cycle")]
    SelfDelegationCycle { account: AccountId, to: AccountId },

    #[error("block {got} is before the last committed block {last}")]
    ClockRegression { last: BlockNumber, got: BlockNumber },

    #[error("balance of {0} would overflow")]
    BalanceOverflow(AccountId),

    #[error("total supply out of range")]
    SupplyOutOfRange,

    /// The delegate's votes no longer cover the balances delegated to it.
    #[error("votes of {0} out of range")]
    VotesOutOfRange(AccountId),

    #[error("history: {0}")]
    History(#[from] HistoryError),
}
