//! State-changing operations as data, and their dispatch.

use serde::{Deserialize, Serialize};
use tracing::*;
use votecoin_identifiers::{AccountId, TokenAmount};
use votecoin_state_types::TokenState;

use crate::{
    access,
    context::{TxExecContext, TxInfo},
    errors::ExecResult,
    ledger,
    output::ExecOutput,
    snapshot, votes,
};

/// A state-changing token operation.  The caller and block come from the
/// accompanying [`TxInfo`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TokenTx {
    Mint {
        to: AccountId,
        amount: TokenAmount,
    },
    Burn {
        amount: TokenAmount,
    },
    BurnFrom {
        account: AccountId,
        amount: TokenAmount,
    },
    Transfer {
        to: AccountId,
        amount: TokenAmount,
    },
    TransferFrom {
        from: AccountId,
        to: AccountId,
        amount: TokenAmount,
    },
    Approve {
        spender: AccountId,
        amount: TokenAmount,
    },
    IncreaseAllowance {
        spender: AccountId,
        added: TokenAmount,
    },
    DecreaseAllowance {
        spender: AccountId,
        subtracted: TokenAmount,
    },
    Snapshot,
    Delegate {
        to: AccountId,
    },
    TransferOwnership {
        new_owner: AccountId,
    },
    RenounceOwnership,
}

impl TokenTx {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            TokenTx::Mint { .. } => "mint",
            TokenTx::Burn { .. } => "burn",
            TokenTx::BurnFrom { .. } => "burn_from",
            TokenTx::Transfer { .. } => "transfer",
            TokenTx::TransferFrom { .. } => "transfer_from",
            TokenTx::Approve { .. } => "approve",
            TokenTx::IncreaseAllowance { .. } => "increase_allowance",
            TokenTx::DecreaseAllowance { .. } => "decrease_allowance",
            TokenTx::Snapshot => "snapshot",
            TokenTx::Delegate { .. } => "delegate",
            TokenTx::TransferOwnership { .. } => "transfer_ownership",
            TokenTx::RenounceOwnership => "renounce_ownership",
        }
    }
}

/// Executes a single operation, returning the logs it emitted.
///
/// Either the operation is applied in full and the state's clock advances to
/// the operation's block, or an error is returned and nothing changes.
pub fn process_tx(state: &mut TokenState, info: &TxInfo, tx: &TokenTx) -> ExecResult<ExecOutput> {
    let ctx = TxExecContext::new(*info);

    let res = match tx {
        TokenTx::Mint { to, amount } => ledger::mint(state, &ctx, *to, *amount),
        TokenTx::Burn { amount } => ledger::burn(state, &ctx, *amount),
        TokenTx::BurnFrom { account, amount } => {
            ledger::burn_from(state, &ctx, *account, *amount)
        }
        TokenTx::Transfer { to, amount } => ledger::transfer(state, &ctx, *to, *amount),
        TokenTx::TransferFrom { from, to, amount } => {
            ledger::transfer_from(state, &ctx, *from, *to, *amount)
        }
        TokenTx::Approve { spender, amount } => ledger::approve(state, &ctx, *spender, *amount),
        TokenTx::IncreaseAllowance { spender, added } => {
            ledger::increase_allowance(state, &ctx, *spender, *added)
        }
        TokenTx::DecreaseAllowance {
            spender,
            subtracted,
        } => ledger::decrease_allowance(state, &ctx, *spender, *subtracted),
        TokenTx::Snapshot => snapshot::snapshot(state, &ctx).map(|_| ()),
        TokenTx::Delegate { to } => votes::delegate(state, &ctx, *to),
        TokenTx::TransferOwnership { new_owner } => {
            access::transfer_ownership(state, &ctx, *new_owner)
        }
        TokenTx::RenounceOwnership => access::renounce_ownership(state, &ctx),
    };

    if let Err(e) = &res {
        debug!(op = tx.name(), caller = %info.caller(), block = info.block(), %e, "rejected tx");
    }
    res?;

    Ok(ctx.into_output())
}
