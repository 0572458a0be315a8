//! Single-owner access control.

use tracing::*;
use votecoin_identifiers::AccountId;
use votecoin_state_types::TokenState;

use crate::{
    context::TxExecContext,
    errors::{ExecError, ExecResult},
    logs::TokenLog,
    output::OutputCtx,
};

/// Returns the current owner, or `None` once ownership has been renounced.
pub fn owner(state: &TokenState) -> Option<AccountId> {
    state.owner()
}

/// Rejects callers that aren't the owner.
pub fn check_owner(state: &TokenState, caller: AccountId) -> ExecResult<()> {
    if state.owner() != Some(caller) {
        warn!(%caller, "rejecting owner-only operation");
        return Err(ExecError::Unauthorized(caller));
    }
    Ok(())
}

pub fn transfer_ownership(
    state: &mut TokenState,
    ctx: &TxExecContext,
    new_owner: AccountId,
) -> ExecResult<()> {
    ctx.check_clock(state)?;
    check_owner(state, ctx.caller())?;
    if new_owner.is_zero() {
        return Err(ExecError::InvalidOwner);
    }

    set_owner(state, ctx, Some(new_owner));
    ctx.commit(state);
    Ok(())
}

/// Leaves the token without an owner.  Owner-only operations are rejected
/// from then on.
pub fn renounce_ownership(state: &mut TokenState, ctx: &TxExecContext) -> ExecResult<()> {
    ctx.check_clock(state)?;
    check_owner(state, ctx.caller())?;

    set_owner(state, ctx, None);
    ctx.commit(state);
    Ok(())
}

fn set_owner(state: &mut TokenState, ctx: &TxExecContext, new_owner: Option<AccountId>) {
    let previous_owner = state.owner().unwrap_or(AccountId::zero());
    state.set_owner(new_owner);

    let new_owner = new_owner.unwrap_or(AccountId::zero());
    debug!(%previous_owner, %new_owner, "ownership transferred");
    ctx.emit_log(TokenLog::OwnershipTransferred {
        previous_owner,
        new_owner,
    });
}
