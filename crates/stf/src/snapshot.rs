//! Lazy balance snapshots.
//!
//! Taking a snapshot only allocates an id and records the total supply.  An
//! account's balance is recorded the first time it is about to change after a
//! snapshot, so untouched accounts cost nothing.

use tracing::*;
use votecoin_identifiers::{AccountId, SnapshotId, TokenAmount};
use votecoin_state_types::TokenState;

use crate::{
    access::check_owner,
    context::TxExecContext,
    errors::{ExecError, ExecResult},
    logs::TokenLog,
    output::OutputCtx,
};

/// Takes a new snapshot, returning its id.  Owner-only.
pub fn snapshot(state: &mut TokenState, ctx: &TxExecContext) -> ExecResult<SnapshotId> {
    ctx.check_clock(state)?;
    check_owner(state, ctx.caller())?;

    let total_supply = state.total_supply();
    let id = state.snapshots_mut().take(total_supply)?;

    debug!(%id, %total_supply, "took snapshot");
    ctx.emit_log(TokenLog::Snapshot { id });
    ctx.commit(state);
    Ok(id)
}

/// Id of the latest snapshot, zero if none has been taken.
pub fn current_snapshot_id(state: &TokenState) -> SnapshotId {
    state.snapshots().current_id()
}

pub fn total_supply_at(state: &TokenState, id: SnapshotId) -> ExecResult<TokenAmount> {
    state
        .snapshots()
        .total_supply_at(id)
        .ok_or_else(|| nonexistent(state, id))
}

/// Balance of `account` as of snapshot `id`.
pub fn balance_of_at(
    state: &TokenState,
    account: &AccountId,
    id: SnapshotId,
) -> ExecResult<TokenAmount> {
    if !state.snapshots().contains(id) {
        return Err(nonexistent(state, id));
    }

    // Accounts that never existed had a zero balance at every snapshot.
    let Some(acct) = state.get_account_state(account) else {
        return Ok(TokenAmount::ZERO);
    };

    Ok(acct
        .balance_snapshots()
        .lookup(id)
        .unwrap_or(acct.balance()))
}

/// Records the balance of `account` under the current snapshot if this is its
/// first change since that snapshot was taken.
///
/// Must be called before the balance is modified.
pub(crate) fn record_balance_before_write(
    state: &mut TokenState,
    account: AccountId,
) -> ExecResult<()> {
    let current = state.snapshots().current_id();
    if current.is_zero() {
        return Ok(());
    }

    let acct = state.get_or_create_account_mut(account);
    let balance = acct.balance();
    if acct.balance_snapshots_mut().record(current, balance)? {
        trace!(%account, snapshot = %current, %balance, "recorded snapshot balance");
    }
    Ok(())
}

fn nonexistent(state: &TokenState, id: SnapshotId) -> ExecError {
    ExecError::NonexistentSnapshot {
        id,
        current: state.snapshots().current_id(),
    }
}
