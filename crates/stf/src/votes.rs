//! Delegation and voting power checkpoints.
//!
//! An account only counts towards votes once it delegates, possibly to
//! itself.  Each delegate keeps a [`CheckpointTrace`] of its voting power by
//! block, and the total supply has one of its own.

use tracing::*;
use votecoin_history::{Checkpoint, CheckpointTrace};
use votecoin_identifiers::{AccountId, BlockNumber, TokenAmount};
use votecoin_state_types::TokenState;

use crate::{
    context::TxExecContext,
    errors::{ExecError, ExecResult},
    logs::TokenLog,
    output::OutputCtx,
};

/// Returns who `account` currently delegates to, if anyone.
pub fn delegates(state: &TokenState, account: &AccountId) -> Option<AccountId> {
    state.delegate_of(account)
}

/// Current voting power of `account`.
pub fn get_votes(state: &TokenState, account: &AccountId) -> TokenAmount {
    state
        .votes_of(account)
        .map(CheckpointTrace::latest)
        .unwrap_or(TokenAmount::ZERO)
}

/// Voting power of `account` at the end of block `at`, which must be before
/// `cur_block`.
///
/// Only blocks before [`TokenState::last_block`] are settled by the state
/// itself, since operations in the last committed block or later are still
/// accepted.  Answers for `at` in `last_block..cur_block` are only stable if
/// the host never executes another operation at a block `<= at`, i.e. it
/// passes its own sequencer clock as `cur_block` and has closed every block
/// before it.
pub fn get_past_votes(
    state: &TokenState,
    cur_block: BlockNumber,
    account: &AccountId,
    at: BlockNumber,
) -> ExecResult<TokenAmount> {
    check_past_block(cur_block, at)?;
    Ok(state
        .votes_of(account)
        .map(|trace| trace.upper_lookup(at))
        .unwrap_or(TokenAmount::ZERO))
}

/// Total supply at the end of block `at`, which must be before `cur_block`.
///
/// Same finality rules as [`get_past_votes`].
pub fn get_past_total_supply(
    state: &TokenState,
    cur_block: BlockNumber,
    at: BlockNumber,
) -> ExecResult<TokenAmount> {
    check_past_block(cur_block, at)?;
    Ok(state.total_supply_checkpoints().upper_lookup(at))
}

pub fn num_checkpoints(state: &TokenState, account: &AccountId) -> usize {
    state
        .votes_of(account)
        .map(CheckpointTrace::len)
        .unwrap_or(0)
}

pub fn checkpoint_at(state: &TokenState, account: &AccountId, pos: usize) -> Option<Checkpoint> {
    state.votes_of(account).and_then(|t| t.get(pos)).copied()
}

fn check_past_block(cur_block: BlockNumber, at: BlockNumber) -> ExecResult<()> {
    if at >= cur_block {
        return Err(ExecError::FutureQuery(at, cur_block));
    }
    Ok(())
}

/// Delegates the caller's voting power to `to`, moving its whole current
/// balance from the previous delegate.  Delegating to the null account clears
/// the delegation.
pub fn delegate(state: &mut TokenState, ctx: &TxExecContext, to: AccountId) -> ExecResult<()> {
    ctx.check_clock(state)?;

    let account = ctx.caller();
    if account.is_zero() {
        return Err(ExecError::InvalidSender);
    }

    let new_delegate = to.non_zero();
    if let Some(new_delegate) = new_delegate {
        check_delegation_cycle(state, account, new_delegate)?;
    }

    let old_delegate = state.delegate_of(&account);
    let balance = state.balance_of(&account);

    // Power of the new delegate before and after the move.
    let old_power = new_delegate
        .map(|d| get_votes(state, &d))
        .unwrap_or(TokenAmount::ZERO);
    let new_power = match new_delegate {
        Some(d) if old_delegate != new_delegate => old_power
            .checked_add(balance)
            .ok_or(ExecError::VotesOutOfRange(d))?,
        _ => old_power,
    };

    state
        .get_or_create_account_mut(account)
        .set_delegate(new_delegate);

    let from_delegate = old_delegate.unwrap_or(AccountId::zero());
    let to_delegate = new_delegate.unwrap_or(AccountId::zero());
    debug!(%account, %from_delegate, %to_delegate, %balance, "delegate changed");
    ctx.emit_log(TokenLog::DelegateChanged {
        delegator: account,
        from_delegate,
        to_delegate,
        old_power,
        new_power,
    });

    move_voting_power(state, ctx, old_delegate, new_delegate, balance)?;
    ctx.commit(state);
    Ok(())
}

/// Rejects delegations that would make the delegation graph cyclic.
///
/// Walks the chain starting at `to` and fails if it leads back to `account`
/// through some other account.  A self-delegation is a chain's end, not a
/// cycle.
fn check_delegation_cycle(
    state: &TokenState,
    account: AccountId,
    to: AccountId,
) -> ExecResult<()> {
    if to == account {
        return Ok(());
    }

    // The graph is kept acyclic, so a walk can't take more steps than there
    // are accounts.
    let mut remaining = state.accounts().len();
    let mut cur = to;
    while let Some(next) = state.delegate_of(&cur) {
        if next == account {
            warn!(%account, %to, "rejecting delegation cycle");
            return Err(ExecError::SelfDelegationCycle { account, to });
        }
        if next == cur || remaining == 0 {
            break;
        }
        cur = next;
        remaining -= 1;
    }

    Ok(())
}

/// Moves `amount` of voting power from `src` to `dst`, writing a checkpoint
/// for each side at the current block.
pub(crate) fn move_voting_power(
    state: &mut TokenState,
    ctx: &TxExecContext,
    src: Option<AccountId>,
    dst: Option<AccountId>,
    amount: TokenAmount,
) -> ExecResult<()> {
    if src == dst || amount.is_zero() {
        return Ok(());
    }

    // Both sides are computed before either is written.
    let src_votes = src
        .map(|src| {
            get_votes(state, &src)
                .checked_sub(amount)
                .map(|votes| (src, votes))
                .ok_or(ExecError::VotesOutOfRange(src))
        })
        .transpose()?;
    let dst_votes = dst
        .map(|dst| {
            get_votes(state, &dst)
                .checked_add(amount)
                .map(|votes| (dst, votes))
                .ok_or(ExecError::VotesOutOfRange(dst))
        })
        .transpose()?;

    for (delegate, votes) in src_votes.into_iter().chain(dst_votes) {
        let trace = state.get_or_create_account_mut(delegate).votes_mut();
        write_votes_checkpoint(ctx, delegate, trace, votes)?;
    }

    Ok(())
}

fn write_votes_checkpoint(
    ctx: &TxExecContext,
    delegate: AccountId,
    trace: &mut CheckpointTrace,
    value: TokenAmount,
) -> ExecResult<()> {
    let (previous_votes, new_votes) = trace.push(ctx.block(), value)?;
    trace!(%delegate, %previous_votes, %new_votes, block = ctx.block(), "votes checkpoint");
    ctx.emit_log(TokenLog::DelegateVotesChanged {
        delegate,
        previous_votes,
        new_votes,
    });
    Ok(())
}

/// Writes the total supply checkpoint for the current block.
pub(crate) fn write_supply_checkpoint(
    state: &mut TokenState,
    ctx: &TxExecContext,
) -> ExecResult<()> {
    let total_supply = state.total_supply();
    state
        .total_supply_checkpoints_mut()
        .push(ctx.block(), total_supply)?;
    Ok(())
}
