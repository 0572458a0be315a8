//! Balances, allowances and supply.
//!
//! Every balance change goes through [`BalanceUpdate`]: it's checked in full
//! against the state first, then applied.  Applying records snapshot balances,
//! moves the funds, writes the supply checkpoint and moves voting power.

use tracing::*;
use votecoin_identifiers::{AccountId, TokenAmount};
use votecoin_state_types::TokenState;

use crate::{
    access::check_owner,
    context::TxExecContext,
    errors::{ExecError, ExecResult},
    logs::TokenLog,
    output::OutputCtx,
    snapshot::record_balance_before_write,
    votes::{move_voting_power, write_supply_checkpoint},
};

/// A movement of funds.  A missing `from` mints, a missing `to` burns.
#[derive(Copy, Clone, Debug)]
struct BalanceUpdate {
    from: Option<AccountId>,
    to: Option<AccountId>,
    amount: TokenAmount,
}

impl BalanceUpdate {
    fn transfer(from: AccountId, to: AccountId, amount: TokenAmount) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            amount,
        }
    }

    fn mint(to: AccountId, amount: TokenAmount) -> Self {
        Self {
            from: None,
            to: Some(to),
            amount,
        }
    }

    fn burn(from: AccountId, amount: TokenAmount) -> Self {
        Self {
            from: Some(from),
            to: None,
            amount,
        }
    }

    /// Checks the update can be applied in full.
    fn check(&self, state: &TokenState) -> ExecResult<()> {
        match self.from {
            Some(from) => {
                let balance = state.balance_of(&from);
                if balance < self.amount {
                    return Err(ExecError::InsufficientBalance {
                        account: from,
                        balance,
                        needed: self.amount,
                    });
                }
            }

            None => {
                let supply = state.total_supply();
                let cap = state.max_supply();
                let within_cap = supply
                    .checked_add(self.amount)
                    .is_some_and(|total| total <= cap);
                if !within_cap {
                    return Err(ExecError::CapExceeded {
                        supply,
                        amount: self.amount,
                        cap,
                    });
                }
            }
        }

        // A self-transfer ends where it started.
        if let Some(to) = self.to
            && self.from != Some(to)
            && state.balance_of(&to).checked_add(self.amount).is_none()
        {
            return Err(ExecError::BalanceOverflow(to));
        }

        if self.to.is_none() && state.total_supply() < self.amount {
            return Err(ExecError::SupplyOutOfRange);
        }

        Ok(())
    }

    /// Applies a checked update.
    fn apply(&self, state: &mut TokenState, ctx: &TxExecContext) -> ExecResult<()> {
        let amount = self.amount;

        if let Some(from) = self.from {
            record_balance_before_write(state, from)?;
            let acct = state.get_or_create_account_mut(from);
            let balance = acct.balance();
            let new_bal = balance
                .checked_sub(amount)
                .ok_or(ExecError::InsufficientBalance {
                    account: from,
                    balance,
                    needed: amount,
                })?;
            acct.set_balance(new_bal);
        }

        if let Some(to) = self.to {
            record_balance_before_write(state, to)?;
            let acct = state.get_or_create_account_mut(to);
            let new_bal = acct
                .balance()
                .checked_add(amount)
                .ok_or(ExecError::BalanceOverflow(to))?;
            acct.set_balance(new_bal);
        }

        let supply = state.total_supply();
        let new_supply = match (self.from, self.to) {
            (None, _) => supply.checked_add(amount),
            (_, None) => supply.checked_sub(amount),
            _ => Some(supply),
        }
        .ok_or(ExecError::SupplyOutOfRange)?;
        state.set_total_supply(new_supply);

        let from = self.from.unwrap_or(AccountId::zero());
        let to = self.to.unwrap_or(AccountId::zero());
        debug!(%from, %to, %amount, "balance update");
        ctx.emit_log(TokenLog::Transfer {
            from,
            to,
            value: amount,
        });

        if new_supply != supply {
            write_supply_checkpoint(state, ctx)?;
        }

        let src = self.from.and_then(|a| state.delegate_of(&a));
        let dst = self.to.and_then(|a| state.delegate_of(&a));
        move_voting_power(state, ctx, src, dst, amount)?;

        Ok(())
    }
}

/// Creates `amount` new tokens for `to`.  Owner-only.
pub fn mint(
    state: &mut TokenState,
    ctx: &TxExecContext,
    to: AccountId,
    amount: TokenAmount,
) -> ExecResult<()> {
    ctx.check_clock(state)?;
    check_owner(state, ctx.caller())?;
    if amount.is_zero() {
        return Err(ExecError::ZeroAmount);
    }
    if to.is_zero() {
        return Err(ExecError::InvalidRecipient);
    }

    let update = BalanceUpdate::mint(to, amount);
    update.check(state)?;
    update.apply(state, ctx)?;
    ctx.commit(state);
    Ok(())
}

/// Destroys `amount` of the caller's tokens.
pub fn burn(state: &mut TokenState, ctx: &TxExecContext, amount: TokenAmount) -> ExecResult<()> {
    ctx.check_clock(state)?;
    let from = checked_sender(ctx)?;

    let update = BalanceUpdate::burn(from, amount);
    update.check(state)?;
    update.apply(state, ctx)?;
    ctx.commit(state);
    Ok(())
}

/// Destroys `amount` of `account`'s tokens, spending the caller's allowance.
pub fn burn_from(
    state: &mut TokenState,
    ctx: &TxExecContext,
    account: AccountId,
    amount: TokenAmount,
) -> ExecResult<()> {
    ctx.check_clock(state)?;
    let spender = checked_sender(ctx)?;
    if account.is_zero() {
        return Err(ExecError::InvalidSender);
    }

    let spend = AllowanceSpend::new(account, spender, amount);
    spend.check(state)?;
    let update = BalanceUpdate::burn(account, amount);
    update.check(state)?;

    spend.apply(state, ctx)?;
    update.apply(state, ctx)?;
    ctx.commit(state);
    Ok(())
}

/// Moves `amount` from the caller to `to`.
pub fn transfer(
    state: &mut TokenState,
    ctx: &TxExecContext,
    to: AccountId,
    amount: TokenAmount,
) -> ExecResult<()> {
    ctx.check_clock(state)?;
    let from = checked_sender(ctx)?;
    if to.is_zero() {
        return Err(ExecError::InvalidRecipient);
    }

    let update = BalanceUpdate::transfer(from, to, amount);
    update.check(state)?;
    update.apply(state, ctx)?;
    ctx.commit(state);
    Ok(())
}

/// Moves `amount` from `from` to `to`, spending the caller's allowance.
///
/// Emits the updated allowance before the transfer itself.
pub fn transfer_from(
    state: &mut TokenState,
    ctx: &TxExecContext,
    from: AccountId,
    to: AccountId,
    amount: TokenAmount,
) -> ExecResult<()> {
    ctx.check_clock(state)?;
    let spender = checked_sender(ctx)?;
    if from.is_zero() {
        return Err(ExecError::InvalidSender);
    }
    if to.is_zero() {
        return Err(ExecError::InvalidRecipient);
    }

    let spend = AllowanceSpend::new(from, spender, amount);
    spend.check(state)?;
    let update = BalanceUpdate::transfer(from, to, amount);
    update.check(state)?;

    spend.apply(state, ctx)?;
    update.apply(state, ctx)?;
    ctx.commit(state);
    Ok(())
}

/// Sets the caller's allowance for `spender` to `amount`.
pub fn approve(
    state: &mut TokenState,
    ctx: &TxExecContext,
    spender: AccountId,
    amount: TokenAmount,
) -> ExecResult<()> {
    ctx.check_clock(state)?;
    let owner = checked_sender(ctx)?;
    if spender.is_zero() {
        return Err(ExecError::InvalidSpender);
    }

    set_allowance(state, ctx, owner, spender, amount);
    ctx.commit(state);
    Ok(())
}

pub fn increase_allowance(
    state: &mut TokenState,
    ctx: &TxExecContext,
    spender: AccountId,
    added: TokenAmount,
) -> ExecResult<()> {
    ctx.check_clock(state)?;
    let owner = checked_sender(ctx)?;
    if spender.is_zero() {
        return Err(ExecError::InvalidSpender);
    }

    let amount = state
        .allowance(&owner, &spender)
        .checked_add(added)
        .ok_or(ExecError::AllowanceOverflow)?;

    set_allowance(state, ctx, owner, spender, amount);
    ctx.commit(state);
    Ok(())
}

pub fn decrease_allowance(
    state: &mut TokenState,
    ctx: &TxExecContext,
    spender: AccountId,
    subtracted: TokenAmount,
) -> ExecResult<()> {
    ctx.check_clock(state)?;
    let owner = checked_sender(ctx)?;
    if spender.is_zero() {
        return Err(ExecError::InvalidSpender);
    }

    let amount = state
        .allowance(&owner, &spender)
        .checked_sub(subtracted)
        .ok_or(ExecError::AllowanceBelowZero)?;

    set_allowance(state, ctx, owner, spender, amount);
    ctx.commit(state);
    Ok(())
}

fn checked_sender(ctx: &TxExecContext) -> ExecResult<AccountId> {
    ctx.caller().non_zero().ok_or(ExecError::InvalidSender)
}

fn set_allowance(
    state: &mut TokenState,
    ctx: &TxExecContext,
    owner: AccountId,
    spender: AccountId,
    value: TokenAmount,
) {
    state
        .get_or_create_account_mut(owner)
        .set_allowance(spender, value);

    debug!(%owner, %spender, %value, "allowance set");
    ctx.emit_log(TokenLog::Approval {
        owner,
        spender,
        value,
    });
}

/// Spending of an allowance by a third party.
///
/// An allowance of [`TokenAmount::MAX`] is unlimited and never decreases.
#[derive(Copy, Clone, Debug)]
struct AllowanceSpend {
    owner: AccountId,
    spender: AccountId,
    amount: TokenAmount,
}

impl AllowanceSpend {
    fn new(owner: AccountId, spender: AccountId, amount: TokenAmount) -> Self {
        Self {
            owner,
            spender,
            amount,
        }
    }

    fn check(&self, state: &TokenState) -> ExecResult<()> {
        let allowance = state.allowance(&self.owner, &self.spender);
        if allowance < self.amount {
            return Err(ExecError::InsufficientAllowance {
                owner: self.owner,
                spender: self.spender,
                allowance,
                needed: self.amount,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut TokenState, ctx: &TxExecContext) -> ExecResult<()> {
        let allowance = state.allowance(&self.owner, &self.spender);
        if allowance == TokenAmount::MAX {
            return Ok(());
        }

        let remaining =
            allowance
                .checked_sub(self.amount)
                .ok_or(ExecError::InsufficientAllowance {
                    owner: self.owner,
                    spender: self.spender,
                    allowance,
                    needed: self.amount,
                })?;
        set_allowance(state, ctx, self.owner, self.spender, remaining);
        Ok(())
    }
}
