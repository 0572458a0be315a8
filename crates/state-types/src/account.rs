use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use votecoin_history::{CheckpointTrace, SnapshotTrace};
use votecoin_identifiers::{AccountId, TokenAmount};

/// Per-account token state.
///
/// Accounts are created implicitly the first time anything is written for
/// them, so an absent account and a default one are indistinguishable.
#[derive(Clone, Debug, Default, Eq, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct AccountState {
    balance: TokenAmount,

    /// Spender allowances.  Zero allowances are removed rather than stored.
    allowances: BTreeMap<AccountId, TokenAmount>,

    /// Account receiving this account's voting power, if any.
    delegate: Option<AccountId>,

    /// Voting power delegated *to* this account over time.
    votes: CheckpointTrace,

    /// Lazily recorded balances per snapshot.
    balance_snapshots: SnapshotTrace,
}

impl AccountState {
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> TokenAmount {
        self.balance
    }

    pub fn set_balance(&mut self, balance: TokenAmount) {
        self.balance = balance;
    }

    pub fn allowance(&self, spender: &AccountId) -> TokenAmount {
        self.allowances
            .get(spender)
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    pub fn set_allowance(&mut self, spender: AccountId, amount: TokenAmount) {
        if amount.is_zero() {
            self.allowances.remove(&spender);
        } else {
            self.allowances.insert(spender, amount);
        }
    }

    /// Iterates over the nonzero allowances this account has granted.
    pub fn allowances(&self) -> impl Iterator<Item = (&AccountId, &TokenAmount)> {
        self.allowances.iter()
    }

    pub fn delegate(&self) -> Option<AccountId> {
        self.delegate
    }

    pub fn set_delegate(&mut self, delegate: Option<AccountId>) {
        self.delegate = delegate;
    }

    pub fn votes(&self) -> &CheckpointTrace {
        &self.votes
    }

    pub fn votes_mut(&mut self) -> &mut CheckpointTrace {
        &mut self.votes
    }

    pub fn balance_snapshots(&self) -> &SnapshotTrace {
        &self.balance_snapshots
    }

    pub fn balance_snapshots_mut(&mut self) -> &mut SnapshotTrace {
        &mut self.balance_snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_allowance_not_stored() {
        let spender = AccountId::new([2; 20]);
        let mut acct = AccountState::new_empty();

        acct.set_allowance(spender, TokenAmount::new(5));
        assert_eq!(acct.allowance(&spender), TokenAmount::new(5));
        assert_eq!(acct.allowances().count(), 1);

        acct.set_allowance(spender, TokenAmount::ZERO);
        assert_eq!(acct.allowance(&spender), TokenAmount::ZERO);
        assert_eq!(acct.allowances().count(), 0);
        assert_eq!(acct, AccountState::new_empty());
    }
}
