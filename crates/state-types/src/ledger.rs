//! Accounts table.

use borsh::{BorshDeserialize, BorshSerialize};
use votecoin_identifiers::AccountId;

use crate::account::AccountState;

/// Accounts table, kept sorted by account id.
#[derive(Clone, Debug, Default, Eq, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct LedgerAccountsTable {
    accounts: Vec<AccountEntry>,
}

impl LedgerAccountsTable {
    /// Creates a new empty table.
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn find_entry_idx(&self, id: &AccountId) -> Result<usize, usize> {
        self.accounts.binary_search_by_key(id, |e| e.id)
    }

    pub fn get_account_state(&self, id: &AccountId) -> Option<&AccountState> {
        let idx = self.find_entry_idx(id).ok()?;
        Some(&self.accounts[idx].state)
    }

    pub fn get_account_state_mut(&mut self, id: &AccountId) -> Option<&mut AccountState> {
        let idx = self.find_entry_idx(id).ok()?;
        Some(&mut self.accounts[idx].state)
    }

    /// Gets an account for writing, creating an empty one in place if it
    /// doesn't exist yet.
    pub fn get_or_create_account_mut(&mut self, id: AccountId) -> &mut AccountState {
        let idx = match self.find_entry_idx(&id) {
            Ok(idx) => idx,
            Err(idx) => {
                self.accounts
                    .insert(idx, AccountEntry::new(id, AccountState::new_empty()));
                idx
            }
        };
        &mut self.accounts[idx].state
    }

    /// Iterates over all accounts in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &AccountState)> {
        self.accounts.iter().map(|e| (&e.id, &e.state))
    }
}

#[derive(Clone, Debug, Eq, PartialEq, BorshSerialize, BorshDeserialize)]
struct AccountEntry {
    id: AccountId,
    state: AccountState,
}

impl AccountEntry {
    fn new(id: AccountId, state: AccountState) -> Self {
        Self { id, state }
    }
}
