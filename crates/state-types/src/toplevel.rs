//! Toplevel state.

use borsh::{BorshDeserialize, BorshSerialize};
use votecoin_history::{CheckpointTrace, SnapshotRegistry};
use votecoin_identifiers::{AccountId, BlockNumber, TokenAmount};
use votecoin_params::{ParamsResult, TokenParams};

use crate::{account::AccountState, ledger::LedgerAccountsTable};

/// Descriptive token metadata, fixed at initialization.
#[derive(Clone, Debug, Eq, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct TokenMetadata {
    name: String,
    symbol: String,
    decimals: u8,
}

impl TokenMetadata {
    pub fn new(name: String, symbol: String, decimals: u8) -> Self {
        Self {
            name,
            symbol,
            decimals,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }
}

/// The whole token state.
///
/// Mutated only by the state transition functions, one operation at a time.
#[derive(Clone, Debug, Eq, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct TokenState {
    metadata: TokenMetadata,
    max_supply: TokenAmount,
    total_supply: TokenAmount,

    /// `None` once ownership has been renounced.
    owner: Option<AccountId>,

    accounts: LedgerAccountsTable,
    snapshots: SnapshotRegistry,
    total_supply_checkpoints: CheckpointTrace,

    /// Block of the last committed operation.
    last_block: BlockNumber,
}

impl TokenState {
    /// Builds the initial state from params, crediting genesis allocations
    /// as of `genesis_block`.
    pub fn from_params(params: &TokenParams, genesis_block: BlockNumber) -> ParamsResult<Self> {
        params.validate()?;

        let mut accounts = LedgerAccountsTable::new_empty();
        for alloc in &params.genesis_allocations {
            let acct = accounts.get_or_create_account_mut(alloc.account);
            // `validate` bounds the sum by the cap, so this can't overflow.
            let bal = acct.balance().checked_add(alloc.amount).unwrap_or(TokenAmount::MAX);
            acct.set_balance(bal);
        }

        let total_supply = params.genesis_supply()?;
        let total_supply_checkpoints = if total_supply.is_zero() {
            CheckpointTrace::new_empty()
        } else {
            CheckpointTrace::new_initial(genesis_block, total_supply)
        };

        Ok(Self {
            metadata: TokenMetadata::new(
                params.name.clone(),
                params.symbol.clone(),
                params.decimals(),
            ),
            max_supply: params.max_supply,
            total_supply,
            owner: Some(params.owner),
            accounts,
            snapshots: SnapshotRegistry::new_empty(),
            total_supply_checkpoints,
            last_block: genesis_block,
        })
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn max_supply(&self) -> TokenAmount {
        self.max_supply
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    pub fn set_total_supply(&mut self, total_supply: TokenAmount) {
        self.total_supply = total_supply;
    }

    pub fn owner(&self) -> Option<AccountId> {
        self.owner
    }

    pub fn set_owner(&mut self, owner: Option<AccountId>) {
        self.owner = owner;
    }

    pub fn accounts(&self) -> &LedgerAccountsTable {
        &self.accounts
    }

    pub fn get_account_state(&self, id: &AccountId) -> Option<&AccountState> {
        self.accounts.get_account_state(id)
    }

    pub fn get_or_create_account_mut(&mut self, id: AccountId) -> &mut AccountState {
        self.accounts.get_or_create_account_mut(id)
    }

    pub fn balance_of(&self, id: &AccountId) -> TokenAmount {
        self.get_account_state(id)
            .map(AccountState::balance)
            .unwrap_or(TokenAmount::ZERO)
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> TokenAmount {
        self.get_account_state(owner)
            .map(|a| a.allowance(spender))
            .unwrap_or(TokenAmount::ZERO)
    }

    pub fn delegate_of(&self, id: &AccountId) -> Option<AccountId> {
        self.get_account_state(id).and_then(AccountState::delegate)
    }

    pub fn votes_of(&self, id: &AccountId) -> Option<&CheckpointTrace> {
        self.get_account_state(id).map(AccountState::votes)
    }

    pub fn snapshots(&self) -> &SnapshotRegistry {
        &self.snapshots
    }

    pub fn snapshots_mut(&mut self) -> &mut SnapshotRegistry {
        &mut self.snapshots
    }

    pub fn total_supply_checkpoints(&self) -> &CheckpointTrace {
        &self.total_supply_checkpoints
    }

    pub fn total_supply_checkpoints_mut(&mut self) -> &mut CheckpointTrace {
        &mut self.total_supply_checkpoints
    }

    pub fn last_block(&self) -> BlockNumber {
        self.last_block
    }

    pub fn set_last_block(&mut self, block: BlockNumber) {
        self.last_block = block;
    }
}
