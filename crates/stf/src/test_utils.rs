//! Test utilities for the token STF.

#![allow(unreachable_pub, reason = "test util module")]

use votecoin_identifiers::{ACCT_ID_LEN, AccountId, BlockNumber, TokenAmount};
use votecoin_params::TokenParams;
use votecoin_state_types::TokenState;

use crate::{
    ExecResult,
    context::TxInfo,
    logs::TokenLog,
    tx::{TokenTx, process_tx},
    votes,
};

/// Genesis balance of the owner, in whole tokens.
pub const GENESIS_TOKENS: u128 = 10_000_000;

/// Create test account IDs with predictable values.
pub fn test_account_id(index: u32) -> AccountId {
    let mut bytes = [0u8; ACCT_ID_LEN];
    bytes[0..4].copy_from_slice(&index.to_le_bytes());
    AccountId::from(bytes)
}

pub fn owner() -> AccountId {
    test_account_id(1)
}

pub fn alice() -> AccountId {
    test_account_id(2)
}

pub fn bob() -> AccountId {
    test_account_id(3)
}

pub fn carol() -> AccountId {
    test_account_id(4)
}

pub fn tokens(whole: u128) -> TokenAmount {
    TokenAmount::from_whole(whole)
}

/// Builds a state where the owner holds [`GENESIS_TOKENS`] as of block 0.
pub fn genesis_state() -> TokenState {
    let params = TokenParams::new(owner()).with_allocation(owner(), tokens(GENESIS_TOKENS));
    TokenState::from_params(&params, 0).expect("test: genesis params")
}

/// Builds a state with no genesis supply.
pub fn empty_state() -> TokenState {
    let params = TokenParams::new(owner());
    TokenState::from_params(&params, 0).expect("test: empty params")
}

/// Executes a tx, returning its logs.
pub fn exec(
    state: &mut TokenState,
    caller: AccountId,
    block: BlockNumber,
    tx: TokenTx,
) -> ExecResult<Vec<TokenLog>> {
    let info = TxInfo::new(caller, block);
    process_tx(state, &info, &tx).map(|out| out.into_logs())
}

/// Executes a tx that is expected to succeed.
pub fn exec_ok(
    state: &mut TokenState,
    caller: AccountId,
    block: BlockNumber,
    tx: TokenTx,
) -> Vec<TokenLog> {
    exec(state, caller, block, tx).expect("test: exec tx")
}

/// Checks the accounting invariants that must hold after every operation.
pub fn assert_ledger_invariants(state: &TokenState) {
    let mut balances = TokenAmount::ZERO;
    let mut delegated = TokenAmount::ZERO;
    let mut votes_sum = TokenAmount::ZERO;

    for (id, acct) in state.accounts().iter() {
        balances = balances.checked_add(acct.balance()).expect("test: balance sum");
        if acct.delegate().is_some() {
            delegated = delegated
                .checked_add(acct.balance())
                .expect("test: delegated sum");
        }
        votes_sum = votes_sum
            .checked_add(votes::get_votes(state, id))
            .expect("test: votes sum");
    }

    assert_eq!(balances, state.total_supply(), "test: supply != sum of balances");
    assert_eq!(votes_sum, delegated, "test: votes != delegated balances");
    assert!(state.total_supply() <= state.max_supply(), "test: supply above cap");
    assert_eq!(
        state.total_supply_checkpoints().latest(),
        state.total_supply(),
        "test: stale supply checkpoint"
    );
}
