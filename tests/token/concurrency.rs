//! Many threads driving one token through a shared handle.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    thread,
};

use borsh as _;
use integration_tests::common::*;
use serde_json as _;
use votecoin_history as _;
use votecoin_identifiers::TokenAmount;
use votecoin_params::TokenParams;
use votecoin_state_types::TokenState;
use votecoin_stf::{ExecError, TokenHandle, TokenTx, TxInfo, votes};

const WORKERS: u8 = 8;
const ROUNDS: u64 = 50;

#[test]
fn test_parallel_transfers_conserve_supply() {
    let owner = account(1);
    let mut params = TokenParams::new(owner);
    for i in 0..WORKERS {
        params = params.with_allocation(account(10 + i), tokens(1_000));
    }
    let state = TokenState::from_params(&params, 0).unwrap();
    let handle = TokenHandle::new(state);
    for i in 0..WORKERS {
        let me = account(10 + i);
        handle
            .submit(&TxInfo::new(me, 1), &TokenTx::Delegate { to: me })
            .unwrap();
    }

    // Blocks only move forward, whichever thread gets there first.
    let clock = Arc::new(AtomicU64::new(1));

    let workers: Vec<_> = (0..WORKERS)
        .map(|i| {
            let handle = handle.clone();
            let clock = clock.clone();
            thread::spawn(move || {
                let me = account(10 + i);
                let next = account(10 + (i + 1) % WORKERS);

                let mut accepted = 0u64;
                for _ in 0..ROUNDS {
                    let block = clock.fetch_add(1, Ordering::SeqCst);
                    let tx = TokenTx::Transfer {
                        to: next,
                        amount: tokens(1),
                    };
                    match handle.submit(&TxInfo::new(me, block), &tx) {
                        Ok(_) => accepted += 1,
                        // Lost the race for the clock to a later block.
                        Err(ExecError::ClockRegression { .. }) => {}
                        Err(e) => panic!("test: unexpected error {e}"),
                    }
                }
                accepted
            })
        })
        .collect();

    let mut accepted = 0;
    for w in workers {
        accepted += w.join().unwrap();
    }
    assert!(accepted > 0);

    let state = handle.clone_state();
    let token = TokenHarness::from_state(state, clock.load(Ordering::SeqCst));
    token.assert_consistent();

    let total = tokens(1_000 * u128::from(WORKERS));
    assert_eq!(token.state().total_supply(), total);

    let mut votes_sum = TokenAmount::ZERO;
    for i in 0..WORKERS {
        votes_sum = votes_sum
            .checked_add(votes::get_votes(token.state(), &account(10 + i)))
            .unwrap();
    }
    assert_eq!(votes_sum, total);
}
