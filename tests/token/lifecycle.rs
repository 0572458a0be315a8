//! Reference deployment flow: mint, transfer, snapshot, allowance, delegation
//! and ownership handover.

use borsh as _;
use integration_tests::common::*;
use serde_json::json;
use votecoin_history as _;
use votecoin_identifiers::{AccountId, SnapshotId};
use votecoin_params as _;
use votecoin_state_types as _;
use votecoin_stf::{ExecError, TokenLog, TokenTx, snapshot, votes};

#[test]
fn test_reference_deployment() {
    let owner = account(1);
    let addr1 = account(2);
    let addr2 = account(3);

    let mut token = TokenHarness::from_json(REFERENCE_PARAMS_JSON);
    assert_eq!(token.state().metadata().name(), "TestCoin");
    assert_eq!(token.state().metadata().symbol(), "TST");
    assert_eq!(token.state().metadata().decimals(), 18);
    assert_eq!(token.state().balance_of(&owner), tokens(10_000_000));
    assert_eq!(token.state().total_supply(), tokens(10_000_000));

    token
        .exec(
            owner,
            TokenTx::Mint {
                to: addr1,
                amount: tokens(100),
            },
        )
        .unwrap();
    assert_eq!(token.state().balance_of(&addr1), tokens(100));
    assert_eq!(
        token.state().max_supply().to_string(),
        "100000000000000000000000000000"
    );

    let logs = token
        .exec_next(
            addr1,
            TokenTx::Transfer {
                to: addr2,
                amount: tokens(10),
            },
        )
        .unwrap();
    let first = serde_json::to_value(&logs[0]).unwrap();
    assert_eq!(first["value"], json!("10000000000000000000"));

    token.exec_next(owner, TokenTx::Snapshot).unwrap();
    let supply = snapshot::total_supply_at(token.state(), SnapshotId::new(1)).unwrap();
    assert_eq!(supply.format_units(), "10000100.0");

    token
        .exec_next(
            owner,
            TokenTx::Approve {
                spender: addr1,
                amount: tokens(10),
            },
        )
        .unwrap();
    let logs = token
        .exec_next(
            addr1,
            TokenTx::TransferFrom {
                from: owner,
                to: addr1,
                amount: tokens(10),
            },
        )
        .unwrap();
    assert_eq!(
        logs[1],
        TokenLog::Transfer {
            from: owner,
            to: addr1,
            value: tokens(10),
        }
    );

    token
        .exec_next(owner, TokenTx::Delegate { to: owner })
        .unwrap();
    let delegated_at = token.block();
    assert_eq!(
        votes::get_votes(token.state(), &owner).to_string(),
        "9999990000000000000000000"
    );

    token
        .exec_next(
            owner,
            TokenTx::Mint {
                to: addr2,
                amount: tokens(1_000),
            },
        )
        .unwrap();
    let cur = token.advance();
    let past = votes::get_past_votes(token.state(), cur, &owner, delegated_at).unwrap();
    assert_eq!(past.format_units(), "9999990.0");

    let logs = token
        .exec(owner, TokenTx::TransferOwnership { new_owner: addr1 })
        .unwrap();
    assert_eq!(
        logs,
        vec![TokenLog::OwnershipTransferred {
            previous_owner: owner,
            new_owner: addr1,
        }]
    );

    let res = token.exec(addr2, TokenTx::TransferOwnership { new_owner: addr2 });
    assert_eq!(res, Err(ExecError::Unauthorized(addr2)));

    token.assert_consistent();
}

#[test]
fn test_snapshot_survives_later_activity() {
    let owner = account(1);
    let holder = account(2);
    let mut token = TokenHarness::from_json(REFERENCE_PARAMS_JSON);

    token
        .exec(
            owner,
            TokenTx::Transfer {
                to: holder,
                amount: tokens(500),
            },
        )
        .unwrap();
    token.exec_next(owner, TokenTx::Snapshot).unwrap();

    for _ in 0..5 {
        token
            .exec_next(
                holder,
                TokenTx::Burn {
                    amount: tokens(50),
                },
            )
            .unwrap();
    }
    token.exec_next(owner, TokenTx::Snapshot).unwrap();

    let s1 = SnapshotId::new(1);
    let s2 = SnapshotId::new(2);
    let state = token.state();
    assert_eq!(snapshot::balance_of_at(state, &holder, s1), Ok(tokens(500)));
    assert_eq!(snapshot::balance_of_at(state, &holder, s2), Ok(tokens(250)));
    assert_eq!(
        snapshot::total_supply_at(state, s2),
        Ok(tokens(10_000_000 - 250))
    );
    assert_eq!(
        snapshot::balance_of_at(state, &AccountId::zero(), s1),
        Ok(tokens(0))
    );
}

#[test]
fn test_renounced_token_is_frozen_for_owner_ops() {
    let owner = account(1);
    let mut token = TokenHarness::from_json(REFERENCE_PARAMS_JSON);

    token.exec(owner, TokenTx::RenounceOwnership).unwrap();

    for tx in [
        TokenTx::Snapshot,
        TokenTx::Mint {
            to: owner,
            amount: tokens(1),
        },
        TokenTx::TransferOwnership { new_owner: owner },
    ] {
        assert_eq!(
            token.exec_next(owner, tx),
            Err(ExecError::Unauthorized(owner))
        );
    }

    // Regular holder operations keep working.
    token
        .exec_next(
            owner,
            TokenTx::Transfer {
                to: account(9),
                amount: tokens(1),
            },
        )
        .unwrap();
    token.assert_consistent();
}
