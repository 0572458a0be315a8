//! Token state survives a borsh round trip mid-history.

use borsh::{BorshDeserialize, to_vec};
use integration_tests::common::*;
use serde_json as _;
use votecoin_history::Checkpoint;
use votecoin_identifiers::SnapshotId;
use votecoin_params::TokenParams;
use votecoin_state_types::TokenState;
use votecoin_stf::{TokenTx, snapshot, votes};

fn busy_token() -> TokenHarness {
    let owner = account(1);
    let a = account(2);
    let b = account(3);

    let params = TokenParams::new(owner).with_allocation(owner, tokens(1_000));
    let mut token = TokenHarness::new(&params);

    token.exec(owner, TokenTx::Delegate { to: owner }).unwrap();
    token
        .exec(
            owner,
            TokenTx::Approve {
                spender: a,
                amount: tokens(300),
            },
        )
        .unwrap();
    token.exec_next(owner, TokenTx::Snapshot).unwrap();
    token
        .exec_next(
            a,
            TokenTx::TransferFrom {
                from: owner,
                to: b,
                amount: tokens(200),
            },
        )
        .unwrap();
    token.exec_next(b, TokenTx::Delegate { to: a }).unwrap();
    token
}

#[test]
fn test_state_round_trip_keeps_history() {
    let token = busy_token();
    let encoded = to_vec(token.state()).unwrap();
    let decoded = TokenState::try_from_slice(&encoded).unwrap();
    assert_eq!(&decoded, token.state());

    let owner = account(1);
    let a = account(2);
    let b = account(3);
    let s1 = SnapshotId::new(1);

    assert_eq!(snapshot::balance_of_at(&decoded, &owner, s1), Ok(tokens(1_000)));
    assert_eq!(snapshot::balance_of_at(&decoded, &b, s1), Ok(tokens(0)));
    assert_eq!(decoded.allowance(&owner, &a), tokens(100));
    assert_eq!(votes::get_votes(&decoded, &a), tokens(200));
    assert_eq!(
        votes::checkpoint_at(&decoded, &owner, 0),
        Some(Checkpoint::new(1, tokens(1_000)))
    );
}

#[test]
fn test_decoded_state_continues_identically() {
    let token = busy_token();
    let block = token.block();
    let decoded =
        TokenState::try_from_slice(&to_vec(token.state()).unwrap()).unwrap();

    let mut original = token;
    let mut restored = TokenHarness::from_state(decoded, block);

    for t in [&mut original, &mut restored] {
        t.exec_next(
            account(3),
            TokenTx::Transfer {
                to: account(1),
                amount: tokens(50),
            },
        )
        .unwrap();
        t.exec_next(account(1), TokenTx::Snapshot).unwrap();
        t.assert_consistent();
    }

    assert_eq!(original.state(), restored.state());
    assert_eq!(votes::get_votes(restored.state(), &account(2)), tokens(150));
}
