//! Final state summary printed after a run.

use serde::Serialize;
use votecoin_identifiers::{AccountId, BlockNumber, SnapshotId, TokenAmount};
use votecoin_state_types::TokenState;
use votecoin_stf::{ExecResult, access, snapshot, votes};

#[derive(Debug, Serialize)]
pub(crate) struct Report {
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: TokenAmount,
    max_supply: TokenAmount,
    owner: Option<AccountId>,
    last_block: BlockNumber,
    current_snapshot: SnapshotId,
    accounts: Vec<AccountReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<SnapshotReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    past: Option<PastReport>,
}

#[derive(Debug, Serialize)]
struct AccountReport {
    account: AccountId,
    balance: TokenAmount,
    votes: TokenAmount,
    delegate: Option<AccountId>,
    checkpoints: usize,
}

#[derive(Debug, Serialize)]
struct AccountAmount {
    account: AccountId,
    amount: TokenAmount,
}

#[derive(Debug, Serialize)]
struct SnapshotReport {
    id: SnapshotId,
    total_supply: TokenAmount,
    balances: Vec<AccountAmount>,
}

#[derive(Debug, Serialize)]
struct PastReport {
    block: BlockNumber,
    total_supply: TokenAmount,
    votes: Vec<AccountAmount>,
}

/// Summarizes the state, with optional historical views.
///
/// Past queries treat the block after the last committed one as current.
pub(crate) fn build_report(
    state: &TokenState,
    at_snapshot: Option<SnapshotId>,
    at_block: Option<BlockNumber>,
) -> ExecResult<Report> {
    let ids: Vec<AccountId> = state.accounts().iter().map(|(id, _)| *id).collect();

    let accounts = ids
        .iter()
        .map(|id| AccountReport {
            account: *id,
            balance: state.balance_of(id),
            votes: votes::get_votes(state, id),
            delegate: votes::delegates(state, id),
            checkpoints: votes::num_checkpoints(state, id),
        })
        .collect();

    let snapshot_view = match at_snapshot {
        Some(id) => {
            let balances = ids
                .iter()
                .map(|a| {
                    Ok(AccountAmount {
                        account: *a,
                        amount: snapshot::balance_of_at(state, a, id)?,
                    })
                })
                .collect::<ExecResult<_>>()?;
            Some(SnapshotReport {
                id,
                total_supply: snapshot::total_supply_at(state, id)?,
                balances,
            })
        }
        None => None,
    };

    // The script is over, so no block up to the last one can change anymore.
    let cur_block = state.last_block().saturating_add(1);
    let past_view = match at_block {
        Some(block) => {
            let past_votes = ids
                .iter()
                .map(|a| {
                    Ok(AccountAmount {
                        account: *a,
                        amount: votes::get_past_votes(state, cur_block, a, block)?,
                    })
                })
                .collect::<ExecResult<_>>()?;
            Some(PastReport {
                block,
                total_supply: votes::get_past_total_supply(state, cur_block, block)?,
                votes: past_votes,
            })
        }
        None => None,
    };

    let meta = state.metadata();
    Ok(Report {
        name: meta.name().to_owned(),
        symbol: meta.symbol().to_owned(),
        decimals: meta.decimals(),
        total_supply: state.total_supply(),
        max_supply: state.max_supply(),
        owner: access::owner(state),
        last_block: state.last_block(),
        current_snapshot: snapshot::current_snapshot_id(state),
        accounts,
        snapshot: snapshot_view,
        past: past_view,
    })
}
