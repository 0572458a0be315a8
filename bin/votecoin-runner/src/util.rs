//! Subcommand implementations for the `votecoin-runner` binary.

use std::{fs, path::Path, str::FromStr};

use anyhow::Context;
use tracing::*;
use votecoin_identifiers::{AccountId, SnapshotId, TokenAmount};
use votecoin_params::TokenParams;
use votecoin_state_types::TokenState;

use crate::{
    args::{SubcParams, SubcRun, Subcommand},
    report::build_report,
    script::{execute_script, load_script},
};

pub(super) fn exec_subc(cmd: Subcommand) -> anyhow::Result<()> {
    match cmd {
        Subcommand::Params(subc) => exec_genparams(subc),
        Subcommand::Run(subc) => exec_run(subc),
    }
}

/// Parses a genesis allocation given as `ACCOUNT:AMOUNT`, the amount in whole
/// tokens.
pub(crate) fn parse_allocation(s: &str) -> anyhow::Result<(AccountId, TokenAmount)> {
    let (acct, amt) = s
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("allocation must be ACCOUNT:AMOUNT, got {s:?}"))?;
    let acct = AccountId::from_str(acct.trim())?;
    let amt = TokenAmount::parse_units(amt.trim())?;
    Ok((acct, amt))
}

/// Executes the `genparams` subcommand.
///
/// Either writes to a file or prints to stdout depending on the provided options.
fn exec_genparams(cmd: SubcParams) -> anyhow::Result<()> {
    let owner = AccountId::from_str(cmd.owner.trim())?;
    let mut params = TokenParams::new(owner);

    if let Some(name) = cmd.name {
        params.name = name;
    }
    if let Some(symbol) = cmd.symbol {
        params.symbol = symbol;
    }
    if let Some(max_supply) = &cmd.max_supply {
        params = params.with_max_supply(TokenAmount::parse_units(max_supply)?);
    }

    for alloc in &cmd.alloc {
        let (acct, amt) = parse_allocation(alloc)?;
        params = params.with_allocation(acct, amt);
    }

    if let Err(e) = params.validate() {
        anyhow::bail!("failed to construct params: {e}");
    }
    let params_buf = params.to_json_pretty()?;

    if let Some(out_path) = &cmd.output {
        fs::write(out_path, params_buf)?;
        eprintln!("wrote to file {out_path:?}");
    } else {
        println!("{params_buf}");
    }

    Ok(())
}

pub(crate) fn load_params(path: &Path) -> anyhow::Result<TokenParams> {
    let buf = fs::read_to_string(path).with_context(|| format!("reading params {path:?}"))?;
    let params = TokenParams::from_json(&buf).with_context(|| format!("parsing params {path:?}"))?;
    Ok(params)
}

/// Executes the `run` subcommand.
///
/// Prints one JSON line per executed step, then a summary of the final state.
fn exec_run(cmd: SubcRun) -> anyhow::Result<()> {
    let params = load_params(&cmd.params)?;
    let steps = load_script(&cmd.script)?;
    let mut state = TokenState::from_params(&params, cmd.genesis_block.unwrap_or(0))?;

    info!(steps = steps.len(), symbol = %params.symbol, "running script");
    let outcomes = execute_script(&mut state, &steps, cmd.keep_going);
    for outcome in &outcomes {
        println!("{}", serde_json::to_string(outcome)?);
    }

    let rejected = outcomes.iter().filter(|o| o.is_rejected()).count();
    info!(executed = outcomes.len(), %rejected, "finished script");

    let report = build_report(&state, cmd.at_snapshot.map(SnapshotId::new), cmd.at_block)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if rejected > 0 && !cmd.keep_going {
        anyhow::bail!("script stopped at a rejected operation");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allocation() {
        let (acct, amt) =
            parse_allocation("0x0000000000000000000000000000000000000007:1.5").unwrap();
        assert_eq!(acct.inner()[19], 7);
        assert_eq!(amt.format_units(), "1.5");

        assert!(parse_allocation("0x07").is_err());
        assert!(parse_allocation("0x07:1").is_err());
        assert!(parse_allocation("0x0000000000000000000000000000000000000007:x").is_err());
    }

    #[test]
    fn test_load_params_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");

        let owner = AccountId::from([1; 20]);
        let params = TokenParams::new(owner).with_allocation(owner, TokenAmount::from_whole(5));
        fs::write(&path, params.to_json().unwrap()).unwrap();
        assert_eq!(load_params(&path).unwrap(), params);

        fs::write(&path, "{}").unwrap();
        assert!(load_params(&path).is_err());
    }
}
