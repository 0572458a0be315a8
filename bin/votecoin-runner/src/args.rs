//! Command line arguments for the `votecoin-runner` binary.

use std::path::PathBuf;

use argh::FromArgs;

/// Args.
#[derive(FromArgs)]
pub(crate) struct Args {
    #[argh(switch, description = "emit logs as JSON")]
    pub(crate) json_logs: bool,

    #[argh(option, description = "also write logs to files in this directory")]
    pub(crate) log_dir: Option<PathBuf>,

    #[argh(
        option,
        description = "extra log filter directive, e.g. votecoin_stf=trace"
    )]
    pub(crate) log_directive: Vec<String>,

    #[argh(subcommand)]
    pub(crate) subc: Subcommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Subcommand {
    Params(SubcParams),
    Run(SubcRun),
}

/// Generate a token's param file from inputs.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "genparams",
    description = "generates token params from inputs"
)]
pub(crate) struct SubcParams {
    #[argh(
        option,
        description = "output file path .json (default stdout)",
        short = 'o'
    )]
    pub(crate) output: Option<PathBuf>,

    #[argh(option, description = "owner account, hex", short = 'w')]
    pub(crate) owner: String,

    #[argh(option, description = "token name (default \"TestCoin\")", short = 'n')]
    pub(crate) name: Option<String>,

    #[argh(option, description = "token symbol (default \"TST\")", short = 's')]
    pub(crate) symbol: Option<String>,

    #[argh(
        option,
        description = "max supply in whole tokens (default 100000000000)"
    )]
    pub(crate) max_supply: Option<String>,

    #[argh(
        option,
        description = "genesis allocation as ACCOUNT:AMOUNT in whole tokens, repeatable",
        short = 'a'
    )]
    pub(crate) alloc: Vec<String>,
}

/// Replay a script of operations against a fresh token.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "run",
    description = "executes a JSON script of operations and prints their logs"
)]
pub(crate) struct SubcRun {
    #[argh(option, description = "params file path .json", short = 'p')]
    pub(crate) params: PathBuf,

    #[argh(option, description = "script file path .json", short = 's')]
    pub(crate) script: PathBuf,

    #[argh(option, description = "genesis block number (default 0)", short = 'g')]
    pub(crate) genesis_block: Option<u64>,

    #[argh(switch, description = "keep going after a rejected operation")]
    pub(crate) keep_going: bool,

    #[argh(option, description = "also report balances as of this snapshot id")]
    pub(crate) at_snapshot: Option<u64>,

    #[argh(option, description = "also report votes as of this past block")]
    pub(crate) at_block: Option<u64>,
}
