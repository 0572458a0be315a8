//! Operation scripts and their execution.

use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::*;
use votecoin_identifiers::{AccountId, BlockNumber};
use votecoin_state_types::TokenState;
use votecoin_stf::{ExecError, TokenLog, TokenTx, TxInfo, process_tx};

/// One operation of a script, as `{"caller": .., "block": .., "op": .., ...}`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub(crate) struct ScriptStep {
    pub(crate) caller: AccountId,
    pub(crate) block: BlockNumber,
    #[serde(flatten)]
    pub(crate) tx: TokenTx,
}

/// Loads a script, a JSON array of steps.
pub(crate) fn load_script(path: &Path) -> anyhow::Result<Vec<ScriptStep>> {
    let buf = fs::read_to_string(path).with_context(|| format!("reading script {path:?}"))?;
    let steps = serde_json::from_str(&buf).with_context(|| format!("parsing script {path:?}"))?;
    Ok(steps)
}

/// What happened to a step.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct StepOutcome {
    pub(crate) step: usize,
    pub(crate) block: BlockNumber,
    pub(crate) caller: AccountId,
    pub(crate) op: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) logs: Option<Vec<TokenLog>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

impl StepOutcome {
    fn new(step: usize, s: &ScriptStep, res: Result<Vec<TokenLog>, ExecError>) -> Self {
        let (logs, error) = match res {
            Ok(logs) => (Some(logs), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            step,
            block: s.block,
            caller: s.caller,
            op: s.tx.name(),
            logs,
            error,
        }
    }

    pub(crate) fn is_rejected(&self) -> bool {
        self.error.is_some()
    }
}

/// Executes steps in order, stopping after the first rejected one unless
/// `keep_going` is set.
pub(crate) fn execute_script(
    state: &mut TokenState,
    steps: &[ScriptStep],
    keep_going: bool,
) -> Vec<StepOutcome> {
    let mut outcomes = Vec::with_capacity(steps.len());

    for (i, step) in steps.iter().enumerate() {
        let info = TxInfo::new(step.caller, step.block);
        let res = process_tx(state, &info, &step.tx).map(|out| out.into_logs());
        if let Err(e) = &res {
            warn!(step = i, op = step.tx.name(), %e, "operation rejected");
        }

        let outcome = StepOutcome::new(i, step, res);
        let stop = outcome.is_rejected() && !keep_going;
        outcomes.push(outcome);
        if stop {
            break;
        }
    }

    outcomes
}
