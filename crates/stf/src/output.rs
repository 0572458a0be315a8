//! Log collection for executing operations.

use std::{cell::RefCell, iter};

use crate::logs::TokenLog;

/// Logs emitted so far by the operation being executed.
///
/// Operations share the context by `&`, hence the interior mutability.
#[derive(Clone, Debug)]
pub struct ExecOutputBuffer {
    // TODO switch to a plain Vec if the ledger, votes and snapshot ops move
    // to taking `&mut TxExecContext`
    logs: RefCell<Vec<TokenLog>>,
}

impl ExecOutputBuffer {
    fn new(logs: Vec<TokenLog>) -> Self {
        Self {
            logs: RefCell::new(logs),
        }
    }

    pub fn new_empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn emit_logs(&self, iter: impl IntoIterator<Item = TokenLog>) {
        let mut logs = self.logs.borrow_mut();
        logs.extend(iter);
    }

    pub fn into_output(self) -> ExecOutput {
        ExecOutput::new(self.logs.into_inner())
    }
}

/// Sink for the logs of an operation.
pub trait OutputCtx {
    /// Records some logs.
    fn emit_logs(&self, logs: impl IntoIterator<Item = TokenLog>);

    /// Records a single log.
    fn emit_log(&self, log: TokenLog) {
        self.emit_logs(iter::once(log));
    }
}

/// What a successful operation produced.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExecOutput {
    logs: Vec<TokenLog>,
}

impl ExecOutput {
    pub fn new(logs: Vec<TokenLog>) -> Self {
        Self { logs }
    }

    /// Logs in emission order.
    pub fn logs(&self) -> &[TokenLog] {
        &self.logs
    }

    pub fn into_logs(self) -> Vec<TokenLog> {
        self.logs
    }
}
