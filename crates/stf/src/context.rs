//! Context types for tracking state across an operation.

use votecoin_identifiers::{AccountId, BlockNumber};
use votecoin_state_types::TokenState;

use crate::{
    errors::{ExecError, ExecResult},
    logs::TokenLog,
    output::{ExecOutput, ExecOutputBuffer, OutputCtx},
};

/// Information about the operation we can know in advance of executing it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TxInfo {
    caller: AccountId,
    block: BlockNumber,
}

impl TxInfo {
    pub fn new(caller: AccountId, block: BlockNumber) -> Self {
        Self { caller, block }
    }

    /// The account invoking the operation.
    pub fn caller(&self) -> AccountId {
        self.caller
    }

    /// The block the operation is executed in.
    pub fn block(&self) -> BlockNumber {
        self.block
    }
}

/// Context for executing operations, collecting their logs.
///
/// Logs are only emitted once an operation has passed all its checks, so a
/// failed operation leaves the buffer as it found it.
#[derive(Clone, Debug)]
pub struct TxExecContext {
    info: TxInfo,
    output: ExecOutputBuffer,
}

impl TxExecContext {
    pub fn new(info: TxInfo) -> Self {
        Self {
            info,
            output: ExecOutputBuffer::new_empty(),
        }
    }

    pub fn info(&self) -> &TxInfo {
        &self.info
    }

    pub fn caller(&self) -> AccountId {
        self.info.caller()
    }

    pub fn block(&self) -> BlockNumber {
        self.info.block()
    }

    /// Rejects executing in a block before the last committed one.
    pub fn check_clock(&self, state: &TokenState) -> ExecResult<()> {
        let last = state.last_block();
        if self.block() < last {
            return Err(ExecError::ClockRegression {
                last,
                got: self.block(),
            });
        }
        Ok(())
    }

    /// Marks an operation as committed in the current block.
    pub(crate) fn commit(&self, state: &mut TokenState) {
        state.set_last_block(self.block());
    }

    pub fn into_output(self) -> ExecOutput {
        self.output.into_output()
    }
}

impl OutputCtx for TxExecContext {
    fn emit_logs(&self, logs: impl IntoIterator<Item = TokenLog>) {
        self.output.emit_logs(logs);
    }
}
