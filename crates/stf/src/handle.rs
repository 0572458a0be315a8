//! Shared access to a token for multi-threaded hosts.

use std::sync::Arc;

use parking_lot::Mutex;
use votecoin_state_types::TokenState;

use crate::{
    context::TxInfo,
    errors::ExecResult,
    output::ExecOutput,
    tx::{TokenTx, process_tx},
};

/// Cloneable handle serializing all operations on one token state.
///
/// Each operation holds the lock for its whole execution, so concurrent
/// callers observe operations as if applied one at a time.
#[derive(Clone, Debug)]
pub struct TokenHandle {
    state: Arc<Mutex<TokenState>>,
}

impl TokenHandle {
    pub fn new(state: TokenState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Executes an operation against the shared state.
    pub fn submit(&self, info: &TxInfo, tx: &TokenTx) -> ExecResult<ExecOutput> {
        let mut state = self.state.lock();
        process_tx(&mut state, info, tx)
    }

    /// Runs a read-only query against a consistent view of the state.
    pub fn read<R>(&self, f: impl FnOnce(&TokenState) -> R) -> R {
        let state = self.state.lock();
        f(&state)
    }

    /// Returns a copy of the current state, taken under the lock.
    pub fn clone_state(&self) -> TokenState {
        self.state.lock().clone()
    }
}
