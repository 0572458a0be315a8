//! Shared harness for driving a token through a sequence of blocks.

use votecoin_identifiers::{ACCT_ID_LEN, AccountId, BlockNumber, TokenAmount};
use votecoin_params::TokenParams;
use votecoin_state_types::TokenState;
use votecoin_stf::{ExecResult, TokenLog, TokenTx, TxInfo, process_tx};

/// Params of the reference deployment: the owner holds 10 million tokens
/// under the default cap.
pub const REFERENCE_PARAMS_JSON: &str = r#"{
    "name": "TestCoin",
    "symbol": "TST",
    "owner": "0000000000000000000000000000000000000001",
    "genesis_allocations": [
        { "account": "0000000000000000000000000000000000000001", "amount": "10000000" }
    ]
}"#;

/// Account with the given index in its last byte.
pub fn account(index: u8) -> AccountId {
    let mut bytes = [0u8; ACCT_ID_LEN];
    bytes[ACCT_ID_LEN - 1] = index;
    AccountId::from(bytes)
}

pub fn tokens(whole: u128) -> TokenAmount {
    TokenAmount::from_whole(whole)
}

/// Token state with a block clock.
#[derive(Debug)]
pub struct TokenHarness {
    state: TokenState,
    block: BlockNumber,
}

impl TokenHarness {
    pub fn new(params: &TokenParams) -> Self {
        let state = TokenState::from_params(params, 0).expect("test: genesis");
        Self { state, block: 1 }
    }

    pub fn from_json(json: &str) -> Self {
        let params = TokenParams::from_json(json).expect("test: parse params");
        Self::new(&params)
    }

    pub fn from_state(state: TokenState, block: BlockNumber) -> Self {
        Self { state, block }
    }

    pub fn state(&self) -> &TokenState {
        &self.state
    }

    pub fn block(&self) -> BlockNumber {
        self.block
    }

    /// Moves to the next block.
    pub fn advance(&mut self) -> BlockNumber {
        self.block += 1;
        self.block
    }

    /// Executes a tx in the current block.
    pub fn exec(&mut self, caller: AccountId, tx: TokenTx) -> ExecResult<Vec<TokenLog>> {
        let info = TxInfo::new(caller, self.block);
        process_tx(&mut self.state, &info, &tx).map(|out| out.into_logs())
    }

    /// Executes a tx in its own block.
    pub fn exec_next(&mut self, caller: AccountId, tx: TokenTx) -> ExecResult<Vec<TokenLog>> {
        self.advance();
        self.exec(caller, tx)
    }

    /// Checks supply and vote accounting.
    pub fn assert_consistent(&self) {
        let mut balances = TokenAmount::ZERO;
        let mut delegated = TokenAmount::ZERO;
        let mut votes = TokenAmount::ZERO;
        for (_, acct) in self.state.accounts().iter() {
            balances = balances.checked_add(acct.balance()).unwrap();
            if acct.delegate().is_some() {
                delegated = delegated.checked_add(acct.balance()).unwrap();
            }
            votes = votes.checked_add(acct.votes().latest()).unwrap();
        }
        assert_eq!(balances, self.state.total_supply());
        assert_eq!(votes, delegated);
    }
}
