//! Token parameters.
//!
//! Provides JSON-serializable configuration for a token instance: metadata,
//! supply cap, initial owner and genesis allocations.
//!
//! Amounts in the params file are written in whole tokens as decimal strings
//! (`"10000000"` or `"0.5"`), not in base units.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use votecoin_identifiers::{AccountId, DECIMALS, TokenAmount};

pub mod serde_helpers;

use serde_helpers::serde_units;

/// Default value for `name` in [`TokenParams`].
const DEFAULT_NAME: &str = "TestCoin";

/// Default value for `symbol` in [`TokenParams`].
const DEFAULT_SYMBOL: &str = "TST";

/// Default supply cap, in whole tokens.
pub const DEFAULT_MAX_SUPPLY_TOKENS: u128 = 100_000_000_000;

fn default_name() -> String {
    DEFAULT_NAME.to_owned()
}

fn default_symbol() -> String {
    DEFAULT_SYMBOL.to_owned()
}

fn default_max_supply() -> TokenAmount {
    TokenAmount::from_whole(DEFAULT_MAX_SUPPLY_TOKENS)
}

pub type ParamsResult<T> = Result<T, ParamsError>;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("owner must not be the null account")]
    NullOwner,

    #[error("genesis allocation to the null account")]
    AllocationToNull,

    #[error("genesis allocations total {total} exceeds max supply {cap}")]
    SupplyAboveCap { total: TokenAmount, cap: TokenAmount },

    #[error("genesis allocations overflow")]
    AllocationOverflow,

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A balance credited at initialization.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GenesisAllocation {
    pub account: AccountId,

    /// Amount in whole tokens.
    #[serde(with = "serde_units")]
    pub amount: TokenAmount,
}

impl GenesisAllocation {
    pub fn new(account: AccountId, amount: TokenAmount) -> Self {
        Self { account, amount }
    }
}

/// Top-level token parameters.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TokenParams {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Supply cap in whole tokens.  Defaults to 100 billion.
    #[serde(default = "default_max_supply", with = "serde_units")]
    pub max_supply: TokenAmount,

    /// Initial owner, the only account allowed to mint and take snapshots.
    pub owner: AccountId,

    /// Balances credited at initialization.  These are minted before any
    /// snapshot or delegation exists, so they leave no snapshot or vote
    /// history behind.
    #[serde(default)]
    pub genesis_allocations: Vec<GenesisAllocation>,
}

impl TokenParams {
    /// Creates params with default metadata and cap and no allocations.
    pub fn new(owner: AccountId) -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            max_supply: default_max_supply(),
            owner,
            genesis_allocations: Vec::new(),
        }
    }

    pub fn with_allocation(mut self, account: AccountId, amount: TokenAmount) -> Self {
        self.genesis_allocations
            .push(GenesisAllocation::new(account, amount));
        self
    }

    pub fn with_max_supply(mut self, max_supply: TokenAmount) -> Self {
        self.max_supply = max_supply;
        self
    }

    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    /// Sums the genesis allocations.
    pub fn genesis_supply(&self) -> ParamsResult<TokenAmount> {
        self.genesis_allocations
            .iter()
            .try_fold(TokenAmount::ZERO, |acc, a| acc.checked_add(a.amount))
            .ok_or(ParamsError::AllocationOverflow)
    }

    /// Checks the params describe a valid initial state.
    pub fn validate(&self) -> ParamsResult<()> {
        if self.owner.is_zero() {
            return Err(ParamsError::NullOwner);
        }

        if self.genesis_allocations.iter().any(|a| a.account.is_zero()) {
            return Err(ParamsError::AllocationToNull);
        }

        let total = self.genesis_supply()?;
        if total > self.max_supply {
            return Err(ParamsError::SupplyAboveCap {
                total,
                cap: self.max_supply,
            });
        }

        Ok(())
    }

    /// Deserializes and validates from a JSON string.
    pub fn from_json(json: &str) -> ParamsResult<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Serializes to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serializes to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
