use std::{fmt, str::FromStr};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

/// Length of an account identifier in bytes.
pub const ACCT_ID_LEN: usize = 20;

type RawAccountId = [u8; ACCT_ID_LEN];

/// Address-like account identifier.
///
/// The all-zero id is the null identifier.  It never holds a balance and is
/// used as the counterparty of mints and burns.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct AccountId(#[serde(with = "hex::serde")] RawAccountId);

impl_opaque_thin_wrapper!(AccountId => RawAccountId);

impl AccountId {
    /// The null account ID.
    pub const fn zero() -> Self {
        Self([0; ACCT_ID_LEN])
    }

    /// Checks if this is the null account ID.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Returns `None` for the null ID, which is how optional account
    /// references are stored.
    pub fn non_zero(self) -> Option<Self> {
        if self.is_zero() { None } else { Some(self) }
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AccountId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != ACCT_ID_LEN * 2 {
            return Err(ParseError::InvalidAccountIdLength(digits.len()));
        }

        let mut buf = [0; ACCT_ID_LEN];
        hex::decode_to_slice(digits, &mut buf)?;
        Ok(Self(buf))
    }
}
