use std::{fmt, str::FromStr};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::errors::ParseError;

type RawTokenAmount = u128;

/// Number of fractional decimal digits of a token amount.
pub const DECIMALS: u8 = 18;

/// An amount of tokens in base units (10^-18 of a whole token).
///
/// Serialized as a decimal string, since base-unit amounts routinely exceed
/// what JSON consumers can represent as numbers.
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
    BorshSerialize,
    BorshDeserialize,
)]
pub struct TokenAmount(RawTokenAmount);

impl_opaque_thin_wrapper!(TokenAmount => RawTokenAmount);

impl TokenAmount {
    /// The zero amount.
    pub const ZERO: TokenAmount = Self(0);

    /// The largest representable amount.  As an allowance this means
    /// "unlimited".
    pub const MAX: TokenAmount = Self(RawTokenAmount::MAX);

    /// Base units per whole token.
    pub const UNIT: RawTokenAmount = 10u128.pow(DECIMALS as u32);

    /// Creates an amount from a count of whole tokens.
    ///
    /// # Panics
    ///
    /// If the scaled value overflows.
    pub const fn from_whole(tokens: RawTokenAmount) -> Self {
        match tokens.checked_mul(Self::UNIT) {
            Some(v) => Self(v),
            None => panic!("amount: whole token count overflows base units"),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns [`None`] if overflow occurred.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction. Returns [`None`] if overflow occurred.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Parses a decimal string of whole tokens with an optional fractional
    /// part, e.g. `"10"` or `"0.5"`.
    pub fn parse_units(s: &str) -> Result<Self, ParseError> {
        let bad = || ParseError::InvalidAmount(s.to_owned());

        let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
        if int_part.is_empty() || frac_part.len() > DECIMALS as usize {
            return Err(bad());
        }

        let whole: RawTokenAmount = int_part.parse().map_err(|_| bad())?;
        let mut frac: RawTokenAmount = 0;
        if !frac_part.is_empty() {
            frac = frac_part.parse().map_err(|_| bad())?;
            frac *= 10u128.pow((DECIMALS as usize - frac_part.len()) as u32);
        }

        whole
            .checked_mul(Self::UNIT)
            .and_then(|v| v.checked_add(frac))
            .map(Self)
            .ok_or_else(bad)
    }

    /// Formats as whole tokens, always with at least one fractional digit
    /// and trailing zeros removed, e.g. `"9999990.0"`.
    pub fn format_units(&self) -> String {
        let whole = self.0 / Self::UNIT;
        let frac = self.0 % Self::UNIT;
        let frac_str = format!("{frac:018}");
        let trimmed = frac_str.trim_end_matches('0');
        if trimmed.is_empty() {
            format!("{whole}.0")
        } else {
            format!("{whole}.{trimmed}")
        }
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenAmount {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<RawTokenAmount>()
            .map(Self)
            .map_err(|_| ParseError::InvalidAmount(s.to_owned()))
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl de::Visitor<'_> for AmountVisitor {
            type Value = TokenAmount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a base-unit amount as a decimal string or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(TokenAmount(v as RawTokenAmount))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
                Ok(TokenAmount(v))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}
