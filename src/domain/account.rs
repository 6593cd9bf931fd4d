use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the engine can settle.
///
/// A fixed, process-wide set; account currencies outside it are rejected by
/// the business rules, instruction currencies by the field parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Ngn,
    Usd,
    Gbp,
    Ghs,
}

impl Currency {
    /// Case-insensitive membership check over the supported set.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "NGN" => Some(Self::Ngn),
            "USD" => Some(Self::Usd),
            "GBP" => Some(Self::Gbp),
            "GHS" => Some(Self::Ghs),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ngn => "NGN",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Ghs => "GHS",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account as supplied by the caller.
///
/// Read-only input: the engine never mutates these in place. All derived
/// balance arithmetic happens on [`AccountSnapshot`] copies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    pub id: String,
    pub balance: Decimal,
    pub currency: String,
}

/// A point-in-time copy of an account used to compute and report balance
/// deltas.
///
/// `balance_before` is immutable within a call; `balance` is updated only by
/// the response builder when a transfer is applied immediately.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSnapshot {
    pub id: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance_before: Decimal,
    pub currency: String,
}

impl AccountSnapshot {
    pub fn of(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            balance: account.balance,
            balance_before: account.balance,
            currency: account.currency.to_ascii_uppercase(),
        }
    }
}

/// Order-preserving lookup; first match wins.
pub fn find_account<'a>(accounts: &'a [Account], id: &str) -> Option<&'a Account> {
    accounts.iter().find(|account| account.id == id)
}
