use crate::domain::account::{AccountSnapshot, Currency};
use crate::domain::instruction::InstructionType;
use serde::Serialize;
use std::fmt;

/// Machine-readable outcome codes.
///
/// `SY*` grammar, `AM*` amount, `CU*` currency, `AC*` account rules, `DT*`
/// execution date, `AP*` approved outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReasonCode {
    #[serde(rename = "SY01")]
    MissingKeyword,
    #[serde(rename = "SY02")]
    WrongKeyword,
    #[serde(rename = "SY03")]
    Unparseable,
    #[serde(rename = "AM01")]
    InvalidAmount,
    #[serde(rename = "CU01")]
    CurrencyMismatch,
    #[serde(rename = "CU02")]
    UnsupportedCurrency,
    #[serde(rename = "AC01")]
    InsufficientFunds,
    #[serde(rename = "AC02")]
    SelfTransfer,
    #[serde(rename = "AC03")]
    AccountNotFound,
    #[serde(rename = "AC04")]
    InvalidAccountId,
    #[serde(rename = "DT01")]
    InvalidDate,
    #[serde(rename = "AP00")]
    Applied,
    #[serde(rename = "AP02")]
    Deferred,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingKeyword => "SY01",
            Self::WrongKeyword => "SY02",
            Self::Unparseable => "SY03",
            Self::InvalidAmount => "AM01",
            Self::CurrencyMismatch => "CU01",
            Self::UnsupportedCurrency => "CU02",
            Self::InsufficientFunds => "AC01",
            Self::SelfTransfer => "AC02",
            Self::AccountNotFound => "AC03",
            Self::InvalidAccountId => "AC04",
            Self::InvalidDate => "DT01",
            Self::Applied => "AP00",
            Self::Deferred => "AP02",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal artifact of a failed pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub code: ReasonCode,
    pub message: String,
}

impl Rejection {
    pub fn new(code: ReasonCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Failed,
    Pending,
    Successful,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Failed => "failed",
            Self::Pending => "pending",
            Self::Successful => "successful",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structured verdict returned for every evaluation.
///
/// Constructed exactly once per call and never mutated after return. Field
/// order is the wire order; serialization of the same input is
/// byte-identical across calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    #[serde(rename = "type")]
    pub r#type: Option<InstructionType>,
    pub amount: Option<u64>,
    pub currency: Option<Currency>,
    pub debit_account: Option<String>,
    pub credit_account: Option<String>,
    pub execute_by: Option<String>,
    pub status: TransferStatus,
    pub status_reason: String,
    pub status_code: ReasonCode,
    pub accounts: Vec<AccountSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes_serialize_as_wire_strings() {
        assert_eq!(
            serde_json::to_string(&ReasonCode::MissingKeyword).unwrap(),
            "\"SY01\""
        );
        assert_eq!(
            serde_json::to_string(&ReasonCode::InsufficientFunds).unwrap(),
            "\"AC01\""
        );
        assert_eq!(serde_json::to_string(&ReasonCode::Applied).unwrap(), "\"AP00\"");
        assert_eq!(ReasonCode::Deferred.as_str(), "AP02");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransferStatus::Successful).unwrap(),
            "\"successful\""
        );
        assert_eq!(TransferStatus::Pending.as_str(), "pending");
        assert_eq!(TransferStatus::Failed.as_str(), "failed");
    }

    #[test]
    fn test_verdict_serializes_null_fields_for_unparseable_shape() {
        let verdict = Verdict {
            r#type: None,
            amount: None,
            currency: None,
            debit_account: None,
            credit_account: None,
            execute_by: None,
            status: TransferStatus::Failed,
            status_reason: "instruction is empty or has no recognized type".to_string(),
            status_code: ReasonCode::Unparseable,
            accounts: Vec::new(),
        };

        let json: serde_json::Value = serde_json::to_value(&verdict).unwrap();
        assert!(json["type"].is_null());
        assert!(json["amount"].is_null());
        assert_eq!(json["status"], "failed");
        assert_eq!(json["status_code"], "SY03");
        assert_eq!(json["accounts"].as_array().unwrap().len(), 0);
    }
}
