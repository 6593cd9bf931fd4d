use crate::domain::account::Currency;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Transfer direction read from the first token of the instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstructionType {
    Debit,
    Credit,
}

impl InstructionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
        }
    }
}

impl fmt::Display for InstructionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully parsed instruction, ready for the business rules.
///
/// Invariants enforced upstream: `amount > 0`, `debit_account` and
/// `credit_account` are well-formed ids, `execute_by` is a real calendar
/// date when present.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInstruction {
    pub r#type: InstructionType,
    pub amount: u64,
    pub currency: Currency,
    pub debit_account: String,
    pub credit_account: String,
    pub execute_by: Option<NaiveDate>,
}

/// The populated-where-known echo of an instruction whose parse stopped
/// part-way. Every verdict carries one of these back to the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialInstruction {
    pub r#type: Option<InstructionType>,
    pub amount: Option<u64>,
    pub currency: Option<Currency>,
    pub debit_account: Option<String>,
    pub credit_account: Option<String>,
    pub execute_by: Option<NaiveDate>,
}

impl From<&ParsedInstruction> for PartialInstruction {
    fn from(parsed: &ParsedInstruction) -> Self {
        Self {
            r#type: Some(parsed.r#type),
            amount: Some(parsed.amount),
            currency: Some(parsed.currency),
            debit_account: Some(parsed.debit_account.clone()),
            credit_account: Some(parsed.credit_account.clone()),
            execute_by: parsed.execute_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&InstructionType::Debit).unwrap(),
            "\"DEBIT\""
        );
        assert_eq!(
            serde_json::to_string(&InstructionType::Credit).unwrap(),
            "\"CREDIT\""
        );
    }

    #[test]
    fn test_partial_from_parsed_keeps_every_field() {
        let parsed = ParsedInstruction {
            r#type: InstructionType::Debit,
            amount: 100,
            currency: Currency::Ngn,
            debit_account: "A1".to_string(),
            credit_account: "A2".to_string(),
            execute_by: NaiveDate::from_ymd_opt(2025, 1, 1),
        };

        let partial = PartialInstruction::from(&parsed);
        assert_eq!(partial.r#type, Some(InstructionType::Debit));
        assert_eq!(partial.amount, Some(100));
        assert_eq!(partial.currency, Some(Currency::Ngn));
        assert_eq!(partial.debit_account.as_deref(), Some("A1"));
        assert_eq!(partial.credit_account.as_deref(), Some("A2"));
        assert_eq!(partial.execute_by, NaiveDate::from_ymd_opt(2025, 1, 1));
    }
}
