use crate::domain::account::{Account, AccountSnapshot, Currency, find_account};
use crate::domain::instruction::ParsedInstruction;
use crate::domain::verdict::{ReasonCode, Rejection};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Outcome of the business-rule stage. Approval still carries the date a
/// deferred transfer waits for.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Decision {
    Reject {
        rejection: Rejection,
        snapshots: Vec<AccountSnapshot>,
    },
    Approve {
        pending_until: Option<NaiveDate>,
        snapshots: Vec<AccountSnapshot>,
    },
}

/// Runs existence, currency agreement, self-transfer, and sufficient-funds
/// checks in order; first failure wins. `today` is the UTC calendar date the
/// pending/successful split is decided against.
pub(crate) fn decide(
    parsed: &ParsedInstruction,
    accounts: &[Account],
    today: NaiveDate,
) -> Decision {
    let debit = find_account(accounts, &parsed.debit_account);
    let credit = find_account(accounts, &parsed.credit_account);

    let (debit, credit) = match (debit, credit) {
        (Some(debit), Some(credit)) => (debit, credit),
        (Some(debit), None) => {
            return Decision::Reject {
                rejection: Rejection::new(
                    ReasonCode::AccountNotFound,
                    format!("credit account '{}' not found", parsed.credit_account),
                ),
                snapshots: vec![AccountSnapshot::of(debit)],
            };
        }
        (None, Some(credit)) => {
            return Decision::Reject {
                rejection: Rejection::new(
                    ReasonCode::AccountNotFound,
                    format!("debit account '{}' not found", parsed.debit_account),
                ),
                snapshots: vec![AccountSnapshot::of(credit)],
            };
        }
        (None, None) => {
            return Decision::Reject {
                rejection: Rejection::new(
                    ReasonCode::AccountNotFound,
                    format!(
                        "debit account '{}' and credit account '{}' not found",
                        parsed.debit_account, parsed.credit_account
                    ),
                ),
                snapshots: Vec::new(),
            };
        }
    };

    let snapshots = snapshots_for(debit, credit);

    let debit_currency = debit.currency.to_ascii_uppercase();
    let credit_currency = credit.currency.to_ascii_uppercase();
    if debit_currency != credit_currency {
        return Decision::Reject {
            rejection: Rejection::new(
                ReasonCode::CurrencyMismatch,
                format!(
                    "debit account currency '{debit_currency}' does not match credit account currency '{credit_currency}'"
                ),
            ),
            snapshots,
        };
    }
    if Currency::parse(&debit_currency).is_none() {
        return Decision::Reject {
            rejection: Rejection::new(
                ReasonCode::UnsupportedCurrency,
                format!("account currency '{debit_currency}' is not supported"),
            ),
            snapshots,
        };
    }
    if parsed.currency.as_str() != debit_currency {
        return Decision::Reject {
            rejection: Rejection::new(
                ReasonCode::CurrencyMismatch,
                format!(
                    "instruction currency '{}' does not match account currency '{debit_currency}'",
                    parsed.currency
                ),
            ),
            snapshots,
        };
    }

    if parsed.debit_account == parsed.credit_account {
        return Decision::Reject {
            rejection: Rejection::new(
                ReasonCode::SelfTransfer,
                "debit and credit account must be different",
            ),
            snapshots,
        };
    }

    let required = Decimal::from(parsed.amount);
    if debit.balance < required {
        return Decision::Reject {
            rejection: Rejection::new(
                ReasonCode::InsufficientFunds,
                format!(
                    "insufficient funds: available {}, required {}",
                    debit.balance, required
                ),
            ),
            snapshots,
        };
    }

    Decision::Approve {
        pending_until: parsed.execute_by.filter(|date| *date > today),
        snapshots,
    }
}

/// Debit snapshot first, credit when structurally distinct; an account that
/// is both sides appears once.
fn snapshots_for(debit: &Account, credit: &Account) -> Vec<AccountSnapshot> {
    let mut snapshots = vec![AccountSnapshot::of(debit)];
    if credit.id != debit.id {
        snapshots.push(AccountSnapshot::of(credit));
    }
    snapshots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instruction::InstructionType;
    use rust_decimal_macros::dec;

    fn account(id: &str, balance: Decimal, currency: &str) -> Account {
        Account {
            id: id.to_string(),
            balance,
            currency: currency.to_string(),
        }
    }

    fn instruction(debit: &str, credit: &str) -> ParsedInstruction {
        ParsedInstruction {
            r#type: InstructionType::Debit,
            amount: 100,
            currency: Currency::Ngn,
            debit_account: debit.to_string(),
            credit_account: credit.to_string(),
            execute_by: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn expect_reject(decision: Decision) -> (Rejection, Vec<AccountSnapshot>) {
        match decision {
            Decision::Reject {
                rejection,
                snapshots,
            } => (rejection, snapshots),
            Decision::Approve { .. } => panic!("expected a rejection"),
        }
    }

    #[test]
    fn test_both_accounts_missing() {
        let (rejection, snapshots) = expect_reject(decide(&instruction("A1", "A2"), &[], today()));
        assert_eq!(rejection.code, ReasonCode::AccountNotFound);
        assert!(rejection.message.contains("'A1'"));
        assert!(rejection.message.contains("'A2'"));
        assert!(snapshots.is_empty());
    }

    #[test]
    fn test_one_account_missing_names_the_side_and_keeps_the_found_one() {
        let accounts = vec![account("A1", dec!(500), "NGN")];
        let (rejection, snapshots) =
            expect_reject(decide(&instruction("A1", "A2"), &accounts, today()));
        assert_eq!(rejection.code, ReasonCode::AccountNotFound);
        assert!(rejection.message.contains("credit account 'A2'"));
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].id, "A1");

        let accounts = vec![account("A2", dec!(50), "NGN")];
        let (rejection, snapshots) =
            expect_reject(decide(&instruction("A1", "A2"), &accounts, today()));
        assert!(rejection.message.contains("debit account 'A1'"));
        assert_eq!(snapshots[0].id, "A2");
    }

    #[test]
    fn test_account_currency_disagreement() {
        let accounts = vec![
            account("A1", dec!(500), "NGN"),
            account("A2", dec!(50), "USD"),
        ];
        let (rejection, snapshots) =
            expect_reject(decide(&instruction("A1", "A2"), &accounts, today()));
        assert_eq!(rejection.code, ReasonCode::CurrencyMismatch);
        assert_eq!(snapshots.len(), 2);
    }

    #[test]
    fn test_shared_account_currency_outside_supported_set() {
        let accounts = vec![
            account("A1", dec!(500), "EUR"),
            account("A2", dec!(50), "eur"),
        ];
        let (rejection, _) = expect_reject(decide(&instruction("A1", "A2"), &accounts, today()));
        assert_eq!(rejection.code, ReasonCode::UnsupportedCurrency);
        assert!(rejection.message.contains("'EUR'"));
    }

    #[test]
    fn test_instruction_currency_must_match_accounts() {
        let accounts = vec![
            account("A1", dec!(500), "USD"),
            account("A2", dec!(50), "USD"),
        ];
        let (rejection, _) = expect_reject(decide(&instruction("A1", "A2"), &accounts, today()));
        assert_eq!(rejection.code, ReasonCode::CurrencyMismatch);
        assert!(rejection.message.contains("instruction currency 'NGN'"));
    }

    #[test]
    fn test_self_transfer_rejected_with_a_single_snapshot() {
        let accounts = vec![account("A1", dec!(500), "NGN")];
        let (rejection, snapshots) =
            expect_reject(decide(&instruction("A1", "A1"), &accounts, today()));
        assert_eq!(rejection.code, ReasonCode::SelfTransfer);
        assert_eq!(snapshots.len(), 1);
    }

    #[test]
    fn test_insufficient_funds_reports_available_and_required() {
        let accounts = vec![
            account("A1", dec!(50), "NGN"),
            account("A2", dec!(50), "NGN"),
        ];
        let (rejection, snapshots) =
            expect_reject(decide(&instruction("A1", "A2"), &accounts, today()));
        assert_eq!(rejection.code, ReasonCode::InsufficientFunds);
        assert!(rejection.message.contains("available 50"));
        assert!(rejection.message.contains("required 100"));
        // balances untouched on the way out
        assert_eq!(snapshots[0].balance, snapshots[0].balance_before);
    }

    #[test]
    fn test_exact_balance_is_sufficient() {
        let accounts = vec![
            account("A1", dec!(100), "NGN"),
            account("A2", dec!(0), "NGN"),
        ];
        assert!(matches!(
            decide(&instruction("A1", "A2"), &accounts, today()),
            Decision::Approve { pending_until: None, .. }
        ));
    }

    #[test]
    fn test_future_date_defers_today_or_past_applies() {
        let accounts = vec![
            account("A1", dec!(500), "NGN"),
            account("A2", dec!(50), "NGN"),
        ];
        let mut parsed = instruction("A1", "A2");

        parsed.execute_by = NaiveDate::from_ymd_opt(2024, 6, 16);
        let decision = decide(&parsed, &accounts, today());
        assert!(matches!(
            decision,
            Decision::Approve { pending_until: Some(_), .. }
        ));

        parsed.execute_by = NaiveDate::from_ymd_opt(2024, 6, 15);
        assert!(matches!(
            decide(&parsed, &accounts, today()),
            Decision::Approve { pending_until: None, .. }
        ));

        parsed.execute_by = NaiveDate::from_ymd_opt(2020, 1, 1);
        assert!(matches!(
            decide(&parsed, &accounts, today()),
            Decision::Approve { pending_until: None, .. }
        ));
    }

    #[test]
    fn test_lowercase_account_currency_still_agrees() {
        let accounts = vec![
            account("A1", dec!(500), "ngn"),
            account("A2", dec!(50), "NGN"),
        ];
        assert!(matches!(
            decide(&instruction("A1", "A2"), &accounts, today()),
            Decision::Approve { .. }
        ));
    }
}
