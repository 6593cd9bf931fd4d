use crate::domain::account::AccountSnapshot;
use crate::domain::instruction::{ParsedInstruction, PartialInstruction};
use crate::domain::verdict::{ReasonCode, Rejection, TransferStatus, Verdict};
use chrono::NaiveDate;
use rust_decimal::Decimal;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Verdict for input where not even a type could be read: every instruction
/// field is null.
pub(crate) fn unparseable() -> Verdict {
    Verdict {
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
    }
}

/// Failed verdict echoing whatever was known when the stage rejected.
pub(crate) fn rejected(
    partial: PartialInstruction,
    rejection: Rejection,
    accounts: Vec<AccountSnapshot>,
) -> Verdict {
    Verdict {
        r#type: partial.r#type,
        amount: partial.amount,
        currency: partial.currency,
        debit_account: partial.debit_account,
        credit_account: partial.credit_account,
        execute_by: partial.execute_by.map(render_date),
        status: TransferStatus::Failed,
        status_reason: rejection.message,
        status_code: rejection.code,
        accounts,
    }
}

/// Approved verdict. An immediate transfer applies the balance deltas to the
/// snapshots; a deferred one leaves every balance at `balance_before`.
pub(crate) fn settled(
    parsed: &ParsedInstruction,
    pending_until: Option<NaiveDate>,
    mut accounts: Vec<AccountSnapshot>,
) -> Verdict {
    let (status, status_code, status_reason) = match pending_until {
        Some(date) => (
            TransferStatus::Pending,
            ReasonCode::Deferred,
            format!("transfer pending until {}", render_date(date)),
        ),
        None => {
            apply_transfer(&mut accounts, parsed.amount);
            (
                TransferStatus::Successful,
                ReasonCode::Applied,
                "transfer completed successfully".to_string(),
            )
        }
    };

    Verdict {
        r#type: Some(parsed.r#type),
        amount: Some(parsed.amount),
        currency: Some(parsed.currency),
        debit_account: Some(parsed.debit_account.clone()),
        credit_account: Some(parsed.credit_account.clone()),
        execute_by: parsed.execute_by.map(render_date),
        status,
        status_reason,
        status_code,
        accounts,
    }
}

/// Recomputes both balances from `balance_before`. Approved transfers always
/// carry exactly the debit and credit snapshots, in that order.
fn apply_transfer(accounts: &mut [AccountSnapshot], amount: u64) {
    let amount = Decimal::from(amount);
    if let [debit, credit] = accounts {
        debit.balance = debit.balance_before - amount;
        credit.balance = credit.balance_before + amount;
    }
}

fn render_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
