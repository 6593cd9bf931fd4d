use crate::application::distance::levenshtein;
use crate::domain::account::Currency;
use crate::domain::instruction::{InstructionType, ParsedInstruction, PartialInstruction};
use crate::domain::verdict::{ReasonCode, Rejection};
use chrono::NaiveDate;

/// Token offsets fixed by the instruction template. The grammar is a rigid
/// positional contract, not a free grammar: every slot is an absolute
/// offset into the token list.
const AMOUNT_IDX: usize = 1;
const CURRENCY_IDX: usize = 2;
const NEAR_ACCOUNT_IDX: usize = 5;
const FAR_ACCOUNT_IDX: usize = 10;
const ON_IDX: usize = 11;
const DATE_IDX: usize = 12;

const DEBIT_GRAMMAR: [(usize, &str); 6] = [
    (3, "FROM"),
    (4, "ACCOUNT"),
    (6, "FOR"),
    (7, "CREDIT"),
    (8, "TO"),
    (9, "ACCOUNT"),
];

const CREDIT_GRAMMAR: [(usize, &str); 6] = [
    (3, "TO"),
    (4, "ACCOUNT"),
    (6, "FOR"),
    (7, "DEBIT"),
    (8, "FROM"),
    (9, "ACCOUNT"),
];

/// Mismatched keywords within this edit distance of the expected one get a
/// "did you mean" suffix. Two covers the common adjacent-letter swap
/// (FORM for FROM), which single-edit distance does not.
const SUGGESTION_DISTANCE: usize = 2;

#[derive(Debug)]
pub(crate) enum ParseFailure {
    /// Empty input or unrecognized leading token; nothing could be read.
    Unparseable,
    /// The grammar or a field was rejected part-way through.
    Rejected {
        partial: PartialInstruction,
        rejection: Rejection,
    },
}

/// Splits on the space character, trims each piece, drops empties. No
/// grammar awareness.
pub(crate) fn tokenize(instruction: &str) -> Vec<&str> {
    instruction
        .split(' ')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

pub(crate) fn parse(instruction: &str) -> Result<ParsedInstruction, ParseFailure> {
    let tokens = tokenize(instruction);

    let Some(kind) = instruction_type(&tokens) else {
        tracing::debug!(instruction, "no recognized instruction type");
        return Err(ParseFailure::Unparseable);
    };
    let mut partial = PartialInstruction {
        r#type: Some(kind),
        ..PartialInstruction::default()
    };

    if let Err(rejection) = check_keywords(kind, &tokens) {
        return Err(ParseFailure::Rejected { partial, rejection });
    }

    let amount = match parse_amount(tokens.get(AMOUNT_IDX).copied()) {
        Ok(amount) => amount,
        Err(rejection) => return Err(ParseFailure::Rejected { partial, rejection }),
    };
    partial.amount = Some(amount);

    let currency = match parse_currency(tokens.get(CURRENCY_IDX).copied()) {
        Ok(currency) => currency,
        Err(rejection) => return Err(ParseFailure::Rejected { partial, rejection }),
    };
    partial.currency = Some(currency);

    // The `from` side is always the debit account; DEBIT reads it at the
    // near slot, CREDIT at the far one.
    let (debit_idx, credit_idx) = match kind {
        InstructionType::Debit => (NEAR_ACCOUNT_IDX, FAR_ACCOUNT_IDX),
        InstructionType::Credit => (FAR_ACCOUNT_IDX, NEAR_ACCOUNT_IDX),
    };

    let debit_account = match parse_account_id(tokens.get(debit_idx).copied(), "debit") {
        Ok(id) => id,
        Err(rejection) => return Err(ParseFailure::Rejected { partial, rejection }),
    };
    partial.debit_account = Some(debit_account.clone());

    let credit_account = match parse_account_id(tokens.get(credit_idx).copied(), "credit") {
        Ok(id) => id,
        Err(rejection) => return Err(ParseFailure::Rejected { partial, rejection }),
    };
    partial.credit_account = Some(credit_account.clone());

    let execute_by = match parse_execute_by(&tokens) {
        Ok(date) => date,
        Err(rejection) => return Err(ParseFailure::Rejected { partial, rejection }),
    };

    Ok(ParsedInstruction {
        r#type: kind,
        amount,
        currency,
        debit_account,
        credit_account,
        execute_by,
    })
}

fn instruction_type(tokens: &[&str]) -> Option<InstructionType> {
    match tokens.first()?.to_ascii_uppercase().as_str() {
        "DEBIT" => Some(InstructionType::Debit),
        "CREDIT" => Some(InstructionType::Credit),
        _ => None,
    }
}

/// Checks the fixed keyword slots for the given type. All missing keywords
/// are reported together before any mismatch is considered.
fn check_keywords(kind: InstructionType, tokens: &[&str]) -> Result<(), Rejection> {
    let grammar = match kind {
        InstructionType::Debit => &DEBIT_GRAMMAR,
        InstructionType::Credit => &CREDIT_GRAMMAR,
    };

    let missing: Vec<&str> = grammar
        .iter()
        .filter(|(idx, _)| tokens.len() <= *idx)
        .map(|(_, keyword)| *keyword)
        .collect();
    if !missing.is_empty() {
        let message = if missing.len() == 1 {
            format!("missing keyword: '{}'", missing[0])
        } else {
            let quoted: Vec<String> = missing.iter().map(|k| format!("'{k}'")).collect();
            format!("missing keywords: {}", quoted.join(", "))
        };
        return Err(Rejection::new(ReasonCode::MissingKeyword, message));
    }

    let mismatches: Vec<String> = grammar
        .iter()
        .filter(|(idx, keyword)| !tokens[*idx].eq_ignore_ascii_case(keyword))
        .map(|(idx, keyword)| describe_mismatch(keyword, tokens[*idx]))
        .collect();
    if !mismatches.is_empty() {
        return Err(Rejection::new(ReasonCode::WrongKeyword, mismatches.join("; ")));
    }

    Ok(())
}

fn describe_mismatch(expected: &str, found: &str) -> String {
    let mut message = format!("expected keyword '{expected}', found '{found}'");
    if levenshtein(&found.to_ascii_uppercase(), expected) <= SUGGESTION_DISTANCE {
        message.push_str(&format!(", did you mean '{expected}'?"));
    }
    message
}

/// Strict digit-string to positive integer. The kind of defect is named:
/// sign, decimal point, stray character, overflow, or zero.
fn parse_amount(token: Option<&str>) -> Result<u64, Rejection> {
    let Some(raw) = token else {
        return Err(Rejection::new(ReasonCode::InvalidAmount, "amount is missing"));
    };
    if raw.contains('-') {
        return Err(Rejection::new(
            ReasonCode::InvalidAmount,
            "amount must not be negative",
        ));
    }
    if raw.contains('.') {
        return Err(Rejection::new(
            ReasonCode::InvalidAmount,
            "amount must not have a decimal part",
        ));
    }
    if let Some(bad) = raw.chars().find(|c| !c.is_ascii_digit()) {
        return Err(Rejection::new(
            ReasonCode::InvalidAmount,
            format!("amount must contain only digits, found '{bad}'"),
        ));
    }
    let amount: u64 = raw
        .parse()
        .map_err(|_| Rejection::new(ReasonCode::InvalidAmount, "amount is too large"))?;
    if amount == 0 {
        return Err(Rejection::new(
            ReasonCode::InvalidAmount,
            "amount must be greater than zero",
        ));
    }
    Ok(amount)
}

fn parse_currency(token: Option<&str>) -> Result<Currency, Rejection> {
    let Some(raw) = token else {
        return Err(Rejection::new(
            ReasonCode::UnsupportedCurrency,
            "currency is missing",
        ));
    };
    Currency::parse(raw).ok_or_else(|| {
        Rejection::new(
            ReasonCode::UnsupportedCurrency,
            format!("currency '{raw}' is not supported"),
        )
    })
}

fn parse_account_id(token: Option<&str>, side: &str) -> Result<String, Rejection> {
    let Some(raw) = token else {
        return Err(Rejection::new(
            ReasonCode::InvalidAccountId,
            format!("{side} account id is missing"),
        ));
    };
    if let Some(bad) = raw
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '@')))
    {
        return Err(Rejection::new(
            ReasonCode::InvalidAccountId,
            format!("{side} account id contains invalid character '{bad}'"),
        ));
    }
    Ok(raw.to_string())
}

/// Resolves the optional `ON <date>` clause at the fixed slots.
///
/// Instructions shorter than the `ON` slot never require a date clause:
/// the keyword is treated as vacuously satisfied. Preserved heuristic, not
/// a clean invariant.
fn parse_execute_by(tokens: &[&str]) -> Result<Option<NaiveDate>, Rejection> {
    if tokens.len() <= ON_IDX {
        return Ok(None);
    }

    let saw_on = tokens[ON_IDX].eq_ignore_ascii_case("ON");
    match (saw_on, tokens.get(DATE_IDX).copied()) {
        (true, Some(raw)) => parse_date(raw).map(Some),
        (true, None) => Err(Rejection::new(
            ReasonCode::InvalidDate,
            "'ON' keyword must be followed by an execution date",
        )),
        (false, Some(raw)) => Err(Rejection::new(
            ReasonCode::InvalidDate,
            format!("execution date '{raw}' supplied without the 'ON' keyword"),
        )),
        (false, None) => Err(Rejection::new(
            ReasonCode::MissingKeyword,
            "missing keyword: 'ON'",
        )),
    }
}

/// Strict `YYYY-MM-DD`: exactly ten characters, hyphens at offsets 4 and 7,
/// pure-digit year/month/day, ranges checked, and the triple must be a real
/// calendar date.
fn parse_date(raw: &str) -> Result<NaiveDate, Rejection> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[8..10].iter().all(u8::is_ascii_digit);
    if !well_formed {
        return Err(Rejection::new(
            ReasonCode::InvalidDate,
            format!("execution date '{raw}' must use the YYYY-MM-DD format"),
        ));
    }

    // The slices are pure ASCII digits; parsing cannot fail.
    let year: i32 = raw[..4].parse().unwrap_or_default();
    let month: u32 = raw[5..7].parse().unwrap_or_default();
    let day: u32 = raw[8..10].parse().unwrap_or_default();

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(Rejection::new(
            ReasonCode::InvalidDate,
            format!("execution date '{raw}' is out of range"),
        ));
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        Rejection::new(
            ReasonCode::InvalidDate,
            format!("'{raw}' is not a valid calendar date"),
        )
    })
}
