use crate::domain::account::Account;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One `id,balance,currency` row of an accounts file.
#[derive(Debug, Deserialize)]
struct AccountRecord {
    id: String,
    balance: Decimal,
    currency: String,
}

/// Reads account snapshots from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record
/// lengths; rows deserialize into a record DTO before becoming domain
/// accounts.
pub struct AccountReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AccountReader<R> {
    /// Creates a new `AccountReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Reads and deserializes every account, preserving file order; the
    /// engine's lookup is order-sensitive (first match wins).
    pub fn accounts(self) -> Result<Vec<Account>> {
        let mut accounts = Vec::new();
        for record in self.reader.into_deserialize::<AccountRecord>() {
            let record = record?;
            accounts.push(Account {
                id: record.id,
                balance: record.balance,
                currency: record.currency,
            });
        }
        Ok(accounts)
    }
}
