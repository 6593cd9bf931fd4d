use std::path::Path;

pub fn write_accounts_csv(
    path: &Path,
    rows: &[(&str, &str, &str)],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["id", "balance", "currency"])?;
    for (id, balance, currency) in rows {
        wtr.write_record([*id, *balance, *currency])?;
    }

    wtr.flush()?;
    Ok(())
}
