use serde_json::Value;
use std::io::{self, Write};

use super::{format_value, ledger_key};
use crate::Ledger;

/// Write the selected ledger as CSV to stdout.
pub fn print_csv(value: &Value, ledger: Ledger) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value, ledger) {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_csv<W: Write>(out: W, value: &Value, ledger: Ledger) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    let result = value.get("result").unwrap_or(value);

    match result.get(ledger_key(ledger)) {
        Some(Value::Array(rows)) => write_rows(&mut wtr, rows)?,
        _ => {
            // No ledger: two-column CSV of the scalar fields
            wtr.write_record(["field", "value"])?;
            if let Value::Object(map) = result {
                for (key, val) in map {
                    wtr.write_record([key.as_str(), format_value(val).as_str()])?;
                }
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                .collect();
            wtr.write_record(&record)?;
        }
    }
    Ok(())
}
