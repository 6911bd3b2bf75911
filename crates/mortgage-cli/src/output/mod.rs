pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::{Ledger, OutputFormat};
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, ledger: Ledger, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value, ledger),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Field of the result envelope holding the requested ledger.
pub fn ledger_key(ledger: Ledger) -> &'static str {
    match ledger {
        Ledger::Monthly => "monthly_ledger",
        Ledger::Annual => "annual_ledger",
    }
}

/// Render a scalar JSON value for display.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
