use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::format_value;

/// Ledger fields and the headings they are printed under.
const LEDGERS: [(&str, &str); 2] = [
    ("monthly_ledger", "Your monthly payment schedule"),
    ("annual_ledger", "Your annual payments"),
];

/// Print the summary, both ledgers, warnings and methodology as tables.
pub fn print_table(value: &Value) {
    let Value::Object(envelope) = value else {
        println!("{}", value);
        return;
    };

    match envelope.get("result") {
        Some(Value::Object(result)) => {
            println!("{}", "Your mortgage payment plan".bold());
            println!("{}", summary_table(result));

            for (key, title) in LEDGERS {
                if let Some(Value::Array(rows)) = result.get(key) {
                    println!();
                    println!("{}", title.bold());
                    println!("{}", ledger_table(rows));
                }
            }
        }
        _ => println!("{}", summary_table(envelope)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Two-column table of every scalar field.
fn summary_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if val.is_array() {
            continue;
        }
        builder.push_record([heading(key), format_value(val)]);
    }
    builder.build()
}

/// One row per ledger entry, columns taken from the first entry.
fn ledger_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    let Some(Value::Object(first)) = rows.first() else {
        builder.push_record(["(empty)"]);
        return builder.build();
    };

    let keys: Vec<&String> = first.keys().collect();
    builder.push_record(keys.iter().map(|k| heading(k)));
    for row in rows {
        if let Value::Object(map) = row {
            builder.push_record(
                keys.iter()
                    .map(|k| map.get(k.as_str()).map(format_value).unwrap_or_default()),
            );
        }
    }
    builder.build()
}

/// "interest_portion" -> "Interest Portion"
fn heading(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_heading_title_cases_snake_case() {
        assert_eq!(heading("interest_portion"), "Interest Portion");
        assert_eq!(heading("year"), "Year");
    }

    #[test]
    fn test_summary_skips_ledgers() {
        let v = json!({ "level_payment": "10.00", "monthly_ledger": [] });
        let rendered = summary_table(v.as_object().unwrap()).to_string();
        assert!(rendered.contains("Level Payment"));
        assert!(!rendered.contains("Monthly Ledger"));
    }

    #[test]
    fn test_ledger_table_has_a_row_per_entry() {
        let rows = vec![
            json!({ "year": 2025, "total_payment": "100.00" }),
            json!({ "year": 2026, "total_payment": "50.00" }),
        ];
        let rendered = ledger_table(&rows).to_string();
        assert!(rendered.contains("Total Payment"));
        assert!(rendered.contains("2025"));
        assert!(rendered.contains("50.00"));
    }
}
