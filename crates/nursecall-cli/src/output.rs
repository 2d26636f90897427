use colored::Colorize;
use nursecall_client::{RefState, ResolvedRecord};
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::cli::OutputFormat;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// JSON form of a resolved list, for `--format json`.
pub fn records_json(records: Vec<ResolvedRecord>) -> Value {
    Value::Array(records.into_iter().map(|r| r.into_value()).collect())
}

pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{rendered}"),
        Err(_) => println!("{value}"),
    }
}

/// Render a list as a rounded table with a trailing count, or as JSON.
pub fn print_list(
    format: OutputFormat,
    headers: &[&str],
    rows: Vec<Vec<String>>,
    raw: impl FnOnce() -> Value,
) {
    match format {
        OutputFormat::Json => print_json(&raw()),
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("No records found.");
                return;
            }
            let count = rows.len();
            let mut builder = Builder::default();
            builder.push_record(headers.iter().copied());
            for row in rows {
                builder.push_record(row);
            }
            let table = builder.build().with(Style::rounded()).to_string();
            println!("{table}");
            println!("{count} {}", if count == 1 { "record" } else { "records" });
        }
    }
}

/// Render a detail view as aligned key/value lines, or as JSON.
pub fn print_detail(
    format: OutputFormat,
    title: &str,
    rows: Vec<(&str, String)>,
    raw: impl FnOnce() -> Value,
) {
    match format {
        OutputFormat::Json => print_json(&raw()),
        OutputFormat::Table => {
            println!("{}", title.cyan().bold());
            let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
            for (key, value) in rows {
                println!("  {:width$}  {}", key.cyan(), value);
            }
        }
    }
}

/// A plain field of a record, "-" when missing or null.
pub fn field_cell(record: &ResolvedRecord, field: &str) -> String {
    match record.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}

/// A resolved-reference cell: the related record's display field,
/// "Unassigned" for absent references, and a failure marker when the
/// lookup failed so the rest of the row still renders.
pub fn ref_cell(record: &ResolvedRecord, target: &str, field: &str, label: &str) -> String {
    match record.state(target) {
        RefState::Resolved => record
            .resolved_str(target, field)
            .map(str::to_string)
            .unwrap_or_else(|| {
                record
                    .get(target)
                    .and_then(|v| v.get(field))
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string())
            }),
        RefState::Absent => "Unassigned".dimmed().italic().to_string(),
        RefState::Failed => format!("failed to load {label}").red().to_string(),
    }
}

pub fn bed_status_cell(status: &str) -> String {
    match status {
        "available" => status.green().to_string(),
        "occupied" => status.red().to_string(),
        "maintenance" => status.yellow().to_string(),
        other => other.to_string(),
    }
}

pub fn call_status_cell(status: &str) -> String {
    match status {
        "pending" => status.yellow().to_string(),
        "answered" => status.green().to_string(),
        "cancelled" => status.dimmed().to_string(),
        "urgent" => status.red().bold().to_string(),
        other => other.to_string(),
    }
}

/// Short human form of an RFC 3339 timestamp ("Mar 10, 08:15"); falls back
/// to the raw string when it does not parse.
pub fn short_time(iso: &str) -> String {
    let parsed = OffsetDateTime::parse(iso, &time::format_description::well_known::Rfc3339);
    match parsed {
        Ok(dt) => dt
            .format(format_description!(
                "[month repr:short] [day], [hour]:[minute]"
            ))
            .unwrap_or_else(|_| iso.to_string()),
        Err(_) => iso.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_time_formats_rfc3339() {
        assert_eq!(short_time("2025-03-10T08:15:00Z"), "Mar 10, 08:15");
    }

    #[test]
    fn test_short_time_falls_back_on_garbage() {
        assert_eq!(short_time("not a time"), "not a time");
    }

    #[test]
    fn test_status_cells_pass_through_unknown_values() {
        // Old data may carry statuses outside the current closed set;
        // render them verbatim rather than erroring.
        assert_eq!(call_status_cell("escalated"), "escalated");
        assert_eq!(bed_status_cell("reserved"), "reserved");
    }
}
