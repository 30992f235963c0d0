use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value, table_options()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Arrays of records become one row per record; a single record becomes
/// a key/value listing.
fn render_table<T: Serialize>(value: &T, options: table::TableOptions) -> anyhow::Result<String> {
    let rendered = match serde_json::to_value(value)? {
        Value::Array(items) if items.is_empty() => String::from("(no rows)"),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            let records = items
                .iter()
                .filter_map(Value::as_object)
                .collect::<Vec<_>>();
            let headers = record_headers(&records);
            let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
            let rows = records
                .iter()
                .map(|record| {
                    headers
                        .iter()
                        .map(|header| record.get(header).map_or_else(|| String::from("-"), cell))
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>();
            table::render_entity_table(&header_refs, &rows, options)
        }
        Value::Array(items) => {
            let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
            table::render_entity_table(&["value"], &rows, options)
        }
        Value::Object(record) => {
            let rows = record_headers(&[&record])
                .into_iter()
                .map(|key| {
                    let value = record.get(&key).map_or_else(|| String::from("-"), cell);
                    vec![key, value]
                })
                .collect::<Vec<_>>();
            table::render_entity_table(&["field", "value"], &rows, options)
        }
        scalar => table::render_entity_table(&["value"], &[vec![cell(&scalar)]], options),
    };
    Ok(rendered)
}

/// Union of keys across records, `id` first and the rest sorted.
fn record_headers(records: &[&Map<String, Value>]) -> Vec<String> {
    let mut headers = records
        .iter()
        .flat_map(|record| record.keys())
        .filter(|key| key.as_str() != "id")
        .cloned()
        .collect::<Vec<_>>();
    headers.sort();
    headers.dedup();
    if records.iter().any(|record| record.contains_key("id")) {
        headers.insert(0, String::from("id"));
    }
    headers
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
