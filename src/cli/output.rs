use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::OutputMode;
use crate::models::device_status::DeviceStatus;
use crate::models::result::ActionResult;

#[derive(Tabled)]
pub struct FieldRow {
    pub field: String,
    pub value: String,
}

pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

pub fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }
    let table = Table::new(data).with(Style::rounded()).to_string();
    println!("{}", table);
}

/// One-line rendering: `Error: ...`, `Status: ON|OFF` (with the light
/// state for bulbs), or `Success`.
pub fn compact_line(result: &ActionResult) -> String {
    match result {
        ActionResult::Failure(err) => format!("Error: {}", err),
        ActionResult::Status { info, .. } => {
            let status = DeviceStatus::from_json(&serde_json::Value::Object(info.clone()));
            match status.light_summary() {
                Some(light) => format!("Status: {} ({})", status.power_label(), light),
                None => format!("Status: {}", status.power_label()),
            }
        }
        ActionResult::Success { .. } => "Success".to_string(),
    }
}

/// Top-level fields of the JSON rendering, one row each. Nested values are
/// shown as compact JSON.
pub fn table_rows(result: &ActionResult) -> Vec<FieldRow> {
    match result.to_json() {
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(field, value)| FieldRow {
                field,
                value: match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                },
            })
            .collect(),
        _ => Vec::new(),
    }
}

pub fn print_result(result: &ActionResult, mode: OutputMode) {
    match mode {
        OutputMode::Json => print_json(&result.to_json()),
        OutputMode::Compact => println!("{}", compact_line(result)),
        OutputMode::Table => print_table(&table_rows(result)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::action::Action;
    use serde_json::json;

    #[test]
    fn test_compact_lines() {
        let on = ActionResult::status(json!({"device_on": true}));
        assert_eq!(compact_line(&on), "Status: ON");

        let off = ActionResult::status(json!({"device_on": false}));
        assert_eq!(compact_line(&off), "Status: OFF");

        let bulb = ActionResult::status(json!({
            "device_on": true,
            "brightness": 40,
            "color_temp": 2700,
        }));
        assert_eq!(compact_line(&bulb), "Status: ON (40%, 2700K)");

        let garbled = ActionResult::status(json!({"device_on": true, "brightness": 300}));
        assert_eq!(compact_line(&garbled), "Status: ON");

        assert_eq!(compact_line(&ActionResult::success(Action::On)), "Success");

        let failed = ActionResult::from(AppError::Connection("no route to host".into()));
        assert_eq!(
            compact_line(&failed),
            "Error: Connection failed: no route to host"
        );
    }

    #[test]
    fn test_table_rows_flatten_fields() {
        let result = ActionResult::status(json!({"device_on": true, "model": "P100"}));
        let rows = table_rows(&result);
        let model = rows.iter().find(|r| r.field == "model").unwrap();
        assert_eq!(model.value, "P100");
        let power = rows.iter().find(|r| r.field == "device_on").unwrap();
        assert_eq!(power.value, "true");
        assert!(rows.iter().any(|r| r.field == "timestamp"));
    }
}
