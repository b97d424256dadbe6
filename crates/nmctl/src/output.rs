//! Output formatting: table, JSON, YAML, plain.
//!
//! A reconcile result is a status line (`changed` / `ok`), the message, and
//! the resource as returned by the server. Structured formats serialize the
//! whole result.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};

use nmctl_core::ReconcileResult;

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Render a reconcile result in the chosen format.
pub fn render_result(
    format: OutputFormat,
    result: &ReconcileResult,
    color: bool,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Table => render_detail(result, color),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::JsonCompact => serde_json::to_string(result)?,
        OutputFormat::Yaml => serde_yaml::to_string(result)?,
        OutputFormat::Plain => result.msg.clone(),
    })
}

fn render_detail(result: &ReconcileResult, color: bool) -> String {
    let status = match (result.changed, color) {
        (true, true) => "changed".yellow().bold().to_string(),
        (false, true) => "ok".green().bold().to_string(),
        (true, false) => "changed".to_owned(),
        (false, false) => "ok".to_owned(),
    };
    let mut out = format!("{status}: {}", result.msg);

    if let Some(ref resource) = result.resource {
        let rows: Vec<FieldRow> = resource
            .iter()
            .map(|(field, value)| FieldRow {
                field: field.clone(),
                value: display_value(value),
            })
            .collect();
        if !rows.is_empty() {
            out.push('\n');
            out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        }
    }
    out
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(resource: Option<Value>) -> ReconcileResult {
        ReconcileResult {
            changed: true,
            resource: resource.map(|v| serde_json::from_value(v).unwrap()),
            msg: "Network 'net1' created".into(),
        }
    }

    #[test]
    fn table_lists_resource_fields() {
        let out = render_result(
            OutputFormat::Table,
            &result(Some(json!({ "netid": "net1", "extraallowedips": ["a", "b"] }))),
            false,
        )
        .unwrap();
        assert!(out.starts_with("changed: Network 'net1' created"));
        assert!(out.contains("netid"));
        assert!(out.contains("a, b"));
    }

    #[test]
    fn json_carries_changed_flag() {
        let out = render_result(OutputFormat::JsonCompact, &result(None), false).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            parsed,
            json!({ "changed": true, "resource": null, "msg": "Network 'net1' created" })
        );
    }

    #[test]
    fn plain_is_message_only() {
        let out = render_result(OutputFormat::Plain, &result(None), true).unwrap();
        assert_eq!(out, "Network 'net1' created");
    }
}
