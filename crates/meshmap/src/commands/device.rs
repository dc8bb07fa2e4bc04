//! `meshmap device <node_id>`: one node with its track and telemetry.

use std::fmt::Write as _;

use serde_json::Value;

use meshmap_core::{MeshService, NodeDetail, display_value};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

const MISSING: &str = "N/A";

pub async fn handle(
    service: &MeshService,
    node_id: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let detail = service.node_detail(node_id).await;

    if detail.device.is_none()
        && detail.track.is_empty()
        && detail.device_metrics.is_none()
        && detail.environment_metrics.is_none()
    {
        return Err(CliError::NotFound {
            resource_type: "device".into(),
            identifier: node_id.into(),
            list_command: "devices".into(),
        });
    }

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &detail,
        |d| render_detail(d, color),
        |d| d.node_id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_detail(detail: &NodeDetail, color: bool) -> String {
    let mut lines = Vec::new();

    match detail.device {
        Some(ref d) => {
            let name = d.device_name.clone().map(Value::String);
            lines.push(format!("Node ID:      {}", d.node_id));
            lines.push(format!("Name:         {}", display_value(name.as_ref(), MISSING)));
            lines.push(format!(
                "Position:     {}",
                d.coordinates
                    .as_ref()
                    .map_or_else(|| MISSING.into(), |c| super::coordinates(Some(c)))
            ));
            if let Some(c) = d.coordinates {
                lines.push(format!("Altitude:     {} m", c.altitude));
            }
            lines.push(format!("Last seen:    {}", last_seen_line(d.latest_timestamp)));
            lines.push(format!(
                "Status:       {}",
                output::status_label(d.is_online, d.is_recently_active, color)
            ));
            lines.push(format!("MQTT:         {}", if d.is_mqtt_node { "yes" } else { "no" }));
            lines.push(format!("Schema:       {}", d.schema));
        }
        None => {
            lines.push(format!("Node ID:      {}", detail.node_id));
            lines.push("Device:       not in the device list".into());
        }
    }

    lines.push(format!("Track points: {}", detail.track.len()));
    lines.push(String::new());
    lines.push(metrics_block("Device metrics", detail.device_metrics.as_ref()));
    lines.push(String::new());
    lines.push(metrics_block("Environment metrics", detail.environment_metrics.as_ref()));

    lines.join("\n")
}

fn last_seen_line(timestamp_secs: Option<f64>) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    let absolute = timestamp_secs
        .and_then(|secs| chrono::DateTime::from_timestamp(secs as i64, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string());

    match absolute {
        Some(at) => format!("{} ({at})", super::last_seen(timestamp_secs)),
        None => super::last_seen(timestamp_secs),
    }
}

/// Heading plus one `key: value` line per field, placeholders replaced.
pub(crate) fn metrics_block(title: &str, payload: Option<&Value>) -> String {
    let mut out = format!("{title}:");
    match payload {
        None => out.push_str(" no data"),
        Some(Value::Object(fields)) if fields.is_empty() => out.push_str(" no data"),
        Some(Value::Object(fields)) => {
            for (key, value) in fields {
                let _ = write!(out, "\n  {key}: {}", display_value(Some(value), MISSING));
            }
        }
        Some(other) => {
            let _ = write!(out, " {}", display_value(Some(other), MISSING));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metrics_block_replaces_placeholders() {
        let payload = json!({ "batteryLevel": 87, "voltage": "N/A", "channel": "" });
        let block = metrics_block("Device metrics", Some(&payload));
        assert!(block.starts_with("Device metrics:"));
        assert!(block.contains("batteryLevel: 87"));
        assert!(block.contains("voltage: N/A"));
        assert!(block.contains("channel: N/A"));
    }

    #[test]
    fn metrics_block_without_payload() {
        assert_eq!(metrics_block("Environment metrics", None), "Environment metrics: no data");
        assert_eq!(
            metrics_block("Environment metrics", Some(&json!({}))),
            "Environment metrics: no data"
        );
    }
}
