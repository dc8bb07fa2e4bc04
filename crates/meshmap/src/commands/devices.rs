//! `meshmap devices`: the normalized device list.

use tabled::Tabled;

use meshmap_core::{CanonicalDevice, MeshService};

use crate::cli::{DevicesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Node ID")]
    node_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Last Seen")]
    last_seen: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "MQTT")]
    mqtt: String,
}

impl DeviceRow {
    fn new(d: &CanonicalDevice, color: bool) -> Self {
        Self {
            node_id: d.node_id.clone(),
            name: d.device_name.clone().unwrap_or_default(),
            position: super::coordinates(d.coordinates.as_ref()),
            last_seen: super::last_seen(d.latest_timestamp),
            status: output::status_label(d.is_online, d.is_recently_active, color),
            mqtt: if d.is_mqtt_node { "yes".into() } else { String::new() },
        }
    }
}

pub async fn handle(
    service: &MeshService,
    args: &DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let devices = service.devices(&args.filter()).await;
    let color = output::should_color(&global.color);

    let out = output::render_list(
        &global.output,
        &devices,
        |d| DeviceRow::new(d, color),
        |d| d.node_id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
