//! Command dispatch: bridges CLI args -> `MeshService` -> output formatting.

pub mod config_cmd;
pub mod device;
pub mod devices;
pub mod metrics;
pub mod track;

use meshmap_core::MeshService;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    service: &MeshService,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(service, &args, global).await,
        Command::Device { node_id } => device::handle(service, &node_id, global).await,
        Command::Track { node_id } => track::handle(service, &node_id, global).await,
        Command::Metrics(args) => metrics::handle(service, &args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "does not need a backend".into(),
        }),
    }
}

/// Render epoch seconds as "5m ago", or "never" when absent.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
pub(crate) fn last_seen(timestamp_secs: Option<f64>) -> String {
    timestamp_secs.map_or_else(
        || "never".into(),
        |secs| meshmap_core::time_ago((secs * 1000.0) as i64),
    )
}

/// `lat, lon` to five decimals, or an empty string.
pub(crate) fn coordinates(coords: Option<&meshmap_core::Coordinates>) -> String {
    coords.map_or_else(String::new, |c| format!("{:.5}, {:.5}", c.latitude, c.longitude))
}
