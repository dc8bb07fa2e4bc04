//! `meshmap metrics <node_id>`: raw telemetry payloads.

use meshmap_core::MeshService;

use crate::cli::{GlobalOpts, MetricsArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    service: &MeshService,
    args: &MetricsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (title, payload) = if args.environment {
        (
            "Environment metrics",
            service.api().environment_metrics(&args.node_id).await,
        )
    } else {
        (
            "Device metrics",
            service.api().device_metrics(&args.node_id).await,
        )
    };

    let Some(payload) = payload else {
        if !global.quiet {
            eprintln!("No {} for '{}'", title.to_lowercase(), args.node_id);
        }
        return Ok(());
    };

    let out = output::render_single(
        &global.output,
        &payload,
        |p| super::device::metrics_block(title, Some(p)),
        ToString::to_string,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
