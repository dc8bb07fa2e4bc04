//! `meshmap track <node_id>`: GPS track points.

use std::cell::Cell;

use tabled::Tabled;

use meshmap_core::{MeshService, TrackPoint};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct TrackRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Altitude")]
    altitude: String,
    #[tabled(rename = "Reported")]
    reported: String,
}

pub async fn handle(
    service: &MeshService,
    node_id: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let track = service.track(node_id).await;
    if track.is_empty() && !global.quiet {
        eprintln!("No track points for '{node_id}'");
    }

    let counter = Cell::new(0);
    let out = output::render_list(
        &global.output,
        &track,
        |p: &TrackPoint| {
            counter.set(counter.get() + 1);
            TrackRow {
                index: counter.get(),
                position: super::coordinates(p.coordinates.as_ref()),
                altitude: p
                    .coordinates
                    .map(|c| format!("{} m", c.altitude))
                    .unwrap_or_default(),
                reported: super::last_seen(p.timestamp),
            }
        },
        |p| {
            p.coordinates.map_or_else(String::new, |c| {
                format!("{},{},{}", c.latitude, c.longitude, c.altitude)
            })
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
