// Backend endpoint layout
//
// Per-node endpoints take the node id appended after a colon
// (`{endpoint}:{node_id}`), by plain string concatenation. The device
// list lives under `{main}/devices`.

use serde::{Deserialize, Serialize};

/// Endpoint URLs for one map backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// GPS track endpoint, without the `:{node_id}` suffix.
    pub gps: String,
    /// Device metrics endpoint, without the `:{node_id}` suffix.
    pub device_metrics: String,
    /// Environment metrics endpoint, without the `:{node_id}` suffix.
    pub environment_metrics: String,
    /// Main API base; devices are listed at `{main}/devices`.
    pub main: String,
}

impl Endpoints {
    /// Derive the default endpoint layout from a single API base URL.
    pub fn from_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            gps: format!("{base}/gps"),
            device_metrics: format!("{base}/device-metrics"),
            environment_metrics: format!("{base}/environment-metrics"),
            main: base.to_owned(),
        }
    }

    /// Point the device list at a different main API base.
    pub fn with_main(mut self, main: &str) -> Self {
        self.main = main.trim_end_matches('/').to_owned();
        self
    }

    pub fn gps_url(&self, node_id: &str) -> String {
        format!("{}:{node_id}", self.gps)
    }

    pub fn device_metrics_url(&self, node_id: &str) -> String {
        format!("{}:{node_id}", self.device_metrics)
    }

    pub fn environment_metrics_url(&self, node_id: &str) -> String {
        format!("{}:{node_id}", self.environment_metrics)
    }

    pub fn devices_url(&self) -> String {
        format!("{}/devices", self.main.trim_end_matches('/'))
    }
}
