// ── Mesh service ──
//
// Joins the fail-soft fetcher with the normalizer. Every method returns
// data (possibly empty); backend failures are already logged by the
// client and never reach the caller.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use meshmap_api::MeshApiClient;

use crate::config::ServiceConfig;
use crate::error::CoreError;
use crate::filter::DeviceFilter;
use crate::liveness::{LivenessThresholds, now_secs};
use crate::model::{CanonicalDevice, DeviceRecord, TrackPoint};
use crate::normalize;

/// Everything known about one node.
#[derive(Debug, Clone, Serialize)]
pub struct NodeDetail {
    pub node_id: String,
    pub device: Option<CanonicalDevice>,
    /// The record `device` was derived from.
    pub record: Option<DeviceRecord>,
    pub track: Vec<TrackPoint>,
    pub device_metrics: Option<Value>,
    pub environment_metrics: Option<Value>,
}

/// Read-side facade over one map backend.
pub struct MeshService {
    api: MeshApiClient,
    thresholds: LivenessThresholds,
}

impl MeshService {
    pub fn new(config: ServiceConfig) -> Result<Self, CoreError> {
        let api = MeshApiClient::new(config.endpoints.clone(), &config.transport())?;
        Ok(Self {
            api,
            thresholds: config.thresholds,
        })
    }

    /// Build a service around an existing client.
    pub fn with_client(api: MeshApiClient, thresholds: LivenessThresholds) -> Self {
        Self { api, thresholds }
    }

    pub fn api(&self) -> &MeshApiClient {
        &self.api
    }

    pub fn thresholds(&self) -> &LivenessThresholds {
        &self.thresholds
    }

    /// Normalized devices matching `filter`, ordered by node id.
    pub async fn devices(&self, filter: &DeviceFilter) -> Vec<CanonicalDevice> {
        self.devices_at(filter, now_secs()).await
    }

    /// [`devices`](Self::devices) evaluated against a fixed "now" (epoch seconds).
    pub async fn devices_at(&self, filter: &DeviceFilter, now_secs: f64) -> Vec<CanonicalDevice> {
        let raw = self.api.all_devices().await;
        let total = raw.len();

        let mut devices: Vec<CanonicalDevice> = raw
            .into_iter()
            .map(|(_, value)| DeviceRecord::from_value(value))
            .map(|record| CanonicalDevice::project(&record, &self.thresholds, now_secs))
            .filter(|device| filter.matches(device))
            .collect();
        devices.sort_by(|a, b| a.node_id.cmp(&b.node_id));

        debug!(total, matched = devices.len(), ?filter, "normalized device list");
        devices
    }

    /// GPS track of a node, each point run through the normalizer.
    pub async fn track(&self, node_id: &str) -> Vec<TrackPoint> {
        track_points(self.api.gps_track(node_id).await)
    }

    /// Device, track, and metrics for one node, fetched concurrently.
    pub async fn node_detail(&self, node_id: &str) -> NodeDetail {
        self.node_detail_at(node_id, now_secs()).await
    }

    /// [`node_detail`](Self::node_detail) evaluated against a fixed "now" (epoch seconds).
    pub async fn node_detail_at(&self, node_id: &str, now_secs: f64) -> NodeDetail {
        let (devices, track, device_metrics, environment_metrics) = tokio::join!(
            self.api.all_devices(),
            self.api.gps_track(node_id),
            self.api.device_metrics(node_id),
            self.api.environment_metrics(node_id),
        );

        // The list is keyed by node id on current backends; older ones use
        // arbitrary keys, so fall back to the normalized id.
        let record = devices.into_iter().find_map(|(key, value)| {
            let record = DeviceRecord::from_value(value);
            (key == node_id || normalize::node_id(&record) == node_id).then_some(record)
        });
        let device = record
            .as_ref()
            .map(|r| CanonicalDevice::project(r, &self.thresholds, now_secs));

        NodeDetail {
            node_id: node_id.to_owned(),
            device,
            record,
            track: track_points(track),
            device_metrics,
            environment_metrics,
        }
    }
}

fn track_points(raw: Vec<Value>) -> Vec<TrackPoint> {
    raw.into_iter()
        .map(|value| TrackPoint::from(&DeviceRecord::from_value(value)))
        .collect()
}
