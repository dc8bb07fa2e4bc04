// ── Canonical device view ──

use serde::{Deserialize, Serialize};

use crate::liveness::LivenessThresholds;
use crate::model::record::{DeviceRecord, RecordSchema};
use crate::normalize;

/// A position in degrees, with altitude in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// `[latitude, longitude, altitude]`, the order map widgets take.
    pub fn as_array(&self) -> [f64; 3] {
        [self.latitude, self.longitude, self.altitude]
    }
}

/// Schema-independent fields derived from one `DeviceRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalDevice {
    pub node_id: String,
    pub device_name: Option<String>,
    pub coordinates: Option<Coordinates>,
    /// Epoch seconds.
    pub latest_timestamp: Option<f64>,
    pub is_online: bool,
    pub is_active: bool,
    pub is_recently_active: bool,
    pub is_mqtt_node: bool,
    pub schema: RecordSchema,
}

impl CanonicalDevice {
    /// Project a record against a fixed "now" (epoch seconds).
    pub fn project(record: &DeviceRecord, thresholds: &LivenessThresholds, now_secs: f64) -> Self {
        Self {
            node_id: normalize::node_id(record),
            device_name: normalize::device_name(record).map(str::to_owned),
            coordinates: normalize::device_coordinates(record),
            latest_timestamp: normalize::latest_timestamp(record),
            is_online: thresholds.is_online_at(record, now_secs),
            is_active: thresholds.is_active_at(record, now_secs),
            is_recently_active: thresholds.is_recently_active_at(record, now_secs),
            is_mqtt_node: normalize::is_mqtt_node(record),
            schema: record.schema(),
        }
    }
}

/// One point of a node's GPS track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub coordinates: Option<Coordinates>,
    /// Epoch seconds.
    pub timestamp: Option<f64>,
}

impl From<&DeviceRecord> for TrackPoint {
    fn from(record: &DeviceRecord) -> Self {
        Self {
            coordinates: normalize::device_coordinates(record),
            timestamp: normalize::latest_timestamp(record),
        }
    }
}
