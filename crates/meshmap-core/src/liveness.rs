// ── Liveness policy ──
//
// A device is judged by the age of its freshest report (see
// `normalize::latest_timestamp`). "Online" and "active" share one threshold;
// both names are kept for callers that use either.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::DeviceRecord;
use crate::normalize::latest_timestamp;

/// Default bound for online/active devices, in seconds (12 hours).
pub const DEVICE_ACTIVE_THRESHOLD: u64 = 12 * 60 * 60;

/// Default bound for recently active devices, in seconds (24 hours).
pub const DEVICE_RECENTLY_ACTIVE_THRESHOLD: u64 = 24 * 60 * 60;

/// Age limits for the liveness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessThresholds {
    pub active_secs: u64,
    pub recently_active_secs: u64,
}

impl Default for LivenessThresholds {
    fn default() -> Self {
        Self {
            active_secs: DEVICE_ACTIVE_THRESHOLD,
            recently_active_secs: DEVICE_RECENTLY_ACTIVE_THRESHOLD,
        }
    }
}

impl LivenessThresholds {
    pub fn is_online_at(&self, device: &DeviceRecord, now_secs: f64) -> bool {
        reported_within(device, now_secs, self.active_secs)
    }

    pub fn is_active_at(&self, device: &DeviceRecord, now_secs: f64) -> bool {
        reported_within(device, now_secs, self.active_secs)
    }

    pub fn is_recently_active_at(&self, device: &DeviceRecord, now_secs: f64) -> bool {
        reported_within(device, now_secs, self.recently_active_secs)
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn reported_within(device: &DeviceRecord, now_secs: f64, limit_secs: u64) -> bool {
    latest_timestamp(device).is_some_and(|ts| now_secs - ts < limit_secs as f64)
}

/// Current wall-clock time in epoch seconds, with millisecond precision.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn now_secs() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Reported within [`DEVICE_ACTIVE_THRESHOLD`] of now.
pub fn is_device_online(device: &DeviceRecord) -> bool {
    LivenessThresholds::default().is_online_at(device, now_secs())
}

/// Same check as [`is_device_online`].
pub fn is_device_active(device: &DeviceRecord) -> bool {
    LivenessThresholds::default().is_active_at(device, now_secs())
}

/// Reported within [`DEVICE_RECENTLY_ACTIVE_THRESHOLD`] of now.
pub fn is_device_recently_active(device: &DeviceRecord) -> bool {
    LivenessThresholds::default().is_recently_active_at(device, now_secs())
}
