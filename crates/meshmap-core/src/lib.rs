// meshmap-core: Device normalization and fail-soft data access for meshmap.

pub mod bounds;
pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod format;
pub mod liveness;
pub mod model;
pub mod normalize;
pub mod service;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bounds::{Bounds, LatLng, ParseBoundsError, is_point_in_bounds};
pub use config::{ServiceConfig, TlsVerification};
pub use debounce::{Debounced, debounce};
pub use error::CoreError;
pub use filter::DeviceFilter;
pub use format::{display_value, format_value, time_ago, time_ago_at};
pub use liveness::{
    DEVICE_ACTIVE_THRESHOLD, DEVICE_RECENTLY_ACTIVE_THRESHOLD, LivenessThresholds,
    is_device_active, is_device_online, is_device_recently_active,
};
pub use model::{CanonicalDevice, Coordinates, DeviceRecord, Id, RecordSchema, TrackPoint};
pub use normalize::{device_coordinates, device_name, is_mqtt_node, latest_timestamp, node_id};
pub use service::{MeshService, NodeDetail};

pub use meshmap_api::Endpoints;
