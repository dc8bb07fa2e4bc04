// ── Filter predicates for device listings ──

use crate::bounds::Bounds;
use crate::model::CanonicalDevice;

/// Filter predicate over normalized devices.
#[derive(Debug, Clone, Default)]
pub enum DeviceFilter {
    #[default]
    All,
    Online,
    Active,
    RecentlyActive,
    Mqtt,
    /// Devices whose position falls inside the bounds. Devices without a
    /// position are excluded; malformed bounds include every positioned device.
    InBounds(Bounds),
}

impl DeviceFilter {
    pub fn matches(&self, device: &CanonicalDevice) -> bool {
        match self {
            Self::All => true,
            Self::Online => device.is_online,
            Self::Active => device.is_active,
            Self::RecentlyActive => device.is_recently_active,
            Self::Mqtt => device.is_mqtt_node,
            Self::InBounds(bounds) => device
                .coordinates
                .is_some_and(|c| bounds.contains(c.latitude, c.longitude)),
        }
    }
}
