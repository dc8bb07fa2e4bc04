// ── Device model ──
//
// `DeviceRecord` is the raw, schema-tolerant input; `CanonicalDevice` is the
// normalized view that consumers depend on.

mod lenient;

pub mod canonical;
pub mod id;
pub mod record;

pub use canonical::{CanonicalDevice, Coordinates, TrackPoint};
pub use id::Id;
pub use record::{
    DeviceRecord, LegacyPosition, LegacyPositionData, LegacyReport, LegacyUser, LegacyUserData,
    RawPosition, RecordSchema,
};
