// ── Device record ──
//
// Typed view over the three device JSON shapes the backend has served:
// the current flat schema, the `rawData` position-packet schema, and the
// legacy nested `user`/`position` schema. Every field is optional.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};
use tracing::trace;

use super::id::Id;
use super::lenient;

/// One device as returned by the backend, in any of its historical shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    // ── Current schema ──
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub device_id: Option<Id>,
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub hex_id: Option<Id>,
    /// Id of the node that relayed this record to the backend.
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub gateway: Option<Id>,
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub short_name: Option<Id>,
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub long_name: Option<Id>,
    /// camelCase `shortName`, preferred over the snake_case names.
    #[serde(
        rename = "shortName",
        default,
        deserialize_with = "lenient::id",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_short_name: Option<Id>,
    /// camelCase `longName`, preferred over every other name.
    #[serde(
        rename = "longName",
        default,
        deserialize_with = "lenient::id",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_long_name: Option<Id>,
    /// Degrees.
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Degrees.
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Epoch milliseconds.
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<f64>,
    /// Epoch seconds.
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub position_time: Option<f64>,

    // ── Raw-position schema ──
    #[serde(
        rename = "rawData",
        default,
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_data: Option<RawPosition>,

    // ── Legacy schema ──
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub user: Option<LegacyUser>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub position: Option<LegacyPosition>,
    #[serde(
        rename = "deviceMetrics",
        default,
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub device_metrics: Option<LegacyReport>,
    #[serde(
        rename = "environmentMetrics",
        default,
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub environment_metrics: Option<LegacyReport>,

    /// Catch-all for fields no schema names.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Position packet fields, with coordinates scaled by 1e7.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub latitude_i: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub longitude_i: Option<f64>,
    /// Meters.
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Epoch seconds.
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

/// Legacy `user` block: node info plus the radio metrics of its last packet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyUser {
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub data: Option<LegacyUserData>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub rx_snr: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub rx_rssi: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub server_time: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyUserData {
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub short_name: Option<Id>,
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub long_name: Option<Id>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPosition {
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub data: Option<LegacyPositionData>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub server_time: Option<f64>,
}

/// Legacy position payload, coordinates scaled by 1e7.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPositionData {
    #[serde(
        rename = "latitudeI",
        default,
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude_i: Option<f64>,
    #[serde(
        rename = "longitudeI",
        default,
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude_i: Option<f64>,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

/// Legacy metrics block; only its receive time matters here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyReport {
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub server_time: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which backend generation a record looks like it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecordSchema {
    Current,
    RawPosition,
    Legacy,
    Unknown,
}

impl DeviceRecord {
    /// Parse a record from raw JSON. Never fails: anything that is not a
    /// JSON object becomes an empty record.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            trace!(error = %e, "device record is not an object, using empty record");
            Self::default()
        })
    }

    /// Classify the record by the field groups it carries.
    pub fn schema(&self) -> RecordSchema {
        if self.raw_data.is_some() {
            RecordSchema::RawPosition
        } else if self.user.is_some()
            || self.position.is_some()
            || self.device_metrics.is_some()
            || self.environment_metrics.is_some()
        {
            RecordSchema::Legacy
        } else if self.device_id.is_some()
            || self.hex_id.is_some()
            || self.gateway.is_some()
            || self.short_name.is_some()
            || self.long_name.is_some()
            || self.display_short_name.is_some()
            || self.display_long_name.is_some()
            || self.latitude.is_some()
            || self.longitude.is_some()
            || self.last_updated.is_some()
            || self.position_time.is_some()
        {
            RecordSchema::Current
        } else {
            RecordSchema::Unknown
        }
    }

    pub(crate) fn user_data(&self) -> Option<&LegacyUserData> {
        self.user.as_ref().and_then(|u| u.data.as_ref())
    }

    pub(crate) fn position_data(&self) -> Option<&LegacyPositionData> {
        self.position.as_ref().and_then(|p| p.data.as_ref())
    }
}

impl From<Value> for DeviceRecord {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_current_schema() {
        let record = DeviceRecord::from_value(json!({
            "device_id": "!a1b2c3d4",
            "hex_id": "a1b2c3d4",
            "shortName": "BASE",
            "latitude": 55.75,
            "longitude": 37.61,
            "last_updated": 1_700_000_000_000_i64,
        }));
        assert_eq!(record.device_id.as_deref(), Some("!a1b2c3d4"));
        assert_eq!(record.display_short_name.as_deref(), Some("BASE"));
        assert_eq!(record.last_updated, Some(1_700_000_000_000.0));
        assert_eq!(record.schema(), RecordSchema::Current);
    }

    #[test]
    fn parses_legacy_schema() {
        let record = DeviceRecord::from_value(json!({
            "user": {
                "data": { "id": "!0000beef", "shortName": "BF", "longName": "Beef" },
                "rxSnr": 0,
                "rxRssi": 0,
                "serverTime": 1_690_000_000,
            },
            "position": {
                "data": { "latitudeI": 551_234_567, "longitudeI": 371_234_567, "altitude": 140 },
                "serverTime": 1_690_000_100,
            },
        }));
        assert_eq!(record.user_data().unwrap().long_name.as_deref(), Some("Beef"));
        assert_eq!(record.position_data().unwrap().latitude_i, Some(551_234_567.0));
        assert_eq!(record.user.as_ref().unwrap().rx_snr, Some(0.0));
        assert_eq!(record.schema(), RecordSchema::Legacy);
    }

    #[test]
    fn raw_data_wins_classification() {
        let record = DeviceRecord::from_value(json!({
            "device_id": "!a1b2c3d4",
            "rawData": { "latitude_i": 1, "longitude_i": 2 },
            "user": {},
        }));
        assert_eq!(record.schema(), RecordSchema::RawPosition);
    }

    #[test]
    fn mistyped_fields_become_absent() {
        let record = DeviceRecord::from_value(json!({
            "latitude": "abc",
            "device_id": 42,
            "rawData": "garbage",
            "user": { "rxSnr": "loud" },
        }));
        assert_eq!(record.latitude, None);
        assert_eq!(record.device_id.as_deref(), Some("42"));
        assert_eq!(record.raw_data, None);
        assert_eq!(record.user.unwrap().rx_snr, None);
    }

    #[test]
    fn non_object_is_empty_record() {
        let record = DeviceRecord::from_value(json!([1, 2, 3]));
        assert_eq!(record, DeviceRecord::default());
        assert_eq!(record.schema(), RecordSchema::Unknown);
    }

    #[test]
    fn unknown_fields_kept_in_extra() {
        let record = DeviceRecord::from_value(json!({
            "hex_id": "a1b2c3d4",
            "hw_model": "TBEAM",
        }));
        assert_eq!(record.extra["hw_model"], "TBEAM");
        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["hw_model"], "TBEAM");
        assert_eq!(back["hex_id"], "a1b2c3d4");
    }

    #[test]
    fn schema_display_is_snake_case() {
        assert_eq!(RecordSchema::RawPosition.to_string(), "raw_position");
        assert_eq!("legacy".parse::<RecordSchema>().unwrap(), RecordSchema::Legacy);
    }
}
