// ── Field normalization ──
//
// Each canonical field is an ordered cascade of extractors over the three
// record schemas; the first one that yields a value wins. A value only
// counts when it is "truthy": a non-empty string, or a number that is
// neither zero nor NaN.

use crate::model::{Coordinates, DeviceRecord, Id};

/// Scale of the integer coordinates in position packets.
const COORDINATE_SCALE: f64 = 1e7;

/// Returned by [`node_id`] when a record carries neither an id nor a position.
pub const UNKNOWN_NODE_ID: &str = "unknown";

fn truthy(field: Option<&Id>) -> Option<&Id> {
    field.filter(|id| id.is_truthy())
}

fn text(field: Option<&Id>) -> Option<&str> {
    truthy(field).map(Id::as_str)
}

fn number(field: Option<f64>) -> Option<f64> {
    field.filter(|n| *n != 0.0 && !n.is_nan())
}

/// Stable node identifier.
///
/// `device_id`, then `hex_id`, then `user.data.id`. Without any of those a
/// position-derived id `node_{lat}_{lon}` (4 decimals) is synthesized, and
/// failing that the literal `"unknown"`.
pub fn node_id(device: &DeviceRecord) -> String {
    let explicit = text(device.device_id.as_ref())
        .or_else(|| text(device.hex_id.as_ref()))
        .or_else(|| text(device.user_data().and_then(|d| d.id.as_ref())));

    if let Some(id) = explicit {
        return id.to_owned();
    }

    match (number(device.latitude), number(device.longitude)) {
        (Some(lat), Some(lon)) => format!("node_{}_{}", to_fixed(lat, 4), to_fixed(lon, 4)),
        _ => UNKNOWN_NODE_ID.to_owned(),
    }
}

/// `value` with exactly `digits` decimals, exact ties rounded away from zero.
///
/// `{:.N}` already rounds the exact binary value correctly except on ties,
/// where it picks the even digit. A tie at `digits` decimals is an odd
/// multiple of `2^-(digits + 1)`, so those are detected and rounded up.
fn to_fixed(value: f64, digits: i32) -> String {
    let precision = usize::try_from(digits).unwrap_or(0);
    let formatted = format!("{value:.precision$}");

    let halves = value.abs() * 2f64.powi(digits + 1);
    let is_tie = halves.fract() == 0.0 && (halves / 2.0).fract() != 0.0;
    if !is_tie {
        return formatted;
    }

    // |value| * 10^digits is k + 0.5 exactly here, so adding 0.5 lands on k + 1
    let rounded = format!("{:.0}", value.abs() * 10f64.powi(digits) + 0.5);
    let padded = format!("{rounded:0>width$}", width = precision + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - precision);
    let sign = if value < 0.0 { "-" } else { "" };
    if precision == 0 {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    }
}

/// Human-readable device name, if the record has any.
pub fn device_name(device: &DeviceRecord) -> Option<&str> {
    let display = text(device.display_long_name.as_ref())
        .or_else(|| text(device.display_short_name.as_ref()));
    if display.is_some() {
        return display;
    }

    let user = device.user_data();
    text(device.short_name.as_ref())
        .or_else(|| text(device.long_name.as_ref()))
        .or_else(|| text(device.hex_id.as_ref()))
        .or_else(|| text(device.device_id.as_ref()))
        .or_else(|| text(user.and_then(|d| d.short_name.as_ref())))
        .or_else(|| text(user.and_then(|d| d.long_name.as_ref())))
        .or_else(|| text(user.and_then(|d| d.id.as_ref())))
}

/// Device position as `[lat, lon, alt]`.
///
/// Flat `latitude`/`longitude` win (altitude forced to 0), then `rawData`,
/// then the legacy `position.data` block. A coordinate of exactly 0 counts
/// as missing in every branch.
pub fn device_coordinates(device: &DeviceRecord) -> Option<Coordinates> {
    if let (Some(lat), Some(lon)) = (number(device.latitude), number(device.longitude)) {
        return Some(Coordinates::new(lat, lon, 0.0));
    }

    if let Some(raw) = device.raw_data.as_ref() {
        if let (Some(lat), Some(lon)) = (number(raw.latitude_i), number(raw.longitude_i)) {
            return Some(Coordinates::new(
                lat / COORDINATE_SCALE,
                lon / COORDINATE_SCALE,
                number(raw.altitude).unwrap_or(0.0),
            ));
        }
    }

    let legacy = device.position_data()?;
    let lat = number(legacy.latitude_i)?;
    let lon = number(legacy.longitude_i)?;
    Some(Coordinates::new(
        lat / COORDINATE_SCALE,
        lon / COORDINATE_SCALE,
        number(legacy.altitude).unwrap_or(0.0),
    ))
}

/// Freshest report time across every schema, in epoch seconds.
pub fn latest_timestamp(device: &DeviceRecord) -> Option<f64> {
    let candidates = [
        device.raw_data.as_ref().and_then(|r| r.time),
        device.last_updated.map(|ms| ms / 1000.0),
        device.position_time,
        device.user.as_ref().and_then(|u| u.server_time),
        device.position.as_ref().and_then(|p| p.server_time),
        device.device_metrics.as_ref().and_then(|m| m.server_time),
        device.environment_metrics.as_ref().and_then(|m| m.server_time),
    ];

    candidates
        .into_iter()
        .filter_map(number)
        .reduce(f64::max)
}

/// Whether the record reached the backend over an MQTT bridge rather than radio.
///
/// Current records are bridged when their gateway is the node itself. Legacy
/// records carry no gateway, so a receive SNR and RSSI of exactly zero stands
/// in for it.
pub fn is_mqtt_node(device: &DeviceRecord) -> bool {
    if let (Some(gateway), Some(hex_id)) = (
        truthy(device.gateway.as_ref()),
        truthy(device.hex_id.as_ref()),
    ) {
        return gateway.strictly_equals(hex_id);
    }

    device
        .user
        .as_ref()
        .is_some_and(|u| u.rx_snr == Some(0.0) && u.rx_rssi == Some(0.0))
}
