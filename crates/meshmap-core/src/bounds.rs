// ── Viewport bounds ──
//
// Map widgets hand bounds over either as a corner object or as a pair of
// `[lat, lng]` arrays. Both are parsed up front into `Bounds`; anything
// else is kept as `Unrecognized` and never hides a point.

use std::str::FromStr;

use serde_json::Value;

/// A `[lat, lng]` pair in degrees.
pub type LatLng = [f64; 2];

/// A rectangular viewport, as handed over by a map widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Bounds {
    /// South-west / north-east corner accessors. A corner may be missing.
    Corners {
        south_west: Option<LatLng>,
        north_east: Option<LatLng>,
    },
    /// `[[south, west], [north, east]]`.
    Pairs([LatLng; 2]),
    /// Any other shape.
    Unrecognized,
}

impl Bounds {
    pub fn from_corners(south_west: LatLng, north_east: LatLng) -> Self {
        Self::Corners {
            south_west: Some(south_west),
            north_east: Some(north_east),
        }
    }

    /// Inclusive containment; fails open when the bounds cannot be evaluated.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        let (sw, ne) = match self {
            Self::Corners {
                south_west: Some(sw),
                north_east: Some(ne),
            } => (sw, ne),
            Self::Pairs([sw, ne]) => (sw, ne),
            Self::Corners { .. } | Self::Unrecognized => return true,
        };
        let [south, west] = *sw;
        let [north, east] = *ne;
        lat >= south && lat <= north && lng >= west && lng <= east
    }
}

fn lat_lng(value: &Value) -> Option<LatLng> {
    match value.as_array()?.as_slice() {
        [lat, lng, ..] => Some([lat.as_f64()?, lng.as_f64()?]),
        _ => None,
    }
}

impl From<&Value> for Bounds {
    fn from(value: &Value) -> Self {
        match value {
            Value::Object(map) => {
                let south_west = map.get("southWest").or_else(|| map.get("south_west"));
                let north_east = map.get("northEast").or_else(|| map.get("north_east"));
                if south_west.is_none() && north_east.is_none() {
                    return Self::Unrecognized;
                }
                Self::Corners {
                    south_west: south_west.and_then(lat_lng),
                    north_east: north_east.and_then(lat_lng),
                }
            }
            Value::Array(items) => match items.as_slice() {
                [sw, ne] => match (lat_lng(sw), lat_lng(ne)) {
                    (Some(sw), Some(ne)) => Self::Pairs([sw, ne]),
                    _ => Self::Unrecognized,
                },
                _ => Self::Unrecognized,
            },
            _ => Self::Unrecognized,
        }
    }
}

/// Error from parsing `"south,west,north,east"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected \"south,west,north,east\" in degrees, got \"{0}\"")]
pub struct ParseBoundsError(String);

impl FromStr for Bounds {
    type Err = ParseBoundsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| ParseBoundsError(s.to_owned()))?;

        match parts.as_slice() {
            [south, west, north, east] => Ok(Self::Pairs([[*south, *west], [*north, *east]])),
            _ => Err(ParseBoundsError(s.to_owned())),
        }
    }
}

/// Whether a point lies inside `bounds`. Absent or malformed bounds include every point.
pub fn is_point_in_bounds(lat: f64, lng: f64, bounds: Option<&Bounds>) -> bool {
    bounds.is_none_or(|b| b.contains(lat, lng))
}
