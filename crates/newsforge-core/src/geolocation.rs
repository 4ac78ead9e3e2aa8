//! Cached user location and geolocation failure messages.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long a cached location stays valid.
pub const LOCATION_TTL_HOURS: i64 = 6;

/// Failure codes reported by a position provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationErrorCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unknown,
}

impl GeolocationErrorCode {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Unknown,
        }
    }

    /// User-facing explanation.
    pub fn message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Location access was denied. Enable location permissions to see local news."
            }
            Self::PositionUnavailable => "Location information is unavailable right now.",
            Self::Timeout => "The request to get your location timed out.",
            Self::Unknown => "An unknown error occurred while getting your location.",
        }
    }
}

pub fn geolocation_error_message(code: u16) -> &'static str {
    GeolocationErrorCode::from_code(code).message()
}

/// Location persisted under the `userLocation` preference key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl UserLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            city: None,
            country: None,
            timestamp: Utc::now(),
        }
    }

    /// Whether the entry is older than [`LOCATION_TTL_HOURS`] at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.timestamp > Duration::hours(LOCATION_TTL_HOURS)
    }
}
