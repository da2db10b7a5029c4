//! Coordinate roles and the variable names accepted for each.
//!
//! Candidate lists are tried in order; the first name present in the
//! dataset wins.

use std::fmt;

/// Accepted names for the latitude coordinate variable
pub const LATITUDE_CANDIDATES: &[&str] = &["lat", "latitude"];

/// Accepted names for the longitude coordinate variable
pub const LONGITUDE_CANDIDATES: &[&str] = &["lon", "longitude"];

/// A coordinate that gets overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateRole {
    Latitude,
    Longitude,
}

impl CoordinateRole {
    /// Roles in patch order.
    pub const ALL: [CoordinateRole; 2] = [CoordinateRole::Latitude, CoordinateRole::Longitude];

    /// Candidate variable names, highest priority first.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            CoordinateRole::Latitude => LATITUDE_CANDIDATES,
            CoordinateRole::Longitude => LONGITUDE_CANDIDATES,
        }
    }
}

impl fmt::Display for CoordinateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateRole::Latitude => write!(f, "latitude"),
            CoordinateRole::Longitude => write!(f, "longitude"),
        }
    }
}
