//! Geographisches Koordinatenpaar.

use serde::{Deserialize, Serialize};

/// Ein Koordinatenpaar in Grad (WGS84).
///
/// Nominalbereiche lat ∈ [-90, 90], lng ∈ [-180, 180]; die Werte werden
/// nicht erzwungen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    /// Breitengrad
    pub lat: f64,
    /// Längengrad
    pub lng: f64,
}

impl LatLng {
    /// Erstellt ein neues Koordinatenpaar
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}
