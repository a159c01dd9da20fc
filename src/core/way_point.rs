//! Nutzer-sichtbare Halte einer Route.

use super::{LatLng, ObjId};
use serde::{Deserialize, Serialize};

/// Ein Wegpunkt (Start, Ziel oder Zwischenhalt).
///
/// Wegpunkte sind von der dichten Itinerary-Geometrie getrennt: eine Route
/// hat mindestens Start und Ziel, weitere kommen vom Nutzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WayPoint {
    /// Anzeigename
    #[serde(default)]
    pub name: String,
    /// Adresse (vom Geocoding, leer wenn unbekannt)
    #[serde(default)]
    pub address: String,
    /// Position
    #[serde(flatten)]
    pub lat_lng: LatLng,
    /// Eindeutige Objekt-ID
    #[serde(default = "ObjId::next")]
    pub obj_id: ObjId,
}

impl WayPoint {
    /// Erstellt einen leeren Wegpunkt mit frischer Objekt-ID.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            lat_lng: LatLng::default(),
            obj_id: ObjId::next(),
        }
    }
}

impl Default for WayPoint {
    fn default() -> Self {
        Self::new()
    }
}
