//! Ein Vertex der Routengeometrie.

use super::{LatLng, ObjId};
use serde::{Deserialize, Serialize};

/// Ein Punkt der berechneten oder aufgezeichneten Routengeometrie.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryPoint {
    /// Position des Punkts
    #[serde(flatten)]
    pub lat_lng: LatLng,
    /// Kumulierte Distanz ab Routenstart in Metern
    #[serde(default)]
    pub distance: f64,
    /// Höhe in Metern (0.0 = unbekannt)
    #[serde(default)]
    pub elev: f64,
    /// Eindeutige Objekt-ID
    #[serde(default = "ObjId::next")]
    pub obj_id: ObjId,
}

impl ItineraryPoint {
    /// Erstellt einen neuen Punkt mit frischer Objekt-ID.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat_lng: LatLng::new(lat, lng),
            distance: 0.0,
            elev: 0.0,
            obj_id: ObjId::next(),
        }
    }
}
