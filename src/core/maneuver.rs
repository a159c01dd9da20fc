//! Fahranweisung, verankert an einem Itinerary-Punkt.

use super::ObjId;
use serde::{Deserialize, Serialize};

/// Icon-Name für Anweisungen ohne Manöver-Metadaten (z.B. GPX-Import).
pub const ICON_UNDEFINED: &str = "kUndefined";

/// Eine Turn-by-Turn-Anweisung.
///
/// Der Anker ist ein Verweis per Objekt-ID, kein Besitz: Manöver und
/// Itinerary-Punkte werden getrennt serialisiert, der Verweis wird beim
/// Laden über die alt→neu-Tabelle umgeschrieben.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maneuver {
    /// Name des Anweisungs-Icons
    #[serde(default)]
    pub icon_name: String,
    /// Anweisungstext
    #[serde(default)]
    pub instruction: String,
    /// Distanz bis zum nächsten Manöver in Metern
    #[serde(default)]
    pub distance: f64,
    /// Dauer bis zum nächsten Manöver in Sekunden
    #[serde(default)]
    pub duration: f64,
    /// Objekt-ID des verankerten Itinerary-Punkts
    pub itinerary_point_obj_id: ObjId,
    /// Eindeutige Objekt-ID
    #[serde(default = "ObjId::next")]
    pub obj_id: ObjId,
}

impl Maneuver {
    /// Erstellt ein neues Manöver mit frischer Objekt-ID.
    pub fn new(icon_name: &str, instruction: String, itinerary_point_obj_id: ObjId) -> Self {
        Self {
            icon_name: icon_name.to_string(),
            instruction,
            distance: 0.0,
            duration: 0.0,
            itinerary_point_obj_id,
            obj_id: ObjId::next(),
        }
    }
}
