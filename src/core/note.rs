//! Karten- und Routennotizen.

use super::{LatLng, ObjId};
use serde::{Deserialize, Serialize};

/// Eine Notiz an einer Kartenposition.
///
/// Routennotizen tragen zusätzlich die Distanz ab Routenstart
/// (nächster Punkt auf der Route), damit das Roadbook sie einsortieren kann.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Position der Notiz
    #[serde(flatten)]
    pub lat_lng: LatLng,
    /// Icon-Inhalt (Text/HTML)
    #[serde(default)]
    pub icon_content: String,
    /// Tooltip-Text
    #[serde(default)]
    pub tooltip_content: String,
    /// Distanz ab Routenstart in Metern (0.0 bei Kartennotizen)
    #[serde(default)]
    pub distance: f64,
    /// Eindeutige Objekt-ID
    #[serde(default = "ObjId::next")]
    pub obj_id: ObjId,
}

impl Note {
    /// Erstellt eine leere Notiz mit frischer Objekt-ID.
    pub fn new(lat_lng: LatLng) -> Self {
        Self {
            lat_lng,
            icon_content: String::new(),
            tooltip_content: String::new(),
            distance: 0.0,
            obj_id: ObjId::next(),
        }
    }
}
