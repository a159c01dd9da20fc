//! Typ-Kennungen im Travel-JSON.

use serde::{Deserialize, Serialize};

/// Typ-Kennung eines gespeicherten Objekts (`{"name": ..., "version": ...}`).
///
/// Beim Laden wird nur die Anwesenheit geprüft; beim Speichern wird die
/// aktuelle Crate-Version eingetragen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjType {
    /// Typname (z.B. "Travel", "ItineraryPoint")
    pub name: String,
    /// Version des schreibenden Editors
    pub version: String,
}

impl ObjType {
    /// Erstellt eine Typ-Kennung mit der aktuellen Crate-Version.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Typ-Kennung des Travel-Wurzelobjekts.
    pub fn travel() -> Self {
        Self::new("Travel")
    }

    /// Typ-Kennung kompaktierter Itinerary-Punkte.
    pub fn itinerary_point() -> Self {
        Self::new("ItineraryPoint")
    }
}

impl Default for ObjType {
    fn default() -> Self {
        Self::travel()
    }
}
