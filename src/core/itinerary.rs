//! Die berechnete Geometrie einer Route samt Manövern.

use super::{ItineraryPoint, Maneuver};
use serde::{Deserialize, Serialize};

/// Geometrie und Anweisungen einer Route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// Geordnete Punktfolge der Routengeometrie
    #[serde(default)]
    pub itinerary_points: Vec<ItineraryPoint>,
    /// Geordnete Manöverfolge
    #[serde(default)]
    pub maneuvers: Vec<Maneuver>,
    /// Routing-Provider, der die Geometrie geliefert hat
    #[serde(default)]
    pub provider: String,
    /// Verkehrsmittel (z.B. "bike", "car")
    #[serde(default)]
    pub transit_mode: String,
    /// Summe der positiven Höhendifferenzen in Metern
    #[serde(default)]
    pub ascent: f64,
    /// Summe der negativen Höhendifferenzen in Metern (Betrag)
    #[serde(default)]
    pub descent: f64,
    /// `true` wenn mindestens ein Punkt eine bekannte Höhe trägt
    #[serde(default)]
    pub has_profile: bool,
}

impl Itinerary {
    /// Erstellt eine leere Itinerary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Summiert Auf- und Abstieg über die Höhendifferenzen benachbarter Punkte.
    pub fn compute_ascent_descent(&mut self) {
        self.ascent = 0.0;
        self.descent = 0.0;

        for pair in self.itinerary_points.windows(2) {
            let delta = pair[1].elev - pair[0].elev;
            if delta > 0.0 {
                self.ascent += delta;
            } else {
                self.descent -= delta;
            }
        }
    }
}
