//! Eine rechteckige Druckansicht auf die Route.

use crate::core::LatLng;

/// Ein Kartenausschnitt für den paginierten Druck.
///
/// `bottom_left` ≤ `upper_right` komponentenweise; Ein- und Austrittspunkt
/// liegen im Rechteck oder auf dessen Rahmen. Nach dem Einreihen in die
/// Ergebnisliste wird eine Ansicht nicht mehr verändert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintView {
    /// Südwest-Ecke
    pub bottom_left: LatLng,
    /// Nordost-Ecke
    pub upper_right: LatLng,
    /// Punkt, an dem die Route die Ansicht betritt
    pub entry_point: LatLng,
    /// Punkt, an dem die Route die Ansicht verlässt
    pub exit_point: LatLng,
}
