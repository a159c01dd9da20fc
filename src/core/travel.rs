//! Das Wurzelobjekt eines Reisedokuments.

use std::collections::HashMap;

use super::{Note, ObjId, ObjType, Route};
use serde::{Deserialize, Serialize};

/// Eine Reise: geordnete Routen, Kartennotizen und die bearbeitete Route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Travel {
    /// Typ-Kennung im JSON
    #[serde(default)]
    pub obj_type: ObjType,
    /// Name der Reise
    #[serde(default)]
    pub name: String,
    /// Name des Karten-Layers
    #[serde(default)]
    pub layer_name: String,
    /// Geordnete Routen
    #[serde(default)]
    pub routes: Vec<Route>,
    /// Kartennotizen
    #[serde(default)]
    pub notes: Vec<Note>,
    /// Kopie der gerade bearbeiteten Route; sehr alte Dateien haben das Feld nicht
    #[serde(default = "Route::new")]
    pub edited_route: Route,
    /// Eindeutige Objekt-ID
    #[serde(default = "ObjId::next")]
    pub obj_id: ObjId,
}

impl Travel {
    /// Erstellt eine neue Reise mit einer Platzhalter-Route.
    pub fn new() -> Self {
        Self {
            obj_type: ObjType::travel(),
            name: String::new(),
            layer_name: String::new(),
            routes: vec![Route::new()],
            notes: Vec::new(),
            edited_route: Route::new(),
            obj_id: ObjId::next(),
        }
    }

    /// Vergibt allen Objekten frische IDs und schreibt Querverweise um.
    ///
    /// Wird nach jedem Deserialisieren aufgerufen: gespeicherte IDs gelten
    /// nur innerhalb einer Datei und dürfen laufende Sitzungen nie kollidieren.
    pub fn remint_obj_ids(&mut self) {
        self.obj_id = ObjId::next();
        for route in &mut self.routes {
            remint_route(route);
        }
        remint_route(&mut self.edited_route);
        for note in &mut self.notes {
            note.obj_id = ObjId::next();
        }
    }
}

/// Vergibt frische IDs innerhalb einer Route und remappt Manöver-Anker.
fn remint_route(route: &mut Route) {
    route.obj_id = ObjId::next();

    let mut remap: HashMap<ObjId, ObjId> = HashMap::new();
    for point in &mut route.itinerary.itinerary_points {
        let minted = ObjId::next();
        remap.insert(point.obj_id, minted);
        point.obj_id = minted;
    }

    for maneuver in &mut route.itinerary.maneuvers {
        maneuver.obj_id = ObjId::next();
        match remap.get(&maneuver.itinerary_point_obj_id) {
            Some(&minted) => maneuver.itinerary_point_obj_id = minted,
            None => log::warn!(
                "Maneuver without itinerary point: {}",
                maneuver.itinerary_point_obj_id
            ),
        }
    }

    for way_point in &mut route.way_points {
        way_point.obj_id = ObjId::next();
    }
    for note in &mut route.notes {
        note.obj_id = ObjId::next();
    }
}

impl Default for Travel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ItineraryPoint, Maneuver, ICON_UNDEFINED};

    #[test]
    fn test_new_travel_has_placeholder_route() {
        let travel = Travel::new();
        assert_eq!(travel.routes.len(), 1);
        assert_eq!(travel.routes[0].way_points.len(), 2);
    }

    #[test]
    fn test_remint_remaps_maneuver_anchor() {
        let mut travel = Travel::new();
        let route = &mut travel.routes[0];
        let point = ItineraryPoint::new(50.0, 4.0);
        let old_anchor = point.obj_id;
        route.itinerary.itinerary_points.push(point);
        route
            .itinerary
            .maneuvers
            .push(Maneuver::new(ICON_UNDEFINED, "Start".to_string(), old_anchor));

        travel.remint_obj_ids();

        let route = &travel.routes[0];
        let new_anchor = route.itinerary.itinerary_points[0].obj_id;
        assert_ne!(new_anchor, old_anchor);
        assert_eq!(
            route.itinerary.maneuvers[0].itinerary_point_obj_id,
            new_anchor
        );
    }

    #[test]
    fn test_remint_twice_yields_disjoint_ids() {
        let mut travel = Travel::new();
        travel.routes[0]
            .itinerary
            .itinerary_points
            .push(ItineraryPoint::new(50.0, 4.0));

        travel.remint_obj_ids();
        let first: Vec<ObjId> = travel
            .routes
            .iter()
            .flat_map(|route| route.itinerary.itinerary_points.iter())
            .map(|point| point.obj_id)
            .collect();

        travel.remint_obj_ids();
        let second: Vec<ObjId> = travel
            .routes
            .iter()
            .flat_map(|route| route.itinerary.itinerary_points.iter())
            .map(|point| point.obj_id)
            .collect();

        assert!(first.iter().all(|obj_id| !second.contains(obj_id)));
    }
}
