//! Eine editierbare Route mit Wegpunkten, Notizen und Itinerary.

use super::{geometry, CollectionCursor, Itinerary, Note, ObjId, WayPoint};
use serde::{Deserialize, Serialize};

/// Bearbeitungszustand einer Route (im JSON als Zahl gespeichert).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum RouteEditionStatus {
    /// Nicht in Bearbeitung
    #[default]
    NotEdited,
    /// In Bearbeitung, noch ohne Änderungen
    EditedNoControl,
    /// In Bearbeitung mit Änderungen
    EditedChanged,
}

impl From<u8> for RouteEditionStatus {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::EditedNoControl,
            2 => Self::EditedChanged,
            _ => Self::NotEdited,
        }
    }
}

impl From<RouteEditionStatus> for u8 {
    fn from(status: RouteEditionStatus) -> Self {
        match status {
            RouteEditionStatus::NotEdited => 0,
            RouteEditionStatus::EditedNoControl => 1,
            RouteEditionStatus::EditedChanged => 2,
        }
    }
}

/// Eine Route: geordnete Wegpunkte, Notizen, Itinerary und Darstellung.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Anzeigename der Route
    #[serde(default)]
    pub name: String,
    /// Geordnete Wegpunkte (mindestens Start und Ziel)
    #[serde(default)]
    pub way_points: Vec<WayPoint>,
    /// Routennotizen
    #[serde(default)]
    pub notes: Vec<Note>,
    /// Geometrie und Manöver
    #[serde(default)]
    pub itinerary: Itinerary,
    /// Linienbreite in Pixeln
    #[serde(default = "default_width")]
    pub width: u32,
    /// Linienfarbe (#rrggbb)
    #[serde(default = "default_color")]
    pub color: String,
    /// Index in der Dash-Tabelle der Darstellung
    #[serde(default)]
    pub dash_index: u32,
    /// Gesamtdistanz in Metern
    #[serde(default)]
    pub distance: f64,
    /// Gesamtdauer in Sekunden
    #[serde(default)]
    pub duration: f64,
    /// Bearbeitungszustand
    #[serde(default)]
    pub edition_status: RouteEditionStatus,
    /// Eindeutige Objekt-ID
    #[serde(default = "ObjId::next")]
    pub obj_id: ObjId,
}

/// Serde-Default für die Linienbreite.
fn default_width() -> u32 {
    5
}

/// Serde-Default für die Linienfarbe.
fn default_color() -> String {
    "#ff0000".to_string()
}

impl Route {
    /// Erstellt eine neue Route mit zwei Platzhalter-Wegpunkten (Start/Ziel).
    pub fn new() -> Self {
        Self {
            name: String::new(),
            way_points: vec![WayPoint::new(), WayPoint::new()],
            notes: Vec::new(),
            itinerary: Itinerary::new(),
            width: default_width(),
            color: default_color(),
            dash_index: 0,
            distance: 0.0,
            duration: 0.0,
            edition_status: RouteEditionStatus::NotEdited,
            obj_id: ObjId::next(),
        }
    }

    /// Berechnet kumulierte Punktdistanzen, Routendistanz und Manöver-Attribution.
    ///
    /// Doppelt verankerte Manöver werden vorab entfernt (das frühere entfällt),
    /// sonst würde das entartete Null-Längen-Segment doppelt attribuiert.
    pub fn compute_distances(&mut self) {
        self.distance = 0.0;

        {
            let points = &mut self.itinerary.itinerary_points;
            if points.is_empty() {
                return;
            }

            points[0].distance = 0.0;
            let mut total = 0.0;
            for index in 1..points.len() {
                total += geometry::points_distance(
                    points[index - 1].lat_lng,
                    points[index].lat_lng,
                );
                points[index].distance = total;
            }
            self.distance = total;
        }

        {
            let maneuvers = &mut self.itinerary.maneuvers;
            let mut index = 0;
            while index + 1 < maneuvers.len() {
                if maneuvers[index].itinerary_point_obj_id
                    == maneuvers[index + 1].itinerary_point_obj_id
                {
                    maneuvers.remove(index);
                } else {
                    index += 1;
                }
            }
        }

        // Zwei Cursor in unterschiedlichem Takt: die Punkte treiben die
        // Distanz voran, die Manöver sammeln sie zwischen ihren Ankern ein.
        let anchors: Vec<(ObjId, f64)> = self
            .itinerary
            .itinerary_points
            .iter()
            .map(|point| (point.obj_id, point.distance))
            .collect();

        let maneuvers = &mut self.itinerary.maneuvers;
        if maneuvers.is_empty() {
            self.duration = 0.0;
            return;
        }

        let mut point_cursor = CollectionCursor::new(&anchors);
        let mut accumulating: Option<usize> = None;
        let mut next_maneuver = 0usize;
        let mut running = 0.0;

        while let Some(&(obj_id, distance)) = point_cursor.current() {
            if let Some(&(_, previous_distance)) = point_cursor.previous() {
                running += distance - previous_distance;
            }

            if next_maneuver < maneuvers.len()
                && maneuvers[next_maneuver].itinerary_point_obj_id == obj_id
            {
                // Anker erreicht: aufgelaufene Distanz dem Vorgänger zuschreiben
                if let Some(current) = accumulating {
                    maneuvers[current].distance = running;
                }
                running = 0.0;
                accumulating = Some(next_maneuver);
                next_maneuver += 1;
            }

            point_cursor.advance();
        }

        // Das letzte Manöver bekommt das Reststück bis zum Routenende
        if let Some(current) = accumulating {
            maneuvers[current].distance = running;
        }

        self.duration = maneuvers.iter().map(|maneuver| maneuver.duration).sum();
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new()
    }
}
