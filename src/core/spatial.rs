//! Spatial-Index (KD-Tree) für schnelle Abfragen auf Itinerary-Punkten.

use kiddo::{KdTree, SquaredEuclidean};

use super::{ItineraryPoint, LatLng, ObjId};

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// Objekt-ID des gefundenen Punkts
    pub obj_id: ObjId,
    /// Planare Distanz zum Suchpunkt in Grad
    pub distance: f64,
}

/// Read-only Spatial-Index über die Punkte einer Itinerary.
///
/// Die Abfragen rechnen planar in Grad; für die Auswahl des nächsten
/// Punkts (Manöver-Snapping) ist das auf Routen-Skala ausreichend.
#[derive(Debug)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    obj_ids: Vec<ObjId>,
}

impl SpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            obj_ids: Vec::new(),
        }
    }

    /// Baut einen neuen Index aus den übergebenen Punkten.
    pub fn from_points(points: &[ItineraryPoint]) -> Self {
        let entries: Vec<[f64; 2]> = points
            .iter()
            .map(|point| [point.lat_lng.lat, point.lat_lng.lng])
            .collect();

        let tree: KdTree<f64, 2> = (&entries).into();

        Self {
            tree,
            obj_ids: points.iter().map(|point| point.obj_id).collect(),
        }
    }

    /// Gibt die Anzahl indexierter Punkte zurück.
    pub fn len(&self) -> usize {
        self.obj_ids.len()
    }

    /// Gibt `true` zurück, wenn keine Punkte im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.obj_ids.is_empty()
    }

    /// Findet den nächsten Punkt zur gegebenen Position.
    pub fn nearest(&self, query: LatLng) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self.tree.nearest_one::<SquaredEuclidean>(&[query.lat, query.lng]);
        let obj_id = *self.obj_ids.get(result.item as usize)?;

        Some(SpatialMatch {
            obj_id,
            distance: result.distance.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<ItineraryPoint> {
        vec![
            ItineraryPoint::new(50.0, 4.0),
            ItineraryPoint::new(50.0, 4.1),
            ItineraryPoint::new(50.05, 4.05),
        ]
    }

    #[test]
    fn test_nearest_returns_expected_point() {
        let points = sample_points();
        let index = SpatialIndex::from_points(&points);

        let nearest = index
            .nearest(LatLng::new(50.049, 4.051))
            .expect("Treffer erwartet");

        assert_eq!(nearest.obj_id, points[2].obj_id);
        assert!(nearest.distance < 0.01);
    }

    #[test]
    fn test_empty_index_has_no_entries() {
        let index = SpatialIndex::empty();

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.nearest(LatLng::new(0.0, 0.0)).is_none());
    }
}
