//! Sphärische Geometrie-Primitiven.

use super::{ItineraryPoint, LatLng};
use crate::shared::options::EARTH_RADIUS;

/// Nächster Punkt auf einer Route samt Distanz ab Routenstart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestLatLngDistance {
    /// Projektion auf die Route
    pub lat_lng: LatLng,
    /// Distanz ab Routenstart in Metern
    pub distance: f64,
}

/// Distanz zwischen zwei Koordinaten in Metern (sphärischer Kosinussatz).
pub fn points_distance(start: LatLng, end: LatLng) -> f64 {
    // acos-Domäne: identische Punkte direkt behandeln
    if start == end {
        return 0.0;
    }

    let lat_start = start.lat.to_radians();
    let lat_end = end.lat.to_radians();
    let delta_lng = (end.lng - start.lng).to_radians();

    let cos_arc =
        lat_start.sin() * lat_end.sin() + lat_start.cos() * lat_end.cos() * delta_lng.cos();

    cos_arc.clamp(-1.0, 1.0).acos() * EARTH_RADIUS
}

/// Projiziert `target` auf den nächstgelegenen Punkt der Punktfolge.
///
/// Die Projektion rechnet segmentweise planar in Grad (ausreichend für die
/// kurzen Segmente einer Itinerary); die zurückgegebene Distanz ist die
/// kumulierte Distanz des Segmentanfangs plus das sphärische Reststück.
/// Setzt voraus, dass die kumulierten Punktdistanzen bereits berechnet sind.
pub fn closest_lat_lng_distance(
    points: &[ItineraryPoint],
    target: LatLng,
) -> Option<ClosestLatLngDistance> {
    let first = points.first()?;

    let mut best = ClosestLatLngDistance {
        lat_lng: first.lat_lng,
        distance: first.distance,
    };
    let mut best_separation = points_distance(target, first.lat_lng);

    for pair in points.windows(2) {
        let start = &pair[0];
        let end = &pair[1];

        let seg_lat = end.lat_lng.lat - start.lat_lng.lat;
        let seg_lng = end.lat_lng.lng - start.lat_lng.lng;
        let to_target_lat = target.lat - start.lat_lng.lat;
        let to_target_lng = target.lng - start.lat_lng.lng;

        let segment_len_sq = seg_lat * seg_lat + seg_lng * seg_lng;
        let t = if segment_len_sq > 0.0 {
            ((to_target_lat * seg_lat + to_target_lng * seg_lng) / segment_len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let projection = LatLng::new(
            start.lat_lng.lat + t * seg_lat,
            start.lat_lng.lng + t * seg_lng,
        );

        let separation = points_distance(target, projection);
        if separation < best_separation {
            best_separation = separation;
            best = ClosestLatLngDistance {
                lat_lng: projection,
                distance: start.distance + points_distance(start.lat_lng, projection),
            };
        }
    }

    Some(best)
}
