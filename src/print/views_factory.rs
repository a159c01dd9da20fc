//! Zerlegung einer Route in eine Folge begrenzter Druckansichten.

use anyhow::{bail, Result};
use glam::DVec2;

use super::PrintView;
use crate::core::{LatLng, Route};
use crate::shared::options::ON_FRAME_TOLERANCE;

/// Zerlegt die Punktfolge einer Route in Ansichten begrenzter Größe.
///
/// Greedy-Scan entlang der Route: die aktuelle Ansicht wächst, solange der
/// nächste Punkt sie strikt unter der Maximalgröße hält. Andernfalls wird
/// der Schnittpunkt des Segments mit dem maximal ausgedehnten Rahmen
/// bestimmt, die Ansicht dort eingefroren und eine neue am Schnittpunkt
/// begonnen; der Punkt wird gegen die neue Ansicht erneut geprüft.
#[derive(Debug, Clone)]
pub struct PrintViewsFactory {
    max_view_size: LatLng,
}

/// Die noch wachsende Ansicht während des Scans.
struct CurrentView {
    bottom_left: LatLng,
    upper_right: LatLng,
    entry_point: LatLng,
}

impl CurrentView {
    /// Startet eine Ansicht an einem einzelnen Punkt.
    fn at(point: LatLng) -> Self {
        Self {
            bottom_left: point,
            upper_right: point,
            entry_point: point,
        }
    }

    /// `true` solange die Ansicht nur aus ihrem Startpunkt besteht.
    fn is_degenerate(&self) -> bool {
        self.bottom_left == self.upper_right
    }

    /// Bounding-Box der Ansicht nach Aufnahme von `point`.
    fn extended(&self, point: LatLng) -> (LatLng, LatLng) {
        (
            LatLng::new(
                self.bottom_left.lat.min(point.lat),
                self.bottom_left.lng.min(point.lng),
            ),
            LatLng::new(
                self.upper_right.lat.max(point.lat),
                self.upper_right.lng.max(point.lng),
            ),
        )
    }

    /// Nimmt `point` in die Ansicht auf.
    fn extend(&mut self, point: LatLng) {
        let (bottom_left, upper_right) = self.extended(point);
        self.bottom_left = bottom_left;
        self.upper_right = upper_right;
    }

    /// Friert die Ansicht mit ihrem Austrittspunkt ein.
    fn freeze(&self, exit_point: LatLng) -> PrintView {
        PrintView {
            bottom_left: self.bottom_left,
            upper_right: self.upper_right,
            entry_point: self.entry_point,
            exit_point,
        }
    }
}

impl PrintViewsFactory {
    /// Erstellt eine Factory mit der maximalen Ansichtsgröße in Grad.
    pub fn new(max_view_size: LatLng) -> Self {
        Self { max_view_size }
    }

    /// Berechnet die Ansichtenfolge für eine Route.
    ///
    /// Eine leere Itinerary ergibt die leere Liste; eine Route aus einem
    /// Punkt genau eine Ansicht, deren Ecken und Ein-/Austritt dieser
    /// Punkt ist.
    pub fn views_for_route(&self, route: &Route) -> Result<Vec<PrintView>> {
        if self.max_view_size.lat <= 0.0 || self.max_view_size.lng <= 0.0 {
            bail!("Maximale Ansichtsgröße muss positiv sein");
        }

        let points = &route.itinerary.itinerary_points;
        let mut views = Vec::new();
        let Some(first) = points.first() else {
            return Ok(views);
        };

        let mut current = CurrentView::at(first.lat_lng);
        let mut previous = first.lat_lng;
        let mut index = 1;

        while index < points.len() {
            let candidate = points[index].lat_lng;
            let (bottom_left, upper_right) = current.extended(candidate);

            if upper_right.lat - bottom_left.lat < self.max_view_size.lat
                && upper_right.lng - bottom_left.lng < self.max_view_size.lng
            {
                // Kandidat passt: Ansicht wächst, Punkt ist potentieller Austritt
                current.bottom_left = bottom_left;
                current.upper_right = upper_right;
                previous = candidate;
                index += 1;
            } else {
                let intermediate = self.intermediate_point(&current, previous, candidate)?;
                current.extend(intermediate);
                views.push(current.freeze(intermediate));
                current = CurrentView::at(intermediate);
                previous = intermediate;
                // Der Kandidat wird gegen die neue Ansicht erneut geprüft
            }
        }

        views.push(current.freeze(previous));
        Ok(views)
    }

    /// Schnittpunkt des Segments `previous → candidate` mit dem maximal
    /// ausgedehnten Rahmen der aktuellen Ansicht.
    fn intermediate_point(
        &self,
        current: &CurrentView,
        previous: LatLng,
        candidate: LatLng,
    ) -> Result<LatLng> {
        // 1. Entartete Ansicht (einzelner Punkt): Segment auf die
        //    Maximalgröße der stärker einschränkenden Achse skalieren.
        if current.is_degenerate() {
            let delta = DVec2::new(candidate.lng - previous.lng, candidate.lat - previous.lat);
            let ratio_lat = if delta.y.abs() > 0.0 {
                self.max_view_size.lat / delta.y.abs()
            } else {
                f64::INFINITY
            };
            let ratio_lng = if delta.x.abs() > 0.0 {
                self.max_view_size.lng / delta.x.abs()
            } else {
                f64::INFINITY
            };

            let scale = ratio_lat.min(ratio_lng);
            if !scale.is_finite() {
                bail!("Zwischenpunkt nicht gefunden: entartetes Segment");
            }

            let scaled = DVec2::new(previous.lng, previous.lat) + delta * scale;
            return Ok(LatLng::new(scaled.y, scaled.x));
        }

        let (frame_bottom_left, frame_upper_right) = self.max_frame(current, candidate);

        // 2. Kandidat liegt (fast) auf dem Rahmen: direkt übernehmen
        if is_on_frame(frame_bottom_left, frame_upper_right, candidate) {
            return Ok(candidate);
        }

        // 3. Achsenparallele Segmente: Randschnitt ohne Steigungsrechnung
        if (candidate.lng - previous.lng).abs() < ON_FRAME_TOLERANCE {
            let lat = if candidate.lat > previous.lat {
                frame_upper_right.lat
            } else {
                frame_bottom_left.lat
            };
            return Ok(LatLng::new(lat, previous.lng));
        }
        if (candidate.lat - previous.lat).abs() < ON_FRAME_TOLERANCE {
            let lng = if candidate.lng > previous.lng {
                frame_upper_right.lng
            } else {
                frame_bottom_left.lng
            };
            return Ok(LatLng::new(previous.lat, lng));
        }

        // 4. Allgemeiner Fall: lat = coef_a·lng + coef_b gegen die vier
        //    Seiten (rechts, oben, links, unten) in dieser Reihenfolge.
        //    Gültig ist der erste Schnitt, der innerhalb der Rahmengrenzen
        //    der anderen Achse liegt und zwischen Vorgänger und Kandidat.
        let coef_a = (previous.lat - candidate.lat) / (previous.lng - candidate.lng);
        let coef_b = previous.lat - coef_a * previous.lng;

        if candidate.lng > previous.lng && frame_upper_right.lng <= candidate.lng + ON_FRAME_TOLERANCE {
            let lat = coef_a * frame_upper_right.lng + coef_b;
            if in_range(lat, frame_bottom_left.lat, frame_upper_right.lat) {
                return Ok(LatLng::new(lat, frame_upper_right.lng));
            }
        }
        if candidate.lat > previous.lat && frame_upper_right.lat <= candidate.lat + ON_FRAME_TOLERANCE {
            let lng = (frame_upper_right.lat - coef_b) / coef_a;
            if in_range(lng, frame_bottom_left.lng, frame_upper_right.lng) {
                return Ok(LatLng::new(frame_upper_right.lat, lng));
            }
        }
        if candidate.lng < previous.lng && frame_bottom_left.lng >= candidate.lng - ON_FRAME_TOLERANCE {
            let lat = coef_a * frame_bottom_left.lng + coef_b;
            if in_range(lat, frame_bottom_left.lat, frame_upper_right.lat) {
                return Ok(LatLng::new(lat, frame_bottom_left.lng));
            }
        }
        if candidate.lat < previous.lat && frame_bottom_left.lat >= candidate.lat - ON_FRAME_TOLERANCE {
            let lng = (frame_bottom_left.lat - coef_b) / coef_a;
            if in_range(lng, frame_bottom_left.lng, frame_upper_right.lng) {
                return Ok(LatLng::new(frame_bottom_left.lat, lng));
            }
        }

        bail!(
            "Zwischenpunkt nicht gefunden: Segment ({}, {}) → ({}, {})",
            previous.lat,
            previous.lng,
            candidate.lat,
            candidate.lng
        );
    }

    /// Rahmen der aktuellen Ansicht, in Fahrtrichtung auf Maximalgröße gedehnt.
    fn max_frame(&self, current: &CurrentView, candidate: LatLng) -> (LatLng, LatLng) {
        let bottom_lat = if candidate.lat < current.bottom_left.lat {
            current.upper_right.lat - self.max_view_size.lat
        } else {
            current.bottom_left.lat
        };
        let upper_lat = if candidate.lat > current.upper_right.lat {
            current.bottom_left.lat + self.max_view_size.lat
        } else {
            current.upper_right.lat
        };
        let left_lng = if candidate.lng < current.bottom_left.lng {
            current.upper_right.lng - self.max_view_size.lng
        } else {
            current.bottom_left.lng
        };
        let right_lng = if candidate.lng > current.upper_right.lng {
            current.bottom_left.lng + self.max_view_size.lng
        } else {
            current.upper_right.lng
        };

        (
            LatLng::new(bottom_lat, left_lng),
            LatLng::new(upper_lat, right_lng),
        )
    }
}

/// `value` innerhalb `[low, high]` mit Rahmentoleranz.
fn in_range(value: f64, low: f64, high: f64) -> bool {
    value >= low - ON_FRAME_TOLERANCE && value <= high + ON_FRAME_TOLERANCE
}

/// `true` wenn `point` innerhalb der Toleranz auf dem Rahmen liegt.
fn is_on_frame(bottom_left: LatLng, upper_right: LatLng, point: LatLng) -> bool {
    let near = |a: f64, b: f64| (a - b).abs() < ON_FRAME_TOLERANCE;
    let in_lat = in_range(point.lat, bottom_left.lat, upper_right.lat);
    let in_lng = in_range(point.lng, bottom_left.lng, upper_right.lng);

    ((near(point.lng, bottom_left.lng) || near(point.lng, upper_right.lng)) && in_lat)
        || ((near(point.lat, bottom_left.lat) || near(point.lat, upper_right.lat)) && in_lng)
}
