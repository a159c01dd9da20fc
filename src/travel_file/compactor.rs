//! Kompaktierung der Itinerary-Punkte im Travel-JSON.
//!
//! Beim Speichern wird das Punkt-Array jeder Route durch einen
//! Polyline-String über fünf Kanäle ersetzt; beim Laden wird der String
//! zurückverwandelt. Zwei ältere Dateiformate werden weiterhin gelesen.

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};

use super::polyline;
use crate::core::{ObjType, Travel};
use crate::shared::options::{
    DEFAULT_ELEV, DISTANCE_PRECISION, ELEV_PRECISION, LAT_LNG_PRECISION, OBJ_ID_PRECISION,
};

/// Kanal-Präzisionen des aktuellen Formats: lat, lng, distance, elev, objId.
const VALUES_PRECISIONS: [u32; 5] = [
    LAT_LNG_PRECISION,
    LAT_LNG_PRECISION,
    DISTANCE_PRECISION,
    ELEV_PRECISION,
    OBJ_ID_PRECISION,
];

/// Kanal-Präzisionen des Legacy-Formats (vor 2.1.0): lat, lng.
const LAT_LNG_PRECISIONS: [u32; 2] = [LAT_LNG_PRECISION; 2];

/// Serialisiert ein Travel und ersetzt alle Punkt-Arrays durch Polyline-Strings.
pub fn compress_travel(travel: &Travel) -> Result<Value> {
    let mut document =
        serde_json::to_value(travel).context("Travel konnte nicht serialisiert werden")?;

    if let Some(routes) = document.get_mut("routes").and_then(Value::as_array_mut) {
        for (index, route) in routes.iter_mut().enumerate() {
            compress_route(route)
                .with_context(|| format!("Route {} konnte nicht komprimiert werden", index))?;
        }
    }
    if let Some(edited_route) = document.get_mut("editedRoute") {
        compress_route(edited_route)
            .context("Die bearbeitete Route konnte nicht komprimiert werden")?;
    }

    Ok(document)
}

/// Ersetzt das Punkt-Array einer Route durch `{values, objType}`.
fn compress_route(route: &mut Value) -> Result<()> {
    let Some(points) = route.pointer_mut("/itinerary/itineraryPoints") else {
        return Ok(());
    };
    let Some(array) = points.as_array() else {
        return Ok(());
    };

    let mut channels = Vec::with_capacity(array.len());
    for point in array {
        channels.push([
            number_field(point, "lat")?,
            number_field(point, "lng")?,
            number_field(point, "distance")?,
            number_field(point, "elev")?,
            number_field(point, "objId")?,
        ]);
    }

    *points = json!({
        "values": polyline::encode(&channels, &VALUES_PRECISIONS),
        "objType": ObjType::itinerary_point(),
    });

    Ok(())
}

/// Ersetzt komprimierte Punktfolgen im Dokument durch Punkt-Arrays (in place).
///
/// Erkennt das aktuelle Format (`values`), das Legacy-Format (`latLngs` plus
/// parallele Listen) und lässt das älteste Format (unkomprimiertes Array)
/// unverändert durch. Sehr alte Dateien ohne `editedRoute` sind zulässig.
pub fn decompress_travel(document: &mut Value) -> Result<()> {
    if let Some(routes) = document.get_mut("routes").and_then(Value::as_array_mut) {
        for (index, route) in routes.iter_mut().enumerate() {
            decompress_route(route)
                .with_context(|| format!("Route {} konnte nicht dekomprimiert werden", index))?;
        }
    }
    if let Some(edited_route) = document.get_mut("editedRoute") {
        decompress_route(edited_route)
            .context("Die bearbeitete Route konnte nicht dekomprimiert werden")?;
    }

    Ok(())
}

fn decompress_route(route: &mut Value) -> Result<()> {
    let Some(points) = route.pointer_mut("/itinerary/itineraryPoints") else {
        return Ok(());
    };

    if let Some(values) = points.get("values").and_then(Value::as_str) {
        // Aktuelles Format: fünf Kanäle in einem String
        let decoded = polyline::decode(values, &VALUES_PRECISIONS)?;
        *points = Value::Array(
            decoded
                .iter()
                .map(|channels| {
                    point_object(
                        channels[0],
                        channels[1],
                        channels[2],
                        channels[3],
                        channels[4].round() as u64,
                    )
                })
                .collect(),
        );
    } else if let Some(lat_lngs) = points.get("latLngs").and_then(Value::as_str) {
        // Legacy-Format vor 2.1.0: zwei Kanäle plus parallele Listen
        let decoded = polyline::decode(lat_lngs, &LAT_LNG_PRECISIONS)?;
        let distances = number_array(points, "distances")?;
        let obj_ids = number_array(points, "objIds")?;
        let elevs = match points.get("elevs") {
            Some(_) => Some(number_array(points, "elevs")?),
            None => None,
        };

        if distances.len() != decoded.len()
            || obj_ids.len() != decoded.len()
            || elevs.as_ref().is_some_and(|elevs| elevs.len() != decoded.len())
        {
            bail!("Parallele Listen im Legacy-Format haben unterschiedliche Längen");
        }

        *points = Value::Array(
            decoded
                .iter()
                .enumerate()
                .map(|(index, lat_lng)| {
                    let elev = elevs
                        .as_ref()
                        .map_or(DEFAULT_ELEV, |elevs| elevs[index]);
                    point_object(
                        lat_lng[0],
                        lat_lng[1],
                        distances[index],
                        elev,
                        obj_ids[index].round() as u64,
                    )
                })
                .collect(),
        );
    }
    // Ältestes Format: unkomprimiertes Array, bleibt unverändert

    Ok(())
}

/// Baut ein Punkt-Objekt im aktuellen JSON-Schema.
fn point_object(lat: f64, lng: f64, distance: f64, elev: f64, obj_id: u64) -> Value {
    json!({
        "lat": lat,
        "lng": lng,
        "distance": distance,
        "elev": elev,
        "objId": obj_id,
        "objType": ObjType::itinerary_point(),
    })
}

/// Liest ein Zahlenfeld aus einem Punkt-Objekt.
fn number_field(point: &Value, name: &str) -> Result<f64> {
    point
        .get(name)
        .and_then(Value::as_f64)
        .with_context(|| format!("Feld '{}' fehlt oder ist keine Zahl", name))
}

/// Liest eine Zahlenliste aus dem Legacy-Punktcontainer.
fn number_array(points: &Value, name: &str) -> Result<Vec<f64>> {
    let array = points
        .get(name)
        .and_then(Value::as_array)
        .with_context(|| format!("Liste '{}' fehlt im Legacy-Format", name))?;

    array
        .iter()
        .map(|value| {
            value
                .as_f64()
                .with_context(|| format!("Liste '{}' enthält Nicht-Zahlen", name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ItineraryPoint;
    use approx::assert_relative_eq;

    fn sample_travel() -> Travel {
        let mut travel = Travel::new();
        let route = &mut travel.routes[0];
        for (lat, lng, elev) in [(50.5, 4.3, 120.0), (50.51, 4.31, 121.5), (50.52, 4.33, 119.25)] {
            let mut point = ItineraryPoint::new(lat, lng);
            point.elev = elev;
            route.itinerary.itinerary_points.push(point);
        }
        route.compute_distances();
        travel
    }

    #[test]
    fn test_compress_replaces_points_with_values_string() {
        let travel = sample_travel();
        let document = compress_travel(&travel).expect("Komprimierung fehlgeschlagen");

        let points = document
            .pointer("/routes/0/itinerary/itineraryPoints")
            .expect("Punktcontainer erwartet");
        assert!(points.get("values").and_then(Value::as_str).is_some());
        assert!(points.get("objType").is_some());
        // Auch die bearbeitete Route wird komprimiert
        assert!(document
            .pointer("/editedRoute/itinerary/itineraryPoints/values")
            .is_some());
    }

    #[test]
    fn test_compress_decompress_preserves_values() {
        let travel = sample_travel();
        let reference: Vec<_> = travel.routes[0]
            .itinerary
            .itinerary_points
            .iter()
            .map(|point| (point.lat_lng, point.distance, point.elev))
            .collect();

        let mut document = compress_travel(&travel).expect("Komprimierung fehlgeschlagen");
        decompress_travel(&mut document).expect("Dekomprimierung fehlgeschlagen");

        let points = document
            .pointer("/routes/0/itinerary/itineraryPoints")
            .and_then(Value::as_array)
            .expect("Punkt-Array erwartet");
        assert_eq!(points.len(), reference.len());

        for (point, (lat_lng, distance, elev)) in points.iter().zip(reference.iter()) {
            // Festkomma-Präzision: 5 Stellen lat/lng, 2 Stellen Distanz/Höhe
            assert_relative_eq!(point["lat"].as_f64().unwrap(), lat_lng.lat, epsilon = 1e-5);
            assert_relative_eq!(point["lng"].as_f64().unwrap(), lat_lng.lng, epsilon = 1e-5);
            assert_relative_eq!(
                point["distance"].as_f64().unwrap(),
                *distance,
                epsilon = 0.01
            );
            assert_relative_eq!(point["elev"].as_f64().unwrap(), *elev, epsilon = 0.01);
        }
    }

    #[test]
    fn test_legacy_lat_lngs_format_is_decompressed() {
        let lat_lngs = polyline::encode(&[[50.5, 4.3], [50.51, 4.31]], &LAT_LNG_PRECISIONS);
        let mut document = json!({
            "routes": [{
                "itinerary": {
                    "itineraryPoints": {
                        "latLngs": lat_lngs,
                        "distances": [0.0, 742.5],
                        "elevs": [120.0, 121.5],
                        "objIds": [11, 12],
                    }
                }
            }]
        });

        decompress_travel(&mut document).expect("Dekomprimierung fehlgeschlagen");

        let points = document
            .pointer("/routes/0/itinerary/itineraryPoints")
            .and_then(Value::as_array)
            .expect("Punkt-Array erwartet");
        assert_eq!(points.len(), 2);
        assert_relative_eq!(points[1]["lat"].as_f64().unwrap(), 50.51, epsilon = 1e-9);
        assert_relative_eq!(points[1]["distance"].as_f64().unwrap(), 742.5);
        assert_relative_eq!(points[1]["elev"].as_f64().unwrap(), 121.5);
        assert_eq!(points[1]["objId"].as_u64().unwrap(), 12);
    }

    #[test]
    fn test_legacy_format_without_elevs_uses_default() {
        let lat_lngs = polyline::encode(&[[50.5, 4.3]], &LAT_LNG_PRECISIONS);
        let mut document = json!({
            "routes": [{
                "itinerary": {
                    "itineraryPoints": {
                        "latLngs": lat_lngs,
                        "distances": [0.0],
                        "objIds": [7],
                    }
                }
            }]
        });

        decompress_travel(&mut document).expect("Dekomprimierung fehlgeschlagen");

        let elev = document
            .pointer("/routes/0/itinerary/itineraryPoints/0/elev")
            .and_then(Value::as_f64)
            .expect("Höhe erwartet");
        assert_eq!(elev, DEFAULT_ELEV);
    }

    #[test]
    fn test_legacy_format_length_mismatch_is_an_error() {
        let lat_lngs = polyline::encode(&[[50.5, 4.3], [50.51, 4.31]], &LAT_LNG_PRECISIONS);
        let mut document = json!({
            "routes": [{
                "itinerary": {
                    "itineraryPoints": {
                        "latLngs": lat_lngs,
                        "distances": [0.0],
                        "objIds": [1, 2],
                    }
                }
            }]
        });

        let err = decompress_travel(&mut document).expect_err("Fehler erwartet");
        assert!(format!("{err:#}").contains("unterschiedliche Längen"));
    }

    #[test]
    fn test_missing_edited_route_is_tolerated() {
        // Sehr alte Dateien kennen das Feld nicht
        let mut document = json!({ "routes": [] });
        decompress_travel(&mut document).expect("Dekomprimierung fehlgeschlagen");
    }

    #[test]
    fn test_oldest_plain_array_passes_through() {
        let mut document = json!({
            "routes": [{
                "itinerary": {
                    "itineraryPoints": [
                        { "lat": 50.5, "lng": 4.3, "distance": 0.0, "elev": 0.0, "objId": 1 }
                    ]
                }
            }]
        });
        let before = document.clone();

        decompress_travel(&mut document).expect("Dekomprimierung fehlgeschlagen");
        assert_eq!(document, before);
    }
}
