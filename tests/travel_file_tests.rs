/// Integration-Tests für das Travel-Dateiformat
use approx::assert_relative_eq;
use travelbook_editor::shared::EditorOptions;
use travelbook_editor::travel_file::polyline;
use travelbook_editor::{parse_gpx, read_travel, write_travel, ObjId, Travel};

/// Baut eine Reise mit realer Geometrie über den GPX-Import.
fn sample_travel() -> Travel {
    let gpx_content = include_str!("fixtures/track_with_route.gpx");
    parse_gpx(gpx_content, &EditorOptions::default()).unwrap()
}

#[test]
fn test_write_read_roundtrip_preserves_geometry() {
    let travel = sample_travel();
    let reference = &travel.routes[0];

    let written = write_travel(&travel).expect("Schreiben fehlgeschlagen");
    let reloaded = read_travel(&written).expect("Laden fehlgeschlagen");

    assert_eq!(reloaded.routes.len(), travel.routes.len());
    let route = &reloaded.routes[0];
    assert_eq!(route.name, reference.name);
    assert_eq!(
        route.itinerary.itinerary_points.len(),
        reference.itinerary.itinerary_points.len()
    );
    assert_eq!(
        route.itinerary.maneuvers.len(),
        reference.itinerary.maneuvers.len()
    );

    // Festkomma-Präzision: 5 Stellen lat/lng, 2 Stellen Distanz/Höhe
    for (point, reference_point) in route
        .itinerary
        .itinerary_points
        .iter()
        .zip(reference.itinerary.itinerary_points.iter())
    {
        assert_relative_eq!(point.lat_lng.lat, reference_point.lat_lng.lat, epsilon = 1e-5);
        assert_relative_eq!(point.lat_lng.lng, reference_point.lat_lng.lng, epsilon = 1e-5);
        assert_relative_eq!(point.distance, reference_point.distance, epsilon = 0.01);
        assert_relative_eq!(point.elev, reference_point.elev, epsilon = 0.01);
    }
}

#[test]
fn test_reload_mints_fresh_obj_ids_and_remaps_anchors() {
    let travel = sample_travel();
    let written = write_travel(&travel).expect("Schreiben fehlgeschlagen");

    let first = read_travel(&written).expect("Laden fehlgeschlagen");
    let second = read_travel(&written).expect("Laden fehlgeschlagen");

    let collect_ids = |travel: &Travel| -> Vec<ObjId> {
        travel
            .routes
            .iter()
            .flat_map(|route| route.itinerary.itinerary_points.iter())
            .map(|point| point.obj_id)
            .collect()
    };

    let first_ids = collect_ids(&first);
    let second_ids = collect_ids(&second);
    assert!(first_ids.iter().all(|obj_id| !second_ids.contains(obj_id)));

    // Manöver-Anker zeigen nach dem Remap wieder auf existierende Punkte
    for travel in [&first, &second] {
        for route in &travel.routes {
            for maneuver in &route.itinerary.maneuvers {
                assert!(route
                    .itinerary
                    .itinerary_points
                    .iter()
                    .any(|point| point.obj_id == maneuver.itinerary_point_obj_id));
            }
        }
    }
}

#[test]
fn test_legacy_lat_lngs_file_loads_like_current_format() {
    let lat_lngs = [[50.5, 4.3], [50.505, 4.308], [50.51, 4.316]];
    let distances = [0.0, 742.53, 1485.11];
    let elevs = [120.5, 0.0, 131.25];
    let obj_ids = [101.0, 102.0, 103.0];

    // Legacy-Dokument: 2-Kanal-String plus parallele Listen
    let legacy = serde_json::json!({
        "name": "Legacy",
        "routes": [{
            "name": "Uferweg",
            "itinerary": {
                "itineraryPoints": {
                    "latLngs": polyline::encode(&lat_lngs, &[5, 5]),
                    "distances": distances,
                    "elevs": elevs,
                    "objIds": [101, 102, 103],
                }
            }
        }]
    })
    .to_string();

    // Gleiche Daten im aktuellen 5-Kanal-Format
    let channels: Vec<[f64; 5]> = (0..3)
        .map(|index| {
            [
                lat_lngs[index][0],
                lat_lngs[index][1],
                distances[index],
                elevs[index],
                obj_ids[index],
            ]
        })
        .collect();
    let current = serde_json::json!({
        "name": "Aktuell",
        "routes": [{
            "name": "Uferweg",
            "itinerary": {
                "itineraryPoints": {
                    "values": polyline::encode(&channels, &[5, 5, 2, 2, 0]),
                    "objType": { "name": "ItineraryPoint", "version": "1.2.0" },
                }
            }
        }]
    })
    .to_string();

    let from_legacy = read_travel(&legacy).expect("Legacy-Datei konnte nicht geladen werden");
    let from_current = read_travel(&current).expect("Aktuelle Datei konnte nicht geladen werden");

    let legacy_points = &from_legacy.routes[0].itinerary.itinerary_points;
    let current_points = &from_current.routes[0].itinerary.itinerary_points;
    assert_eq!(legacy_points.len(), 3);
    assert_eq!(legacy_points.len(), current_points.len());

    for (legacy_point, current_point) in legacy_points.iter().zip(current_points.iter()) {
        assert_relative_eq!(
            legacy_point.lat_lng.lat,
            current_point.lat_lng.lat,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            legacy_point.lat_lng.lng,
            current_point.lat_lng.lng,
            epsilon = 1e-9
        );
        assert_relative_eq!(legacy_point.distance, current_point.distance, epsilon = 0.01);
        assert_relative_eq!(legacy_point.elev, current_point.elev, epsilon = 0.01);
    }
}

#[test]
fn test_legacy_file_without_elevs_has_no_profile() {
    let legacy = serde_json::json!({
        "routes": [{
            "itinerary": {
                "itineraryPoints": {
                    "latLngs": polyline::encode(&[[50.5, 4.3], [50.51, 4.31]], &[5, 5]),
                    "distances": [0.0, 742.53],
                    "objIds": [1, 2],
                }
            }
        }]
    })
    .to_string();

    let travel = read_travel(&legacy).expect("Laden fehlgeschlagen");
    let route = &travel.routes[0];

    assert!(!route.itinerary.has_profile);
    for point in &route.itinerary.itinerary_points {
        assert_eq!(point.elev, 0.0);
    }
}

#[test]
fn test_very_old_file_without_edited_route_loads() {
    let content = r#"{"name":"Uralt","routes":[]}"#;
    let travel = read_travel(content).expect("Laden fehlgeschlagen");

    assert_eq!(travel.name, "Uralt");
    assert!(travel.routes.is_empty());
    // Fehlendes editedRoute wird durch eine leere Route ersetzt
    assert_eq!(travel.edited_route.way_points.len(), 2);
}

#[test]
fn test_oldest_uncompressed_file_loads() {
    let content = r#"{
        "name": "Altformat",
        "routes": [{
            "name": "Weg",
            "itinerary": {
                "itineraryPoints": [
                    {"lat": 50.5, "lng": 4.3, "distance": 0.0, "elev": 0.0, "objId": 1},
                    {"lat": 50.51, "lng": 4.31, "distance": 750.0, "elev": 0.0, "objId": 2}
                ]
            }
        }]
    }"#;

    let travel = read_travel(content).expect("Laden fehlgeschlagen");
    let points = &travel.routes[0].itinerary.itinerary_points;
    assert_eq!(points.len(), 2);
    assert_relative_eq!(points[1].lat_lng.lat, 50.51);
    assert_relative_eq!(points[1].distance, 750.0);
}

#[test]
fn test_truncated_values_string_is_a_fatal_error() {
    // "_" trägt ein gesetztes Fortsetzungsbit am Stringende
    let content = r#"{"routes":[{"itinerary":{"itineraryPoints":{"values":"_"}}}]}"#;
    let err = read_travel(content).expect_err("Fehler erwartet");
    assert!(format!("{err:#}").contains("Route 0"));
}
