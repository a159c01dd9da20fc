//! Parser für GPX-Dateien (GPS Exchange Format).
//!
//! Erkennt `trk`/`trkseg`/`trkpt`, `rte`/`rtept` und `wpt` in beliebiger
//! Kombination sowie den Knotennetz-Dialekt (belgisch/niederländische
//! Radknotennetze). Fehlende optionale Felder fallen auf Leer-/Nullwerte
//! zurück; nur XML-Syntaxfehler sind fatal.

use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;

use crate::core::{
    closest_lat_lng_distance, ItineraryPoint, LatLng, Maneuver, Note, Route, SpatialIndex, Travel,
    WayPoint, ICON_UNDEFINED,
};
use crate::shared::EditorOptions;

/// Erkennungsmuster für Knotennetz-Dateien (Attribut `creator` der Wurzel).
const NODE_NETWORK_CREATORS: &str = "fietsnet|knooppuntnet";

/// Roher Trackpunkt aus `trkpt`.
#[derive(Debug, Default)]
struct RawTrackPoint {
    lat: f64,
    lng: f64,
    elev: f64,
}

/// Roher Track aus `trk`.
#[derive(Debug, Default)]
struct RawTrack {
    name: String,
    points: Vec<RawTrackPoint>,
}

/// Roher Routenpunkt aus `rtept`.
#[derive(Debug, Default)]
struct RawRoutePoint {
    lat: f64,
    lng: f64,
    desc: String,
}

/// Roher Wegpunkt aus `wpt`.
#[derive(Debug, Default)]
struct RawWayPoint {
    lat: f64,
    lng: f64,
    name: String,
}

/// Parst ein GPX-Dokument in ein Travel.
pub fn parse_gpx(xml_content: &str, options: &EditorOptions) -> Result<Travel> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();

    let mut creator = String::new();
    let mut tracks: Vec<RawTrack> = Vec::new();
    let mut route_points: Vec<RawRoutePoint> = Vec::new();
    let mut route_count = 0usize;
    let mut way_points: Vec<RawWayPoint> = Vec::new();

    let mut current_track: Option<RawTrack> = None;
    let mut current_track_point: Option<RawTrackPoint> = None;
    let mut current_route_point: Option<RawRoutePoint> = None;
    let mut current_way_point: Option<RawWayPoint> = None;
    let mut in_track_segment = false;
    let mut in_route = false;
    let mut current_tag: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;

                if tag == "gpx" {
                    for attr in e.attributes().with_checks(false) {
                        let attr = attr?;
                        if attr.key.as_ref() == b"creator" {
                            creator = attr.unescape_value()?.into_owned();
                        }
                    }
                } else if tag == "trk" {
                    current_track = Some(RawTrack::default());
                } else if tag == "trkseg" {
                    in_track_segment = true;
                } else if tag == "trkpt" && in_track_segment {
                    let (lat, lng) = lat_lng_attributes(e)?;
                    current_track_point = Some(RawTrackPoint { lat, lng, elev: 0.0 });
                } else if tag == "rte" {
                    route_count += 1;
                    in_route = true;
                } else if tag == "rtept" && in_route {
                    let (lat, lng) = lat_lng_attributes(e)?;
                    current_route_point = Some(RawRoutePoint {
                        lat,
                        lng,
                        desc: String::new(),
                    });
                } else if tag == "wpt" {
                    let (lat, lng) = lat_lng_attributes(e)?;
                    current_way_point = Some(RawWayPoint {
                        lat,
                        lng,
                        name: String::new(),
                    });
                } else {
                    current_tag = Some(tag.to_string());
                }
            }
            Ok(Event::Empty(ref e)) => {
                // Selbstschließende Punkte (<trkpt lat=".." lon=".."/>)
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;

                if tag == "trkpt" && in_track_segment {
                    if let Some(track) = current_track.as_mut() {
                        let (lat, lng) = lat_lng_attributes(e)?;
                        track.points.push(RawTrackPoint { lat, lng, elev: 0.0 });
                    }
                } else if tag == "rtept" && in_route {
                    let (lat, lng) = lat_lng_attributes(e)?;
                    route_points.push(RawRoutePoint {
                        lat,
                        lng,
                        desc: String::new(),
                    });
                } else if tag == "wpt" {
                    let (lat, lng) = lat_lng_attributes(e)?;
                    way_points.push(RawWayPoint {
                        lat,
                        lng,
                        name: String::new(),
                    });
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.xml_content()?.into_owned();

                match current_tag.as_deref() {
                    Some("ele") => {
                        if let Some(point) = current_track_point.as_mut() {
                            // Unlesbare Höhen fallen auf 0.0 (= unbekannt) zurück
                            point.elev = text.trim().parse().unwrap_or(0.0);
                        }
                    }
                    Some("desc") => {
                        if let Some(point) = current_route_point.as_mut() {
                            point.desc.push_str(&text);
                        }
                    }
                    Some("name") => {
                        if let Some(way_point) = current_way_point.as_mut() {
                            way_point.name.push_str(&text);
                        } else if current_route_point.is_none() {
                            // Track-Name; der Name einer rte bleibt ungenutzt
                            if let Some(track) = current_track.as_mut() {
                                track.name.push_str(&text);
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;

                if tag == "trk" {
                    if let Some(track) = current_track.take() {
                        tracks.push(track);
                    }
                } else if tag == "trkseg" {
                    in_track_segment = false;
                } else if tag == "trkpt" {
                    if let (Some(point), Some(track)) =
                        (current_track_point.take(), current_track.as_mut())
                    {
                        track.points.push(point);
                    }
                } else if tag == "rte" {
                    in_route = false;
                } else if tag == "rtept" {
                    if let Some(point) = current_route_point.take() {
                        route_points.push(point);
                    }
                } else if tag == "wpt" {
                    if let Some(way_point) = current_way_point.take() {
                        way_points.push(way_point);
                    }
                } else if current_tag.as_deref() == Some(tag.as_ref()) {
                    current_tag = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des GPX"),
            _ => {}
        }

        buffer.clear();
    }

    build_travel(&creator, tracks, route_points, route_count, way_points, options)
}

/// Liest die `lat`/`lon`-Attribute eines Punktelements (fehlend → 0.0).
fn lat_lng_attributes(element: &BytesStart<'_>) -> Result<(f64, f64)> {
    let mut lat = 0.0;
    let mut lng = 0.0;

    for attr in element.attributes().with_checks(false) {
        let attr = attr?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"lat" => lat = value.trim().parse().unwrap_or(0.0),
            b"lon" => lng = value.trim().parse().unwrap_or(0.0),
            _ => {}
        }
    }

    Ok((lat, lng))
}

/// Baut aus den Rohdaten das Travel-Objektmodell auf.
fn build_travel(
    creator: &str,
    tracks: Vec<RawTrack>,
    route_points: Vec<RawRoutePoint>,
    route_count: usize,
    way_points: Vec<RawWayPoint>,
    options: &EditorOptions,
) -> Result<Travel> {
    let is_node_network = Regex::new(NODE_NETWORK_CREATORS)
        .context("Ungültiges Knotennetz-Erkennungsmuster")?
        .is_match(creator);

    let mut travel = Travel::new();
    // Platzhalter-Route verwerfen; die Tracks liefern die echten Routen
    travel.routes.clear();

    for raw_track in &tracks {
        let mut route = Route::new();
        route.name = raw_track.name.clone();

        for raw_point in &raw_track.points {
            let mut point = ItineraryPoint::new(raw_point.lat, raw_point.lng);
            if raw_point.elev != 0.0 {
                point.elev = raw_point.elev;
                route.itinerary.has_profile = true;
            }
            route.itinerary.itinerary_points.push(point);
        }

        travel.routes.push(route);
    }

    // Manöver nur bei genau einer rte und genau einer Route
    if route_count == 1 && travel.routes.len() == 1 {
        let route = &mut travel.routes[0];
        let spatial_index = SpatialIndex::from_points(&route.itinerary.itinerary_points);

        for raw_point in &route_points {
            let Some(nearest) = spatial_index.nearest(LatLng::new(raw_point.lat, raw_point.lng))
            else {
                log::warn!(
                    "Maneuver without itinerary point: ({}, {})",
                    raw_point.lat,
                    raw_point.lng
                );
                continue;
            };

            route.itinerary.maneuvers.push(Maneuver::new(
                ICON_UNDEFINED,
                raw_point.desc.clone(),
                nearest.obj_id,
            ));
        }
    }

    for route in &mut travel.routes {
        route.compute_distances();
        if route.itinerary.has_profile {
            route.itinerary.compute_ascent_descent();
        }
    }

    if !way_points.is_empty() && travel.routes.len() == 1 {
        rebuild_way_points(&mut travel.routes[0], &way_points, is_node_network, options);
    } else {
        for route in &mut travel.routes {
            synthesize_start_end_way_points(route);
        }
    }

    Ok(travel)
}

/// Ersetzt die synthetischen Wegpunkte durch die `wpt`-Elemente der Datei.
///
/// Im Knotennetz-Modus entsteht zusätzlich pro Wegpunkt eine Routennotiz
/// mit Knotennummer und Distanz ab Routenstart.
fn rebuild_way_points(
    route: &mut Route,
    raw_way_points: &[RawWayPoint],
    is_node_network: bool,
    options: &EditorOptions,
) {
    route.way_points.clear();

    for raw in raw_way_points {
        let mut way_point = WayPoint::new();
        way_point.name = raw.name.clone();
        way_point.lat_lng = LatLng::new(raw.lat, raw.lng);
        route.way_points.push(way_point);

        if is_node_network {
            let note = network_node_note(&route.itinerary.itinerary_points, raw, options);
            route.notes.push(note);
        }
    }
}

/// Baut die Notiz eines Netzknotens aus dem Wegpunktnamen.
///
/// Der Name trägt die Knotennummer und optional den Folgeknoten, getrennt
/// durch `+` (z.B. "52+81").
fn network_node_note(
    points: &[ItineraryPoint],
    raw: &RawWayPoint,
    options: &EditorOptions,
) -> Note {
    let mut segments = raw.name.splitn(2, '+');
    let node = segments.next().unwrap_or("").trim().to_string();
    let next_node = segments
        .next()
        .map(|segment| segment.trim().to_string())
        .filter(|segment| !segment.is_empty());

    let mut note = Note::new(LatLng::new(raw.lat, raw.lng));

    note.icon_content = match &next_node {
        Some(next) => format!(
            "<div class='travelbook-note-node'>{}</div><div class='travelbook-note-next'>{}</div>",
            node, next
        ),
        None => format!("<div class='travelbook-note-node'>{}</div>", node),
    };

    note.tooltip_content = options.node_tooltip.replace("{node}", &node);
    if let Some(next) = &next_node {
        note.tooltip_content.push(' ');
        note.tooltip_content
            .push_str(&options.next_node_tooltip.replace("{next}", next));
    }

    if let Some(closest) = closest_lat_lng_distance(points, note.lat_lng) {
        note.distance = closest.distance;
    }

    note
}

/// Setzt Start/Ziel-Wegpunkte auf den ersten/letzten Itinerary-Punkt.
fn synthesize_start_end_way_points(route: &mut Route) {
    let Some(first) = route.itinerary.itinerary_points.first().map(|point| point.lat_lng) else {
        return;
    };
    let last = route
        .itinerary
        .itinerary_points
        .last()
        .map(|point| point.lat_lng)
        .unwrap_or(first);

    if let Some(way_point) = route.way_points.first_mut() {
        way_point.lat_lng = first;
    }
    if let Some(way_point) = route.way_points.last_mut() {
        way_point.lat_lng = last;
    }
}
