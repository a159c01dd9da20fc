//! Core-Domänentypen: Travel, Routen, Itinerary, Geometrie, Spatial-Index.
//!
//! Dieses Modul definiert die Haupt-Datenstrukturen:
//! - Travel: Wurzelobjekt mit Routen und Kartennotizen
//! - Route: Wegpunkte, Notizen und Itinerary einer Route
//! - ItineraryPoint/Maneuver: Geometrie und Anweisungen

pub mod collection;
pub mod geometry;
pub mod itinerary;
pub mod itinerary_point;
pub mod lat_lng;
pub mod maneuver;
pub mod note;
pub mod obj_id;
pub mod obj_type;
pub mod route;
pub mod spatial;
pub mod travel;
pub mod way_point;

pub use collection::CollectionCursor;
pub use geometry::{closest_lat_lng_distance, points_distance, ClosestLatLngDistance};
pub use itinerary::Itinerary;
pub use itinerary_point::ItineraryPoint;
pub use lat_lng::LatLng;
pub use maneuver::{Maneuver, ICON_UNDEFINED};
pub use note::Note;
pub use obj_id::ObjId;
pub use obj_type::ObjType;
pub use route::{Route, RouteEditionStatus};
pub use spatial::{SpatialIndex, SpatialMatch};
pub use travel::Travel;
pub use way_point::WayPoint;
