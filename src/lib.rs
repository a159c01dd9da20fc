//! TravelBook Editor Library.
//! Kern-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod core;
pub mod gpx;
pub mod print;
pub mod shared;
pub mod travel_file;

pub use core::{
    Itinerary, ItineraryPoint, LatLng, Maneuver, Note, ObjId, Route, Travel, WayPoint,
};
pub use core::{closest_lat_lng_distance, points_distance};
pub use core::{CollectionCursor, SpatialIndex, SpatialMatch};
pub use gpx::parse_gpx;
pub use print::{PrintView, PrintViewsFactory};
pub use shared::EditorOptions;
pub use travel_file::{compress_travel, decompress_travel, read_travel, write_travel};
