//! Travel-Dateiformat: Polyline-Codec, Kompaktierung, Lesen und Schreiben.
//!
//! Das Format speichert die Punktfolge jeder Route als Polyline-String über
//! fünf Kanäle (lat, lng, distance, elev, objId); zwei ältere Formate werden
//! beim Laden weiterhin unterstützt.

pub mod compactor;
pub mod polyline;
pub mod reader;
pub mod writer;

pub use compactor::{compress_travel, decompress_travel};
pub use reader::read_travel;
pub use writer::write_travel;
