//! GPX-Import.
//!
//! Dieses Modul implementiert das Parsen von GPX 1.1-Dateien in das
//! Travel-Objektmodell, inklusive des Knotennetz-Dialekts.

pub mod parser;

pub use parser::parse_gpx;
