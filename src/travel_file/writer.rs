//! Schreiben von Travel-Dateien.

use anyhow::{Context, Result};

use super::compactor;
use crate::core::Travel;

/// Serialisiert ein Travel als kompaktiertes JSON-Dokument.
pub fn write_travel(travel: &Travel) -> Result<String> {
    let document = compactor::compress_travel(travel)?;
    serde_json::to_string(&document).context("Travel-Dokument konnte nicht geschrieben werden")
}
