//! Lesen von Travel-Dateien in das Domänenmodell.

use anyhow::{Context, Result};
use serde_json::Value;

use super::compactor;
use crate::core::Travel;

/// Parst eine Travel-Datei (JSON) und baut das Domänenmodell auf.
///
/// Dekomprimiert zunächst alle Punktfolgen (beliebiges unterstütztes
/// Format), deserialisiert dann und vergibt frische Objekt-IDs.
pub fn read_travel(content: &str) -> Result<Travel> {
    let mut document: Value =
        serde_json::from_str(content).context("Travel-Datei ist kein gültiges JSON")?;

    compactor::decompress_travel(&mut document)?;

    let mut travel: Travel = serde_json::from_value(document)
        .context("Travel-Dokument hat eine unerwartete Struktur")?;
    travel.remint_obj_ids();

    Ok(travel)
}
