//! Zentrale Konfiguration für den TravelBook Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Dateiformat ─────────────────────────────────────────────────────

/// Dezimalstellen für Breiten-/Längengrade im Polyline-Codec.
pub const LAT_LNG_PRECISION: u32 = 5;
/// Dezimalstellen für Distanzen (Meter) im Polyline-Codec.
pub const DISTANCE_PRECISION: u32 = 2;
/// Dezimalstellen für Höhen (Meter) im Polyline-Codec.
pub const ELEV_PRECISION: u32 = 2;
/// Dezimalstellen für Objekt-IDs im Polyline-Codec (ganzzahlig).
pub const OBJ_ID_PRECISION: u32 = 0;
/// Ersatzhöhe für Legacy-Dateien ohne `elevs`-Liste.
pub const DEFAULT_ELEV: f64 = 0.0;

// ── Geometrie ───────────────────────────────────────────────────────

/// Erdradius in Metern (Kugelnäherung).
pub const EARTH_RADIUS: f64 = 6_371_000.0;

// ── Druckansichten ──────────────────────────────────────────────────

/// Toleranz in Grad: Punkte näher am Rahmen gelten als "auf dem Rahmen".
pub const ON_FRAME_TOLERANCE: f64 = 1e-6;
/// Maximale Ansichtshöhe in Grad (Breitengrad-Richtung).
pub const PRINT_VIEW_MAX_LAT: f64 = 0.05;
/// Maximale Ansichtsbreite in Grad (Längengrad-Richtung).
pub const PRINT_VIEW_MAX_LNG: f64 = 0.08;

// ── GPX-Import ──────────────────────────────────────────────────────

/// Tooltip-Vorlage für Knotennetz-Notizen (`{node}` wird ersetzt).
pub const NODE_TOOLTIP: &str = "Knotenpunkt {node}";
/// Tooltip-Vorlage für den Folgeknoten (`{next}` wird ersetzt).
pub const NEXT_NODE_TOOLTIP: &str = "Weiter zum Knotenpunkt {next}";

/// Zur Laufzeit änderbare Optionen, per TOML neben der Binary persistierbar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorOptions {
    /// Maximale Höhe einer Druckansicht in Grad.
    pub print_view_max_lat: f64,
    /// Maximale Breite einer Druckansicht in Grad.
    pub print_view_max_lng: f64,
    /// Tooltip-Vorlage für Knotennetz-Notizen.
    #[serde(default = "default_node_tooltip")]
    pub node_tooltip: String,
    /// Tooltip-Vorlage für den Folgeknoten.
    #[serde(default = "default_next_node_tooltip")]
    pub next_node_tooltip: String,
}

/// Serde-Default für `node_tooltip` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_node_tooltip() -> String {
    NODE_TOOLTIP.to_string()
}

/// Serde-Default für `next_node_tooltip` (Abwärtskompatibilität).
fn default_next_node_tooltip() -> String {
    NEXT_NODE_TOOLTIP.to_string()
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            print_view_max_lat: PRINT_VIEW_MAX_LAT,
            print_view_max_lng: PRINT_VIEW_MAX_LNG,
            node_tooltip: NODE_TOOLTIP.to_string(),
            next_node_tooltip: NEXT_NODE_TOOLTIP.to_string(),
        }
    }
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("travelbook"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("travelbook.toml")
    }
}
