//! Prozessweite Vergabe eindeutiger Objekt-IDs.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OBJ_ID: AtomicU64 = AtomicU64::new(1);

/// Eindeutige ID eines Domänenobjekts.
///
/// IDs werden beim Konstruieren und beim Deserialisieren neu vergeben;
/// gespeicherte IDs überleben einen Ladevorgang nie. Querverweise
/// (Manöver → Itinerary-Punkt) werden beim Laden über eine alt→neu-Tabelle
/// umgeschrieben.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ObjId(pub u64);

impl ObjId {
    /// Vergibt die nächste freie ID (monoton steigend).
    pub fn next() -> Self {
        Self(NEXT_OBJ_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Rohwert der ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ObjId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
