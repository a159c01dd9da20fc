//! Polyline-Codec für Koordinatenfolgen.
//!
//! Implementiert das Google-Encoded-Polyline-Format, verallgemeinert auf
//! beliebige Dimension und Präzision pro Dimension: jede Dimension wird
//! skaliert, gerundet, delta-kodiert und als 5-Bit-Gruppen mit
//! Fortsetzungsbit ausgegeben.

use anyhow::{bail, Result};

/// Kodiert eine Punktfolge als kompakten String.
///
/// `precisions[d]` ist die Anzahl der Dezimalstellen, die Dimension `d`
/// behält. Der erste Punkt wird gegen 0 delta-kodiert, jeder weitere gegen
/// den Vorgänger. Eine leere Folge ergibt den leeren String.
pub fn encode<const D: usize>(coordinates: &[[f64; D]], precisions: &[u32; D]) -> String {
    if coordinates.is_empty() {
        return String::new();
    }

    let factors = precisions.map(|precision| 10f64.powi(precision as i32));
    let mut previous = [0i64; D];
    let mut output = String::new();

    for coordinate in coordinates {
        for dimension in 0..D {
            // Runden halb-weg-von-Null (f64::round)
            let rounded = (coordinate[dimension] * factors[dimension]).round() as i64;
            encode_value(rounded - previous[dimension], &mut output);
            previous[dimension] = rounded;
        }
    }

    output
}

/// Kodiert einen Delta-Wert als 5-Bit-Gruppen mit Fortsetzungsbit 0x20.
fn encode_value(delta: i64, output: &mut String) {
    let mut shifted = delta << 1;
    if delta < 0 {
        shifted = !shifted;
    }
    let mut value = shifted as u64;

    while value >= 0x20 {
        output.push(((0x20 | (value & 0x1f)) as u8 + 0x3f) as char);
        value >>= 5;
    }
    output.push((value as u8 + 0x3f) as char);
}

/// Dekodiert einen Polyline-String zurück in die Punktfolge.
///
/// Läuft den String von links nach rechts ab und liest pro Zeile `D`
/// Delta-Werte. Ein String, der mitten in einer Gruppe oder Zeile endet,
/// ist ein Formatfehler; ein leerer String ergibt die leere Folge.
pub fn decode<const D: usize>(encoded: &str, precisions: &[u32; D]) -> Result<Vec<[f64; D]>> {
    let mut points = Vec::new();
    if encoded.is_empty() {
        return Ok(points);
    }

    let factors = precisions.map(|precision| 10f64.powi(precision as i32));
    let bytes = encoded.as_bytes();
    let mut position = 0usize;
    let mut totals = [0i64; D];

    while position < bytes.len() {
        let mut point = [0f64; D];
        for dimension in 0..D {
            totals[dimension] += decode_value(bytes, &mut position)?;
            point[dimension] = totals[dimension] as f64 / factors[dimension];
        }
        points.push(point);
    }

    Ok(points)
}

/// Liest einen Delta-Wert (5-Bit-Gruppen, Fortsetzungsbit 0x20).
fn decode_value(bytes: &[u8], position: &mut usize) -> Result<i64> {
    let mut result: u64 = 0;
    let mut shift = 0u32;

    loop {
        let Some(&byte) = bytes.get(*position) else {
            bail!("Polyline-String endet mitten in einer Gruppe");
        };
        let group = match byte.checked_sub(0x3f) {
            Some(group) if group < 0x40 => group,
            _ => bail!("Ungültiges Zeichen im Polyline-String: 0x{:02x}", byte),
        };
        *position += 1;

        if shift >= u64::BITS {
            bail!("Polyline-Gruppe überschreitet den Wertebereich");
        }
        result |= ((group & 0x1f) as u64) << shift;
        shift += 5;

        if group & 0x20 == 0 {
            break;
        }
    }

    let value = if result & 1 == 1 {
        !((result >> 1) as i64)
    } else {
        (result >> 1) as i64
    };
    Ok(value)
}
