//! Integritaetswert und Big-Endian-Zahlenfelder
//!
//! Der Integritaetswert ist ein CRC-32 (IEEE) ueber die UTF-8-Bytes des
//! Secrets. Er wird zusaetzlich zum Auth-Tag der Box verschluesselt
//! uebertragen.

/// Berechnet den 32-Bit-Integritaetswert ueber die Secret-Bytes
pub fn integritaetswert(daten: &[u8]) -> u32 {
    crc32fast::hash(daten)
}

/// Liest eine vorzeichenlose Big-Endian-Zahl beliebiger Breite bis `max_bytes`
///
/// Fuehrende Null-Bytes zaehlen nicht zur Breite, sowohl minimale als auch
/// aufgefuellte Kodierungen werden akzeptiert. Leere Eingabe ergibt 0. Gibt
/// `None` zurueck wenn der Wert nicht in `max_bytes` passt.
pub fn be_zahl(bytes: &[u8], max_bytes: usize) -> Option<u64> {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let signifikant = &bytes[start..];
    if signifikant.len() > max_bytes || signifikant.len() > 8 {
        return None;
    }
    Some(signifikant.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}
