//! Wire-Objekte fuer Anfrage und Antwort
//!
//! Alle Felder sind URL-sicheres Base64 (mit Padding) eines
//! Box-Ciphertexts.
//!
//! ```text
//! Anfrage:  { "id": .., "check": .., "ts": .., "entry": .. }
//! Antwort:  { "value": .. }
//! ```

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};

/// Verschluesselte Anfrage mit vier unabhaengig authentifizierten Feldern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Verschluesseltes Secret
    pub id: String,
    /// Verschluesselter Integritaetswert
    pub check: String,
    /// Verschluesselter Zeitstempel
    pub ts: String,
    /// Verschluesselter Operationsname
    pub entry: String,
}

/// Verschluesselte Antwort (ein Feld, ohne Integritaet/Zeitstempel)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntwortEnvelope {
    pub value: String,
}

/// Base64-dekodierte, aber noch verschluesselte Felder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RohEnvelope {
    pub id: Vec<u8>,
    pub check: Vec<u8>,
    pub ts: Vec<u8>,
    pub entry: Vec<u8>,
}

impl Envelope {
    /// Dekodiert alle vier Felder aus Base64
    pub fn dekodieren(&self) -> ProtocolResult<RohEnvelope> {
        Ok(RohEnvelope {
            id: feld_dekodieren("id", &self.id)?,
            check: feld_dekodieren("check", &self.check)?,
            ts: feld_dekodieren("ts", &self.ts)?,
            entry: feld_dekodieren("entry", &self.entry)?,
        })
    }
}

pub(crate) fn feld_kodieren(ciphertext: &[u8]) -> String {
    URL_SAFE.encode(ciphertext)
}

pub(crate) fn feld_dekodieren(feld: &'static str, wert: &str) -> ProtocolResult<Vec<u8>> {
    URL_SAFE
        .decode(wert.trim())
        .map_err(|source| ProtocolError::UngueltigesFeld { feld, source })
}
