//! Envelope-Codec
//!
//! Kodiert die vier Anfrage-Felder und dekodiert einzelne Felder mit einem
//! gegebenen Schluessel-Paar.
//!
//! ## Klartext der Felder
//! ```text
//! id     UTF-8 Secret
//! check  Integritaetswert, u32 big-endian
//! ts     Unix-Sekunden, i64 big-endian
//! entry  UTF-8 Operationsname
//! ```
//!
//! Jedes Feld wird einzeln mit eigener Nonce versiegelt. Es gibt keinen
//! gemeinsamen MAC ueber alle Felder.

use minishare_crypto::{CryptoResult, KeyBox, PrivateKey, PublicKey};

use crate::envelope::{feld_dekodieren, feld_kodieren, Envelope, RohEnvelope};
use crate::error::ProtocolResult;
use crate::integrity::integritaetswert;

/// Entschluesselte, noch nicht interpretierte Feldinhalte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntschluesselteFelder {
    pub secret: Vec<u8>,
    pub check: Vec<u8>,
    pub ts: Vec<u8>,
    pub entry: Vec<u8>,
}

/// Baut eine Anfrage fuer `recipient` mit dem Schluessel des Absenders
pub fn encode(
    sender: &PrivateKey,
    recipient: &PublicKey,
    secret: &str,
    operation: &str,
    jetzt: i64,
) -> ProtocolResult<Envelope> {
    let kb = KeyBox::new(sender, recipient)?;
    let secret_bytes = secret.as_bytes();
    let pruefwert = integritaetswert(secret_bytes);

    Ok(Envelope {
        id: seal_field(&kb, secret_bytes)?,
        check: seal_field(&kb, &pruefwert.to_be_bytes())?,
        ts: seal_field(&kb, &jetzt.to_be_bytes())?,
        entry: seal_field(&kb, operation.as_bytes())?,
    })
}

/// Versiegelt einen Klartext und kodiert ihn als URL-Base64
pub fn seal_field(kb: &KeyBox, klartext: &[u8]) -> ProtocolResult<String> {
    Ok(feld_kodieren(&kb.seal(klartext)?))
}

/// Einzelner Entschluesselungsversuch
///
/// Ein Fehler bedeutet entweder falsches Schluessel-Paar oder Manipulation.
pub fn decode_field(kb: &KeyBox, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
    kb.open(ciphertext)
}

/// Entschluesselt alle vier Felder; bricht beim ersten Fehlschlag ab
pub fn decode_fields(kb: &KeyBox, roh: &RohEnvelope) -> CryptoResult<EntschluesselteFelder> {
    Ok(EntschluesselteFelder {
        secret: decode_field(kb, &roh.id)?,
        check: decode_field(kb, &roh.check)?,
        ts: decode_field(kb, &roh.ts)?,
        entry: decode_field(kb, &roh.entry)?,
    })
}

/// Verschluesselt einen Antwort-Wert (ein Feld, keine Pruefwerte)
pub fn seal_response(kb: &KeyBox, nachricht: &str) -> ProtocolResult<String> {
    seal_field(kb, nachricht.as_bytes())
}

/// Entschluesselt einen Antwort-Wert
pub fn open_response(kb: &KeyBox, value: &str) -> ProtocolResult<String> {
    let roh = feld_dekodieren("value", value)?;
    let klartext = decode_field(kb, &roh)?;
    Ok(String::from_utf8(klartext)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
