//! Fehlertypen fuer das Kryptografie-Subsystem

use thiserror::Error;

/// Fehler im Kryptografie-Subsystem
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Verschluesselung fehlgeschlagen: {0}")]
    Verschluesselung(String),

    /// Falscher Schluessel oder manipulierter Ciphertext. Beide Faelle sind
    /// absichtlich nicht unterscheidbar.
    #[error("Entschluesselung fehlgeschlagen")]
    Entschluesselung,

    #[error("Schluessel-Vereinbarung ergab kein gueltiges Shared Secret")]
    KeinBeitrag,

    #[error("Ungueltige Schluessel-Laenge: erwartet {erwartet}, erhalten {erhalten}")]
    UngueltigeSchluesselLaenge { erwartet: usize, erhalten: usize },

    #[error("Schluesseldatei '{pfad}' ist beschaedigt: {grund}")]
    KorrupteSchluesseldatei { pfad: String, grund: String },

    #[error("Schluesseldatei nicht gefunden: {0}")]
    SchluesseldateiFehlt(String),

    #[error("Base64-Dekodierung fehlgeschlagen: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),
}

pub type CryptoResult<T> = Result<T, CryptoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entschluesselung_verraet_keinen_grund() {
        let e = CryptoError::Entschluesselung;
        assert_eq!(e.to_string(), "Entschluesselung fehlgeschlagen");
    }

    #[test]
    fn korrupte_datei_nennt_pfad() {
        let e = CryptoError::KorrupteSchluesseldatei {
            pfad: "sec/server.key".into(),
            grund: "falsche Laenge".into(),
        };
        assert!(e.to_string().contains("sec/server.key"));
    }
}
