//! Fehlertypen fuer das Envelope-Protokoll

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Feld '{feld}' ist kein gueltiges URL-Base64: {source}")]
    UngueltigesFeld {
        feld: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("Antwort ist kein gueltiges UTF-8")]
    UngueltigesUtf8(#[from] std::string::FromUtf8Error),

    #[error("Krypto-Fehler: {0}")]
    Crypto(#[from] minishare_crypto::CryptoError),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
