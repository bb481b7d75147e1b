//! Fehlertypen fuer die Client-Werkzeuge

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Schluesseldatei ungueltig: {0}")]
    Schluessel(#[from] minishare_crypto::CryptoError),

    #[error("Secret-Datei nicht lesbar '{pfad}': {source}")]
    Secret {
        pfad: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Anfrage konnte nicht gebaut werden: {0}")]
    Protokoll(#[from] minishare_protocol::ProtocolError),

    #[error("HTTP-Fehler: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Anfrage nicht autorisiert")]
    Unauthorized,

    #[error("Unerwarteter HTTP-Status {0}")]
    HttpStatus(u16),

    #[error("Antwort enthaelt keinen Wert")]
    LeereAntwort,

    #[error("Antwort des Servers nicht entschluesselbar")]
    ServerEntschluesselung,
}

pub type ClientResult<T> = Result<T, ClientError>;
