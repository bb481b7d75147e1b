//! Fehlertypen fuer Registry und Authentifizierung

use thiserror::Error;

/// Alle moeglichen Fehler beim Laden der Schluessel und Secrets
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Server-Schluessel ---
    #[error("Server-Schluessel '{pfad}' nicht ladbar: {source}")]
    KorrupterServerSchluessel {
        pfad: String,
        #[source]
        source: minishare_crypto::CryptoError,
    },

    // --- Secret-Register ---
    #[error("Secret-Register nicht gefunden: {0}")]
    RegisterFehlt(String),

    // --- Administration ---
    #[error("Client kann nicht angelegt werden: {0}")]
    AnlegenNichtMoeglich(String),

    // --- Antwort ---
    #[error("Antwort konnte nicht verschluesselt werden: {0}")]
    Antwort(#[from] minishare_protocol::ProtocolError),

    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),
}

/// Result-Alias fuer Registry und Authentifizierung
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fehlermeldung_nennt_pfad() {
        let err = AuthError::RegisterFehlt("sec/clients.dev".into());
        assert!(err.to_string().contains("sec/clients.dev"));
    }
}
