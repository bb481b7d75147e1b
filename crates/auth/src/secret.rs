//! Client-Secrets und das Secret-Register
//!
//! Das Register ist eine Textdatei mit einem Secret pro Zeile. Beim Laden
//! wird jede Zeile am ersten `\n` bzw. `\r` abgeschnitten.

use std::path::Path;

use crate::error::{AuthError, AuthResult};

/// Ein Client-Secret (Bearer-Wert, der im Envelope mitgeschickt wird)
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn neu(wert: impl Into<String>) -> Self {
        Self(wert.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Erste 8 Zeichen fuer Logausgaben
    pub fn praefix(&self) -> String {
        self.0.chars().take(8).collect()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret({}..)", self.praefix())
    }
}

/// Geordnete Liste aller registrierten Secrets
#[derive(Debug, Clone, Default)]
pub struct SecretRegister {
    eintraege: Vec<Secret>,
}

impl SecretRegister {
    pub fn neu(eintraege: Vec<Secret>) -> Self {
        Self { eintraege }
    }

    /// Liest das Register; eine fehlende Datei ist ein fataler Fehler
    pub fn laden(pfad: &Path) -> AuthResult<Self> {
        let inhalt = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => inhalt,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AuthError::RegisterFehlt(pfad.display().to_string()));
            }
            Err(e) => return Err(AuthError::Io(e)),
        };

        let eintraege: Vec<Secret> = inhalt
            .lines()
            .map(|zeile| Secret::neu(zeile.split('\r').next().unwrap_or_default()))
            .collect();

        tracing::debug!(
            pfad = %pfad.display(),
            anzahl = eintraege.len(),
            "Secret-Register geladen"
        );
        Ok(Self { eintraege })
    }

    /// Exakter Byte-Vergleich gegen alle Eintraege
    pub fn ist_registriert(&self, secret: &str) -> bool {
        self.eintraege.iter().any(|s| s.as_str() == secret)
    }

    pub fn len(&self) -> usize {
        self.eintraege.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eintraege.is_empty()
    }
}

/// Laedt das Secret-Register von `pfad`
pub fn load_client_secrets(pfad: &Path) -> AuthResult<SecretRegister> {
    SecretRegister::laden(pfad)
}
