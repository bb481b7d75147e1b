//! Lokale Schluessel des Clients
//!
//! Drei Dateien: eigenes Secret (erste Zeile), eigener privater Schluessel,
//! oeffentlicher Schluessel des Servers.

use std::path::Path;

use minishare_crypto::{load_private_key, load_public_key, PrivateKey, PublicKey};

use crate::error::{ClientError, ClientResult};

#[derive(Debug)]
pub struct KeyStore {
    pub secret: String,
    pub client_key: PrivateKey,
    pub server_key: PublicKey,
}

impl KeyStore {
    /// Laedt alle drei Dateien; jeder Fehler ist fuer den Client fatal
    pub fn laden(secret: &Path, client_key: &Path, server_pub: &Path) -> ClientResult<Self> {
        let inhalt = std::fs::read_to_string(secret).map_err(|source| ClientError::Secret {
            pfad: secret.display().to_string(),
            source,
        })?;
        let secret = secret_zeile(&inhalt);

        Ok(Self {
            secret,
            client_key: load_private_key(client_key)?,
            server_key: load_public_key(server_pub)?,
        })
    }
}

/// Erste Zeile ohne Zeilenende
fn secret_zeile(inhalt: &str) -> String {
    inhalt
        .lines()
        .next()
        .unwrap_or_default()
        .trim_end_matches('\r')
        .to_string()
}
