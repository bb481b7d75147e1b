//! Schluessel-Registry
//!
//! Haelt den privaten Server-Schluessel, die geordnete Liste der
//! oeffentlichen Client-Schluessel und das Secret-Register.
//!
//! Die Registry ist nach dem Laden unveraenderlich. Ein Neuladen (SIGHUP)
//! erzeugt einen neuen Snapshot, der ueber [`RegistryHandle`] atomar
//! ausgetauscht wird. Laufende Anfragen behalten ihren alten Snapshot.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use minishare_crypto::{load_private_key, load_public_key, PrivateKey, PublicKey};
use parking_lot::RwLock;

use crate::error::{AuthError, AuthResult};
use crate::secret::{load_client_secrets, SecretRegister};

/// Dateinamen-Praefix registrierter Client-Schluessel
pub const CLIENT_PRAEFIX: &str = "client_";
/// Dateiendung registrierter Client-Schluessel
pub const CLIENT_ENDUNG: &str = ".pub";

/// Ein registrierter oeffentlicher Client-Schluessel
#[derive(Debug, Clone)]
pub struct ClientKey {
    pub key: PublicKey,
    /// Herkunftsdatei, nur fuer Logausgaben
    pub pfad: PathBuf,
}

/// Pfade aus denen eine Registry geladen wird
#[derive(Debug, Clone)]
pub struct RegistryPfade {
    pub server_key: PathBuf,
    pub client_verzeichnis: PathBuf,
    pub register: PathBuf,
}

/// Unveraenderlicher Schnappschuss aller Schluessel und Secrets
#[derive(Debug)]
pub struct KeyRegistry {
    server_key: PrivateKey,
    client_keys: Vec<ClientKey>,
    secrets: SecretRegister,
}

impl KeyRegistry {
    pub fn neu(
        server_key: PrivateKey,
        client_keys: Vec<ClientKey>,
        secrets: SecretRegister,
    ) -> Self {
        Self {
            server_key,
            client_keys,
            secrets,
        }
    }

    /// Laedt Server-Schluessel, Client-Schluessel und Secret-Register
    pub fn laden(pfade: &RegistryPfade) -> AuthResult<Self> {
        let server_key = load_server_key(&pfade.server_key)?;
        let client_keys = load_client_keys(&pfade.client_verzeichnis);
        let secrets = load_client_secrets(&pfade.register)?;

        tracing::info!(
            client_schluessel = client_keys.len(),
            secrets = secrets.len(),
            "Schluessel-Registry geladen"
        );
        Ok(Self::neu(server_key, client_keys, secrets))
    }

    pub fn server_key(&self) -> &PrivateKey {
        &self.server_key
    }

    pub fn client_keys(&self) -> &[ClientKey] {
        &self.client_keys
    }

    pub fn secrets(&self) -> &SecretRegister {
        &self.secrets
    }

    pub fn is_registered(&self, secret: &str) -> bool {
        self.secrets.ist_registriert(secret)
    }
}

/// Laedt den privaten Server-Schluessel; jeder Fehler ist fatal
pub fn load_server_key(pfad: &Path) -> AuthResult<PrivateKey> {
    load_private_key(pfad).map_err(|source| AuthError::KorrupterServerSchluessel {
        pfad: pfad.display().to_string(),
        source,
    })
}

/// Laedt alle `client_*.pub` aus `verzeichnis`
///
/// Unlesbare oder fehlerhafte Dateien werden mit einem Fehler-Log
/// uebersprungen. Sortiert wird nach der Nummer im Dateinamen, Dateien ohne
/// Nummer folgen alphabetisch.
pub fn load_client_keys(verzeichnis: &Path) -> Vec<ClientKey> {
    let eintraege = match std::fs::read_dir(verzeichnis) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(
                verzeichnis = %verzeichnis.display(),
                fehler = %e,
                "Client-Schluesselverzeichnis nicht lesbar"
            );
            return Vec::new();
        }
    };

    let mut pfade: Vec<PathBuf> = eintraege
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && client_nummer_roh(p).is_some())
        .collect();
    pfade.sort_by(|a, b| {
        let na = client_nummer(a);
        let nb = client_nummer(b);
        (na.is_none(), na, a).cmp(&(nb.is_none(), nb, b))
    });

    pfade
        .into_iter()
        .filter_map(|pfad| match load_public_key(&pfad) {
            Ok(key) => Some(ClientKey { key, pfad }),
            Err(e) => {
                tracing::error!(
                    pfad = %pfad.display(),
                    fehler = %e,
                    "Client-Schluessel fehlerhaft, wird uebersprungen"
                );
                None
            }
        })
        .collect()
}

/// Teil zwischen `client_` und `.pub`, falls der Name dem Muster entspricht
pub(crate) fn client_nummer_roh(pfad: &Path) -> Option<&str> {
    pfad.file_name()?
        .to_str()?
        .strip_prefix(CLIENT_PRAEFIX)?
        .strip_suffix(CLIENT_ENDUNG)
}

pub(crate) fn client_nummer(pfad: &Path) -> Option<u64> {
    client_nummer_roh(pfad)?.parse().ok()
}

/// Austauschbarer Verweis auf die aktuelle Registry
#[derive(Debug)]
pub struct RegistryHandle {
    aktuell: RwLock<Arc<KeyRegistry>>,
    pfade: RegistryPfade,
}

impl RegistryHandle {
    pub fn neu(registry: KeyRegistry, pfade: RegistryPfade) -> Self {
        Self {
            aktuell: RwLock::new(Arc::new(registry)),
            pfade,
        }
    }

    pub fn laden(pfade: RegistryPfade) -> AuthResult<Self> {
        let registry = KeyRegistry::laden(&pfade)?;
        Ok(Self::neu(registry, pfade))
    }

    /// Aktueller Schnappschuss fuer eine einzelne Anfrage
    pub fn snapshot(&self) -> Arc<KeyRegistry> {
        Arc::clone(&self.aktuell.read())
    }

    /// Laedt Client-Schluessel und Secrets neu
    ///
    /// Der Server-Schluessel bleibt erhalten. Schlaegt das Laden fehl, bleibt
    /// der bisherige Schnappschuss aktiv.
    pub fn neu_laden(&self) -> AuthResult<()> {
        let secrets = load_client_secrets(&self.pfade.register)?;
        let client_keys = load_client_keys(&self.pfade.client_verzeichnis);
        let server_key = self.snapshot().server_key().clone();

        tracing::info!(
            client_schluessel = client_keys.len(),
            secrets = secrets.len(),
            "Schluessel-Registry neu geladen"
        );
        *self.aktuell.write() = Arc::new(KeyRegistry::neu(server_key, client_keys, secrets));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minishare_crypto::{encode_key, generate_private_key};

    fn pub_schreiben(verzeichnis: &Path, name: &str) -> PublicKey {
        let key = generate_private_key().public_key();
        std::fs::write(verzeichnis.join(name), encode_key(key.as_bytes())).unwrap();
        key
    }

    #[test]
    fn client_schluessel_numerisch_sortiert() {
        let dir = tempfile::tempdir().unwrap();
        let k10 = pub_schreiben(dir.path(), "client_10.pub");
        let k2 = pub_schreiben(dir.path(), "client_2.pub");
        let k1 = pub_schreiben(dir.path(), "client_1.pub");
        let kx = pub_schreiben(dir.path(), "client_extra.pub");

        let keys: Vec<PublicKey> = load_client_keys(dir.path())
            .into_iter()
            .map(|c| c.key)
            .collect();
        assert_eq!(keys, vec![k1, k2, k10, kx]);
    }

    #[test]
    fn fremde_dateien_werden_ignoriert() {
        let dir = tempfile::tempdir().unwrap();
        pub_schreiben(dir.path(), "client_1.pub");
        pub_schreiben(dir.path(), "server.pub");
        pub_schreiben(dir.path(), "client_2.key");

        assert_eq!(load_client_keys(dir.path()).len(), 1);
    }

    #[test]
    fn korrupter_client_schluessel_wird_uebersprungen() {
        let dir = tempfile::tempdir().unwrap();
        let gut = pub_schreiben(dir.path(), "client_1.pub");
        std::fs::write(dir.path().join("client_2.pub"), "kaputt").unwrap();

        let keys = load_client_keys(dir.path());
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].key, gut);
    }

    #[test]
    fn fehlendes_verzeichnis_ergibt_leere_liste() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_client_keys(&dir.path().join("nicht_da")).is_empty());
    }

    #[test]
    fn korrupter_server_schluessel_ist_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let pfad = dir.path().join("server.key");
        std::fs::write(&pfad, "AAAA").unwrap();

        assert!(matches!(
            load_server_key(&pfad),
            Err(AuthError::KorrupterServerSchluessel { .. })
        ));
        assert!(load_server_key(&dir.path().join("fehlt.key")).is_err());
    }

    fn pfade_anlegen(dir: &Path) -> RegistryPfade {
        let server = generate_private_key();
        std::fs::write(dir.join("server.key"), encode_key(server.as_bytes())).unwrap();
        std::fs::write(dir.join("clients.dev"), "eins\n").unwrap();
        RegistryPfade {
            server_key: dir.join("server.key"),
            client_verzeichnis: dir.to_path_buf(),
            register: dir.join("clients.dev"),
        }
    }

    #[test]
    fn neu_laden_tauscht_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let handle = RegistryHandle::laden(pfade_anlegen(dir.path())).unwrap();
        let alt = handle.snapshot();
        assert!(alt.client_keys().is_empty());
        assert!(alt.is_registered("eins"));

        pub_schreiben(dir.path(), "client_1.pub");
        std::fs::write(dir.path().join("clients.dev"), "eins\nzwei\n").unwrap();
        handle.neu_laden().unwrap();

        let neu = handle.snapshot();
        assert_eq!(neu.client_keys().len(), 1);
        assert!(neu.is_registered("zwei"));
        assert_eq!(neu.server_key().public_key(), alt.server_key().public_key());
        // alter Schnappschuss bleibt unveraendert
        assert!(alt.client_keys().is_empty());
    }

    #[test]
    fn fehlgeschlagenes_neu_laden_behaelt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let handle = RegistryHandle::laden(pfade_anlegen(dir.path())).unwrap();

        std::fs::remove_file(dir.path().join("clients.dev")).unwrap();
        assert!(handle.neu_laden().is_err());
        assert!(handle.snapshot().is_registered("eins"));
    }
}
