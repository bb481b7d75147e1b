//! Schluesseldateien
//!
//! Jede Schluesseldatei enthaelt eine einzelne Zeile: 32 rohe Bytes,
//! Base64-kodiert (Standard-Alphabet). Private Schluessel heissen
//! `<name>.key`, oeffentliche `<name>.pub`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand_core::{OsRng, RngCore};

use crate::error::{CryptoError, CryptoResult};
use crate::types::{PrivateKey, PublicKey, KEY_LEN};

/// Dekodiert eine Base64-Schluesselzeile zu genau 32 Bytes
pub fn decode_key_line(line: &str) -> CryptoResult<[u8; KEY_LEN]> {
    let bytes = STANDARD.decode(line.trim())?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::UngueltigeSchluesselLaenge {
            erwartet: KEY_LEN,
            erhalten: bytes.len(),
        })
}

/// Kodiert Schluessel-Bytes als Base64-Zeile
pub fn encode_key(bytes: &[u8; KEY_LEN]) -> String {
    STANDARD.encode(bytes)
}

/// Liest die erste Zeile einer Schluesseldatei und dekodiert sie
///
/// Jeder Fehler ausser einer fehlenden Datei wird als
/// [`CryptoError::KorrupteSchluesseldatei`] gemeldet.
pub fn read_key_file(pfad: &Path) -> CryptoResult<[u8; KEY_LEN]> {
    let inhalt = match std::fs::read_to_string(pfad) {
        Ok(inhalt) => inhalt,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CryptoError::SchluesseldateiFehlt(pfad.display().to_string()));
        }
        Err(e) => return Err(CryptoError::Io(e)),
    };

    let erste_zeile = inhalt.lines().next().unwrap_or_default();
    decode_key_line(erste_zeile).map_err(|e| CryptoError::KorrupteSchluesseldatei {
        pfad: pfad.display().to_string(),
        grund: e.to_string(),
    })
}

pub fn load_private_key(pfad: &Path) -> CryptoResult<PrivateKey> {
    read_key_file(pfad).map(PrivateKey::from_bytes)
}

pub fn load_public_key(pfad: &Path) -> CryptoResult<PublicKey> {
    read_key_file(pfad).map(PublicKey::from_bytes)
}

/// Erzeugt einen neuen privaten Schluessel aus dem Betriebssystem-Zufall
pub fn generate_private_key() -> PrivateKey {
    let mut bytes = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut bytes);
    PrivateKey::from_bytes(bytes)
}

/// Schreibt einen frisch generierten privaten Schluessel nach `<basis>.key`
pub fn write_private_key_file(basis: &Path) -> CryptoResult<PathBuf> {
    let pfad = mit_endung(basis, "key");
    let key = generate_private_key();
    schreiben_nur_besitzer(&pfad, &encode_key(key.as_bytes()))?;
    tracing::info!(pfad = %pfad.display(), "Privater Schluessel erzeugt");
    Ok(pfad)
}

/// Leitet aus `<basis>.key` den oeffentlichen Schluessel ab und schreibt ihn
/// nach `<basis>.pub`
pub fn write_public_key_file(basis: &Path) -> CryptoResult<PathBuf> {
    let key = load_private_key(&mit_endung(basis, "key"))?;
    let pfad = mit_endung(basis, "pub");
    schreiben_nur_besitzer(&pfad, &encode_key(key.public_key().as_bytes()))?;
    tracing::info!(pfad = %pfad.display(), "Oeffentlicher Schluessel erzeugt");
    Ok(pfad)
}

fn mit_endung(basis: &Path, endung: &str) -> PathBuf {
    let mut name = OsString::from(basis.as_os_str());
    name.push(".");
    name.push(endung);
    PathBuf::from(name)
}

fn schreiben_nur_besitzer(pfad: &Path, inhalt: &str) -> CryptoResult<()> {
    std::fs::write(pfad, inhalt)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(pfad, std::fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schluesselzeile_roundtrip() {
        let key = generate_private_key();
        let zeile = encode_key(key.as_bytes());
        assert_eq!(&decode_key_line(&zeile).unwrap(), key.as_bytes());
        // Zeilenende wird toleriert
        assert_eq!(&decode_key_line(&format!("{zeile}\n")).unwrap(), key.as_bytes());
    }

    #[test]
    fn falsche_laenge_ist_korrupt() {
        let dir = tempfile::tempdir().unwrap();
        let pfad = dir.path().join("kurz.key");
        std::fs::write(&pfad, STANDARD.encode([1u8; 16])).unwrap();

        let err = read_key_file(&pfad).unwrap_err();
        assert!(matches!(err, CryptoError::KorrupteSchluesseldatei { .. }));
    }

    #[test]
    fn kein_base64_ist_korrupt() {
        let dir = tempfile::tempdir().unwrap();
        let pfad = dir.path().join("kaputt.pub");
        std::fs::write(&pfad, "das ist kein base64!").unwrap();

        assert!(matches!(
            read_key_file(&pfad),
            Err(CryptoError::KorrupteSchluesseldatei { .. })
        ));
    }

    #[test]
    fn fehlende_datei_wird_gemeldet() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_key_file(&dir.path().join("fehlt.key")).unwrap_err();
        assert!(matches!(err, CryptoError::SchluesseldateiFehlt(_)));
    }

    #[test]
    fn nur_erste_zeile_zaehlt() {
        let dir = tempfile::tempdir().unwrap();
        let pfad = dir.path().join("zwei.pub");
        let key = generate_private_key().public_key();
        std::fs::write(&pfad, format!("{}\nmuell\n", encode_key(key.as_bytes()))).unwrap();

        assert_eq!(load_public_key(&pfad).unwrap(), key);
    }

    #[test]
    fn schluesselpaar_dateien_erzeugen() {
        let dir = tempfile::tempdir().unwrap();
        let basis = dir.path().join("server");

        let key_pfad = write_private_key_file(&basis).unwrap();
        let pub_pfad = write_public_key_file(&basis).unwrap();

        assert!(key_pfad.ends_with("server.key"));
        assert!(pub_pfad.ends_with("server.pub"));

        let privat = load_private_key(&key_pfad).unwrap();
        let oeffentlich = load_public_key(&pub_pfad).unwrap();
        assert_eq!(privat.public_key(), oeffentlich);
    }

    #[test]
    fn basis_mit_punkt_behaelt_namen() {
        let dir = tempfile::tempdir().unwrap();
        let basis = dir.path().join("client.dev");
        let pfad = write_private_key_file(&basis).unwrap();
        assert!(pfad.ends_with("client.dev.key"));
    }

    #[cfg(unix)]
    #[test]
    fn schluesseldatei_nur_fuer_besitzer_lesbar() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let pfad = write_private_key_file(&dir.path().join("geheim")).unwrap();
        let modus = std::fs::metadata(&pfad).unwrap().permissions().mode();
        assert_eq!(modus & 0o777, 0o600);
    }

    #[test]
    fn oeffentlicher_schluessel_ohne_privaten_schlaegt_fehl() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_public_key_file(&dir.path().join("nichts")).unwrap_err();
        assert!(matches!(err, CryptoError::SchluesseldateiFehlt(_)));
    }
}
