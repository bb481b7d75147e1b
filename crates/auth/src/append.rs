//! Registrierung neuer Clients
//!
//! Legt `client_<n>.pub` an und haengt ein frisch erzeugtes Secret an das
//! Register an. `<n>` ist die hoechste vorhandene Nummer plus eins.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use rand_core::{OsRng, RngCore};

use crate::error::{AuthError, AuthResult};
use crate::registry::{client_nummer, CLIENT_ENDUNG, CLIENT_PRAEFIX};
use crate::secret::Secret;

/// Anzahl Zufallsbytes eines neuen Secrets (128 Hex-Zeichen)
pub const SECRET_BYTES: usize = 64;

/// Registriert einen neuen Client
///
/// Der uebergebene oeffentliche Schluessel wird unveraendert gespeichert.
/// Gibt das neue Secret zurueck, das dem Client mitgeteilt werden muss.
pub fn append_client(public_key: &str, register: &Path, verzeichnis: &Path) -> AuthResult<Secret> {
    if !register.is_file() {
        return Err(AuthError::AnlegenNichtMoeglich(format!(
            "Register '{}' existiert nicht",
            register.display()
        )));
    }
    if !verzeichnis.is_dir() {
        return Err(AuthError::AnlegenNichtMoeglich(format!(
            "Verzeichnis '{}' existiert nicht",
            verzeichnis.display()
        )));
    }

    let nummer = naechste_nummer(verzeichnis)?;
    let pfad = verzeichnis.join(format!("{CLIENT_PRAEFIX}{nummer}{CLIENT_ENDUNG}"));

    let mut datei = OpenOptions::new().write(true).create_new(true).open(&pfad)?;
    datei.write_all(public_key.as_bytes())?;

    let secret = secret_erzeugen();
    // letzte Zeile ohne Zeilenende nicht verlaengern
    let offen = std::fs::read(register)?.last().is_some_and(|b| *b != b'\n');
    let mut reg = OpenOptions::new().append(true).open(register)?;
    if offen {
        writeln!(reg)?;
    }
    writeln!(reg, "{}", secret.as_str())?;

    tracing::info!(
        pfad = %pfad.display(),
        secret = %secret.praefix(),
        "Neuer Client registriert"
    );
    Ok(secret)
}

/// Erzeugt ein neues Secret aus 64 Zufallsbytes, hex-kodiert
pub fn secret_erzeugen() -> Secret {
    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    Secret::neu(hex::encode(bytes))
}

fn naechste_nummer(verzeichnis: &Path) -> AuthResult<u64> {
    let hoechste = std::fs::read_dir(verzeichnis)?
        .filter_map(|e| e.ok())
        .filter_map(|e| client_nummer(&e.path()))
        .max();
    match hoechste {
        None => Ok(1),
        Some(n) => n.checked_add(1).ok_or_else(|| {
            AuthError::AnlegenNichtMoeglich(format!("Keine Client-Nummer nach {n} frei"))
        }),
    }
}
