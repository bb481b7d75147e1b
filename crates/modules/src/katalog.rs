//! Statischer Katalog der verfuegbaren Modul-Implementierungen
//!
//! Module werden ausschliesslich hier per Konstruktor-Funktion registriert.
//! Zur Laufzeit wird kein Code nachgeladen.

use std::collections::HashMap;
use std::sync::Arc;

/// Eine Operation ohne Argumente, die einen String liefert
pub trait Modul: Send + Sync {
    fn aufrufen(&self) -> String;
}

/// Konstruktor einer Modul-Implementierung
pub type ModulKonstruktor = fn() -> Arc<dyn Modul>;

/// Implementierungs-ID -> Konstruktor
#[derive(Clone, Default)]
pub struct ModulKatalog {
    eintraege: HashMap<String, ModulKonstruktor>,
}

impl ModulKatalog {
    pub fn leer() -> Self {
        Self::default()
    }

    /// Katalog mit allen eingebauten Modulen
    pub fn mit_eingebauten() -> Self {
        let mut katalog = Self::leer();
        katalog.registrieren("builtin.zeit", || -> Arc<dyn Modul> { Arc::new(Zeit) });
        katalog.registrieren("builtin.version", || -> Arc<dyn Modul> { Arc::new(Version) });
        katalog.registrieren("builtin.ping", || -> Arc<dyn Modul> { Arc::new(Ping) });
        katalog
    }

    pub fn registrieren(&mut self, id: impl Into<String>, konstruktor: ModulKonstruktor) {
        self.eintraege.insert(id.into(), konstruktor);
    }

    /// Erzeugt eine Instanz der Implementierung `id`, falls bekannt
    pub fn erzeugen(&self, id: &str) -> Option<Arc<dyn Modul>> {
        self.eintraege.get(id).map(|konstruktor| konstruktor())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.eintraege.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for ModulKatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.eintraege.keys()).finish()
    }
}

/// Aktuelle Serverzeit (RFC 3339, UTC)
struct Zeit;

impl Modul for Zeit {
    fn aufrufen(&self) -> String {
        chrono::Utc::now().to_rfc3339()
    }
}

/// Paketname und Version
struct Version;

impl Modul for Version {
    fn aufrufen(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

struct Ping;

impl Modul for Ping {
    fn aufrufen(&self) -> String {
        "pong".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eingebaute_module_vorhanden() {
        let katalog = ModulKatalog::mit_eingebauten();
        let mut ids: Vec<&str> = katalog.ids().collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["builtin.ping", "builtin.version", "builtin.zeit"]);
    }

    #[test]
    fn zeit_ist_rfc3339() {
        let modul = ModulKatalog::mit_eingebauten().erzeugen("builtin.zeit").unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&modul.aufrufen()).is_ok());
    }

    #[test]
    fn version_enthaelt_paketversion() {
        let modul = ModulKatalog::mit_eingebauten().erzeugen("builtin.version").unwrap();
        assert!(modul.aufrufen().ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn unbekannte_id() {
        assert!(ModulKatalog::mit_eingebauten().erzeugen("gibt.es.nicht").is_none());
    }
}
