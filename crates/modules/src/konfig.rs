//! Modul-Konfiguration (modules.toml)
//!
//! ```toml
//! [module]
//! time_test = "builtin.zeit"
//! ```
//!
//! Links steht der logische Operationsname, rechts die Implementierungs-ID
//! aus dem [`ModulKatalog`](crate::ModulKatalog).

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ModulError, ModulResult};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModulKonfig {
    /// Operationsname -> Implementierungs-ID
    pub module: BTreeMap<String, String>,
}

impl ModulKonfig {
    /// Laedt die Konfiguration; fehlende Datei oder fehlende `[module]`-Tabelle
    /// sind fatal
    pub fn from_file(pfad: &Path) -> ModulResult<Self> {
        let inhalt = std::fs::read_to_string(pfad).map_err(|e| {
            ModulError::KonfigNichtGefunden(format!("{}: {}", pfad.display(), e))
        })?;
        Self::parse(&inhalt)
    }

    pub fn parse(inhalt: &str) -> ModulResult<Self> {
        toml::from_str(inhalt).map_err(|e| ModulError::KonfigUngueltig(e.to_string()))
    }

    /// Eintraege als `(name, implementierung)`-Paare
    pub fn eintraege(&self) -> impl Iterator<Item = (&str, &str)> {
        self.module.iter().map(|(n, i)| (n.as_str(), i.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn konfig_parsen() {
        let konfig = ModulKonfig::parse(
            r#"
            [module]
            time_test = "builtin.zeit"
            ping = "builtin.ping"
            "#,
        )
        .unwrap();
        assert_eq!(konfig.module.len(), 2);
        assert_eq!(konfig.module["time_test"], "builtin.zeit");
    }

    #[test]
    fn fehlende_tabelle_ist_fatal() {
        let err = ModulKonfig::parse("[andere]\nx = \"y\"\n").unwrap_err();
        assert!(matches!(err, ModulError::KonfigUngueltig(_)));
    }

    #[test]
    fn leere_tabelle_ist_erlaubt() {
        let konfig = ModulKonfig::parse("[module]\n").unwrap();
        assert_eq!(konfig.eintraege().count(), 0);
    }

    #[test]
    fn fehlende_datei_ist_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModulKonfig::from_file(&dir.path().join("modules.toml")).unwrap_err();
        assert!(matches!(err, ModulError::KonfigNichtGefunden(_)));
    }
}
