//! ModulDispatcher – logischer Operationsname -> Modul
//!
//! Wird einmal beim Start aus Konfiguration und Katalog aufgebaut und danach
//! nur noch gelesen.

use std::collections::HashMap;
use std::sync::Arc;

use crate::katalog::{Modul, ModulKatalog};
use crate::konfig::ModulKonfig;

#[derive(Clone, Default)]
pub struct ModulDispatcher {
    module: HashMap<String, Arc<dyn Modul>>,
}

impl ModulDispatcher {
    /// Baut die Tabelle auf; nicht aufloesbare IDs werden mit Warnung
    /// uebersprungen
    pub fn aufbauen(konfig: &ModulKonfig, katalog: &ModulKatalog) -> Self {
        let mut module = HashMap::new();
        for (name, id) in konfig.eintraege() {
            match katalog.erzeugen(id) {
                Some(modul) => {
                    tracing::debug!(name, implementierung = id, "Modul registriert");
                    module.insert(name.to_string(), modul);
                }
                None => {
                    tracing::warn!(
                        name,
                        implementierung = id,
                        "Modul-Implementierung nicht gefunden, wird uebersprungen"
                    );
                }
            }
        }
        tracing::info!(anzahl = module.len(), "Module geladen");
        Self { module }
    }

    /// Ruft die Operation `name` auf
    ///
    /// Ein unbekannter Name ergibt einen leeren String.
    pub fn call(&self, name: &str) -> String {
        match self.module.get(name) {
            Some(modul) => modul.aufrufen(),
            None => {
                tracing::warn!(name, "Angefragtes Modul nicht gefunden");
                String::new()
            }
        }
    }

    pub fn ist_registriert(&self, name: &str) -> bool {
        self.module.contains_key(name)
    }

    pub fn anzahl(&self) -> usize {
        self.module.len()
    }
}

impl std::fmt::Debug for ModulDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.module.keys()).finish()
    }
}
