//! Fehlertypen fuer die Operations-Registry

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModulError {
    #[error("Modul-Konfiguration nicht gefunden: {0}")]
    KonfigNichtGefunden(String),

    #[error("Modul-Konfiguration ungueltig: {0}")]
    KonfigUngueltig(String),
}

/// Result-Alias fuer die Operations-Registry
pub type ModulResult<T> = Result<T, ModulError>;
