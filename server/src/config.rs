//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Fehlende Felder erhalten
//! Standardwerte, eine fehlende Datei ist jedoch ein fataler Fehler.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use minishare_auth::{RegistryPfade, STANDARD_ADRESSEN_TTL_SEK, STANDARD_ANFRAGE_TTL_SEK};
use minishare_observability::logging::{log_format_gueltig, log_level_gueltig};
use minishare_observability::LogKonfig;
use serde::Deserialize;

/// Umgebungsvariable fuer den Pfad der Konfigurationsdatei
pub const ENV_CONFIG: &str = "MINISHARE_CONFIG";
/// Standardpfad der Konfigurationsdatei
pub const STANDARD_CONFIG_PFAD: &str = "config/config.toml";
/// Dateiname des privaten Server-Schluessels
pub const SERVER_KEY_DATEI: &str = "server.key";

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerEinstellungen,
    pub clients: ClientEinstellungen,
    pub proxy: ProxyEinstellungen,
    pub logging: LogKonfig,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    pub bind_adresse: String,
    pub port: u16,
    /// Verzeichnis mit `server.key`
    pub schluessel_verzeichnis: PathBuf,
    /// Wie lange eine Client-Adresse als bekannt gilt
    pub adressen_ttl_sek: u64,
    /// Pfad der Modul-Konfiguration
    pub module_konfig: PathBuf,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 5000,
            schluessel_verzeichnis: "sec".into(),
            adressen_ttl_sek: STANDARD_ADRESSEN_TTL_SEK,
            module_konfig: "config/modules.toml".into(),
        }
    }
}

/// Einstellungen fuer registrierte Clients
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientEinstellungen {
    /// Secret-Register, ein Secret pro Zeile
    pub register: PathBuf,
    /// Verzeichnis mit `client_<N>.pub`
    pub schluessel_verzeichnis: PathBuf,
    /// Maximale Abweichung des Anfrage-Zeitstempels
    pub anfrage_ttl_sek: u64,
}

impl Default for ClientEinstellungen {
    fn default() -> Self {
        Self {
            register: "sec/clients.dev".into(),
            schluessel_verzeichnis: "sec".into(),
            anfrage_ttl_sek: STANDARD_ANFRAGE_TTL_SEK,
        }
    }
}

/// Reverse-Proxy-Einstellungen
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProxyEinstellungen {
    /// Anzahl vertrauenswuerdiger Proxies (0 = X-Forwarded-For ignorieren)
    pub forward_for: usize,
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei
    pub fn laden(pfad: &Path) -> Result<Self> {
        let inhalt = std::fs::read_to_string(pfad)
            .with_context(|| format!("Konfigurationsdatei '{}' nicht lesbar", pfad.display()))?;
        let config: Self = toml::from_str(&inhalt)
            .with_context(|| format!("Konfigurationsdatei '{}' ungueltig", pfad.display()))?;
        config.validieren()?;
        Ok(config)
    }

    /// Pfad aus `MINISHARE_CONFIG` oder Standardpfad
    pub fn pfad_aus_env() -> PathBuf {
        std::env::var(ENV_CONFIG)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(STANDARD_CONFIG_PFAD))
    }

    pub fn validieren(&self) -> Result<()> {
        if !log_level_gueltig(&self.logging.level) {
            bail!("Ungueltiges Log-Level '{}'", self.logging.level);
        }
        if !log_format_gueltig(&self.logging.format) {
            bail!("Ungueltiges Log-Format '{}' (erlaubt: text, json)", self.logging.format);
        }
        self.bind_adresse()?;
        Ok(())
    }

    /// Bind-Adresse fuer den Datenendpunkt
    pub fn bind_adresse(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.bind_adresse, self.server.port)
            .parse()
            .with_context(|| format!("Ungueltige Bind-Adresse '{}'", self.server.bind_adresse))
    }

    pub fn server_key_pfad(&self) -> PathBuf {
        self.server.schluessel_verzeichnis.join(SERVER_KEY_DATEI)
    }

    pub fn registry_pfade(&self) -> RegistryPfade {
        RegistryPfade {
            server_key: self.server_key_pfad(),
            client_verzeichnis: self.clients.schluessel_verzeichnis.clone(),
            register: self.clients.register.clone(),
        }
    }
}
