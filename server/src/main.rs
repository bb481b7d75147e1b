//! minishare-server – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und startet den Server.

use anyhow::Result;
use minishare_observability::logging_initialisieren;
use minishare_server::{config::ServerConfig, Server};

#[tokio::main]
async fn main() -> Result<()> {
    // Konfigurationsdatei-Pfad aus Umgebungsvariable oder Standard
    let config_pfad = ServerConfig::pfad_aus_env();
    let config = ServerConfig::laden(&config_pfad)?;

    let _guard = logging_initialisieren(&config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_pfad.display(),
        "minishare-server wird initialisiert"
    );

    let server = Server::aufbauen(config)?;
    server.starten().await?;

    Ok(())
}
