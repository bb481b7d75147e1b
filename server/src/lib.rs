//! minishare-server – Bibliotheks-Root
//!
//! Verdrahtet Registry, Module und Datenendpunkt und stellt den
//! Einstiegspunkt fuer Integrationstests bereit.

pub mod config;

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use config::ServerConfig;
use minishare_auth::{AdressBuch, AuthenticationEngine, RegistryHandle};
use minishare_gateway::{GatewayServer, GatewayState};
use minishare_modules::{ModulDispatcher, ModulKatalog, ModulKonfig};

/// Haelt den Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
    state: GatewayState,
}

impl Server {
    /// Laedt Schluessel, Secrets und Module
    ///
    /// Ein fehlender oder fehlerhafter Server-Schluessel, ein fehlendes
    /// Secret-Register oder eine fehlende Modul-Konfiguration brechen den
    /// Start ab.
    pub fn aufbauen(config: ServerConfig) -> Result<Self> {
        let registry = RegistryHandle::laden(config.registry_pfade())
            .context("Schluessel-Registry konnte nicht geladen werden")?;

        let modul_konfig = ModulKonfig::from_file(&config.server.module_konfig)
            .context("Modul-Konfiguration konnte nicht geladen werden")?;
        let dispatcher = ModulDispatcher::aufbauen(&modul_konfig, &ModulKatalog::mit_eingebauten());

        let state = GatewayState::neu(
            Arc::new(registry),
            AuthenticationEngine::neu(config.clients.anfrage_ttl_sek),
            Arc::new(dispatcher),
            Arc::new(AdressBuch::neu(config.server.adressen_ttl_sek)),
        )
        .mit_forward_for(config.proxy.forward_for);

        Ok(Self { config, state })
    }

    pub fn state(&self) -> &GatewayState {
        &self.state
    }

    /// Startet den Datenendpunkt und laeuft bis Ctrl-C
    pub async fn starten(self) -> Result<()> {
        let gateway = GatewayServer::binden(self.config.bind_adresse()?).await?;
        self.starten_mit(gateway, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(fehler = %e, "Ctrl-C-Handler konnte nicht registriert werden");
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
        })
        .await
    }

    /// Startet auf einem bereits gebundenen Listener
    pub async fn starten_mit<F>(self, gateway: GatewayServer, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        neu_laden_bei_sighup(self.state.registry.clone())?;

        let registry = self.state.registry.snapshot();
        tracing::info!(
            adresse = %gateway.lokale_adresse()?,
            client_schluessel = registry.client_keys().len(),
            secrets = registry.secrets().len(),
            module = self.state.dispatcher.anzahl(),
            anfrage_ttl_sek = self.state.engine.ttl_sek(),
            "Server startet"
        );
        gateway.starten(self.state, shutdown).await?;
        Ok(())
    }
}

/// Laedt Client-Schluessel und Secrets bei SIGHUP neu
#[cfg(unix)]
fn neu_laden_bei_sighup(registry: Arc<RegistryHandle>) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sighup = signal(SignalKind::hangup()).context("SIGHUP-Handler nicht registrierbar")?;
    tokio::spawn(async move {
        while sighup.recv().await.is_some() {
            tracing::info!("SIGHUP empfangen, Registry wird neu geladen");
            let registry = registry.clone();
            match tokio::task::spawn_blocking(move || registry.neu_laden()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::error!(
                        fehler = %e,
                        "Neuladen fehlgeschlagen, bisherige Registry bleibt aktiv"
                    );
                }
                Err(e) => tracing::error!(fehler = %e, "Neuladen abgebrochen"),
            }
        }
    });
    Ok(())
}

#[cfg(not(unix))]
fn neu_laden_bei_sighup(_registry: Arc<RegistryHandle>) -> Result<()> {
    Ok(())
}
