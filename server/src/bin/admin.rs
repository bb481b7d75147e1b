//! minishare-admin – Clients registrieren und Schluessel erzeugen

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use minishare_auth::append_client;
use minishare_crypto::{decode_key_line, write_private_key_file, write_public_key_file};
use minishare_observability::{logging_initialisieren, LogKonfig};
use minishare_server::config::ServerConfig;

/// Verwaltungswerkzeug fuer minishare
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Konfigurationsdatei (Standard: $MINISHARE_CONFIG oder config/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    befehl: Befehl,
}

#[derive(Subcommand, Debug)]
enum Befehl {
    /// Registriert einen neuen Client und gibt sein Secret aus
    AppendClient {
        /// Oeffentlicher Schluessel des Clients (Base64)
        pubkey: String,

        /// Schluessel ohne Pruefung von Kodierung und Laenge speichern
        #[arg(long)]
        ohne_pruefung: bool,
    },
    /// Erzeugt Schluesseldateien
    GenKey {
        modus: Modus,
        /// Basispfad; erzeugt <KEYFILE>.key bzw. <KEYFILE>.pub
        keyfile: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Modus {
    Private,
    Public,
    Pair,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = logging_initialisieren(&LogKonfig {
        level: "warn".into(),
        ..LogKonfig::default()
    })?;

    match args.befehl {
        Befehl::AppendClient {
            pubkey,
            ohne_pruefung,
        } => {
            if !ohne_pruefung {
                decode_key_line(&pubkey)
                    .context("Oeffentlicher Schluessel ist kein Base64 von 32 Bytes")?;
            }
            let pfad = args.config.unwrap_or_else(ServerConfig::pfad_aus_env);
            let config = ServerConfig::laden(&pfad)?;

            let secret = append_client(
                &pubkey,
                &config.clients.register,
                &config.clients.schluessel_verzeichnis,
            )?;
            println!("{}", secret.as_str());
        }
        Befehl::GenKey { modus, keyfile } => {
            if matches!(modus, Modus::Private | Modus::Pair) {
                let pfad = write_private_key_file(&keyfile)?;
                println!("{}", pfad.display());
            }
            if matches!(modus, Modus::Public | Modus::Pair) {
                let pfad = write_public_key_file(&keyfile)?;
                println!("{}", pfad.display());
            }
        }
    }
    Ok(())
}
