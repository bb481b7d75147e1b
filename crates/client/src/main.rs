//! minishare-client – fuehrt einen authentifizierten Aufruf aus

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use minishare_client::{aufrufen, KeyStore, Transport};
use minishare_observability::{logging_initialisieren, LogKonfig};
use url::Url;

/// Sendet einen verschluesselten Aufruf an einen minishare-Server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL des Datenendpunkts, z.B. http://localhost:5000/data/
    url: Url,

    /// Name der entfernten Operation
    #[arg(long, default_value = "time_test")]
    methode: String,

    /// Datei mit dem Client-Secret
    #[arg(long, default_value = "client.secret")]
    secret: PathBuf,

    /// Privater Schluessel des Clients
    #[arg(long, default_value = "client.key")]
    schluessel: PathBuf,

    /// Oeffentlicher Schluessel des Servers
    #[arg(long, default_value = "server.pub")]
    server_pub: PathBuf,

    /// Log-Level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _guard = logging_initialisieren(&LogKonfig {
        level: args.log_level.clone(),
        ..LogKonfig::default()
    })?;

    let store = KeyStore::laden(&args.secret, &args.schluessel, &args.server_pub)
        .context("Schluessel konnten nicht geladen werden")?;
    let transport = Transport::neu(args.url);

    let wert = aufrufen(&store, &transport, &args.methode)
        .await
        .with_context(|| format!("Aufruf von '{}' fehlgeschlagen", args.methode))?;

    println!("{wert}");
    Ok(())
}
