//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per `[logging]`-Abschnitt und Umgebungsvariable:
//! - `MS_LOG_LEVEL`: Log-Level bzw. EnvFilter-Direktive, Standard: info
//! - `MS_LOG_FORMAT`: Format (text/json), Standard: text
//!
//! Ist ein Log-Verzeichnis gesetzt, wird zusaetzlich in eine taeglich
//! rotierende Datei `latest.<datum>.log` geschrieben.

use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

pub const ENV_LOG_LEVEL: &str = "MS_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "MS_LOG_FORMAT";

/// `[logging]`-Abschnitt der Konfiguration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogKonfig {
    pub level: String,
    pub format: String,
    /// Verzeichnis fuer rotierende Logdateien (optional)
    pub verzeichnis: Option<PathBuf>,
    /// Anzahl aufbewahrter Logdateien
    pub max_dateien: usize,
}

impl Default for LogKonfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
            verzeichnis: None,
            max_dateien: 5,
        }
    }
}

type BoxLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialisiert das Logging-System.
///
/// Der zurueckgegebene Guard muss bis zum Programmende gehalten werden,
/// sonst gehen gepufferte Dateieintraege verloren.
pub fn logging_initialisieren(konfig: &LogKonfig) -> anyhow::Result<Option<WorkerGuard>> {
    let level = wert_aus_env(ENV_LOG_LEVEL, &konfig.level);
    let format = wert_aus_env(ENV_LOG_FORMAT, &konfig.format);

    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));

    let mut layers: Vec<BoxLayer> = Vec::new();
    layers.push(match format.as_str() {
        "json" => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_current_span(true)
            .boxed(),
        _ => fmt::layer().with_target(true).boxed(),
    });

    let mut guard = None;
    if let Some(verzeichnis) = &konfig.verzeichnis {
        std::fs::create_dir_all(verzeichnis).with_context(|| {
            format!("Log-Verzeichnis {} nicht anlegbar", verzeichnis.display())
        })?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("latest")
            .filename_suffix("log")
            .max_log_files(konfig.max_dateien.max(1))
            .build(verzeichnis)
            .context("Rotierende Logdatei konnte nicht erstellt werden")?;
        let (writer, g) = tracing_appender::non_blocking(appender);
        guard = Some(g);

        layers.push(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("Logging bereits initialisiert")?;

    Ok(guard)
}

/// Umgebungsvariable falls gesetzt und nicht leer, sonst `fallback`
pub fn wert_aus_env(name: &str, fallback: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|w| !w.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Validiert ob ein Log-Level-String eine gueltige EnvFilter-Direktive ist.
pub fn log_level_gueltig(level: &str) -> bool {
    !level.trim().is_empty() && EnvFilter::try_new(level).is_ok()
}

/// Validiert ob ein Log-Format-String gueltig ist.
pub fn log_format_gueltig(format: &str) -> bool {
    matches!(format, "text" | "json")
}
