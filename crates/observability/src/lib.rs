//! # minishare-observability
//!
//! Structured Logging via tracing-subscriber:
//! - Text- oder JSON-Ausgabe auf stdout
//! - optional rotierende Logdatei (`latest.log`)

pub mod logging;

pub use logging::{logging_initialisieren, LogKonfig};
