//! Fehlertypen fuer den HTTP-Endpunkt
//!
//! Jeder Fehler einer Anfrage wird nach aussen als `401` mit leerem Body
//! beantwortet. Die Varianten dienen nur dem Logging.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use minishare_auth::{Ablehnung, AuthError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Fehlerhafte Anfrage: {0}")]
    UngueltigeAnfrage(String),

    #[error("Anfrage abgelehnt: {:?}", .0.grund)]
    Abgelehnt(Ablehnung),

    #[error("Antwort fehlgeschlagen: {0}")]
    Antwort(#[from] AuthError),

    #[error("Interner Fehler: {0}")]
    Intern(String),

    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        StatusCode::UNAUTHORIZED.into_response()
    }
}
