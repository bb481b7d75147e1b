//! Handler fuer den Datenendpunkt

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use minishare_protocol::{AntwortEnvelope, Envelope};

use crate::error::{GatewayError, GatewayResult};
use crate::middleware::client_ip;
use crate::state::GatewayState;

/// POST /data/ – verschluesselten Aufruf ausfuehren
pub async fn post_data(
    State(state): State<GatewayState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> GatewayResult<Json<AntwortEnvelope>> {
    let adresse = client_ip(&headers, peer.map(|ConnectInfo(a)| a), state.forward_for);
    let jetzt = chrono::Utc::now().timestamp();

    match verarbeiten(&state, &body, jetzt).await {
        Ok(value) => {
            state.adressen.vermerken(&adresse, jetzt);
            Ok(Json(AntwortEnvelope { value }))
        }
        Err(e) => {
            match &e {
                GatewayError::UngueltigeAnfrage(grund) => {
                    tracing::info!(adresse = %adresse, grund = %grund, "Fehlerhafte Anfrage");
                }
                GatewayError::Abgelehnt(ablehnung) => {
                    tracing::info!(
                        adresse = %adresse,
                        grund = ?ablehnung.grund,
                        versuchte_schluessel = ablehnung.versuchte_schluessel,
                        "Nicht autorisierter Zugriff"
                    );
                }
                _ => {
                    tracing::error!(adresse = %adresse, fehler = %e, "Anfrage fehlgeschlagen");
                }
            }
            Err(e)
        }
    }
}

async fn verarbeiten(state: &GatewayState, body: &[u8], jetzt: i64) -> GatewayResult<String> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| GatewayError::UngueltigeAnfrage(e.to_string()))?;

    let registry = state.registry.snapshot();
    let engine = state.engine.clone();
    let dispatcher = state.dispatcher.clone();

    // Versuchs-Entschluesselung ist CPU-gebunden
    tokio::task::spawn_blocking(move || -> GatewayResult<String> {
        let anfrage = engine
            .pruefen(&registry, &envelope, jetzt)
            .map_err(GatewayError::Abgelehnt)?;

        let wert = dispatcher.call(&anfrage.operation);
        Ok(engine.encrypt_response(&registry, &anfrage.client_key, &wert)?)
    })
    .await
    .map_err(|e| GatewayError::Intern(e.to_string()))?
}

/// GET /health – Health-Check-Endpunkt
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
