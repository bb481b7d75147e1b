//! Ermittlung der Client-Adresse

use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Extrahiert die Client-Adresse
///
/// Mit `forward_for = N > 0` wird der N-te Eintrag von rechts aus
/// `X-Forwarded-For` verwendet (N vertrauenswuerdige Proxies). Fehlt dieser,
/// gilt die Socket-Adresse der Verbindung.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, forward_for: usize) -> String {
    if forward_for > 0 {
        let eintraege: Vec<&str> = headers
            .get_all("x-forwarded-for")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|s| s.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if eintraege.len() >= forward_for {
            return eintraege[eintraege.len() - forward_for].to_string();
        }
    }

    peer.map(|a| a.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
