//! HTTP-Transport (POST als JSON)

use minishare_protocol::Envelope;
use reqwest::{Client, StatusCode, Url};

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    url: Url,
}

impl Transport {
    pub fn neu(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Sendet die Anfrage und liefert den (verschluesselten) Antwort-Wert
    pub async fn senden(&self, envelope: &Envelope) -> ClientResult<String> {
        let antwort = self.client.post(self.url.clone()).json(envelope).send().await?;
        status_pruefen(antwort.status())?;

        let json: serde_json::Value = antwort.json().await?;
        wert_aus_json(&json)
    }
}

/// 200 ist Erfolg, 401 eine abgelehnte Anfrage, alles andere ein Fehler
pub fn status_pruefen(status: StatusCode) -> ClientResult<()> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
        andere => Err(ClientError::HttpStatus(andere.as_u16())),
    }
}

/// Liest das Feld `value`; fehlend oder leer ist ein Fehler
pub fn wert_aus_json(json: &serde_json::Value) -> ClientResult<String> {
    match json.get("value").and_then(|v| v.as_str()) {
        Some(wert) if !wert.is_empty() => Ok(wert.to_string()),
        _ => Err(ClientError::LeereAntwort),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn statuscodes() {
        assert!(status_pruefen(StatusCode::OK).is_ok());
        assert!(matches!(
            status_pruefen(StatusCode::UNAUTHORIZED),
            Err(ClientError::Unauthorized)
        ));
        assert!(matches!(
            status_pruefen(StatusCode::INTERNAL_SERVER_ERROR),
            Err(ClientError::HttpStatus(500))
        ));
    }

    #[test]
    fn wert_lesen() {
        assert_eq!(wert_aus_json(&json!({ "value": "abc" })).unwrap(), "abc");
        assert!(matches!(wert_aus_json(&json!({ "value": "" })), Err(ClientError::LeereAntwort)));
        assert!(matches!(wert_aus_json(&json!({})), Err(ClientError::LeereAntwort)));
        assert!(matches!(wert_aus_json(&json!({ "value": 5 })), Err(ClientError::LeereAntwort)));
    }
}
