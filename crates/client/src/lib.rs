//! minishare-client – Gegenstueck zum Server
//!
//! Laedt die lokalen Schluessel, baut eine verschluesselte Anfrage, sendet
//! sie per HTTP und entschluesselt die Antwort.

pub mod anfrage;
pub mod error;
pub mod keystore;
pub mod transport;

pub use anfrage::{anfrage_bauen, antwort_entschluesseln};
pub use error::{ClientError, ClientResult};
pub use keystore::KeyStore;
pub use transport::Transport;

/// Fuehrt einen vollstaendigen Aufruf von `methode` aus
pub async fn aufrufen(
    store: &KeyStore,
    transport: &Transport,
    methode: &str,
) -> ClientResult<String> {
    tracing::debug!(url = %transport.url(), methode, "Sende Anfrage");
    let envelope = anfrage_bauen(store, methode, chrono::Utc::now().timestamp())?;
    let value = transport.senden(&envelope).await?;
    antwort_entschluesseln(store, &value)
}
