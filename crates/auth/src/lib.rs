//! minishare-auth – Schluessel-Registry und Authentifizierung
//!
//! Dieses Crate implementiert:
//! - KeyRegistry (Server-Schluessel, Client-Schluessel, Secret-Register)
//! - RegistryHandle (austauschbarer Snapshot, Neuladen per Signal)
//! - append_client (Registrierung neuer Clients, offline)
//! - AuthenticationEngine (Versuchs-Entschluesselung, Integritaet, TTL)
//! - AdressBuch (zuletzt gesehene Client-Adressen mit TTL)

pub mod adressen;
pub mod append;
pub mod engine;
pub mod error;
pub mod registry;
pub mod secret;

// Bequeme Re-Exporte
pub use adressen::{AdressBuch, AdressStatus, STANDARD_ADRESSEN_TTL_SEK};
pub use append::{append_client, secret_erzeugen};
pub use engine::{
    Ablehnung, AblehnungsGrund, AuthenticationEngine, AuthentifizierteAnfrage,
    STANDARD_ANFRAGE_TTL_SEK,
};
pub use error::{AuthError, AuthResult};
pub use registry::{
    load_client_keys, load_server_key, ClientKey, KeyRegistry, RegistryHandle, RegistryPfade,
};
pub use secret::{load_client_secrets, Secret, SecretRegister};
