//! # minishare-crypto
//!
//! Schluessel-Typen und Public-Key-Verschluesselung fuer minishare.
//!
//! ## Module
//! - `key_box` - NaCl-Box (X25519 + XSalsa20-Poly1305) zwischen zwei Schluesseln
//! - `keyfile` - Base64-Schluesseldateien lesen, schreiben und erzeugen
//! - `types` - Gemeinsame Typen (PrivateKey, PublicKey)
//! - `error` - Fehlertypen

pub mod error;
pub mod key_box;
pub mod keyfile;
pub mod types;

// Bequeme Re-Exports
pub use error::{CryptoError, CryptoResult};
pub use key_box::KeyBox;
pub use keyfile::{
    decode_key_line, encode_key, generate_private_key, load_private_key, load_public_key,
    read_key_file, write_private_key_file, write_public_key_file,
};
pub use types::{PrivateKey, PublicKey, KEY_LEN};
