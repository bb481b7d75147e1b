//! minishare-protocol – Envelope-Format
//!
//! Definiert die verschluesselten Anfrage- und Antwortobjekte, die zwischen
//! Client und Server ausgetauscht werden, sowie den Codec dafuer.

pub mod codec;
pub mod envelope;
pub mod error;
pub mod integrity;

pub use codec::{
    decode_field, decode_fields, encode, open_response, seal_field, seal_response,
    EntschluesselteFelder,
};
pub use envelope::{AntwortEnvelope, Envelope, RohEnvelope};
pub use error::{ProtocolError, ProtocolResult};
pub use integrity::{be_zahl, integritaetswert};
