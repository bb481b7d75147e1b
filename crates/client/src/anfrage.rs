//! Anfrage bauen und Antwort entschluesseln

use minishare_crypto::KeyBox;
use minishare_protocol::{encode, open_response, Envelope};

use crate::error::{ClientError, ClientResult};
use crate::keystore::KeyStore;

/// Baut die verschluesselte Anfrage fuer `methode` zum Zeitpunkt `jetzt`
pub fn anfrage_bauen(store: &KeyStore, methode: &str, jetzt: i64) -> ClientResult<Envelope> {
    Ok(encode(
        &store.client_key,
        &store.server_key,
        &store.secret,
        methode,
        jetzt,
    )?)
}

/// Entschluesselt den Antwort-Wert des Servers
pub fn antwort_entschluesseln(store: &KeyStore, value: &str) -> ClientResult<String> {
    if value.is_empty() {
        return Err(ClientError::LeereAntwort);
    }
    let kb = KeyBox::new(&store.client_key, &store.server_key)?;
    open_response(&kb, value).map_err(|e| {
        tracing::error!(fehler = %e, "Antwort des Servers nicht entschluesselbar");
        ClientError::ServerEntschluesselung
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use minishare_crypto::{generate_private_key, PrivateKey};
    use minishare_protocol::{decode_fields, seal_response};

    fn store(server: &PrivateKey) -> KeyStore {
        KeyStore {
            secret: "cafe".into(),
            client_key: generate_private_key(),
            server_key: server.public_key(),
        }
    }

    #[test]
    fn anfrage_ist_fuer_server_lesbar() {
        let server = generate_private_key();
        let s = store(&server);
        let env = anfrage_bauen(&s, "time_test", 1_700_000_000).unwrap();

        let kb = KeyBox::new(&server, &s.client_key.public_key()).unwrap();
        let felder = decode_fields(&kb, &env.dekodieren().unwrap()).unwrap();
        assert_eq!(felder.secret, b"cafe");
        assert_eq!(felder.entry, b"time_test");
    }

    #[test]
    fn antwort_roundtrip() {
        let server = generate_private_key();
        let s = store(&server);
        let kb = KeyBox::new(&server, &s.client_key.public_key()).unwrap();
        let value = seal_response(&kb, "2024-05-01T12:00:00+00:00").unwrap();

        assert_eq!(
            antwort_entschluesseln(&s, &value).unwrap(),
            "2024-05-01T12:00:00+00:00"
        );
    }

    #[test]
    fn antwort_von_falschem_server() {
        let server = generate_private_key();
        let s = store(&server);
        let fremd = generate_private_key();
        let kb = KeyBox::new(&fremd, &s.client_key.public_key()).unwrap();
        let value = seal_response(&kb, "x").unwrap();

        assert!(matches!(
            antwort_entschluesseln(&s, &value),
            Err(ClientError::ServerEntschluesselung)
        ));
    }

    #[test]
    fn leere_antwort() {
        let s = store(&generate_private_key());
        assert!(matches!(antwort_entschluesseln(&s, ""), Err(ClientError::LeereAntwort)));
    }
}
