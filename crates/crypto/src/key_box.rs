//! Authentifizierte Public-Key-Verschluesselung zwischen zwei Parteien
//!
//! NaCl `crypto_box`: X25519 Diffie-Hellman, HSalsa20 als Schluesselableitung
//! und XSalsa20-Poly1305 mit zufaelliger 24-Byte-Nonce pro Nachricht.
//! Das Format entspricht `Box.encrypt` aus libsodium/PyNaCl, bestehende
//! NaCl-Clients koennen also direkt mit dem Server sprechen.
//!
//! ## Format
//! ```text
//! [nonce(24)] [auth_tag(16)] [ciphertext]
//! ```

use crypto_box::{aead::Aead, Nonce, PublicKey as BoxPublicKey, SalsaBox, SecretKey};
use rand_core::{OsRng, RngCore};
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};

use crate::error::{CryptoError, CryptoResult};
use crate::types::{PrivateKey, PublicKey};

/// Laenge der XSalsa20-Nonce
pub const NONCE_LEN: usize = 24;
/// Laenge des Poly1305-Auth-Tags
pub const TAG_LEN: usize = 16;

/// Verschluesselungs-Kontext fuer ein Schluessel-Paar (eigener privater +
/// fremder oeffentlicher Schluessel)
pub struct KeyBox {
    cipher: SalsaBox,
}

impl KeyBox {
    /// Fuehrt den DH-Austausch durch und leitet den Box-Schluessel ab
    ///
    /// Schlaegt fehl wenn der oeffentliche Schluessel kein Beitrag zum
    /// Shared Secret liefert (Punkt niedriger Ordnung).
    pub fn new(own: &PrivateKey, peer: &PublicKey) -> CryptoResult<Self> {
        let shared = StaticSecret::from(*own.as_bytes())
            .diffie_hellman(&X25519PublicKey::from(*peer.as_bytes()));
        if !shared.was_contributory() {
            return Err(CryptoError::KeinBeitrag);
        }

        let cipher = SalsaBox::new(
            &BoxPublicKey::from(*peer.as_bytes()),
            &SecretKey::from(*own.as_bytes()),
        );
        Ok(Self { cipher })
    }

    /// Verschluesselt eine Nachricht mit frischer Zufalls-Nonce
    pub fn seal(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);

        // Ausgabe ist bereits auth_tag || ciphertext
        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
            .map_err(|e| CryptoError::Verschluesselung(e.to_string()))?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Entschluesselt und verifiziert eine Nachricht
    pub fn open(&self, data: &[u8]) -> CryptoResult<Vec<u8>> {
        if data.len() < NONCE_LEN + TAG_LEN {
            return Err(CryptoError::Entschluesselung);
        }
        let (nonce, ciphertext) = data.split_at(NONCE_LEN);

        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CryptoError::Entschluesselung)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyfile::generate_private_key;

    // Schluesselpaare aus RFC 7748, Abschnitt 6.1
    const ALICE_SK: &str = "77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a";
    const BOB_SK: &str = "5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb";
    const BOB_PK: &str = "de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f";

    // NaCl-Referenzvektor fuer crypto_box (Alice an Bob)
    const NONCE: &str = "69696ee955b62b73cd62bda875fc73d68219e0036b7a0b37";
    const KLARTEXT: &str = "be075fc53c81f2d5cf141316ebeb0c7b5228c52a4c62cbd44b66849b64244ffc\
                            e5ecbaaf33bd751a1ac728d45e6c61296cdc3c01233561f41db66cce314adb31\
                            0e3be8250c46f06dceea3a7fa1348057e2f6556ad6b1318a024a838f21af1fde\
                            048977eb48f59ffd4924ca1c60902e52f0a089bc76897040e082f93776384864\
                            5e0705";
    const BOX: &str = "f3ffc7703f9400e52a7dfb4b3d3305d98e993b9f48681273c29650ba32fc76ce\
                       48332ea7164d96a4476fb8c531a1186ac0dfc17c98dce87b4da7f011ec48c972\
                       71d2c20f9b928fe2270d6fb863d51738b48eeee314a7cc8ab932164548e526ae\
                       90224368517acfeabd6bb3732bc0e9da99832b61ca01b6de56244a9e88d5f9b3\
                       7973f622a43d14a6599b1f654cb45a74e355a5";

    fn schluessel(hex_str: &str) -> [u8; 32] {
        hex::decode(hex_str).unwrap().try_into().unwrap()
    }

    fn bytes(hex_str: &str) -> Vec<u8> {
        hex::decode(hex_str).unwrap()
    }

    #[test]
    fn nacl_referenzvektor_wird_geoeffnet() {
        let alice = PrivateKey::from_bytes(schluessel(ALICE_SK));
        let bob = PrivateKey::from_bytes(schluessel(BOB_SK));
        assert_eq!(bob.public_key().as_bytes(), &schluessel(BOB_PK));

        // PyNaCl: Box.encrypt liefert nonce || auth_tag || ciphertext
        let mut nachricht = bytes(NONCE);
        nachricht.extend_from_slice(&bytes(BOX));

        let bob_box = KeyBox::new(&bob, &alice.public_key()).unwrap();
        assert_eq!(bob_box.open(&nachricht).unwrap(), bytes(KLARTEXT));

        // beide Richtungen leiten denselben Schluessel ab
        let alice_box = KeyBox::new(&alice, &bob.public_key()).unwrap();
        assert_eq!(alice_box.open(&nachricht).unwrap(), bytes(KLARTEXT));
    }

    #[test]
    fn versiegelte_nachricht_hat_nacl_laenge() {
        let alice = PrivateKey::from_bytes(schluessel(ALICE_SK));
        let bob = PrivateKey::from_bytes(schluessel(BOB_SK));
        let sealed = KeyBox::new(&alice, &bob.public_key())
            .unwrap()
            .seal(&bytes(KLARTEXT))
            .unwrap();

        assert_eq!(sealed.len(), NONCE_LEN + TAG_LEN + bytes(KLARTEXT).len());
        let bob_box = KeyBox::new(&bob, &alice.public_key()).unwrap();
        assert_eq!(bob_box.open(&sealed).unwrap(), bytes(KLARTEXT));
    }

    #[test]
    fn beide_seiten_leiten_gleiche_box_ab() {
        let server = generate_private_key();
        let client = generate_private_key();

        let client_box = KeyBox::new(&client, &server.public_key()).unwrap();
        let server_box = KeyBox::new(&server, &client.public_key()).unwrap();

        let sealed = client_box.seal(b"Hallo Server").unwrap();
        assert_eq!(server_box.open(&sealed).unwrap(), b"Hallo Server");
    }

    #[test]
    fn jede_versiegelung_nutzt_neue_nonce() {
        let a = generate_private_key();
        let b = generate_private_key();
        let kb = KeyBox::new(&a, &b.public_key()).unwrap();

        let s1 = kb.seal(b"gleich").unwrap();
        let s2 = kb.seal(b"gleich").unwrap();
        assert_ne!(s1[..NONCE_LEN], s2[..NONCE_LEN]);
        assert_ne!(s1, s2);
    }

    #[test]
    fn falsches_schluesselpaar_schlaegt_fehl() {
        let server = generate_private_key();
        let client = generate_private_key();
        let fremder = generate_private_key();

        let sealed = KeyBox::new(&client, &server.public_key())
            .unwrap()
            .seal(b"geheim")
            .unwrap();

        let falsch = KeyBox::new(&server, &fremder.public_key()).unwrap();
        assert!(matches!(falsch.open(&sealed), Err(CryptoError::Entschluesselung)));
    }

    #[test]
    fn manipulierter_ciphertext_schlaegt_fehl() {
        let a = generate_private_key();
        let b = generate_private_key();
        let kb = KeyBox::new(&a, &b.public_key()).unwrap();

        let mut sealed = kb.seal(b"Original").unwrap();
        let letzter = sealed.len() - 1;
        sealed[letzter] ^= 0x01;
        assert!(kb.open(&sealed).is_err());
    }

    #[test]
    fn zu_kurze_daten_schlagen_fehl() {
        let a = generate_private_key();
        let b = generate_private_key();
        let kb = KeyBox::new(&a, &b.public_key()).unwrap();
        assert!(kb.open(&[0u8; NONCE_LEN + TAG_LEN - 1]).is_err());
    }

    #[test]
    fn null_schluessel_wird_abgelehnt() {
        let a = generate_private_key();
        let result = KeyBox::new(&a, &PublicKey::from_bytes([0u8; 32]));
        assert!(matches!(result, Err(CryptoError::KeinBeitrag)));
    }

    #[test]
    fn leere_nachricht_roundtrip() {
        let a = generate_private_key();
        let b = generate_private_key();
        let kb = KeyBox::new(&a, &b.public_key()).unwrap();
        let sealed = kb.seal(b"").unwrap();
        assert_eq!(sealed.len(), NONCE_LEN + TAG_LEN);
        assert!(kb.open(&sealed).unwrap().is_empty());
    }
}
