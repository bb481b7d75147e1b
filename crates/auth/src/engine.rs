//! AuthenticationEngine – Versuchs-Entschluesselung ueber alle Client-Schluessel
//!
//! Die Anfrage enthaelt keinen Klartext-Absender. Deshalb wird jedes Feld der
//! Reihe nach mit jedem registrierten Client-Schluessel versucht:
//!
//! ```text
//! fuer jeden Schluessel K (Registrierungsreihenfolge):
//!     Felder nicht entschluesselbar      -> naechster K
//!     ein Feld leer / null               -> Abbruch (keine weiteren K)
//!     Integritaetswert passt nicht       -> naechster K
//!     |jetzt - ts| > TTL                 -> Abbruch (keine weiteren K)
//!     -> authentifiziert mit K
//! keine weiteren K                       -> abgelehnt
//! ```
//!
//! Der Aufwand ist linear in der Anzahl registrierter Clients. Die zweite
//! Stufe ([`AuthenticationEngine::pruefen`]) verlangt zusaetzlich, dass das
//! Secret im Register steht, unabhaengig davon welcher Schluessel passte.

use minishare_crypto::{KeyBox, PublicKey};
use minishare_protocol::{
    be_zahl, decode_fields, integritaetswert, seal_response, EntschluesselteFelder, Envelope,
};

use crate::error::AuthResult;
use crate::registry::KeyRegistry;
use crate::secret::Secret;

/// Standard-Lebensdauer einer Anfrage in Sekunden
pub const STANDARD_ANFRAGE_TTL_SEK: u64 = 30;

/// Grund einer Ablehnung (nur intern, nach aussen immer 401)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AblehnungsGrund {
    /// Feld kein gueltiges Base64
    UngueltigeAnfrage,
    /// Kein registrierter Schluessel passt
    KeinPassenderSchluessel,
    /// Ein entschluesseltes Feld ist leer bzw. null
    LeeresFeld,
    /// Secret oder Operation kein UTF-8
    UngueltigerFeldwert,
    /// Zeitstempel ausserhalb der TTL
    Abgelaufen { abweichung_sek: u64 },
    /// Secret nicht im Register, moegliche Kompromittierung
    SecretNichtRegistriert,
}

/// Abgelehnte Anfrage mit Anzahl der versuchten Schluessel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ablehnung {
    pub grund: AblehnungsGrund,
    pub versuchte_schluessel: usize,
}

/// Erfolgreich authentifizierte Anfrage
#[derive(Debug, Clone)]
pub struct AuthentifizierteAnfrage {
    pub secret: Secret,
    pub operation: String,
    pub client_key: PublicKey,
    /// Index des passenden Schluessels in Registrierungsreihenfolge
    pub schluessel_index: usize,
    pub versuchte_schluessel: usize,
}

/// Ergebnis der Pruefung eines einzelnen Kandidaten
enum Kandidat {
    Passt { secret: String, operation: String },
    Weiter,
    Abbruch(AblehnungsGrund),
}

#[derive(Debug, Clone)]
pub struct AuthenticationEngine {
    ttl_sek: u64,
}

impl Default for AuthenticationEngine {
    fn default() -> Self {
        Self::neu(STANDARD_ANFRAGE_TTL_SEK)
    }
}

impl AuthenticationEngine {
    pub fn neu(ttl_sek: u64) -> Self {
        Self { ttl_sek }
    }

    pub fn ttl_sek(&self) -> u64 {
        self.ttl_sek
    }

    /// Erste Stufe: Versuchs-Entschluesselung, Integritaet und Frische
    pub fn authentifizieren(
        &self,
        registry: &KeyRegistry,
        envelope: &Envelope,
        jetzt: i64,
    ) -> Result<AuthentifizierteAnfrage, Ablehnung> {
        let roh = envelope.dekodieren().map_err(|e| {
            tracing::info!(fehler = %e, "Anfrage nicht dekodierbar");
            Ablehnung {
                grund: AblehnungsGrund::UngueltigeAnfrage,
                versuchte_schluessel: 0,
            }
        })?;

        let server_key = registry.server_key();
        for (index, kandidat) in registry.client_keys().iter().enumerate() {
            let versuchte_schluessel = index + 1;

            let Ok(kb) = KeyBox::new(server_key, &kandidat.key) else {
                continue;
            };
            let Ok(felder) = decode_fields(&kb, &roh) else {
                continue;
            };

            match self.kandidat_pruefen(felder, jetzt) {
                Kandidat::Weiter => {
                    tracing::debug!(
                        schluessel = %kandidat.pfad.display(),
                        "Integritaetswert passt nicht, naechster Schluessel"
                    );
                }
                Kandidat::Abbruch(grund) => {
                    tracing::warn!(
                        schluessel = %kandidat.pfad.display(),
                        grund = ?grund,
                        "Anfrage verworfen"
                    );
                    return Err(Ablehnung {
                        grund,
                        versuchte_schluessel,
                    });
                }
                Kandidat::Passt { secret, operation } => {
                    tracing::debug!(
                        schluessel = %kandidat.pfad.display(),
                        index,
                        operation = %operation,
                        "Anfrage authentifiziert"
                    );
                    return Ok(AuthentifizierteAnfrage {
                        secret: Secret::neu(secret),
                        operation,
                        client_key: kandidat.key,
                        schluessel_index: index,
                        versuchte_schluessel,
                    });
                }
            }
        }

        tracing::warn!(
            versuchte_schluessel = registry.client_keys().len(),
            "Kein registrierter Schluessel passt"
        );
        Err(Ablehnung {
            grund: AblehnungsGrund::KeinPassenderSchluessel,
            versuchte_schluessel: registry.client_keys().len(),
        })
    }

    /// Beide Stufen: Authentifizierung und Secret-Register
    pub fn pruefen(
        &self,
        registry: &KeyRegistry,
        envelope: &Envelope,
        jetzt: i64,
    ) -> Result<AuthentifizierteAnfrage, Ablehnung> {
        let anfrage = self.authentifizieren(registry, envelope, jetzt)?;

        if !registry.is_registered(anfrage.secret.as_str()) {
            tracing::error!(
                secret = %anfrage.secret.praefix(),
                schluessel_index = anfrage.schluessel_index,
                "Unbekanntes Secret mit gueltigem Schluessel, Schluessel moeglicherweise kompromittiert"
            );
            return Err(Ablehnung {
                grund: AblehnungsGrund::SecretNichtRegistriert,
                versuchte_schluessel: anfrage.versuchte_schluessel,
            });
        }
        Ok(anfrage)
    }

    /// Verschluesselt einen Antwort-Wert fuer `empfaenger`
    pub fn encrypt_response(
        &self,
        registry: &KeyRegistry,
        empfaenger: &PublicKey,
        nachricht: &str,
    ) -> AuthResult<String> {
        let kb = KeyBox::new(registry.server_key(), empfaenger)
            .map_err(minishare_protocol::ProtocolError::from)?;
        Ok(seal_response(&kb, nachricht)?)
    }

    fn kandidat_pruefen(&self, felder: EntschluesselteFelder, jetzt: i64) -> Kandidat {
        // None: Wert breiter als sein Typ, also insbesondere nicht 0
        let check = be_zahl(&felder.check, 4);
        let ts = be_zahl(&felder.ts, 8);

        if felder.secret.is_empty()
            || check == Some(0)
            || ts == Some(0)
            || felder.entry.is_empty()
        {
            return Kandidat::Abbruch(AblehnungsGrund::LeeresFeld);
        }

        if check != Some(u64::from(integritaetswert(&felder.secret))) {
            return Kandidat::Weiter;
        }

        let abweichung_sek = match ts {
            Some(ts) => (i128::from(jetzt) - i128::from(ts)).unsigned_abs(),
            None => u128::MAX,
        };
        if abweichung_sek > u128::from(self.ttl_sek) {
            return Kandidat::Abbruch(AblehnungsGrund::Abgelaufen {
                abweichung_sek: u64::try_from(abweichung_sek).unwrap_or(u64::MAX),
            });
        }

        match (String::from_utf8(felder.secret), String::from_utf8(felder.entry)) {
            (Ok(secret), Ok(operation)) => Kandidat::Passt { secret, operation },
            _ => Kandidat::Abbruch(AblehnungsGrund::UngueltigerFeldwert),
        }
    }
}
