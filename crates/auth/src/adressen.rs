//! Adressbuch fuer Aufrufer
//!
//! Merkt sich pro Client-Adresse den Zeitpunkt des letzten erfolgreichen
//! Aufrufs. Neue und nach laengerer Pause zurueckkehrende Adressen werden
//! geloggt, Eintraege aelter als die TTL werden entfernt.

use std::collections::HashMap;

use parking_lot::Mutex;

/// Standard-Lebensdauer eines Adress-Eintrags in Sekunden
pub const STANDARD_ADRESSEN_TTL_SEK: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdressStatus {
    Neu,
    Zurueckgekehrt,
    Bekannt,
}

#[derive(Debug)]
pub struct AdressBuch {
    ttl_sek: u64,
    /// Adresse -> zuletzt gesehen (Unix-Sekunden)
    eintraege: Mutex<HashMap<String, i64>>,
}

impl Default for AdressBuch {
    fn default() -> Self {
        Self::neu(STANDARD_ADRESSEN_TTL_SEK)
    }
}

impl AdressBuch {
    pub fn neu(ttl_sek: u64) -> Self {
        Self {
            ttl_sek,
            eintraege: Mutex::new(HashMap::new()),
        }
    }

    /// Vermerkt einen Aufruf von `adresse` zum Zeitpunkt `jetzt`
    pub fn vermerken(&self, adresse: &str, jetzt: i64) -> AdressStatus {
        let ttl = self.ttl_sek;
        let mut eintraege = self.eintraege.lock();

        let status = match eintraege.insert(adresse.to_string(), jetzt) {
            None => {
                tracing::warn!(adresse, "Neue Client-Adresse");
                AdressStatus::Neu
            }
            Some(zuletzt) if abstand(jetzt, zuletzt) > ttl => {
                tracing::warn!(adresse, zuletzt, "Client-Adresse nach langer Pause wieder aktiv");
                AdressStatus::Zurueckgekehrt
            }
            Some(_) => AdressStatus::Bekannt,
        };

        let vorher = eintraege.len();
        eintraege.retain(|_, zuletzt| abstand(jetzt, *zuletzt) <= ttl);
        let entfernt = vorher - eintraege.len();
        if entfernt > 0 {
            tracing::debug!(entfernt, "Veraltete Client-Adressen entfernt");
        }

        status
    }

    pub fn anzahl(&self) -> usize {
        self.eintraege.lock().len()
    }
}

fn abstand(a: i64, b: i64) -> u64 {
    a.abs_diff(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neue_bekannte_und_zurueckgekehrte_adresse() {
        let buch = AdressBuch::neu(300);
        assert_eq!(buch.vermerken("10.0.0.1", 1000), AdressStatus::Neu);
        assert_eq!(buch.vermerken("10.0.0.1", 1300), AdressStatus::Bekannt);
        assert_eq!(buch.vermerken("10.0.0.1", 1601), AdressStatus::Zurueckgekehrt);
    }

    #[test]
    fn veraltete_eintraege_werden_entfernt() {
        let buch = AdressBuch::neu(300);
        buch.vermerken("a", 1000);
        buch.vermerken("b", 1200);
        assert_eq!(buch.anzahl(), 2);

        buch.vermerken("c", 1350);
        // "a" ist 350 s alt
        assert_eq!(buch.anzahl(), 2);
        assert_eq!(buch.vermerken("a", 1360), AdressStatus::Neu);
    }

    #[test]
    fn gleichzeitige_zugriffe() {
        let buch = std::sync::Arc::new(AdressBuch::default());
        let threads: Vec<_> = (0..8)
            .map(|i| {
                let buch = buch.clone();
                std::thread::spawn(move || {
                    for j in 0..100 {
                        buch.vermerken(&format!("10.0.{i}.{}", j % 10), 1000 + j);
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        assert_eq!(buch.anzahl(), 80);
    }
}
