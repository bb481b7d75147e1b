//! Axum-State fuer den Datenendpunkt

use std::sync::Arc;

use minishare_auth::{AdressBuch, AuthenticationEngine, RegistryHandle};
use minishare_modules::ModulDispatcher;

#[derive(Clone)]
pub struct GatewayState {
    pub registry: Arc<RegistryHandle>,
    pub engine: AuthenticationEngine,
    pub dispatcher: Arc<ModulDispatcher>,
    pub adressen: Arc<AdressBuch>,
    /// Anzahl vertrauenswuerdiger Proxies vor dem Server
    pub forward_for: usize,
}

impl GatewayState {
    pub fn neu(
        registry: Arc<RegistryHandle>,
        engine: AuthenticationEngine,
        dispatcher: Arc<ModulDispatcher>,
        adressen: Arc<AdressBuch>,
    ) -> Self {
        Self {
            registry,
            engine,
            dispatcher,
            adressen,
            forward_for: 0,
        }
    }

    pub fn mit_forward_for(mut self, forward_for: usize) -> Self {
        self.forward_for = forward_for;
        self
    }
}
