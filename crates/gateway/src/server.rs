//! Axum HTTP-Server fuer den Datenendpunkt

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::error::GatewayResult;
use crate::routes::router;
use crate::state::GatewayState;

pub struct GatewayServer {
    listener: TcpListener,
}

impl GatewayServer {
    /// Bindet den Listener an `bind_addr`
    pub async fn binden(bind_addr: SocketAddr) -> GatewayResult<Self> {
        let listener = TcpListener::bind(bind_addr).await?;
        Ok(Self { listener })
    }

    pub fn lokale_adresse(&self) -> GatewayResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Bedient Anfragen bis `shutdown` abgeschlossen ist
    pub async fn starten<F>(self, state: GatewayState, shutdown: F) -> GatewayResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.lokale_adresse()?;
        let app = router(state).into_make_service_with_connect_info::<SocketAddr>();

        tracing::info!(addr = %addr, "Datenendpunkt gestartet");
        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("Datenendpunkt beendet");
        Ok(())
    }
}
