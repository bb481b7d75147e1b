//! minishare-gateway – HTTP-Datenendpunkt
//!
//! Endpunkte:
//! - `POST /data/` (auch `/data`) – verschluesselter Aufruf
//! - `GET /health` – Health-Check
//!
//! Jede abgelehnte oder fehlerhafte Anfrage wird einheitlich mit `401` und
//! leerem Body beantwortet.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{GatewayError, GatewayResult};
pub use routes::router;
pub use server::GatewayServer;
pub use state::GatewayState;
