//! HTTP server bootstrap

use tokio::net::TcpListener;
use tracing::info;

use crate::{routes, state::AppState};

/// The review service's HTTP server
pub struct ApiServer {
    state: AppState,
    host: String,
    port: u16,
}

impl ApiServer {
    /// Create a server for the given state and bind address
    pub fn new(state: AppState, host: impl Into<String>, port: u16) -> Self {
        Self {
            state,
            host: host.into(),
            port,
        }
    }

    /// Bind and serve until the process is stopped
    pub async fn run(self) -> std::io::Result<()> {
        let app = routes::router(self.state);
        let listener = TcpListener::bind((self.host.as_str(), self.port)).await?;
        info!(addr = %listener.local_addr()?, "diffsense API listening");
        axum::serve(listener, app).await
    }
}
