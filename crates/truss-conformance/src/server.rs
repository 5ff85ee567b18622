//! Spawns the fixture gateway behind a real loopback listener, unlike
//! the in-process `tower::ServiceExt::oneshot` gateway tests: a
//! generated client proxy in another language needs an actual socket to
//! connect to.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixture::build_gateway;

/// A running fixture server. Dropping this does not stop the server;
/// call [`ServerHandle::shutdown`] or let the owning runtime exit.
pub struct ServerHandle {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// The base URL scenarios should issue requests against, e.g.
    /// `http://127.0.0.1:54321`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Abort the background accept loop.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

/// Bind an ephemeral port on loopback and start serving the fixture
/// gateway in the background. Returns once the listener is bound, so
/// callers can issue requests against [`ServerHandle::base_url`]
/// immediately.
pub async fn serve() -> std::io::Result<ServerHandle> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = build_gateway().into_router();

    let task = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            tracing::error!(%err, "conformance fixture server stopped unexpectedly");
        }
    });

    Ok(ServerHandle { addr, task })
}
