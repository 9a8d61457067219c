//! HTTP server lifecycle: bind, serve, and bounded graceful shutdown.

use std::fmt;
use std::future::{Future, IntoFuture};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use strum::Display;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, watch};
use tracing::{error, info, warn};

use crate::error::ServerError;

/// Lifecycle state of a [`Server`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ServerState {
    /// Listener bound, not yet accepting.
    Starting,
    /// Accepting and handling requests.
    Serving,
    /// No longer accepting; draining in-flight requests.
    ShuttingDown,
    /// Drained cleanly.
    Stopped,
    /// Listener failed or the drain overran its timeout.
    Failed,
}

/// A bound HTTP server.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    router: Router,
    shutdown_timeout: Duration,
    state: watch::Sender<ServerState>,
}

impl Server {
    /// Bind `addr` and prepare to serve `router`.
    pub async fn bind(
        addr: &str,
        router: Router,
        shutdown_timeout: Duration,
    ) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;

        let (state, _) = watch::channel(ServerState::Starting);

        Ok(Self {
            listener,
            router,
            shutdown_timeout,
            state,
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Watch lifecycle transitions.
    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.state.subscribe()
    }

    /// Serve until `shutdown` resolves, then drain within the shutdown timeout.
    ///
    /// The value `shutdown` resolves to is logged as the shutdown reason.
    /// If the drain overruns, the server is dropped with connections still
    /// open and [`ServerError::ShutdownTimeout`] is returned.
    pub async fn run<F, S>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = S> + Send,
        S: fmt::Display + Send,
    {
        let Self {
            listener,
            router,
            shutdown_timeout,
            state,
        } = self;

        let (drain_tx, drain_rx) = oneshot::channel::<()>();
        let serve = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = drain_rx.await;
            })
            .into_future();
        tokio::pin!(serve);
        tokio::pin!(shutdown);

        transition(&state, ServerState::Serving);

        let signal = tokio::select! {
            result = &mut serve => {
                transition(&state, ServerState::Failed);
                let err = match result {
                    Ok(()) => io::Error::other("server stopped without a shutdown request"),
                    Err(e) => e,
                };
                error!(error = %err, "server error");
                return Err(ServerError::Serve(err));
            }
            signal = &mut shutdown => signal,
        };

        info!(status = "shutdown started", signal = %signal, "shutdown");
        transition(&state, ServerState::ShuttingDown);
        let _ = drain_tx.send(());

        match tokio::time::timeout(shutdown_timeout, serve).await {
            Ok(Ok(())) => {
                transition(&state, ServerState::Stopped);
                info!(status = "shutdown complete", signal = %signal, "shutdown");
                Ok(())
            }
            Ok(Err(e)) => {
                transition(&state, ServerState::Failed);
                Err(ServerError::Serve(e))
            }
            Err(_) => {
                transition(&state, ServerState::Failed);
                warn!(
                    timeout = ?shutdown_timeout,
                    "in-flight requests did not drain in time, closing connections"
                );
                Err(ServerError::ShutdownTimeout(shutdown_timeout))
            }
        }
    }
}

fn transition(state: &watch::Sender<ServerState>, next: ServerState) {
    let previous = state.send_replace(next);
    info!(from = %previous, to = %next, "server state changed");
}
