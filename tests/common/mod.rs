//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use user_api::api::{create_router, AppState};
use user_api::domain::{User, UserLookup};
use user_api::server::Server;
use user_api::ServerError;

/// A server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: oneshot::Sender<&'static str>,
    pub handle: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    /// Base URL for requests.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server around `lookup`.
pub async fn spawn_server(lookup: Arc<dyn UserLookup>, shutdown_timeout: Duration) -> TestServer {
    let router = create_router(AppState::new(lookup, Duration::from_secs(5)));
    let server = Server::bind("127.0.0.1:0", router, shutdown_timeout)
        .await
        .expect("bind ephemeral port");
    let addr = server.local_addr().expect("local addr");

    let (shutdown, rx) = oneshot::channel();
    let handle = tokio::spawn(server.run(async move { rx.await.unwrap_or("dropped") }));

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

pub fn john_doe() -> User {
    User {
        name: "John Doe".to_string(),
        email: "johndoe@email.com".to_string(),
        password: "123456".to_string(),
        birth_day: "10/02/1990".to_string(),
    }
}
