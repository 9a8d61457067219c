//! Graceful shutdown behavior of the running server.

mod common;

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use tokio_test::assert_ok;

use common::{john_doe, spawn_server};
use user_api::domain::{MockUserLookup, User};
use user_api::ServerError;

async fn wait_for_first_call(lookup: &MockUserLookup) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while lookup.calls().is_empty() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("request never reached the lookup");
}

#[tokio::test]
async fn in_flight_request_completes_within_shutdown_window() {
    let lookup = MockUserLookup::returning(john_doe()).with_latency(Duration::from_millis(300));
    let server = spawn_server(Arc::new(lookup.clone()), Duration::from_secs(5)).await;

    let url = server.url("/api/v1/users/101");
    let request = tokio::spawn(async move { reqwest::get(url).await });

    wait_for_first_call(&lookup).await;
    server.shutdown.send("test").unwrap();

    let resp = request.await.unwrap().unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = resp.json().await.unwrap();
    assert_eq!(user, john_doe());

    assert_ok!(server.handle.await.unwrap());
}

#[tokio::test]
async fn requests_after_shutdown_are_refused() {
    let server = spawn_server(
        Arc::new(MockUserLookup::returning(john_doe())),
        Duration::from_secs(5),
    )
    .await;
    let url = server.url("/liveness");

    server.shutdown.send("test").unwrap();
    assert_ok!(server.handle.await.unwrap());

    let result = reqwest::get(url).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn slow_drain_reports_shutdown_timeout() {
    let lookup = MockUserLookup::returning(john_doe()).with_latency(Duration::from_secs(10));
    let server = spawn_server(Arc::new(lookup.clone()), Duration::from_millis(100)).await;

    let url = server.url("/api/v1/users/101");
    let request = tokio::spawn(async move { reqwest::get(url).await });

    wait_for_first_call(&lookup).await;
    server.shutdown.send("test").unwrap();

    let result = server.handle.await.unwrap();
    assert!(matches!(
        result,
        Err(ServerError::ShutdownTimeout(timeout)) if timeout == Duration::from_millis(100)
    ));

    request.abort();
}
