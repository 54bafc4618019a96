use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use futures::StreamExt;
use tokio::time::{sleep, timeout};

use api::ws::ws_routes;
use db::test_utils::setup_test_db;
use util::{state::AppState, ws::WebSocketManager};

async fn spawn_ws_server() -> (SocketAddr, AppState) {
    let db = setup_test_db().await;
    let state = AppState::new(db, WebSocketManager::new());

    let app = Router::new().nest("/ws", ws_routes(state.clone()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    (addr, state)
}

async fn wait_for_subscribers(state: &AppState, topic: &str, n: usize) {
    for _ in 0..100 {
        if state.ws().subscriber_count(topic).await == n {
            return;
        }
        sleep(Duration::from_millis(20)).await;
    }
    panic!("topic '{topic}' never reached {n} subscribers");
}

#[tokio::test]
async fn broadcasts_reach_a_connected_client() {
    let (addr, state) = spawn_ws_server().await;

    let url = format!("ws://{addr}/ws/rollcall/courses/7");
    let (mut socket, _) = tokio_tungstenite::connect_async(url)
        .await
        .expect("connect");
    wait_for_subscribers(&state, "rollcall:course:7", 1).await;

    state.ws().broadcast("rollcall:course:7", "hello").await;

    let frame = timeout(Duration::from_secs(2), socket.next())
        .await
        .expect("no frame within 2s")
        .expect("stream ended")
        .expect("ws error");
    assert_eq!(frame.into_text().unwrap().as_str(), "hello");
}

#[tokio::test]
async fn disconnect_releases_the_subscription_without_traffic() {
    let (addr, state) = spawn_ws_server().await;

    let url = format!("ws://{addr}/ws/rollcall/courses/9");
    let (mut socket, _) = tokio_tungstenite::connect_async(url)
        .await
        .expect("connect");
    wait_for_subscribers(&state, "rollcall:course:9", 1).await;

    socket.close(None).await.expect("close");
    drop(socket);

    // the serve loop drops its broadcast receiver on its own, with no
    // message on the topic needed to flush it out
    wait_for_subscribers(&state, "rollcall:course:9", 0).await;
}
