//! Shared application state for route and WebSocket handlers.

use crate::ws::WebSocketManager;
use sea_orm::DatabaseConnection;

/// State passed to every Axum handler: the database pool and the topic
/// fan-out manager the live feeds broadcast through.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    ws: WebSocketManager,
}

impl AppState {
    pub fn new(db: DatabaseConnection, ws: WebSocketManager) -> Self {
        Self { db, ws }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn ws(&self) -> &WebSocketManager {
        &self.ws
    }

    /// Owned clone of the pool, for spawned tasks.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    /// Owned clone of the fan-out manager.
    pub fn ws_clone(&self) -> WebSocketManager {
        self.ws.clone()
    }
}
