use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use std::convert::Infallible;
use tower::util::BoxCloneService;
use tower::ServiceExt;

use api::{routes::routes, ws::ws_routes};
use db::test_utils::setup_test_db;
use util::{state::AppState, ws::WebSocketManager};

pub type TestApp = BoxCloneService<Request<Body>, Response, Infallible>;

/// Builds the full router over a fresh in-memory database and returns the
/// state alongside, so tests can seed rows and subscribe to feeds.
pub async fn make_test_app() -> (TestApp, AppState) {
    let db = setup_test_db().await;
    let state = AppState::new(db, WebSocketManager::new());

    let router = Router::new()
        .nest("/api", routes(state.clone()))
        .nest("/ws", ws_routes(state.clone()));

    (router.into_service().boxed_clone(), state)
}

/// Seeds one teacher, one student, and one course; returns (course_id, student_id).
pub async fn seed_course(state: &AppState) -> (i64, i64) {
    use db::models::{course, user};

    let teacher = user::Model::create(state.db(), "teach", "Teacher")
        .await
        .expect("seed teacher");
    let student = user::Model::create(state.db(), "stu1", "Student One")
        .await
        .expect("seed student");
    let course = course::Model::create(state.db(), teacher.id, "Physics")
        .await
        .expect("seed course");
    (course.id, student.id)
}

pub async fn seed_student(state: &AppState, username: &str) -> i64 {
    db::models::user::Model::create(state.db(), username, username)
        .await
        .expect("seed student")
        .id
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

pub async fn send(app: &TestApp, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn response_json(resp: Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("body is not JSON")
}
