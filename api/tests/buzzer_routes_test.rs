mod helpers;

use axum::http::{Method, StatusCode};
use serde_json::json;

use helpers::app::{
    empty_request, json_request, make_test_app, response_json, seed_course, seed_student, send,
};

#[tokio::test]
async fn first_buzz_wins_and_closes_the_round() {
    let (app, state) = make_test_app().await;
    let (course_id, student_id) = seed_course(&state).await;
    let rival_id = seed_student(&state, "rival").await;

    let resp = send(
        &app,
        empty_request(Method::POST, &format!("/api/courses/{course_id}/buzzers")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = response_json(resp).await;
    assert_eq!(body["data"]["open"], true);
    assert_eq!(body["data"]["winner_student_id"], json!(null));
    let round_id = body["data"]["id"].as_i64().unwrap();

    // first buzz wins
    let resp = send(
        &app,
        json_request(
            Method::POST,
            &format!("/api/buzzers/{round_id}/buzz"),
            json!({ "student_id": student_id }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = response_json(resp).await;
    assert_eq!(body["data"]["winner_student_id"], student_id);
    assert_eq!(body["data"]["open"], false);

    // the rival is too late
    let resp = send(
        &app,
        json_request(
            Method::POST,
            &format!("/api/buzzers/{round_id}/buzz"),
            json!({ "student_id": rival_id }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // the winner stands in the latest-round view
    let resp = send(
        &app,
        empty_request(
            Method::GET,
            &format!("/api/courses/{course_id}/buzzers/latest"),
        ),
    )
    .await;
    let body = response_json(resp).await;
    assert_eq!(body["data"]["winner_student_id"], student_id);
}

#[tokio::test]
async fn stop_closes_a_round_without_a_winner() {
    let (app, state) = make_test_app().await;
    let (course_id, student_id) = seed_course(&state).await;

    let resp = send(
        &app,
        empty_request(Method::POST, &format!("/api/courses/{course_id}/buzzers")),
    )
    .await;
    let round_id = response_json(resp).await["data"]["id"].as_i64().unwrap();

    let resp = send(
        &app,
        empty_request(Method::PUT, &format!("/api/buzzers/{round_id}/stop")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = response_json(resp).await;
    assert_eq!(body["data"]["open"], false);
    assert_eq!(body["data"]["winner_student_id"], json!(null));

    // buzzing a stopped round fails
    let resp = send(
        &app,
        json_request(
            Method::POST,
            &format!("/api/buzzers/{round_id}/buzz"),
            json!({ "student_id": student_id }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn starting_a_round_supersedes_the_open_one() {
    let (app, state) = make_test_app().await;
    let (course_id, _) = seed_course(&state).await;

    let resp = send(
        &app,
        empty_request(Method::POST, &format!("/api/courses/{course_id}/buzzers")),
    )
    .await;
    let first_id = response_json(resp).await["data"]["id"].as_i64().unwrap();

    let resp = send(
        &app,
        empty_request(Method::POST, &format!("/api/courses/{course_id}/buzzers")),
    )
    .await;
    let second_id = response_json(resp).await["data"]["id"].as_i64().unwrap();
    assert_ne!(first_id, second_id);

    let resp = send(
        &app,
        empty_request(
            Method::GET,
            &format!("/api/courses/{course_id}/buzzers/latest"),
        ),
    )
    .await;
    let body = response_json(resp).await;
    assert_eq!(body["data"]["id"], second_id);
    assert_eq!(body["data"]["open"], true);
}

#[tokio::test]
async fn latest_round_is_null_for_a_fresh_course() {
    let (app, state) = make_test_app().await;
    let (course_id, _) = seed_course(&state).await;

    let resp = send(
        &app,
        empty_request(
            Method::GET,
            &format!("/api/courses/{course_id}/buzzers/latest"),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = response_json(resp).await;
    assert_eq!(body["data"], json!(null));
}

#[tokio::test]
async fn unknown_round_is_not_found() {
    let (app, state) = make_test_app().await;
    let (_, student_id) = seed_course(&state).await;

    let resp = send(
        &app,
        json_request(
            Method::POST,
            "/api/buzzers/9999/buzz",
            json!({ "student_id": student_id }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn winning_buzz_broadcasts_the_round() {
    let (app, state) = make_test_app().await;
    let (course_id, student_id) = seed_course(&state).await;

    let resp = send(
        &app,
        empty_request(Method::POST, &format!("/api/courses/{course_id}/buzzers")),
    )
    .await;
    let round_id = response_json(resp).await["data"]["id"].as_i64().unwrap();

    let mut feed = state
        .ws()
        .subscribe(&format!("buzzer:course:{course_id}"))
        .await;

    send(
        &app,
        json_request(
            Method::POST,
            &format!("/api/buzzers/{round_id}/buzz"),
            json!({ "student_id": student_id }),
        ),
    )
    .await;

    let raw = tokio::time::timeout(std::time::Duration::from_secs(1), feed.recv())
        .await
        .expect("no broadcast within 1s")
        .expect("feed closed");
    let event: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(event["event"], "buzzer.latest_round");
    assert_eq!(event["payload"]["round"]["winner_student_id"], student_id);
    assert_eq!(event["payload"]["round"]["open"], false);
}
