//! API integration tests.
//!
//! These drive the full router against a mock database.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use serde_json::{Value, json};
use std::sync::Arc;
use survey_api::{AppState, router as api_router};
use survey_common::{IdGenerator, RetryPolicy};
use survey_db::entities::{choice, poll, vote};
use tower::ServiceExt;

fn create_test_poll(id: &str, expire_at: &str) -> poll::Model {
    poll::Model {
        id: id.to_string(),
        title: "Lunch".to_string(),
        expire_at: expire_at.to_string(),
        created_at: Utc::now().into(),
    }
}

fn create_test_choice(id: &str, poll_id: &str, title: &str) -> choice::Model {
    choice::Model {
        id: id.to_string(),
        poll_id: poll_id.to_string(),
        title: title.to_string(),
        created_at: Utc::now().into(),
    }
}

fn create_test_vote(id: &str, choice_id: &str) -> vote::Model {
    vote::Model {
        id: id.to_string(),
        choice_id: choice_id.to_string(),
        created_at: Utc::now().into(),
    }
}

/// Create the router over a prepared mock database.
fn create_test_app(db: MockDatabase) -> Router {
    let state = AppState::from_connection(Arc::new(db.into_connection()), RetryPolicy::none());
    api_router().with_state(state)
}

fn empty_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app(empty_db());

    let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app(empty_db());

    let response = app.oneshot(empty_request("GET", "/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_poll() {
    let id = IdGenerator::new().generate();
    let db = empty_db().append_query_results([[create_test_poll(&id, "2099-01-01 00:00")]]);
    let app = create_test_app(db);

    let response = app
        .oneshot(json_request(
            "POST",
            "/poll",
            &json!({"title": "Lunch", "expireAt": "2099-01-01 00:00"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["title"], "Lunch");
    assert_eq!(body["expireAt"], "2099-01-01 00:00");
}

#[tokio::test]
async fn test_create_poll_lists_every_invalid_field() {
    let app = create_test_app(empty_db());

    let response = app
        .oneshot(json_request(
            "POST",
            "/poll",
            &json!({"title": "", "expireAt": "someday"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    let fields: Vec<&str> = body["error"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["expireAt", "title"]);
}

#[tokio::test]
async fn test_malformed_json_is_unprocessable() {
    let app = create_test_app(empty_db());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/poll")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_polls() {
    let db = empty_db().append_query_results([[
        create_test_poll("p1", "2099-01-01 00:00"),
        create_test_poll("p2", "2099-01-01 00:00"),
    ]]);
    let app = create_test_app(db);

    let response = app.oneshot(empty_request("GET", "/poll")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_store_failure_hides_detail() {
    let db = empty_db().append_query_errors([DbErr::Custom("relation missing".to_string())]);
    let app = create_test_app(db);

    let response = app.oneshot(empty_request("GET", "/poll")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Internal server error");
    assert!(!body.to_string().contains("relation missing"));
}

#[tokio::test]
async fn test_malformed_poll_id_is_not_found() {
    let app = create_test_app(empty_db());

    let response = app
        .oneshot(empty_request("GET", "/poll/not-an-id/choice"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_choice_via_path() {
    let id_gen = IdGenerator::new();
    let poll_id = id_gen.generate();
    let choice_id = id_gen.generate();
    let db = empty_db()
        .append_query_results([[create_test_poll(&poll_id, "2099-01-01 00:00")]])
        .append_query_results([Vec::<choice::Model>::new()])
        .append_query_results([[create_test_choice(&choice_id, &poll_id, "Pizza")]]);
    let app = create_test_app(db);

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/poll/{poll_id}/choice"),
            &json!({"title": "Pizza"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Pizza");
    assert_eq!(body["pollId"], poll_id);
}

#[tokio::test]
async fn test_duplicate_choice_conflicts() {
    let poll_id = IdGenerator::new().generate();
    let db = empty_db()
        .append_query_results([[create_test_poll(&poll_id, "2099-01-01 00:00")]])
        .append_query_results([[create_test_choice("c1", &poll_id, "Pizza")]]);
    let app = create_test_app(db);

    let response = app
        .oneshot(json_request(
            "POST",
            "/choice",
            &json!({"title": "Pizza", "pollId": poll_id}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_empty_choice_title_is_unprocessable() {
    let poll_id = IdGenerator::new().generate();
    let db = empty_db().append_query_results([[create_test_poll(&poll_id, "2099-01-01 00:00")]]);
    let app = create_test_app(db);

    let response = app
        .oneshot(json_request(
            "POST",
            "/choice",
            &json!({"title": "", "pollId": poll_id}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_vote_on_expired_poll_is_forbidden() {
    let id_gen = IdGenerator::new();
    let poll_id = id_gen.generate();
    let choice_id = id_gen.generate();
    let db = empty_db()
        .append_query_results([[create_test_choice(&choice_id, &poll_id, "Pizza")]])
        .append_query_results([[create_test_poll(&poll_id, "2000-01-01 00:00")]]);
    let app = create_test_app(db);

    let response = app
        .oneshot(empty_request("POST", &format!("/choice/{choice_id}/vote")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_vote() {
    let id_gen = IdGenerator::new();
    let poll_id = id_gen.generate();
    let choice_id = id_gen.generate();
    let vote_id = id_gen.generate();
    let db = empty_db()
        .append_query_results([[create_test_choice(&choice_id, &poll_id, "Pizza")]])
        .append_query_results([[create_test_poll(&poll_id, "2099-01-01 00:00")]])
        .append_query_results([[create_test_vote(&vote_id, &choice_id)]]);
    let app = create_test_app(db);

    let response = app
        .oneshot(empty_request("POST", &format!("/choice/{choice_id}/vote")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["id"], vote_id);
    assert_eq!(body["choiceId"], choice_id);
}

#[tokio::test]
async fn test_poll_result() {
    let poll_id = IdGenerator::new().generate();
    let db = empty_db()
        .append_query_results([[create_test_poll(&poll_id, "2099-01-01 00:00")]])
        .append_query_results([[
            create_test_choice("a", &poll_id, "A"),
            create_test_choice("b", &poll_id, "B"),
        ]])
        .append_query_results([[
            create_test_vote("v1", "a"),
            create_test_vote("v2", "b"),
            create_test_vote("v3", "b"),
        ]]);
    let app = create_test_app(db);

    let response = app
        .oneshot(empty_request("GET", &format!("/poll/{poll_id}/result")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["pollId"], poll_id);
    assert_eq!(body["expireAt"], "2099-01-01 00:00");
    assert_eq!(body["result"], json!({"title": "B", "votes": 2}));
}

#[tokio::test]
async fn test_result_for_missing_poll_is_not_found() {
    let db = empty_db().append_query_results([Vec::<poll::Model>::new()]);
    let app = create_test_app(db);

    let response = app
        .oneshot(empty_request(
            "GET",
            &format!("/poll/{}/result", IdGenerator::new().generate()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_poll() {
    let id = IdGenerator::new().generate();
    let db = empty_db().append_query_results([[create_test_poll(&id, "2099-01-01 00:00")]]);
    let app = create_test_app(db);

    let response = app
        .oneshot(empty_request("GET", &format!("/poll/{id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"id": id, "title": "Lunch", "expireAt": "2099-01-01 00:00"})
    );
}

#[tokio::test]
async fn test_get_missing_poll_is_not_found() {
    let db = empty_db().append_query_results([Vec::<poll::Model>::new()]);
    let app = create_test_app(db);

    let response = app
        .oneshot(empty_request(
            "GET",
            &format!("/poll/{}", IdGenerator::new().generate()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_find_polls_by_title() {
    let db = empty_db().append_query_results([[create_test_poll("p1", "2099-01-01 00:00")]]);
    let app = create_test_app(db);

    let response = app
        .oneshot(empty_request("GET", "/poll?title=Lunch"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let polls = body.as_array().unwrap();
    assert_eq!(polls.len(), 1);
    assert_eq!(polls[0]["title"], "Lunch");
}

#[tokio::test]
async fn test_create_choice_via_body() {
    let id_gen = IdGenerator::new();
    let poll_id = id_gen.generate();
    let choice_id = id_gen.generate();
    let db = empty_db()
        .append_query_results([[create_test_poll(&poll_id, "2099-01-01 00:00")]])
        .append_query_results([Vec::<choice::Model>::new()])
        .append_query_results([[create_test_choice(&choice_id, &poll_id, "Sushi")]]);
    let app = create_test_app(db);

    let response = app
        .oneshot(json_request(
            "POST",
            "/choice",
            &json!({"title": "Sushi", "pollId": poll_id}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await,
        json!({"id": choice_id, "title": "Sushi", "pollId": poll_id})
    );
}

#[tokio::test]
async fn test_non_object_body_for_path_choice_is_one_violation() {
    let app = create_test_app(empty_db());

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/poll/{}/choice", IdGenerator::new().generate()),
            &json!(["x"]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await["error"]["fields"],
        json!([{"field": "body", "reason": "must be an object"}])
    );
}

#[tokio::test]
async fn test_list_choices_for_poll() {
    let poll_id = IdGenerator::new().generate();
    let db = empty_db()
        .append_query_results([[create_test_poll(&poll_id, "2099-01-01 00:00")]])
        .append_query_results([[
            create_test_choice("c1", &poll_id, "Pizza"),
            create_test_choice("c2", &poll_id, "Sushi"),
        ]]);
    let app = create_test_app(db);

    let response = app
        .oneshot(empty_request("GET", &format!("/poll/{poll_id}/choice")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Pizza", "Sushi"]);
}

#[tokio::test]
async fn test_list_choices_for_missing_poll_is_not_found() {
    let db = empty_db().append_query_results([Vec::<poll::Model>::new()]);
    let app = create_test_app(db);

    let response = app
        .oneshot(empty_request(
            "GET",
            &format!("/poll/{}/choice", IdGenerator::new().generate()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_all_choices() {
    let db = empty_db().append_query_results([[
        create_test_choice("c1", "p1", "Pizza"),
        create_test_choice("c2", "p2", "Pizza"),
    ]]);
    let app = create_test_app(db);

    let response = app.oneshot(empty_request("GET", "/choices")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_all_votes() {
    let db = empty_db().append_query_results([[
        create_test_vote("v1", "c1"),
        create_test_vote("v2", "c1"),
        create_test_vote("v3", "c2"),
    ]]);
    let app = create_test_app(db);

    let response = app.oneshot(empty_request("GET", "/votes")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let votes = body.as_array().unwrap();
    assert_eq!(votes.len(), 3);
    assert_eq!(votes[2]["choiceId"], "c2");
}
