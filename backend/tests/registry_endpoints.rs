//! End-to-end behaviour of the registry HTTP API over the in-memory store.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use bot_registry::domain::{ActionPolicy, TRACE_ID_HEADER};
use rstest::rstest;
use serde_json::{Value, json};

use support::registry_app;

fn register(bot_id: &str, owner_id: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/api/register").set_json(json!({
        "botId": bot_id,
        "ownerId": owner_id,
        "storeName": "S1",
        "ownerUsername": "U1",
    }))
}

fn blacklist(bot_id: &str, action: &str) -> test::TestRequest {
    test::TestRequest::patch()
        .uri("/api/blacklist")
        .set_json(json!({ "botId": bot_id, "action": action }))
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let res = test::call_service(&$app, $req.to_request()).await;
        let status = res.status();
        let body: Value = test::read_body_json(res).await;
        (status, body)
    }};
}

#[rstest]
#[case(None, "x")]
#[case(Some(ActionPolicy::Lenient), "x")]
#[case(Some(ActionPolicy::Strict), "unblacklist")]
#[actix_web::test]
async fn registration_and_blacklist_lifecycle(
    #[case] policy: Option<ActionPolicy>,
    #[case] restore_action: &str,
) {
    let app = registry_app(policy).await;

    let (status, body) = send!(app, register("B1", "O1"));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Bot registered successfully");
    assert_eq!(body["data"]["isBlacklisted"], false);
    assert_eq!(body["data"]["createdAt"], "2026-10-18T12:00:00.000Z");

    let (status, body) = send!(app, register("B1", "O2"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Bot already registered");
    assert_eq!(body["data"]["ownerId"], "O1");
    assert_eq!(body["data"]["createdAt"], "2026-10-18T12:00:00.000Z");

    let (status, body) = send!(app, blacklist("B1", "blacklist"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Bot blacklisted successfully");
    assert_eq!(body["data"]["isBlacklisted"], true);

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/check/B1"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Bot is blacklisted");
    assert_eq!(body["data"]["botId"], "B1");

    let (status, body) = send!(app, blacklist("B1", restore_action));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Bot unblacklisted successfully");
    assert_eq!(
        body["data"],
        json!({
            "botId": "B1",
            "ownerId": "O1",
            "storeName": "S1",
            "ownerUsername": "U1",
            "isBlacklisted": false,
            "createdAt": "2026-10-18T12:00:00.000Z",
        })
    );

    let (_, body) = send!(app, test::TestRequest::get().uri("/api/list"));
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn check_on_unknown_bot_is_valid_with_null_data() {
    let app = registry_app(None).await;

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/check/never-seen"));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": true, "message": "Bot is valid", "data": null })
    );
}

#[rstest]
#[actix_web::test]
async fn check_on_active_bot_returns_the_record() {
    let app = registry_app(None).await;
    send!(app, register("B1", "O1"));

    let (_, body) = send!(app, test::TestRequest::get().uri("/api/check/B1"));

    assert_eq!(body["status"], true);
    assert_eq!(body["data"]["ownerId"], "O1");
}

#[rstest]
#[actix_web::test]
async fn list_is_newest_first() {
    let app = registry_app(None).await;
    for id in ["first", "second", "third"] {
        send!(app, register(id, "O1"));
    }

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/list"));

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|bot| bot["botId"].as_str())
        .collect();
    assert_eq!(ids, vec!["third", "second", "first"]);
}

#[rstest]
#[actix_web::test]
async fn blacklisting_an_unknown_bot_creates_nothing() {
    let app = registry_app(None).await;

    let (status, body) = send!(app, blacklist("ghost", "blacklist"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], "Bot not found");

    let (_, body) = send!(app, test::TestRequest::get().uri("/api/list"));
    assert_eq!(body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn strict_policy_rejects_unknown_actions_without_writing() {
    let app = registry_app(Some(ActionPolicy::Strict)).await;
    send!(app, register("B1", "O1"));

    let (status, body) = send!(app, blacklist("B1", "ban"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");

    let (_, body) = send!(app, test::TestRequest::get().uri("/api/check/B1"));
    assert_eq!(body["data"]["isBlacklisted"], false);
}

#[rstest]
#[actix_web::test]
async fn missing_fields_are_internal_errors_with_trace_id() {
    let app = registry_app(None).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "botId": "B9", "ownerId": "" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = test::read_body_json(res).await;

    assert_eq!(
        body["message"],
        "bot validation failed: ownerId, storeName, ownerUsername are required"
    );
    assert_eq!(body["details"]["code"], "validation_failed");
    assert_eq!(body["traceId"].as_str(), header.as_deref());

    let (_, listed) = send!(app, test::TestRequest::get().uri("/api/list"));
    assert_eq!(listed, json!([]));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let app = registry_app(None).await;

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/register")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"botId\":")
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[case("/api/register", "[]")]
#[case("/api/register", "\"B1\"")]
#[case("/api/blacklist", "[]")]
#[case("/api/blacklist", "{\"botId\":7,\"action\":\"blacklist\"}")]
#[actix_web::test]
async fn bodies_that_are_not_objects_are_bad_requests(#[case] uri: &str, #[case] payload: &str) {
    let app = registry_app(None).await;
    let request = if uri == "/api/register" {
        test::TestRequest::post()
    } else {
        test::TestRequest::patch()
    };

    let (status, body) = send!(
        app,
        request
            .uri(uri)
            .insert_header(("content-type", "application/json"))
            .set_payload(payload.to_owned())
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "malformed_json");

    let (_, listed) = send!(app, test::TestRequest::get().uri("/api/list"));
    assert_eq!(listed, json!([]));
}

#[rstest]
#[actix_web::test]
async fn concurrent_registrations_store_one_record() {
    let app = registry_app(None).await;

    let responses = futures_util::future::join_all((0..8).map(|n| {
        test::call_service(&app, register("B1", &format!("O{n}")).to_request())
    }))
    .await;

    let created = responses
        .iter()
        .filter(|res| res.status() == StatusCode::CREATED)
        .count();
    assert_eq!(created, 1);

    let (_, body) = send!(app, test::TestRequest::get().uri("/api/list"));
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}
