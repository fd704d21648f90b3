//! Integration tests for the auth gate in front of member endpoints

mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use mp_api::create_app;
use serde_json::Value;

use common::{bearer, TestContext};

fn rejection_body(status: StatusCode, body: Value) -> (String, String, Vec<String>) {
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let mut keys: Vec<String> = body
        .as_object()
        .expect("json object body")
        .keys()
        .cloned()
        .collect();
    keys.sort();
    (
        body["error"].as_str().unwrap_or_default().to_string(),
        body["message"].as_str().unwrap_or_default().to_string(),
        keys,
    )
}

#[actix_web::test]
async fn test_every_rejection_stage_returns_the_same_response() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server, &ctx.cors)).await;

    let expired = ctx
        .tokens
        .issue_at(42, Utc::now() - Duration::days(30))
        .unwrap();
    let unknown_user = ctx.tokens.issue_for(404).unwrap();

    let requests = vec![
        test::TestRequest::get().uri("/info").to_request(),
        test::TestRequest::get()
            .uri("/info")
            .insert_header(("Authorization", "Token abc"))
            .to_request(),
        test::TestRequest::get()
            .uri("/info")
            .insert_header(bearer("not-a-jwt"))
            .to_request(),
        test::TestRequest::get()
            .uri("/info")
            .insert_header(bearer(&expired))
            .to_request(),
        test::TestRequest::get()
            .uri("/info")
            .insert_header(bearer(&unknown_user))
            .to_request(),
    ];

    let mut bodies = Vec::new();
    for req in requests {
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        bodies.push(rejection_body(status, body));
    }

    let first = bodies[0].clone();
    assert_eq!(first.0, "UNAUTHORIZED");
    assert_eq!(first.1, "Unauthorized");
    for body in &bodies {
        assert_eq!(body, &first);
    }
}

#[actix_web::test]
async fn test_store_unavailable_is_indistinguishable_from_bad_token() {
    let ctx = TestContext::new();
    let (_, token) = ctx.seed_user(42).await;
    ctx.users.set_unavailable(true);
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server, &ctx.cors)).await;

    let req = test::TestRequest::post()
        .uri("/member/order")
        .insert_header(bearer(&token))
        .set_json(serde_json::json!({ "goodId": 7, "addressId": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;

    let (error, message, _) = rejection_body(status, body);
    assert_eq!(error, "UNAUTHORIZED");
    assert_eq!(message, "Unauthorized");
    assert_eq!(ctx.orders.find_good_calls(), 0);
}

#[actix_web::test]
async fn test_rejected_tokens_never_touch_store_or_cache() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server, &ctx.cors)).await;
    let expired = ctx
        .tokens
        .issue_at(42, Utc::now() - Duration::days(30))
        .unwrap();

    for token in ["garbage", expired.as_str()] {
        let req = test::TestRequest::get()
            .uri("/info")
            .insert_header(bearer(token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    assert_eq!(ctx.users.find_by_id_calls(), 0);
    assert_eq!(ctx.cache.get_calls(), 0);
}

#[actix_web::test]
async fn test_identity_42_miss_then_hit() {
    let ctx = TestContext::new();
    let (user, token) = ctx.seed_user(42).await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server, &ctx.cors)).await;

    let req = test::TestRequest::get()
        .uri("/info")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["id"], 42);
    assert_eq!(ctx.users.find_by_id_calls(), 1);

    ctx.wait_for_cached(42).await;
    assert_eq!(ctx.cached_snapshot(42).await, Some(user));

    let req = test::TestRequest::get()
        .uri("/info")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let second: Value = test::read_body_json(resp).await;

    assert_eq!(ctx.users.find_by_id_calls(), 1);
    assert_eq!(second["data"], body["data"]);
}

#[actix_web::test]
async fn test_corrupt_cache_entry_falls_back_to_store() {
    let ctx = TestContext::new();
    let (_, token) = ctx.seed_user(42).await;
    ctx.cache
        .insert_raw("user_42", b"{not json".to_vec(), std::time::Duration::from_secs(60))
        .await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server, &ctx.cors)).await;

    let req = test::TestRequest::get()
        .uri("/info")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.users.find_by_id_calls(), 1);
}

#[actix_web::test]
async fn test_cache_failures_do_not_fail_requests() {
    let ctx = TestContext::new();
    let (_, token) = ctx.seed_user(42).await;
    ctx.cache.set_fail_reads(true);
    ctx.cache.set_fail_writes(true);
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server, &ctx.cors)).await;

    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri("/info")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    assert_eq!(ctx.users.find_by_id_calls(), 2);
}

#[actix_web::test]
async fn test_public_routes_need_no_token() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server, &ctx.cors)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");

    let req = test::TestRequest::get().uri("/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_request_id_round_trips_on_rejections() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server, &ctx.cors)).await;

    let req = test::TestRequest::get()
        .uri("/info")
        .insert_header(("X-Request-ID", "client-0042"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "client-0042");

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(!generated.is_empty());
}
