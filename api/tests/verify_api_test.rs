//! Integration tests for POST /api/verify and its lockout

mod common;

use actix_web::{http::StatusCode, test};
use chrono::Duration;
use serde_json::{json, Value};

use common::{reserve_body, TestContext};
use pr_api::create_app;

const EMAIL: &str = "ada@gmail.com";

fn verify_body(email: &str, code: &str) -> Value {
    json!({ "email": email, "verificationCode": code })
}

/// A six-digit code guaranteed to differ from `code`
fn wrong_code(code: &str) -> String {
    if code == "000000" {
        "111111".to_string()
    } else {
        "000000".to_string()
    }
}

#[actix_web::test]
async fn test_verify_with_correct_code() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/reserve")
        .set_json(reserve_body(EMAIL, "+2348012345678"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    let code = ctx.code_for(EMAIL).await;

    let req = test::TestRequest::post()
        .uri("/api/verify")
        .insert_header(("X-Forwarded-For", "203.0.113.7"))
        .set_json(verify_body(EMAIL, &code))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["reservation"]["firstName"], "Ada");
    assert_eq!(body["reservation"]["phoneNumber"], "+2348012345678");
    assert_eq!(body["reservation"]["country"], "Nigeria");
    assert!(body["reservation"].get("verificationCode").is_none());

    let stored = ctx.reservations.all().await;
    assert!(stored[0].is_verified);

    // A second attempt with the same code is refused
    let req = test::TestRequest::post()
        .uri("/api/verify")
        .set_json(verify_body(EMAIL, &code))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "already_verified");
}

#[actix_web::test]
async fn test_verify_requires_email_and_code() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/verify")
        .set_json(json!({ "email": EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Email and verification code are required");
}

#[actix_web::test]
async fn test_verify_unknown_email_is_invalid_credential() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/verify")
        .set_json(verify_body("nobody@gmail.com", "123456"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_credential");
    assert_eq!(body["message"], "Invalid email or verification code");
}

#[actix_web::test]
async fn test_verify_locks_out_after_five_failures() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/reserve")
        .set_json(reserve_body(EMAIL, "+2348012345678"))
        .to_request();
    test::call_service(&app, req).await;
    let code = ctx.code_for(EMAIL).await;
    let wrong = wrong_code(&code);

    for _ in 0..5 {
        let req = test::TestRequest::post()
            .uri("/api/verify")
            .insert_header(("X-Forwarded-For", "203.0.113.7"))
            .set_json(verify_body(EMAIL, &wrong))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    // Locked: even the right code is refused
    let req = test::TestRequest::post()
        .uri("/api/verify")
        .insert_header(("X-Forwarded-For", "203.0.113.7"))
        .set_json(verify_body(EMAIL, &code))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(resp.headers().get("Retry-After").unwrap(), "1800");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "rate_limit_exceeded");
    assert_eq!(
        body["message"],
        "Too many failed attempts. Account locked for 30 more minute(s)."
    );

    // The same IP is locked out for another email too
    let req = test::TestRequest::post()
        .uri("/api/verify")
        .insert_header(("X-Forwarded-For", "203.0.113.7"))
        .set_json(verify_body("other@gmail.com", "123456"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    // Once the lock lapses the right code goes through
    ctx.clock.advance(Duration::minutes(31));
    let req = test::TestRequest::post()
        .uri("/api/verify")
        .insert_header(("X-Forwarded-For", "203.0.113.7"))
        .set_json(verify_body(EMAIL, &code))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(ctx.attempts.is_empty().await);
}

#[actix_web::test]
async fn test_verify_expired_code() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/reserve")
        .set_json(reserve_body(EMAIL, "+2348012345678"))
        .to_request();
    test::call_service(&app, req).await;
    let code = ctx.code_for(EMAIL).await;

    ctx.clock.advance(Duration::hours(25));

    let req = test::TestRequest::post()
        .uri("/api/verify")
        .set_json(verify_body(EMAIL, &code))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "code_expired");
    assert!(!ctx.reservations.all().await[0].is_verified);
}

#[actix_web::test]
async fn test_locked_caller_with_oversized_code_is_rate_limited() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/reserve")
        .set_json(reserve_body(EMAIL, "+2348012345678"))
        .to_request();
    test::call_service(&app, req).await;
    let wrong = wrong_code(&ctx.code_for(EMAIL).await);

    for _ in 0..5 {
        let req = test::TestRequest::post()
            .uri("/api/verify")
            .insert_header(("X-Forwarded-For", "203.0.113.7"))
            .set_json(verify_body(EMAIL, &wrong))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::post()
        .uri("/api/verify")
        .insert_header(("X-Forwarded-For", "203.0.113.7"))
        .set_json(verify_body(EMAIL, &"9".repeat(40)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let entry = ctx.attempts.all().await;
    assert_eq!(entry.len(), 1);
    assert_eq!(entry[0].attempts, 5);
}

#[actix_web::test]
async fn test_oversized_code_counts_as_failure() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/reserve")
        .set_json(reserve_body(EMAIL, "+2348012345678"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/verify")
        .insert_header(("X-Forwarded-For", "203.0.113.7"))
        .set_json(verify_body(EMAIL, &"9".repeat(40)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_credential");
    assert_eq!(ctx.attempts.len().await, 1);
}
