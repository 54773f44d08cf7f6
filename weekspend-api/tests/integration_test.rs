/// Integration tests for the WeekSpend API
///
/// These tests verify the full system works end-to-end:
/// - PIN sign-in and the session cookie lifecycle
/// - Session enforcement on protected routes
/// - Transaction, preset, and budget endpoints through the router
///
/// They need a real PostgreSQL database (`DATABASE_URL`) and are ignored by
/// default.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{body_json, TestContext};
use serde_json::json;

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, cookie: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json(uri: &str, cookie: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn test_sign_in_wrong_pin_rejected() {
    let ctx = TestContext::new().await.unwrap();
    ctx.cleanup().await.unwrap();

    let response = ctx
        .send(post_json("/v1/auth/sign-in", "", json!({ "pin": "000000" })))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    // A failed attempt must not hand out a session cookie
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM session")
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    assert_eq!(count, 0);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn test_sign_in_sets_session_cookie() {
    let ctx = TestContext::new().await.unwrap();
    ctx.cleanup().await.unwrap();

    let response = ctx
        .send(post_json(
            "/v1/auth/sign-in",
            "",
            json!({ "pin": common::TEST_PIN }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    assert_eq!(body["user"], "alex");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn test_sign_in_with_stale_cookie_installs_fresh_session() {
    let ctx = TestContext::new().await.unwrap();
    ctx.cleanup().await.unwrap();

    // The client still carries a cookie whose token matches no row
    let response = ctx
        .send(post_json(
            "/v1/auth/sign-in",
            "session=stalestalestalestalestalestale",
            json!({ "pin": common::TEST_PIN }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Exactly one session Set-Cookie, and it installs a token instead of
    // clearing: the last cookie a browser keeps must be the fresh session
    let session_cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .filter(|c| c.starts_with("session="))
        .collect();
    assert_eq!(session_cookies.len(), 1);
    assert!(!session_cookies[0].starts_with("session=;"));

    let cookie = session_cookies[0].split(';').next().unwrap().to_string();
    let response = ctx.send(get("/v1/user", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn test_sign_out_in_renewal_window_clears_cookie() {
    let ctx = TestContext::new().await.unwrap();
    ctx.cleanup().await.unwrap();

    let cookie = ctx.sign_in().await;

    // Push the session into the renewal window so the middleware wants to
    // re-set the cookie on this request
    let token = cookie.strip_prefix("session=").unwrap();
    let id = weekspend_shared::auth::token::session_id_from_token(token);
    sqlx::query("UPDATE session SET expires_at = NOW() + INTERVAL '10 days' WHERE id = $1")
        .bind(&id)
        .execute(&ctx.db)
        .await
        .unwrap();

    let response = ctx
        .send(post_json("/v1/auth/sign-out", &cookie, json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The only session Set-Cookie is the clear; no renewal re-installs the
    // deleted session's token after it
    let session_cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .filter(|c| c.starts_with("session="))
        .collect();
    assert_eq!(session_cookies.len(), 1);
    assert!(session_cookies[0].starts_with("session=;"));
    assert!(session_cookies[0].contains("Max-Age=0"));

    let response = ctx.send(get("/v1/user", &cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn test_protected_route_requires_session() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.send(get("/v1/user", "")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A garbage cookie is just as unauthenticated
    let response = ctx.send(get("/v1/user", "session=notarealtoken")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn test_session_round_trip() {
    let ctx = TestContext::new().await.unwrap();
    ctx.cleanup().await.unwrap();

    let cookie = ctx.sign_in().await;

    let response = ctx.send(get("/v1/user", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"], "alex");

    // Sign out, then the same cookie is dead
    let response = ctx
        .send(post_json("/v1/auth/sign-out", &cookie, json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx.send(get("/v1/user", &cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn test_change_user() {
    let ctx = TestContext::new().await.unwrap();
    ctx.cleanup().await.unwrap();

    let cookie = ctx.sign_in().await;

    let response = ctx
        .send(put_json("/v1/user", &cookie, json!({ "user": "sam" })))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx.send(get("/v1/user", &cookie)).await;
    let body = body_json(response).await;
    assert_eq!(body["user"], "sam");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn test_transaction_flow() {
    let ctx = TestContext::new().await.unwrap();
    ctx.cleanup().await.unwrap();

    let cookie = ctx.sign_in().await;

    let response = ctx
        .send(post_json(
            "/v1/transactions",
            &cookie,
            json!({
                "amount": "12.50",
                "name": "groceries",
                "paid_at": "2026-08-26T14:30:00Z"
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    // 2026-08-26 is a Wednesday, its week starts Monday the 24th
    assert_eq!(created["for_week"], "2026-08-24T00:00:00Z");
    assert_eq!(created["user"], "alex");

    // Any instant in the same week selects it
    let response = ctx
        .send(get(
            "/v1/transactions/spent?week=2026-08-28T09:00:00Z",
            &cookie,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["amount"], "12.50");

    // An empty week sums to zero
    let response = ctx
        .send(get(
            "/v1/transactions/spent?week=2026-01-05T00:00:00Z",
            &cookie,
        ))
        .await;
    let body = body_json(response).await;
    assert_eq!(body["amount"], "0");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn test_delete_missing_transaction_is_not_an_error() {
    let ctx = TestContext::new().await.unwrap();
    ctx.cleanup().await.unwrap();

    let cookie = ctx.sign_in().await;

    let response = ctx
        .send(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/transactions/{}", uuid::Uuid::new_v4()))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["deleted"], false);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn test_budget_defaults_then_upserts() {
    let ctx = TestContext::new().await.unwrap();
    ctx.cleanup().await.unwrap();

    let cookie = ctx.sign_in().await;

    // No row yet: the default cap comes back
    let response = ctx
        .send(get("/v1/budget?week=2026-08-26T00:00:00Z", &cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["amount"], "200.00");
    assert_eq!(body["stored"], false);

    // Setting twice for the same week updates in place
    for amount in ["150.00", "175.00"] {
        let response = ctx
            .send(put_json(
                "/v1/budget",
                &cookie,
                json!({ "amount": amount, "applies_to": "2026-08-26" }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM budget")
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let response = ctx
        .send(get("/v1/budget?week=2026-08-24T00:00:00Z", &cookie))
        .await;
    let body = body_json(response).await;
    assert_eq!(body["amount"], "175.00");
    assert_eq!(body["stored"], true);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn test_preset_crud() {
    let ctx = TestContext::new().await.unwrap();
    ctx.cleanup().await.unwrap();

    let cookie = ctx.sign_in().await;

    let response = ctx
        .send(post_json(
            "/v1/presets",
            &cookie,
            json!({ "amount": "4.50", "name": "coffee" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let preset = body_json(response).await;
    let id = preset["id"].as_str().unwrap().to_string();

    let response = ctx
        .send(put_json(
            &format!("/v1/presets/{}", id),
            &cookie,
            json!({ "amount": "5.00", "name": "coffee" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["amount"], "5.00");

    let response = ctx
        .send(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/presets/{}", id))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx.send(get("/v1/presets", &cookie)).await;
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    ctx.cleanup().await.unwrap();
}
