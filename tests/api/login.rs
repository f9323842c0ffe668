use serde_json::json;
use wiremock::matchers::body_json;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::ResponseTemplate;

use crate::helpers::check_redirect;
use crate::helpers::spawn_app;
use crate::helpers::ADMIN_EMAIL;
use crate::helpers::ADMIN_PASSWORD;

#[tokio::test]
async fn login_form_is_public() {
    let app = spawn_app().await;

    let resp = app.get("/admin/login").await;

    assert_eq!(resp.status().as_u16(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains(r#"<form action="/admin/login" method="post">"#));
}

#[tokio::test]
async fn rejected_credentials_flash_an_error() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "INVALID_LOGIN_CREDENTIALS" },
        })))
        .expect(1)
        .mount(&app.identity_server)
        .await;

    let resp = app.post_login(ADMIN_EMAIL, "wrong").await;
    check_redirect(&resp, "/admin/login");

    let html = app.get_html("/admin/login").await;
    assert!(html.contains("Invalid email or password."));

    // shown once only
    let html = app.get_html("/admin/login").await;
    assert!(!html.contains("Invalid email or password."));
}

#[tokio::test]
async fn non_admin_is_signed_out_and_denied() {
    let app = spawn_app().await;

    app.mock_sign_in("someone@else.com").await;
    Mock::given(method("POST"))
        .and(path("/accounts:signOut"))
        .and(body_json(json!({ "idToken": "id-token" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.identity_server)
        .await;

    let resp = app.post_login("someone@else.com", "hunter2").await;
    check_redirect(&resp, "/admin/login");

    let html = app.get_html("/admin/login").await;
    assert!(html.contains("Access Denied: Only authorised admins allowed."));

    check_redirect(&app.get("/admin/dashboard").await, "/admin/login");
}

#[tokio::test]
async fn non_admin_is_denied_even_if_provider_sign_out_fails() {
    let app = spawn_app().await;

    app.mock_sign_in("someone@else.com").await;
    app.mock_sign_out(500).await;

    let resp = app.post_login("someone@else.com", "hunter2").await;
    check_redirect(&resp, "/admin/login");
    check_redirect(&app.get("/admin/dashboard").await, "/admin/login");
}

#[tokio::test]
async fn provider_outage_flashes_generic_error() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.identity_server)
        .await;

    let resp = app.post_login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    check_redirect(&resp, "/admin/login");

    let html = app.get_html("/admin/login").await;
    assert!(html.contains("Something went wrong while signing in."));
}

#[tokio::test]
async fn admin_login_reaches_dashboard() {
    let app = spawn_app().await;

    app.login_as_admin().await;

    let resp = app.get("/admin/dashboard").await;
    assert_eq!(resp.status().as_u16(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Welcome Site Admin!"));
    assert!(html.contains("/admin/edit/ai-in-software-testing"));

    // already signed in
    check_redirect(&app.get("/admin/login").await, "/admin/dashboard");
}

#[tokio::test]
async fn admin_email_is_matched_case_insensitively() {
    let app = spawn_app().await;

    app.mock_sign_in(&ADMIN_EMAIL.to_uppercase()).await;
    let resp = app
        .post_login(&ADMIN_EMAIL.to_uppercase(), ADMIN_PASSWORD)
        .await;

    check_redirect(&resp, "/admin/dashboard");
}

#[tokio::test]
async fn admin_pages_require_login() {
    let app = spawn_app().await;

    for path in [
        "/admin/dashboard",
        "/admin/new-post",
        "/admin/edit/ai-in-software-testing",
        "/admin/newsletter",
        "/admin/newsletter/export",
    ] {
        let resp = app.get(path).await;
        check_redirect(&resp, "/admin/login");
    }
    for path in [
        "/admin/new-post",
        "/admin/edit/ai-in-software-testing",
        "/admin/edit/ai-in-software-testing/delete",
        "/admin/newsletter/abc/delete",
        "/admin/logout",
    ] {
        let resp = app.post_form(path, &[("title", "x")]).await;
        check_redirect(&resp, "/admin/login");
    }
}
