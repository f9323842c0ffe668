use crate::helpers::check_redirect;
use crate::helpers::spawn_app;

#[tokio::test]
async fn logout_clears_session() {
    let app = spawn_app().await;
    app.login_as_admin().await;
    app.mock_sign_out(200).await;

    let resp = app.post_logout().await;
    check_redirect(&resp, "/admin/login");

    let html = app.get_html("/admin/login").await;
    assert!(html.contains("You have successfully logged out."));

    check_redirect(&app.get("/admin/dashboard").await, "/admin/login");
}

#[tokio::test]
async fn logout_succeeds_when_provider_fails() {
    let app = spawn_app().await;
    app.login_as_admin().await;
    app.mock_sign_out(500).await;

    let resp = app.post_logout().await;
    check_redirect(&resp, "/admin/login");

    check_redirect(&app.get("/admin/dashboard").await, "/admin/login");
}

#[tokio::test]
async fn logout_without_session_redirects_to_login() {
    let app = spawn_app().await;

    let resp = app.post_logout().await;

    check_redirect(&resp, "/admin/login");
}
