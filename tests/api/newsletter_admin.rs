use chrono::Utc;
use serde_json::json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::ResponseTemplate;

use crate::helpers::check_redirect;
use crate::helpers::spawn_app;
use crate::helpers::TestApp;

const DOCUMENTS_PATH: &str = "/collections/newsletter_emails/documents";

async fn mock_subscribers(app: &TestApp) {
    let now = Utc::now().to_rfc3339();
    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .and(header("Authorization", "Bearer dev-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                {
                    "id": "old",
                    "fields": {
                        "email": "old@example.com",
                        "subscribedAt": "2024-01-10T09:00:00Z",
                        "status": "inactive",
                        "source": "website",
                    },
                },
                {
                    "id": "new",
                    "fields": {
                        "email": "new@example.com",
                        "subscribedAt": now,
                        "status": "active",
                        "source": "website",
                    },
                },
                // no email: skipped
                { "id": "broken", "fields": { "status": "active" } },
            ],
        })))
        .mount(&app.store_server)
        .await;
}

#[tokio::test]
async fn subscriber_list_shows_stats_newest_first() {
    let app = spawn_app().await;
    app.login_as_admin().await;
    mock_subscribers(&app).await;

    let resp = app.get("/admin/newsletter").await;
    assert_eq!(resp.status().as_u16(), 200);
    let html = resp.text().await.unwrap();

    assert!(html.contains("Total subscribers: <strong>2</strong>"));
    assert!(html.contains("Active: <strong>1</strong>"));
    assert!(html.contains("This month: <strong>1</strong>"));
    let new = html.find("new@example.com").unwrap();
    let old = html.find("old@example.com").unwrap();
    assert!(new < old);
    assert!(html.contains("/admin/newsletter/new/delete"));
}

#[tokio::test]
async fn subscriber_list_failure_is_shown_on_page() {
    let app = spawn_app().await;
    app.login_as_admin().await;
    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.store_server)
        .await;

    let resp = app.get("/admin/newsletter").await;

    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp
        .text()
        .await
        .unwrap()
        .contains("Failed to fetch subscribers"));
}

#[tokio::test]
async fn export_is_a_text_attachment() {
    let app = spawn_app().await;
    app.login_as_admin().await;
    mock_subscribers(&app).await;

    let resp = app.get("/admin/newsletter/export").await;

    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers()["Content-Type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let disposition = resp.headers()["Content-Disposition"].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(&format!(
        "newsletter_subscribers_{}.txt",
        Utc::now().format("%Y-%m-%d")
    )));
    assert_eq!(resp.text().await.unwrap(), "new@example.com\nold@example.com");
}

#[tokio::test]
async fn delete_subscriber_flashes_outcome() {
    let app = spawn_app().await;
    app.login_as_admin().await;
    mock_subscribers(&app).await;
    Mock::given(method("DELETE"))
        .and(path(format!("{DOCUMENTS_PATH}/new")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.store_server)
        .await;

    let resp = app.post_form("/admin/newsletter/new/delete", &[("", "")]).await;
    check_redirect(&resp, "/admin/newsletter");

    let html = app.get_html("/admin/newsletter").await;
    assert!(html.contains("Subscriber deleted successfully"));
}

#[tokio::test]
async fn delete_missing_subscriber_fails() {
    let app = spawn_app().await;
    app.login_as_admin().await;
    mock_subscribers(&app).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.store_server)
        .await;

    let resp = app.post_form("/admin/newsletter/gone/delete", &[("", "")]).await;
    check_redirect(&resp, "/admin/newsletter");

    let html = app.get_html("/admin/newsletter").await;
    assert!(html.contains("Failed to delete subscriber"));
}
