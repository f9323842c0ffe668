use crate::helpers::check_redirect;
use crate::helpers::spawn_app;

#[tokio::test]
async fn new_post_form_has_defaults() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    let html = app.get_html("/admin/new-post").await;

    assert!(html.contains(r#"<form action="/admin/new-post" method="post">"#));
    assert!(html.contains(r#"value="5 min read""#));
    assert!(html.contains(r#"<option value="AI &amp; Automation" selected>"#));
}

#[tokio::test]
async fn valid_new_post_is_acknowledged() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    let resp = app
        .post_form(
            "/admin/new-post",
            &[
                ("title", "Contract Testing 101"),
                ("category", "Automation"),
                ("date", "2025-01-20"),
                ("tags", "Contracts, APIs"),
                ("content", "# Contract testing\n\nHello."),
            ],
        )
        .await;
    check_redirect(&resp, "/admin/dashboard");

    let html = app.get_html("/admin/dashboard").await;
    assert!(html.contains("Post created successfully!"));
    // nothing is persisted
    assert!(!app.get_html("/blog").await.contains("Contract Testing 101"));
}

#[tokio::test]
async fn invalid_post_re_renders_editor_with_errors() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    let resp = app
        .post_form(
            "/admin/new-post",
            &[
                ("title", ""),
                ("category", "Gardening"),
                ("date", "20/01/2025"),
                ("content", "Body <kept>"),
            ],
        )
        .await;

    assert_eq!(resp.status().as_u16(), 400);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Title is required."));
    // submitted values survive, escaped
    assert!(html.contains("Body &lt;kept&gt;"));
}

#[tokio::test]
async fn edit_existing_post() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    let html = app.get_html("/admin/edit/performance-testing-cloud").await;
    assert!(html.contains(r#"value="Performance Testing in the Cloud Era""#));
    assert!(html.contains(
        r#"<form action="/admin/edit/performance-testing-cloud/delete" method="post" onsubmit="return confirm('Delete this post?')">"#
    ));

    let resp = app
        .post_form(
            "/admin/edit/performance-testing-cloud",
            &[
                ("title", "Performance Testing in the Cloud Era"),
                ("category", "Performance"),
                ("date", "2024-12-05"),
                ("content", "Updated body."),
            ],
        )
        .await;
    check_redirect(&resp, "/admin/dashboard");
    assert!(app
        .get_html("/admin/dashboard")
        .await
        .contains("Post updated successfully!"));

    let resp = app
        .post_form("/admin/edit/performance-testing-cloud/delete", &[("", "")])
        .await;
    check_redirect(&resp, "/admin/dashboard");
    assert!(app
        .get_html("/admin/dashboard")
        .await
        .contains("Post deleted successfully!"));

    // still there
    assert_eq!(app.get("/blog/performance-testing-cloud").await.status().as_u16(), 200);
}

#[tokio::test]
async fn editing_unknown_post_is_404() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    assert_eq!(app.get("/admin/edit/nope").await.status().as_u16(), 404);
    let resp = app
        .post_form("/admin/edit/nope/delete", &[("", "")])
        .await;
    assert_eq!(resp.status().as_u16(), 404);
}
