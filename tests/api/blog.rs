use crate::helpers::check_redirect;
use crate::helpers::spawn_app;

const AI: &str = "The Future of AI in Software Testing";
const FRAMEWORKS: &str = "Building Effective Test Automation Frameworks";
const CLOUD: &str = "Performance Testing in the Cloud Era";

#[tokio::test]
async fn blog_index_lists_every_post_newest_first() {
    let app = spawn_app().await;

    let resp = app.get("/blog").await;
    assert_eq!(resp.status().as_u16(), 200);
    let html = resp.text().await.unwrap();

    assert!(html.contains("Showing 3 of 3 posts"));
    assert!(!html.contains("Clear filters"));
    let ai = html.find(AI).unwrap();
    let frameworks = html.find(FRAMEWORKS).unwrap();
    let cloud = html.find(CLOUD).unwrap();
    assert!(ai < frameworks && frameworks < cloud);
}

#[tokio::test]
async fn blog_index_filters_combine() {
    let app = spawn_app().await;

    let html = app.get_html("/blog?category=Performance").await;
    assert!(html.contains("Showing 1 of 3 posts"));
    assert!(html.contains(CLOUD));
    assert!(!html.contains(FRAMEWORKS));
    assert!(html.contains("Clear filters"));

    let html = app.get_html("/blog?tag=Scalability").await;
    assert!(html.contains("Showing 2 of 3 posts"));
    assert!(!html.contains(AI));

    let html = app.get_html("/blog?tag=Scalability&q=CLOUD").await;
    assert!(html.contains("Showing 1 of 3 posts"));
    assert!(html.contains(CLOUD));

    let html = app.get_html("/blog?category=AI%20%26%20Automation&tag=Scalability").await;
    assert!(html.contains("Showing 0 of 3 posts"));
    assert!(html.contains("No posts found"));
    assert!(html.contains("Try adjusting your search terms or filters."));
}

#[tokio::test]
async fn blog_index_ignores_blank_filters() {
    let app = spawn_app().await;

    let html = app.get_html("/blog?category=&tag=&q=").await;

    assert!(html.contains("Showing 3 of 3 posts"));
    assert!(!html.contains("Clear filters"));
}

#[tokio::test]
async fn blog_post_renders_markdown() {
    let app = spawn_app().await;

    let resp = app.get("/blog/ai-in-software-testing").await;
    assert_eq!(resp.status().as_u16(), 200);
    let html = resp.text().await.unwrap();

    assert!(html.contains(AI));
    assert!(html.contains("December 15, 2024"));
    assert!(html.contains("AI &amp; Automation"));
    assert!(html.contains("<h2>"));
    // the only post in its category
    assert!(!html.contains("Related Posts"));
}

#[tokio::test]
async fn unknown_post_is_404() {
    let app = spawn_app().await;

    let resp = app.get("/blog/no-such-post").await;

    assert_eq!(resp.status().as_u16(), 404);
    assert!(resp.text().await.unwrap().contains("Post not found"));
}

#[tokio::test]
async fn legacy_editor_links_point_at_admin() {
    let app = spawn_app().await;

    check_redirect(&app.get("/blog/new").await, "/admin/new-post");
    check_redirect(
        &app.get("/blog/edit/ai-in-software-testing").await,
        "/admin/edit/ai-in-software-testing",
    );
}

#[tokio::test]
async fn post_card_images_are_served() {
    let app = spawn_app().await;

    let html = app.get_html("/blog").await;
    let srcs: Vec<&str> = html
        .split(r#"<img src=""#)
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .collect();
    assert_eq!(srcs.len(), 3);

    for src in srcs {
        let resp = app.get(src).await;
        assert_eq!(resp.status().as_u16(), 200, "{src}");
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "image/svg+xml"
        );
    }
}

#[tokio::test]
async fn unknown_static_path_is_404() {
    let app = spawn_app().await;

    let resp = app.get("/images/missing.png").await;

    assert_eq!(resp.status().as_u16(), 404);
}
