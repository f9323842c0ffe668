use crate::helpers::spawn_app;

#[tokio::test]
async fn sitemap_uses_configured_base_url() {
    let app = spawn_app().await;

    let resp = app.get("/sitemap.xml").await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers()["Content-Type"]
        .to_str()
        .unwrap()
        .contains("xml"));
    let xml = resp.text().await.unwrap();

    assert!(xml.contains("<loc>https://testinternals.test/</loc>"));
    assert!(xml.contains("<loc>https://testinternals.test/blog</loc>"));
    assert!(xml.contains(
        "<loc>https://testinternals.test/blog/performance-testing-cloud</loc><lastmod>2024-12-05</lastmod>"
    ));
    assert_eq!(xml.matches("<url>").count(), 5);
}

#[test]
fn generator_writes_file_with_site_url_override() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("public").join("sitemap.xml");

    let status = std::process::Command::new(env!("CARGO_BIN_EXE_generate-sitemap"))
        .arg("--out")
        .arg(&out)
        .env("SITE_URL", "https://example.org/")
        .status()
        .expect("Failed to run generate-sitemap");
    assert!(status.success());

    let xml = std::fs::read_to_string(&out).unwrap();
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains("<loc>https://example.org/blog/ai-in-software-testing</loc>"));
    assert!(!xml.contains("example.org//"));
}
