use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use testinternals::content::ContentStore;
use testinternals::sitemap::build_sitemap;
use testinternals::sitemap::resolve_site_url;
use testinternals::telemetry::get_subscriber;
use testinternals::telemetry::init_subscriber;

/// Write `sitemap.xml` for the embedded blog posts.
///
/// The site origin comes from `SITE_URL`, else the crate homepage, else
/// `VERCEL_URL`, else `http://localhost:8000`.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Where to write the sitemap
    #[arg(long, default_value = "public/sitemap.xml")]
    out: PathBuf,
}

fn main() -> Result<(), anyhow::Error> {
    init_subscriber(get_subscriber("generate-sitemap", "info", std::io::stderr))?;
    let cli = Cli::parse();

    let store = ContentStore::load_embedded().context("Embedded posts are invalid")?;
    let homepage = Some(env!("CARGO_PKG_HOMEPAGE")).filter(|h| !h.is_empty());
    let site_url = resolve_site_url(|k| std::env::var(k).ok(), homepage);

    if let Some(dir) = cli.out.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    fs::write(&cli.out, build_sitemap(&site_url, store.all_posts()))
        .with_context(|| format!("Failed to write {}", cli.out.display()))?;

    tracing::info!(
        path = %cli.out.display(),
        site_url = %site_url,
        posts = store.all_posts().len(),
        "Sitemap written"
    );
    Ok(())
}
