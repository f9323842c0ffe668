use crate::content::Post;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const FALLBACK_SITE_URL: &str = "http://localhost:8000";

/// Pick the public origin of the site. In order: an explicit `SITE_URL`, the
/// manifest homepage, the deployment host (`VERCEL_URL`, which carries no
/// scheme), then the local dev server.
///
/// `env` is a variable lookup, so tests need not touch the process
/// environment.
pub fn resolve_site_url(
    env: impl Fn(&str) -> Option<String>,
    manifest_homepage: Option<&str>,
) -> String {
    let non_blank = |v: String| (!v.trim().is_empty()).then(|| v.trim().to_string());

    let url = env("SITE_URL")
        .and_then(non_blank)
        .or_else(|| manifest_homepage.map(str::to_string).and_then(non_blank))
        .or_else(|| {
            env("VERCEL_URL")
                .and_then(non_blank)
                .map(|host| format!("https://{host}"))
        })
        .unwrap_or_else(|| FALLBACK_SITE_URL.to_string());
    url.trim_end_matches('/').to_string()
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

struct Entry {
    loc: String,
    lastmod: Option<String>,
    changefreq: &'static str,
    priority: &'static str,
}

impl Entry {
    fn to_xml(&self) -> String {
        let lastmod = self
            .lastmod
            .as_deref()
            .map(|d| format!("<lastmod>{d}</lastmod>"))
            .unwrap_or_default();
        format!(
            "<url><loc>{}</loc>{lastmod}<changefreq>{}</changefreq><priority>{}</priority></url>",
            escape_xml(&self.loc),
            self.changefreq,
            self.priority,
        )
    }
}

/// The landing page, the blog index, then every post in the order given.
pub fn build_sitemap(
    site_url: &str,
    posts: &[Post],
) -> String {
    let site_url = site_url.trim_end_matches('/');
    let pages = [
        Entry {
            loc: format!("{site_url}/"),
            lastmod: None,
            changefreq: "daily",
            priority: "1.0",
        },
        Entry {
            loc: format!("{site_url}/blog"),
            lastmod: None,
            changefreq: "weekly",
            priority: "0.8",
        },
    ];
    let posts = posts.iter().map(|p| Entry {
        loc: format!("{site_url}/blog/{}", p.slug),
        lastmod: Some(p.iso_date()),
        changefreq: "monthly",
        priority: "0.7",
    });

    let urls: String = pages
        .into_iter()
        .chain(posts)
        .map(|e| e.to_xml())
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"{SITEMAP_NAMESPACE}\">{urls}</urlset>\n"
    )
}
