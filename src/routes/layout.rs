use actix_web_flash_messages::IncomingFlashMessages;
use actix_web_flash_messages::Level;

use crate::utils::escape;

const NAV: &[(&str, &str)] = &[
    ("Home", "/#home"),
    ("Services", "/#services"),
    ("AI-Powered Solutions", "/#ai-solutions"),
    ("Test Utilities", "/#test-utilities"),
    ("About", "/#about"),
    ("Blog", "/blog"),
    ("Contact", "/#contact"),
];

/// Wrap `main` (already-escaped HTML) in the site chrome: head, navigation and
/// footer. `title` is escaped here.
pub fn page(
    title: &str,
    main: &str,
) -> String {
    let nav: String = NAV
        .iter()
        .map(|(name, href)| format!(r#"<li><a href="{href}">{name}</a></li>"#))
        .collect();
    let year = chrono::Utc::now().format("%Y");
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
  </head>
  <body>
    <header>
      <a href="/" class="logo">testinternals</a>
      <nav><ul>{nav}</ul></nav>
    </header>
    <main>
{main}
    </main>
    <footer>
      <p>&copy; {year} testinternals &trade;. All rights reserved.</p>
      <ul>
        <li><a href="/#services">Services</a></li>
        <li><a href="/blog">Blog</a></li>
        <li><a href="/#contact">Contact</a></li>
      </ul>
    </footer>
  </body>
</html>"#,
        title = escape(title),
    )
}

fn level_class(level: Level) -> &'static str {
    match level {
        Level::Debug | Level::Info => "info",
        Level::Success => "success",
        Level::Warning => "warning",
        Level::Error => "error",
    }
}

/// One paragraph per flash message, escaped
pub fn flash_html(messages: &IncomingFlashMessages) -> String {
    messages
        .iter()
        .map(|m| {
            format!(
                "<p class=\"flash flash-{}\"><i>{}</i></p>\n",
                level_class(m.level()),
                escape(m.content())
            )
        })
        .collect()
}
