use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;

use super::post_card;
use crate::content::ContentStore;
use crate::content::PostFilter;
use crate::routes::layout::page;
use crate::utils::escape;
use crate::utils::html;

/// Toggle link: selecting the active value again clears that selection
fn toggle(
    label: &str,
    active: bool,
    href: String,
) -> String {
    let class = if active { "toggle active" } else { "toggle" };
    format!(
        r#"<a class="{class}" href="{}">{}</a>"#,
        escape(&href),
        escape(label)
    )
}

fn hidden(
    name: &str,
    value: Option<&str>,
) -> String {
    value
        .map(|v| format!(r#"<input type="hidden" name="{name}" value="{}" />"#, escape(v)))
        .unwrap_or_default()
}

/// `GET /blog?category=..&tag=..&q=..`
///
/// Every query parameter is optional; the three selections combine.
#[tracing::instrument(name = "Rendering blog index", skip(store))]
pub async fn blog_index(
    store: web::Data<ContentStore>,
    filter: web::Query<PostFilter>,
) -> HttpResponse {
    let filter = filter.into_inner();
    let all = store.all_posts();
    let shown = filter.apply(all);

    let categories: String = std::iter::once(toggle(
        "All",
        filter.category().is_none(),
        filter.with_category(None).href(),
    ))
    .chain(store.categories().into_iter().map(|c| {
        let active = filter.category() == Some(c.as_str());
        let next = if active { None } else { Some(c.as_str()) };
        toggle(c.as_str(), active, filter.with_category(next).href())
    }))
    .collect();

    let tags: String = store
        .tags()
        .into_iter()
        .map(|t| {
            let active = filter.tag() == Some(t);
            let next = if active { None } else { Some(t) };
            toggle(t, active, filter.with_tag(next).href())
        })
        .collect();

    let clear = match filter.is_active() {
        true => r#"<a class="clear" href="/blog">Clear filters</a>"#,
        false => "",
    };

    let posts = match shown.is_empty() {
        true => r#"<div class="empty">
  <h3>No posts found</h3>
  <p>Try adjusting your search terms or filters.</p>
</div>"#
            .to_string(),
        false => shown.iter().copied().map(post_card).collect(),
    };

    let main = format!(
        r#"<section class="blog-index">
  <h1>Blog</h1>
  <form action="/blog" method="get">
    <input type="search" name="q" placeholder="Search posts..." value="{q}" />
    {category_field}{tag_field}
    <button type="submit">Search</button>
  </form>
  <div class="filters">
    <span>Categories:</span> {categories}
  </div>
  <div class="filters">
    <span>Tags:</span> {tags}
  </div>
  {clear}
  <p class="count">Showing {shown} of {total} posts</p>
  <div class="posts">{posts}</div>
</section>"#,
        q = escape(filter.search().unwrap_or_default()),
        category_field = hidden("category", filter.category()),
        tag_field = hidden("tag", filter.tag()),
        shown = shown.len(),
        total = all.len(),
    );

    html(StatusCode::OK, page("Blog | testinternals", &main))
}
