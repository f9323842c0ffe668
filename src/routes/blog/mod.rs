mod index;
mod post;

pub use index::*;
pub use post::*;

use crate::content::Post;
use crate::utils::escape;

/// Tags shown on a card; the post page shows them all
const CARD_TAGS: usize = 3;

/// Featured image, or a placeholder when the post has no image path
fn thumbnail(post: &Post) -> String {
    match post.featured_image.as_deref() {
        Some(src) if src.starts_with('/') => format!(
            r#"<img src="{}" alt="{}" />"#,
            escape(src),
            escape(&post.title)
        ),
        _ => r#"<span class="placeholder">&#128221;</span>"#.to_string(),
    }
}

/// Summary card linking to the post, shared by the landing page, the blog
/// index and the related posts list
pub fn post_card(post: &Post) -> String {
    let tags: String = post
        .tags
        .iter()
        .take(CARD_TAGS)
        .map(|t| format!(r#"<span class="tag">{}</span>"#, escape(t)))
        .collect();
    format!(
        r#"
<article class="post-card">
  <a href="/blog/{slug}">
    {thumbnail}
    <span class="category">{category}</span> <span class="read-time">{read_time}</span>
    <h3>{title}</h3>
    <p>{excerpt}</p>
    <span class="date">{date}</span>
    <div class="tags">{tags}</div>
  </a>
</article>"#,
        slug = post.slug,
        thumbnail = thumbnail(post),
        category = escape(post.category.as_str()),
        read_time = escape(&post.read_time),
        title = escape(&post.title),
        excerpt = escape(&post.excerpt),
        date = post.display_date(),
    )
}
