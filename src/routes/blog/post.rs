use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;

use super::post_card;
use crate::content::ContentStore;
use crate::routes::layout::page;
use crate::utils::escape;
use crate::utils::html;
use crate::utils::redirect;

const RELATED_POSTS: usize = 3;

fn not_found() -> HttpResponse {
    let main = r#"<section class="not-found">
  <h1>Post not found</h1>
  <p>The blog post you're looking for doesn't exist.</p>
  <a href="/blog">Back to Blog</a>
</section>"#;
    html(StatusCode::NOT_FOUND, page("Post not found | testinternals", main))
}

/// `GET /blog/{slug}`
#[tracing::instrument(name = "Rendering blog post", skip(store))]
pub async fn blog_post(
    store: web::Data<ContentStore>,
    slug: web::Path<String>,
) -> HttpResponse {
    let Some(post) = store.post_by_slug(&slug) else {
        return not_found();
    };

    let tags: String = post
        .tags
        .iter()
        .map(|t| {
            format!(
                r#"<a class="tag" href="/blog?tag={}">{}</a>"#,
                urlencoding::encode(t),
                escape(t)
            )
        })
        .collect();

    let related = store.related_posts(post, RELATED_POSTS);
    let related = match related.is_empty() {
        true => String::new(),
        false => format!(
            r#"<section class="related">
  <h2>Related Posts</h2>
  <div class="posts">{}</div>
</section>"#,
            related.into_iter().map(post_card).collect::<String>()
        ),
    };

    let main = format!(
        r#"<article class="post">
  <a href="/blog">Back to Blog</a>
  <header>
    <span class="category">{category}</span> <span class="read-time">{read_time}</span>
    <h1>{title}</h1>
    <p class="excerpt">{excerpt}</p>
    <p class="byline">{author} &middot; <time datetime="{iso_date}">{date}</time></p>
    <div class="tags">{tags}</div>
  </header>
  <div class="content">
{content}
  </div>
</article>
{related}"#,
        category = escape(post.category.as_str()),
        read_time = escape(&post.read_time),
        title = escape(&post.title),
        excerpt = escape(&post.excerpt),
        author = escape(&post.author),
        iso_date = post.iso_date(),
        date = post.display_date(),
        // markdown is authored in-repo, so its HTML is trusted
        content = post.render_html(),
    );

    html(
        StatusCode::OK,
        page(&format!("{} | testinternals", post.title), &main),
    )
}

/// `GET /blog/new`; the editor lives in the admin panel
pub async fn new_post_redirect() -> HttpResponse { redirect("/admin/new-post") }

/// `GET /blog/edit/{slug}`
pub async fn edit_post_redirect(slug: web::Path<String>) -> HttpResponse {
    redirect(&format!("/admin/edit/{}", urlencoding::encode(&slug)))
}
