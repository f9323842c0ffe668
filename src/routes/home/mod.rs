use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;

use crate::content::ContentStore;
use crate::routes::blog::post_card;
use crate::routes::layout::flash_html;
use crate::routes::layout::page;
use crate::utils::html;

/// Number of posts teased on the landing page
const RECENT_POSTS: usize = 3;

const CONTACT_EMAIL: &str = "admin@testinternals.com";

/// `GET /`
///
/// The marketing sections are static; the recent posts come from the content
/// store, and the outcome of a newsletter sign-up (see `subscribe`) arrives as
/// a flash message.
pub async fn home(
    store: web::Data<ContentStore>,
    flash_messages: IncomingFlashMessages,
) -> HttpResponse {
    let recent: String = store
        .recent_posts(RECENT_POSTS)
        .iter()
        .map(post_card)
        .collect();
    let flash = flash_html(&flash_messages);

    let main = format!(
        r##"{sections}
<section id="blog">
  <h2>Latest Insights</h2>
  <div class="posts">{recent}</div>
  <a href="/blog">View all posts</a>
</section>

<section id="newsletter">
  <h3>Stay Updated with Our Insights</h3>
  <p>Get the latest testing insights, industry trends, and best practices delivered to your inbox.</p>
  {flash}
  <form action="/subscriptions" method="post">
    <input type="email" name="email" placeholder="Enter your email address" />
    <button type="submit">Subscribe</button>
  </form>
</section>

<section id="contact">
  <h2>Let's Connect</h2>
  <p>Ready to elevate your testing capabilities? Get in touch with us to discuss your project and discover how we can help.</p>
  <p>Email: <a href="mailto:{CONTACT_EMAIL}">{CONTACT_EMAIL}</a></p>
  <p>Based in Melbourne and serving clients across Australia and globally</p>
</section>"##,
        sections = include_str!("./sections.html"),
    );

    html(StatusCode::OK, page("testinternals | Software Testing & QA", &main))
}
