use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;

use crate::content::ContentStore;
use crate::routes::layout::flash_html;
use crate::routes::layout::page;
use crate::session_state::AdminSession;
use crate::utils::escape;
use crate::utils::html;

/// `GET /admin/dashboard`
pub async fn admin_dashboard(
    admin: web::ReqData<AdminSession>,
    store: web::Data<ContentStore>,
    flash_messages: IncomingFlashMessages,
) -> HttpResponse {
    let rows: String = store
        .all_posts()
        .iter()
        .map(|p| {
            format!(
                r#"<tr><td><a href="/blog/{slug}">{title}</a></td><td>{category}</td><td>{date}</td><td><a href="/admin/edit/{slug}">Edit</a></td></tr>"#,
                slug = p.slug,
                title = escape(&p.title),
                category = escape(p.category.as_str()),
                date = p.display_date(),
            )
        })
        .collect();

    let main = format!(
        r#"<section class="admin">
  <h1>Admin Dashboard</h1>
  <p>Welcome {name}!</p>
  {flash}
  <p>Available actions:</p>
  <ol>
    <li><a href="/admin/new-post">New post</a></li>
    <li><a href="/admin/newsletter">Newsletter subscribers</a></li>
    <li>
      <form name="logoutForm" action="/admin/logout" method="post">
        <input type="submit" value="Logout" />
      </form>
    </li>
  </ol>
  <table>
    <thead><tr><th>Title</th><th>Category</th><th>Date</th><th></th></tr></thead>
    <tbody>{rows}</tbody>
  </table>
</section>"#,
        name = escape(admin.name()),
        flash = flash_html(&flash_messages),
    );
    html(StatusCode::OK, page("Admin Dashboard | testinternals", &main))
}
