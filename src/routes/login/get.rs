use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;

use crate::authentication::AdminEmail;
use crate::routes::layout::flash_html;
use crate::routes::layout::page;
use crate::session_state::TypedSession;
use crate::utils::error_500;
use crate::utils::html;
use crate::utils::redirect;

/// `GET /admin/login`
///
/// Errors from a failed `POST /admin/login` (and the logout notice) arrive as
/// flash messages. An admin who is already signed in goes straight to the
/// dashboard.
pub async fn login_form(
    session: TypedSession,
    admin_email: web::Data<AdminEmail>,
    flash_messages: IncomingFlashMessages,
) -> Result<HttpResponse, actix_web::Error> {
    if let Some(admin) = session.get_admin().map_err(error_500)? {
        if admin_email.matches(&admin.email) {
            return Ok(redirect("/admin/dashboard"));
        }
    }

    let main = format!(
        r#"<section class="login">
  <h1>Admin Login</h1>
  {flash}
  <!-- POST, so that credentials never end up in the url -->
  <form action="/admin/login" method="post">
    <label>
      Email
      <input type="email" placeholder="Enter email" name="email" />
    </label>
    <label>
      Password
      <input type="password" placeholder="Enter password" name="password" />
    </label>
    <button type="submit">Sign in</button>
  </form>
</section>"#,
        flash = flash_html(&flash_messages),
    );
    Ok(html(StatusCode::OK, page("Admin Login | testinternals", &main)))
}
