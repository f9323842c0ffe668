use actix_web::body::MessageBody;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::web;
use actix_web::FromRequest;
use actix_web::HttpMessage;
use actix_web_lab::middleware::Next;

use super::AdminEmail;
use crate::session_state::TypedSession;
use crate::utils::error_500;
use crate::utils::redirect;

/// Gate for everything under `/admin` (except the login page, which is
/// registered outside the scope).
///
/// The session either carries an `AdminSession` whose email is still the
/// allow-listed one, in which case it is put into the request extensions for
/// handlers to extract with `web::ReqData<AdminSession>`, or the client is
/// sent to `/admin/login` without the handler ever running. A session for
/// anyone else is purged on the way out.
// the redirect is returned as a response rather than an `Err`: the session
// middleware only writes session changes (the purge) for successful responses
pub async fn reject_non_admin_users(
    mut req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let session = {
        let (raw_req, payload) = req.parts_mut();
        TypedSession::from_request(raw_req, payload).await?
    };
    let admin_email = req
        .app_data::<web::Data<AdminEmail>>()
        .cloned()
        .ok_or_else(|| error_500("Admin allow-list is not configured"))?;

    match session.get_admin().map_err(error_500)? {
        Some(admin) if admin_email.matches(&admin.email) => {
            req.extensions_mut().insert(admin);
            Ok(next.call(req).await?.map_into_left_body())
        }
        Some(admin) => {
            tracing::warn!(email = %admin.email, "Session is not for the admin; purging");
            session.logout();
            Ok(req
                .into_response(redirect("/admin/login"))
                .map_into_right_body())
        }
        None => Ok(req
            .into_response(redirect("/admin/login"))
            .map_into_right_body()),
    }
}
