use actix_web::web;
use actix_web::HttpResponse;
use actix_web_flash_messages::FlashMessage;

use crate::identity::IdentityClient;
use crate::session_state::AdminSession;
use crate::session_state::TypedSession;
use crate::utils::redirect;

/// `POST /admin/logout`
///
/// The provider-side session is ended on a best-effort basis; the local
/// session is purged whatever the provider says.
#[tracing::instrument(name = "Admin logout", skip_all, fields(email = %admin.email))]
pub async fn logout(
    admin: web::ReqData<AdminSession>,
    identity: web::Data<IdentityClient>,
    session: TypedSession,
) -> HttpResponse {
    if let Err(e) = identity.sign_out(&admin.id_token()).await {
        tracing::warn!(
            error.cause_chain = ?e,
            error.message = %e,
            "Failed to end provider session",
        );
    }
    session.logout();
    FlashMessage::info("You have successfully logged out.").send();
    redirect("/admin/login")
}
