use actix_web::web;
use actix_web::HttpResponse;
use actix_web_flash_messages::FlashMessage;
use serde::Deserialize;

use crate::document_store::DocumentStoreClient;
use crate::newsletter::subscribe as add_subscriber;
use crate::newsletter::SubscribeError;
use crate::newsletter::SUBSCRIBED_MESSAGE;
use crate::utils::redirect;

#[derive(Deserialize)]
pub struct FormData {
    email: String,
}

/// `POST /subscriptions`
///
/// Always answers with a redirect to the landing page; the outcome travels as
/// a flash message, rendered in the newsletter section. Backend failures are logged
/// here and shown to the visitor only as a generic apology.
#[tracing::instrument(
    name = "Adding a new subscriber",
    skip(form, store),
    fields(subscriber_email = %form.email)
)]
pub async fn subscribe(
    form: web::Form<FormData>,
    store: web::Data<DocumentStoreClient>,
) -> HttpResponse {
    match add_subscriber(&store, form.0.email).await {
        Ok(id) => {
            tracing::info!(subscriber_id = %id, "New subscriber stored");
            FlashMessage::success(SUBSCRIBED_MESSAGE).send();
        }
        Err(e) => {
            match &e {
                SubscribeError::Unexpected(_) => tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to subscribe",
                ),
                _ => tracing::info!(error.message = %e, "Subscription refused"),
            }
            FlashMessage::error(e.to_string()).send();
        }
    }
    redirect("/")
}
