use actix_web::http::header::ContentDisposition;
use actix_web::http::header::ContentType;
use actix_web::http::header::DispositionParam;
use actix_web::http::header::DispositionType;
use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;
use actix_web_flash_messages::FlashMessage;
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Utc;

use crate::document_store::DocumentStoreClient;
use crate::domain::Subscriber;
use crate::newsletter::delete_subscriber;
use crate::newsletter::export_emails;
use crate::newsletter::export_file_name;
use crate::newsletter::list_subscribers;
use crate::newsletter::SubscriberStats;
use crate::newsletter::DELETED_MESSAGE;
use crate::newsletter::DELETE_FAILED_MESSAGE;
use crate::newsletter::LIST_FAILED_MESSAGE;
use crate::routes::layout::flash_html;
use crate::routes::layout::page;
use crate::session_state::AdminSession;
use crate::utils::error_500;
use crate::utils::escape;
use crate::utils::html;
use crate::utils::redirect;

fn subscriber_row(s: &Subscriber) -> String {
    let subscribed = s
        .subscribed_at
        .map(|at| at.format("%B %d, %Y").to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    format!(
        r#"<tr><td>{email}</td><td>{subscribed}</td><td>{status:?}</td><td>{source}</td><td><form action="/admin/newsletter/{id}/delete" method="post" onsubmit="return confirm('Delete this subscriber?')"><button type="submit">Delete</button></form></td></tr>"#,
        email = escape(&s.email),
        status = s.status,
        source = escape(&s.source),
        id = urlencoding::encode(&s.id),
    )
}

/// `GET /admin/newsletter`
///
/// A store outage is shown on the page instead of failing the request.
pub async fn newsletter_admin(
    admin: web::ReqData<AdminSession>,
    store: web::Data<DocumentStoreClient>,
    flash_messages: IncomingFlashMessages,
) -> HttpResponse {
    let body = match list_subscribers(&store, &admin).await {
        Ok(subscribers) => {
            let stats = SubscriberStats::compute(&subscribers, Utc::now().date_naive());
            let rows: String = subscribers.iter().map(subscriber_row).collect();
            let table = match subscribers.is_empty() {
                true => "<p>No subscribers yet.</p>".to_string(),
                false => format!(
                    r#"<table>
    <thead><tr><th>Email</th><th>Subscribed</th><th>Status</th><th>Source</th><th></th></tr></thead>
    <tbody>{rows}</tbody>
  </table>"#
                ),
            };
            format!(
                r#"<ul class="stats">
    <li>Total subscribers: <strong>{total}</strong></li>
    <li>Active: <strong>{active}</strong></li>
    <li>This month: <strong>{this_month}</strong></li>
  </ul>
  <a href="/admin/newsletter/export">Export emails</a>
  {table}"#,
                total = stats.total,
                active = stats.active,
                this_month = stats.this_month,
            )
        }
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, error.message = %e, "Failed to list subscribers");
            format!(r#"<p class="flash flash-error"><i>{LIST_FAILED_MESSAGE}</i></p>"#)
        }
    };

    let main = format!(
        r#"<section class="admin">
  <a href="/admin/dashboard">Back to dashboard</a>
  <h1>Newsletter Subscribers</h1>
  {flash}
  {body}
</section>"#,
        flash = flash_html(&flash_messages),
    );
    html(StatusCode::OK, page("Newsletter | testinternals", &main))
}

/// `GET /admin/newsletter/export`
///
/// Plain text attachment, one address per line
pub async fn export_subscribers(
    admin: web::ReqData<AdminSession>,
    store: web::Data<DocumentStoreClient>,
) -> Result<HttpResponse, actix_web::Error> {
    let subscribers = list_subscribers(&store, &admin)
        .await
        .map_err(error_500)?;
    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(export_file_name(
            Utc::now().date_naive(),
        ))],
    };
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .insert_header(disposition)
        .body(export_emails(&subscribers)))
}

/// `POST /admin/newsletter/{id}/delete`
pub async fn remove_subscriber(
    admin: web::ReqData<AdminSession>,
    store: web::Data<DocumentStoreClient>,
    id: web::Path<String>,
) -> HttpResponse {
    match delete_subscriber(&store, &admin, &id).await {
        Ok(()) => FlashMessage::success(DELETED_MESSAGE).send(),
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                subscriber_id = %id,
                "Failed to delete subscriber",
            );
            FlashMessage::error(DELETE_FAILED_MESSAGE).send();
        }
    }
    redirect("/admin/newsletter")
}
