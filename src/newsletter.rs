use std::fmt::Debug;

use anyhow::Context;
use chrono::Datelike;
use chrono::NaiveDate;
use chrono::Utc;
use serde_json::Map;
use serde_json::Value;
use sha2::Digest;
use sha2::Sha256;

use crate::document_store::Document;
use crate::document_store::DocumentStoreClient;
use crate::document_store::StoreError;
use crate::domain::NewSubscriber;
use crate::domain::Subscriber;
use crate::domain::SubscriberEmail;
use crate::domain::SubscriberFields;
use crate::domain::SubscriberStatus;
use crate::session_state::AdminSession;
use crate::utils::error_chain_fmt;

pub const NEWSLETTER_COLLECTION: &str = "newsletter_emails";

pub const SUBSCRIBED_MESSAGE: &str = "Successfully subscribed to newsletter!";
pub const DELETED_MESSAGE: &str = "Subscriber deleted successfully";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete subscriber";
pub const LIST_FAILED_MESSAGE: &str = "Failed to fetch subscribers";

/// Every variant's `Display` is the message shown to the visitor
#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("Please enter a valid email address")]
    Validation(String),
    #[error("This email is already subscribed to our newsletter")]
    Duplicate,
    #[error("Sorry, there was an error subscribing. Please try again later.")]
    Unexpected(#[source] anyhow::Error),
}

impl Debug for SubscribeError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Document id for a subscriber: hex SHA-256 of the normalised email, so one
/// mailbox can only ever occupy one document.
pub fn subscriber_document_id(email: &SubscriberEmail) -> String {
    hex::encode(Sha256::digest(email.as_ref().as_bytes()))
}

fn to_fields(fields: &SubscriberFields) -> Result<Map<String, Value>, anyhow::Error> {
    match serde_json::to_value(fields).context("Failed to serialise subscriber")? {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("Subscriber did not serialise to an object"),
    }
}

/// Add `email` to the newsletter, returning the new document id.
///
/// Syntax is checked before anything is sent to the store. A lookup on the
/// `email` field catches existing subscribers; the insert itself is
/// conditional on the (email-derived) document id, so two concurrent
/// sign-ups for the same address cannot both succeed.
#[tracing::instrument(name = "Subscribing to newsletter", skip(store, email))]
pub async fn subscribe(
    store: &DocumentStoreClient,
    email: String,
) -> Result<String, SubscribeError> {
    let email = SubscriberEmail::parse(email).map_err(SubscribeError::Validation)?;

    let existing = store
        .query_by_field(NEWSLETTER_COLLECTION, "email", email.as_ref())
        .await
        .context("Failed to look up existing subscribers")
        .map_err(SubscribeError::Unexpected)?;
    if !existing.is_empty() {
        return Err(SubscribeError::Duplicate);
    }

    let new_sub = NewSubscriber {
        email,
        subscribed_at: Utc::now(),
    };
    let id = subscriber_document_id(&new_sub.email);
    let fields = to_fields(&new_sub.fields()).map_err(SubscribeError::Unexpected)?;

    match store
        .create_document(NEWSLETTER_COLLECTION, &id, &fields)
        .await
    {
        Ok(()) => Ok(id),
        // lost a race against another sign-up for the same address
        Err(StoreError::AlreadyExists) => Err(SubscribeError::Duplicate),
        Err(e) => Err(SubscribeError::Unexpected(
            anyhow::Error::new(e).context("Failed to store new subscriber"),
        )),
    }
}

fn to_subscriber(doc: Document) -> Result<Subscriber, anyhow::Error> {
    let fields: SubscriberFields = serde_json::from_value(Value::Object(doc.fields))
        .with_context(|| format!("Malformed subscriber document {}", doc.id))?;
    Ok(Subscriber::from_fields(doc.id, fields))
}

/// Every subscriber, newest first (undated documents last). Documents that
/// cannot be read as subscribers are logged and skipped.
///
/// The `AdminSession` is the proof of authorisation; there is no way to call
/// this without going through the admin gate.
#[tracing::instrument(name = "Listing subscribers", skip(store, admin), fields(admin = %admin.email))]
pub async fn list_subscribers(
    store: &DocumentStoreClient,
    admin: &AdminSession,
) -> Result<Vec<Subscriber>, anyhow::Error> {
    let docs = store
        .list_documents(NEWSLETTER_COLLECTION)
        .await
        .context("Failed to list subscribers")?;

    let mut subscribers: Vec<Subscriber> = docs
        .into_iter()
        .filter_map(|doc| match to_subscriber(doc) {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Skipping subscriber document");
                None
            }
        })
        .collect();
    // `None` sorts before `Some`, so reversing puts undated documents last
    subscribers.sort_by(|a, b| b.subscribed_at.cmp(&a.subscribed_at));
    Ok(subscribers)
}

/// Irreversible; there is no undo
#[tracing::instrument(name = "Deleting subscriber", skip(store, admin), fields(admin = %admin.email))]
pub async fn delete_subscriber(
    store: &DocumentStoreClient,
    admin: &AdminSession,
    id: &str,
) -> Result<(), StoreError> {
    store.delete_document(NEWSLETTER_COLLECTION, id).await
}

/// Headline numbers for the admin panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberStats {
    pub total: usize,
    pub active: usize,
    /// Subscribed on or after the first of `today`'s month
    pub this_month: usize,
}

impl SubscriberStats {
    pub fn compute(
        subscribers: &[Subscriber],
        today: NaiveDate,
    ) -> Self {
        let month_start = today.with_day(1).unwrap_or(today);
        Self {
            total: subscribers.len(),
            active: subscribers
                .iter()
                .filter(|s| s.status == SubscriberStatus::Active)
                .count(),
            this_month: subscribers
                .iter()
                .filter_map(|s| s.subscribed_at)
                .filter(|at| at.date_naive() >= month_start)
                .count(),
        }
    }
}

/// One address per line, in list order
pub fn export_emails(subscribers: &[Subscriber]) -> String {
    subscribers
        .iter()
        .map(|s| s.email.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_file_name(today: NaiveDate) -> String {
    format!("newsletter_subscribers_{}.txt", today.format("%Y-%m-%d"))
}
