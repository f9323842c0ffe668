use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::SubscriberEmail;

/// Where sign-ups from the public form are attributed
pub const WEBSITE_SOURCE: &str = "website";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberStatus {
    #[default]
    Active,
    Inactive,
}

/// A subscriber document as stored in the newsletter collection.
///
/// `email` is kept as a plain string: documents are read back as-is, without
/// re-validating what an earlier version of the site (or a human with console
/// access) wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub subscribed_at: Option<DateTime<Utc>>,
    pub status: SubscriberStatus,
    pub source: String,
}

/// Document fields, in the collection's camelCase naming
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberFields {
    pub email: String,
    #[serde(default)]
    pub subscribed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: SubscriberStatus,
    #[serde(default)]
    pub source: String,
}

impl Subscriber {
    pub fn from_fields(
        id: String,
        fields: SubscriberFields,
    ) -> Self {
        Self {
            id,
            email: fields.email,
            subscribed_at: fields.subscribed_at,
            status: fields.status,
            source: fields.source,
        }
    }
}

/// A subscriber that has passed validation but is not stored yet
pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub subscribed_at: DateTime<Utc>,
}

impl NewSubscriber {
    pub fn fields(&self) -> SubscriberFields {
        SubscriberFields {
            email: self.email.as_ref().to_string(),
            subscribed_at: Some(self.subscribed_at),
            status: SubscriberStatus::Active,
            source: WEBSITE_SOURCE.to_string(),
        }
    }
}
