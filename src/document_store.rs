use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use reqwest::Response;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// A document as returned by the store: a server-assigned id plus a bag of
/// JSON fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Serialize)]
struct NewDocument<'a> {
    fields: &'a Map<String, Value>,
}

#[derive(Serialize)]
struct FieldQuery<'a> {
    field: &'a str,
    op: &'static str,
    value: &'a str,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Document already exists")]
    AlreadyExists,
    #[error("Document not found")]
    NotFound,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// HTTP client for the managed document database. Only the handful of calls
/// the site needs are wrapped; collections are addressed by name.
///
/// Like any `reqwest::Client`, this should be built once and shared (via
/// `web::Data`) so that connections are pooled.
pub struct DocumentStoreClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl DocumentStoreClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build document store http client")?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn documents_url(
        &self,
        collection: &str,
    ) -> String {
        format!(
            "{}/collections/{}/documents",
            self.base_url,
            urlencoding::encode(collection)
        )
    }

    /// Insert a document and let the store pick its id. Subscriptions use
    /// `create_document` instead, since they need a duplicate-safe id.
    #[tracing::instrument(name = "Adding document", skip(self, fields))]
    pub async fn add_document(
        &self,
        collection: &str,
        fields: &Map<String, Value>,
    ) -> Result<String, StoreError> {
        let resp = self
            .http_client
            .post(self.documents_url(collection))
            .bearer_auth(self.api_key.expose_secret())
            .json(&NewDocument { fields })
            .send()
            .await
            .context("Failed to reach the document store")?;
        let doc: Document = check_status(resp)?
            .json()
            .await
            .context("Failed to decode the created document")?;
        Ok(doc.id)
    }

    /// Insert a document under a caller-chosen id, failing with
    /// `StoreError::AlreadyExists` if the id is taken. The existence check and
    /// the write are a single operation on the store's side.
    #[tracing::instrument(name = "Creating document", skip(self, fields))]
    pub async fn create_document(
        &self,
        collection: &str,
        id: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), StoreError> {
        let resp = self
            .http_client
            .post(self.documents_url(collection))
            .query(&[("documentId", id)])
            .bearer_auth(self.api_key.expose_secret())
            .json(&NewDocument { fields })
            .send()
            .await
            .context("Failed to reach the document store")?;
        check_status(resp)?;
        Ok(())
    }

    /// All documents whose `field` equals `value`
    #[tracing::instrument(name = "Querying documents", skip(self, value))]
    pub async fn query_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let resp = self
            .http_client
            .post(format!(
                "{}/collections/{}:query",
                self.base_url,
                urlencoding::encode(collection)
            ))
            .bearer_auth(self.api_key.expose_secret())
            .json(&FieldQuery {
                field,
                op: "==",
                value,
            })
            .send()
            .await
            .context("Failed to reach the document store")?;
        let list: DocumentList = check_status(resp)?
            .json()
            .await
            .context("Failed to decode query results")?;
        Ok(list.documents)
    }

    #[tracing::instrument(name = "Listing documents", skip(self))]
    pub async fn list_documents(
        &self,
        collection: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let resp = self
            .http_client
            .get(self.documents_url(collection))
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .context("Failed to reach the document store")?;
        let list: DocumentList = check_status(resp)?
            .json()
            .await
            .context("Failed to decode document list")?;
        Ok(list.documents)
    }

    /// Irreversible
    #[tracing::instrument(name = "Deleting document", skip(self))]
    pub async fn delete_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<(), StoreError> {
        let resp = self
            .http_client
            .delete(format!(
                "{}/{}",
                self.documents_url(collection),
                urlencoding::encode(id)
            ))
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .context("Failed to reach the document store")?;
        check_status(resp)?;
        Ok(())
    }
}

fn check_status(resp: Response) -> Result<Response, StoreError> {
    match resp.status() {
        StatusCode::CONFLICT => Err(StoreError::AlreadyExists),
        StatusCode::NOT_FOUND => Err(StoreError::NotFound),
        _ => Ok(resp
            .error_for_status()
            .context("Document store returned an error")?),
    }
}
