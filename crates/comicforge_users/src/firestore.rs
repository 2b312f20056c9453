//! Firestore REST implementation of the user directory.
//!
//! Documents live in the `users` collection, keyed by the provider uid and
//! using camelCase field names so existing records stay readable.

use crate::{UserDirectory, UserProfile, UserRecord, UserStatus};
use chrono::{DateTime, Utc};
use comicforge_error::{UsersError, UsersErrorKind};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Base URL for the Firestore REST API.
const API_BASE: &str = "https://firestore.googleapis.com/v1";

/// Collection holding user documents.
const USERS_COLLECTION: &str = "users";

/// One Firestore value. Only the variants the user schema uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Value {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    string_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    timestamp_value: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    null_value: Option<()>,
}

impl Value {
    fn string(s: impl Into<String>) -> Self {
        Self {
            string_value: Some(s.into()),
            ..Self::default()
        }
    }

    fn timestamp(t: DateTime<Utc>) -> Self {
        Self {
            timestamp_value: Some(t),
            ..Self::default()
        }
    }

    fn null() -> Self {
        Self {
            null_value: Some(()),
            ..Self::default()
        }
    }
}

/// A Firestore document: name plus a field map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Document {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    name: Option<String>,
    #[serde(default)]
    fields: HashMap<String, Value>,
}

/// Response shape of a collection list.
#[derive(Debug, Clone, Default, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
}

/// Map a record into document fields.
pub(crate) fn to_fields(record: &UserRecord) -> HashMap<String, Value> {
    let mut fields = HashMap::new();
    fields.insert("email".to_string(), Value::string(&record.email));
    if let Some(name) = &record.display_name {
        fields.insert("displayName".to_string(), Value::string(name));
    }
    if let Some(url) = &record.photo_url {
        fields.insert("photoURL".to_string(), Value::string(url));
    }
    fields.insert("status".to_string(), Value::string(record.status.as_str()));
    fields.insert("createdAt".to_string(), Value::timestamp(record.created_at));
    if let Some(at) = record.approved_at {
        fields.insert("approvedAt".to_string(), Value::timestamp(at));
    }
    if let Some(by) = &record.approved_by {
        fields.insert("approvedBy".to_string(), Value::string(by));
    }
    if let Some(at) = record.rejected_at {
        fields.insert("rejectedAt".to_string(), Value::timestamp(at));
    }
    if let Some(by) = &record.rejected_by {
        fields.insert("rejectedBy".to_string(), Value::string(by));
    }
    fields
}

/// Map a document back into a record.
pub(crate) fn from_document(document: &Document) -> Result<UserRecord, UsersError> {
    let uid = document
        .name
        .as_deref()
        .and_then(|name| name.rsplit('/').next())
        .map(str::to_string)
        .ok_or_else(|| UsersError::new(UsersErrorKind::Decode("document has no name".to_string())))?;

    let string = |key: &str| -> Option<String> {
        document.fields.get(key).and_then(|v| v.string_value.clone())
    };
    let timestamp = |key: &str| -> Option<DateTime<Utc>> {
        document.fields.get(key).and_then(|v| v.timestamp_value)
    };

    let email = string("email")
        .ok_or_else(|| UsersError::new(UsersErrorKind::Decode(format!("{}: missing email", uid))))?;
    let status: UserStatus = string("status")
        .ok_or_else(|| UsersError::new(UsersErrorKind::Decode(format!("{}: missing status", uid))))?
        .parse()
        .map_err(|e: String| UsersError::new(UsersErrorKind::Decode(format!("{}: {}", uid, e))))?;
    let created_at = timestamp("createdAt").unwrap_or_else(Utc::now);

    Ok(UserRecord {
        uid,
        email,
        display_name: string("displayName"),
        photo_url: string("photoURL"),
        status,
        created_at,
        approved_at: timestamp("approvedAt"),
        approved_by: string("approvedBy"),
        rejected_at: timestamp("rejectedAt"),
        rejected_by: string("rejectedBy"),
    })
}

/// [`UserDirectory`] backed by the Firestore REST API.
///
/// # Examples
///
/// ```no_run
/// use comicforge_users::{FirestoreUserDirectory, UserDirectory};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let directory = FirestoreUserDirectory::new("my-project", "API_KEY");
/// for user in directory.list_pending().await? {
///     println!("{} ({})", user.email, user.uid);
/// }
/// # Ok(())
/// # }
/// ```
pub struct FirestoreUserDirectory {
    http: reqwest::Client,
    project_id: String,
    api_key: String,
}

impl std::fmt::Debug for FirestoreUserDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreUserDirectory")
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

impl FirestoreUserDirectory {
    /// Create a directory for a project, authenticating with an API key.
    pub fn new(project_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            project_id: project_id.into(),
            api_key: api_key.into(),
        }
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            API_BASE, self.project_id, USERS_COLLECTION
        )
    }

    fn document_url(&self, uid: &str) -> String {
        format!("{}/{}", self.collection_url(), uid)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, UsersError> {
        let response = request
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| UsersError::new(UsersErrorKind::Transport(e.to_string())))?;
        Ok(response)
    }

    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, UsersError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(UsersError::new(UsersErrorKind::Store(format!(
            "{}: {}",
            status, body
        ))))
    }

    /// Patch named fields on a document, leaving the rest untouched.
    async fn patch_fields(
        &self,
        uid: &str,
        fields: HashMap<String, Value>,
    ) -> Result<(), UsersError> {
        let mut request = self.http.patch(self.document_url(uid));
        for key in fields.keys() {
            request = request.query(&[("updateMask.fieldPaths", key.as_str())]);
        }
        // currentDocument.exists makes the patch fail on a missing record
        // instead of silently creating one.
        request = request.query(&[("currentDocument.exists", "true")]);

        let document = Document {
            name: None,
            fields,
        };
        let response = self.send(request.json(&document)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(UsersError::new(UsersErrorKind::NotFound(uid.to_string())));
        }
        Self::expect_success(response).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserDirectory for FirestoreUserDirectory {
    #[instrument(skip(self))]
    async fn get(&self, uid: &str) -> Result<Option<UserRecord>, UsersError> {
        let response = self.send(self.http.get(self.document_url(uid))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::expect_success(response).await?;
        let document: Document = response
            .json()
            .await
            .map_err(|e| UsersError::new(UsersErrorKind::Decode(e.to_string())))?;
        from_document(&document).map(Some)
    }

    #[instrument(skip(self, profile), fields(uid = %profile.uid))]
    async fn get_or_create(&self, profile: &UserProfile) -> Result<UserRecord, UsersError> {
        if let Some(existing) = self.get(&profile.uid).await? {
            return Ok(existing);
        }

        let record = UserRecord::pending(profile, Utc::now());
        let document = Document {
            name: None,
            fields: to_fields(&record),
        };
        let request = self
            .http
            .post(self.collection_url())
            .query(&[("documentId", profile.uid.as_str())])
            .json(&document);
        Self::expect_success(self.send(request).await?).await?;

        debug!(uid = %record.uid, "Created pending user record");
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<UserRecord>, UsersError> {
        let request = self
            .http
            .get(self.collection_url())
            .query(&[("pageSize", "300")]);
        let response = Self::expect_success(self.send(request).await?).await?;
        let list: ListResponse = response
            .json()
            .await
            .map_err(|e| UsersError::new(UsersErrorKind::Decode(e.to_string())))?;

        let mut records = Vec::with_capacity(list.documents.len());
        for document in &list.documents {
            records.push(from_document(document)?);
        }
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }

    async fn list_pending(&self) -> Result<Vec<UserRecord>, UsersError> {
        let mut records = self.list().await?;
        records.retain(|r| r.status == UserStatus::Pending);
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn approve(&self, uid: &str, actor: &str) -> Result<(), UsersError> {
        let mut fields = HashMap::new();
        fields.insert("status".to_string(), Value::string(UserStatus::Approved.as_str()));
        fields.insert("approvedAt".to_string(), Value::timestamp(Utc::now()));
        fields.insert("approvedBy".to_string(), Value::string(actor));
        self.patch_fields(uid, fields).await
    }

    #[instrument(skip(self))]
    async fn reject(&self, uid: &str, actor: &str) -> Result<(), UsersError> {
        let mut fields = HashMap::new();
        fields.insert("status".to_string(), Value::string(UserStatus::Rejected.as_str()));
        fields.insert("rejectedAt".to_string(), Value::timestamp(Utc::now()));
        fields.insert("rejectedBy".to_string(), Value::string(actor));
        self.patch_fields(uid, fields).await
    }

    #[instrument(skip(self))]
    async fn reset(&self, uid: &str) -> Result<(), UsersError> {
        let mut fields = HashMap::new();
        fields.insert("status".to_string(), Value::string(UserStatus::Pending.as_str()));
        fields.insert("approvedAt".to_string(), Value::null());
        fields.insert("approvedBy".to_string(), Value::null());
        fields.insert("rejectedAt".to_string(), Value::null());
        fields.insert("rejectedBy".to_string(), Value::null());
        self.patch_fields(uid, fields).await
    }
}
