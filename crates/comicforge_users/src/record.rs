//! User record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Approval status of a user.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Signed in, awaiting an admin decision
    #[display("pending")]
    Pending,
    /// Approved for generation
    #[display("approved")]
    Approved,
    /// Rejected by an admin
    #[display("rejected")]
    Rejected,
}

impl UserStatus {
    /// String form stored in the document store.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "pending",
            UserStatus::Approved => "approved",
            UserStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(UserStatus::Pending),
            "approved" => Ok(UserStatus::Approved),
            "rejected" => Ok(UserStatus::Rejected),
            _ => Err(format!("Unknown user status: {}", s)),
        }
    }
}

/// Identity fields supplied by the sign-in provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque user identifier
    pub uid: String,
    /// Account email
    pub email: String,
    /// Display name, if the provider supplies one
    pub display_name: Option<String>,
    /// Avatar URL, if the provider supplies one
    pub photo_url: Option<String>,
}

/// One user document.
///
/// Lifecycle is owned by the document store: created `Pending` on first
/// sign-in, then patched by admin approve/reject/reset actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Opaque user identifier (the document id)
    pub uid: String,
    /// Account email
    pub email: String,
    /// Display name, if any
    pub display_name: Option<String>,
    /// Avatar URL, if any
    pub photo_url: Option<String>,
    /// Approval status
    pub status: UserStatus,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the user was approved, if ever
    pub approved_at: Option<DateTime<Utc>>,
    /// Who approved the user
    pub approved_by: Option<String>,
    /// When the user was rejected, if ever
    pub rejected_at: Option<DateTime<Utc>>,
    /// Who rejected the user
    pub rejected_by: Option<String>,
}

impl UserRecord {
    /// Create a fresh pending record for a first sign-in.
    pub fn pending(profile: &UserProfile, created_at: DateTime<Utc>) -> Self {
        Self {
            uid: profile.uid.clone(),
            email: profile.email.clone(),
            display_name: profile.display_name.clone(),
            photo_url: profile.photo_url.clone(),
            status: UserStatus::Pending,
            created_at,
            approved_at: None,
            approved_by: None,
            rejected_at: None,
            rejected_by: None,
        }
    }
}
