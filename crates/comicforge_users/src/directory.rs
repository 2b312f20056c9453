//! Pluggable user directory trait.

use crate::{UserProfile, UserRecord};
use comicforge_error::UsersError;

/// Directory of user records keyed by an opaque identifier.
///
/// Mirrors the document-store surface the access gate needs: create-if-
/// absent, read-one, read-all, and field-patch operations for the admin
/// approve/reject/reset actions.
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    /// Read one record, if it exists.
    async fn get(&self, uid: &str) -> Result<Option<UserRecord>, UsersError>;

    /// Read the record for a sign-in, creating a fresh `Pending` one on the
    /// first visit.
    async fn get_or_create(&self, profile: &UserProfile) -> Result<UserRecord, UsersError>;

    /// Read all records.
    async fn list(&self) -> Result<Vec<UserRecord>, UsersError>;

    /// Read all records awaiting a decision.
    async fn list_pending(&self) -> Result<Vec<UserRecord>, UsersError>;

    /// Mark a user approved, stamping the decision time and actor.
    async fn approve(&self, uid: &str, actor: &str) -> Result<(), UsersError>;

    /// Mark a user rejected, stamping the decision time and actor.
    async fn reject(&self, uid: &str, actor: &str) -> Result<(), UsersError>;

    /// Return a user to `Pending`, clearing any previous decision.
    async fn reset(&self, uid: &str) -> Result<(), UsersError>;
}
