//! In-memory user directory for tests and offline use.

use crate::{UserDirectory, UserProfile, UserRecord, UserStatus};
use chrono::Utc;
use comicforge_error::{UsersError, UsersErrorKind};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Map-backed [`UserDirectory`].
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    records: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    async fn patch<F>(&self, uid: &str, apply: F) -> Result<(), UsersError>
    where
        F: FnOnce(&mut UserRecord),
    {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(uid)
            .ok_or_else(|| UsersError::new(UsersErrorKind::NotFound(uid.to_string())))?;
        apply(record);
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn get(&self, uid: &str) -> Result<Option<UserRecord>, UsersError> {
        Ok(self.records.read().await.get(uid).cloned())
    }

    async fn get_or_create(&self, profile: &UserProfile) -> Result<UserRecord, UsersError> {
        let mut records = self.records.write().await;
        let record = records
            .entry(profile.uid.clone())
            .or_insert_with(|| UserRecord::pending(profile, Utc::now()));
        Ok(record.clone())
    }

    async fn list(&self) -> Result<Vec<UserRecord>, UsersError> {
        let mut records: Vec<UserRecord> = self.records.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }

    async fn list_pending(&self) -> Result<Vec<UserRecord>, UsersError> {
        let mut records = self.list().await?;
        records.retain(|r| r.status == UserStatus::Pending);
        Ok(records)
    }

    async fn approve(&self, uid: &str, actor: &str) -> Result<(), UsersError> {
        self.patch(uid, |record| {
            record.status = UserStatus::Approved;
            record.approved_at = Some(Utc::now());
            record.approved_by = Some(actor.to_string());
        })
        .await
    }

    async fn reject(&self, uid: &str, actor: &str) -> Result<(), UsersError> {
        self.patch(uid, |record| {
            record.status = UserStatus::Rejected;
            record.rejected_at = Some(Utc::now());
            record.rejected_by = Some(actor.to_string());
        })
        .await
    }

    async fn reset(&self, uid: &str) -> Result<(), UsersError> {
        self.patch(uid, |record| {
            record.status = UserStatus::Pending;
            record.approved_at = None;
            record.approved_by = None;
            record.rejected_at = None;
            record.rejected_by = None;
        })
        .await
    }
}
