//! Per-session result cache.
//!
//! Rules:
//! - create: `create()` or the first successful generation without a session id
//! - overwrite: each successful generation replaces the profile and the text
//!   for that document kind; failed generations never reach the store
//! - expire: an entry untouched for `ttl` reads as absent and is removed on
//!   access; every write purges all expired entries
//!
//! Values are cloned out on read so no `DashMap` guard outlives a call.

pub mod handlers;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::models::{CompanyInfo, DocumentKind, UserProfile};

/// Everything cached for one session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEntry {
    pub profile: Option<UserProfile>,
    pub company: Option<CompanyInfo>,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionEntry {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            profile: None,
            company: None,
            resume: None,
            cover_letter: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Cached text for a document kind.
    pub fn document(&self, kind: DocumentKind) -> Option<&str> {
        match kind {
            DocumentKind::Resume => self.resume.as_deref(),
            DocumentKind::CoverLetter => self.cover_letter.as_deref(),
        }
    }
}

/// Concurrent session store shared through `AppState`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<DashMap<Uuid, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn from_secs(ttl_secs: u64) -> Self {
        let secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self::new(Duration::try_seconds(secs).unwrap_or(Duration::MAX))
    }

    fn is_expired(&self, entry: &SessionEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.updated_at) >= self.ttl
    }

    /// Creates an empty session and returns its id.
    pub fn create(&self) -> Uuid {
        self.purge_expired();
        let id = Uuid::new_v4();
        self.inner.insert(id, SessionEntry::new(Utc::now()));
        debug!(session_id = %id, "session created");
        id
    }

    /// Cloned snapshot of a live session. Expired entries are removed.
    pub fn get(&self, id: Uuid) -> Option<SessionEntry> {
        let now = Utc::now();
        let entry = self.inner.get(&id).map(|r| r.value().clone())?;

        if !self.is_expired(&entry, now) {
            return Some(entry);
        }
        if self.evict_if_expired(id, now) {
            return None;
        }
        // Refreshed by a concurrent write after the snapshot was taken.
        self.inner.get(&id).map(|r| r.value().clone())
    }

    /// Removes `id` only if it is still expired at `now`, re-checked under the
    /// shard lock.
    fn evict_if_expired(&self, id: Uuid, now: DateTime<Utc>) -> bool {
        let evicted = self
            .inner
            .remove_if(&id, |_, entry| self.is_expired(entry, now))
            .is_some();
        if evicted {
            debug!(session_id = %id, "session expired");
        }
        evicted
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    /// Records a generated resume, creating the session when needed.
    pub fn store_resume(&self, id: Uuid, profile: UserProfile, text: String) {
        self.write(id, |entry| {
            entry.profile = Some(profile);
            entry.resume = Some(text);
        });
    }

    /// Records a generated cover letter, creating the session when needed.
    pub fn store_cover_letter(
        &self,
        id: Uuid,
        profile: UserProfile,
        company: CompanyInfo,
        text: String,
    ) {
        self.write(id, |entry| {
            entry.profile = Some(profile);
            entry.company = Some(company);
            entry.cover_letter = Some(text);
        });
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.inner.remove(&id).is_some()
    }

    /// Drops every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.inner.len();
        self.inner.retain(|_, entry| !self.is_expired(entry, now));
        before.saturating_sub(self.inner.len())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn write(&self, id: Uuid, update: impl FnOnce(&mut SessionEntry)) {
        // Purge first: retain() locks every shard and must not run under a guard.
        self.purge_expired();

        let now = Utc::now();
        let mut entry = self
            .inner
            .entry(id)
            .or_insert_with(|| SessionEntry::new(now));
        update(entry.value_mut());
        entry.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::fixtures::{company, complete_profile};

    #[test]
    fn test_create_then_get_returns_empty_entry() {
        let store = SessionStore::from_secs(3600);
        let id = store.create();

        let entry = store.get(id).unwrap();
        assert!(entry.profile.is_none());
        assert!(entry.document(DocumentKind::Resume).is_none());
    }

    #[test]
    fn test_unknown_session_is_absent() {
        let store = SessionStore::from_secs(3600);
        assert!(store.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_store_resume_creates_missing_session() {
        let store = SessionStore::from_secs(3600);
        let id = Uuid::new_v4();
        store.store_resume(id, complete_profile(), "SKILLS\nRust".to_string());

        let entry = store.get(id).unwrap();
        assert_eq!(entry.document(DocumentKind::Resume), Some("SKILLS\nRust"));
        assert_eq!(entry.profile.unwrap().name, "Jane Doe");
    }

    #[test]
    fn test_second_generation_overwrites_only_its_kind() {
        let store = SessionStore::from_secs(3600);
        let id = store.create();

        store.store_resume(id, complete_profile(), "first".to_string());
        store.store_cover_letter(id, complete_profile(), company(), "letter".to_string());
        store.store_resume(id, complete_profile(), "second".to_string());

        let entry = store.get(id).unwrap();
        assert_eq!(entry.document(DocumentKind::Resume), Some("second"));
        assert_eq!(entry.document(DocumentKind::CoverLetter), Some("letter"));
        assert_eq!(entry.company.unwrap().company_name, "Initech");
        assert!(entry.updated_at >= entry.created_at);
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let store = SessionStore::from_secs(0);
        let id = store.create();

        assert!(store.get(id).is_none());
        assert!(store.is_empty(), "expired entry should be removed on access");
    }

    #[test]
    fn test_eviction_rechecks_refreshed_entry() {
        let store = SessionStore::from_secs(60);
        let id = store.create();
        let stale_at = Utc::now() + Duration::try_seconds(120).unwrap();

        store.store_resume(id, complete_profile(), "fresh".to_string());
        assert!(!store.evict_if_expired(id, Utc::now()));
        assert_eq!(
            store.get(id).unwrap().document(DocumentKind::Resume),
            Some("fresh")
        );

        assert!(store.evict_if_expired(id, stale_at));
        assert!(store.get(id).is_none());
    }

    #[test]
    fn test_write_purges_expired_entries() {
        let store = SessionStore::from_secs(0);
        store.create();
        store.create();

        let id = Uuid::new_v4();
        store.store_resume(id, complete_profile(), "text".to_string());
        // Only the entry just written survives the purge.
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove() {
        let store = SessionStore::from_secs(3600);
        let id = store.create();
        assert!(store.remove(id));
        assert!(!store.remove(id));
        assert!(!store.contains(id));
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let store = SessionStore::from_secs(u64::MAX);
        let id = store.create();
        assert!(store.contains(id));
    }
}
