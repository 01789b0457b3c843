//! In-memory test doubles for core unit tests.

use crate::domain::{Application, ApplicationId, ApplicationStatus, NewApplication};
use crate::error::Result;
use crate::port::ApplicationRepository;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::{Mutex, Notify};

/// Vec-backed repository. Insertion order stands in for SQLite's rowid.
#[derive(Default)]
pub struct InMemoryApplicationRepository {
    rows: Mutex<Vec<Application>>,
    next_id: AtomicU64,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn insert(&self, application: &NewApplication) -> Result<ApplicationId> {
        let id = format!("app-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.rows
            .lock()
            .await
            .push(application.clone().into_application(id.clone()));
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Application>> {
        Ok(self.rows.lock().await.iter().find(|a| a.id == id).cloned())
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Application>> {
        let rows = self.rows.lock().await;
        let mut owned: Vec<(usize, Application)> = rows
            .iter()
            .enumerate()
            .filter(|(_, a)| a.owner == owner)
            .map(|(seq, a)| (seq, a.clone()))
            .collect();
        owned.sort_by(|(sa, a), (sb, b)| {
            b.date_applied
                .cmp(&a.date_applied)
                .then_with(|| sb.cmp(sa))
        });
        Ok(owned.into_iter().map(|(_, a)| a).collect())
    }

    async fn update_status(&self, id: &str, status: ApplicationStatus) -> Result<bool> {
        let mut rows = self.rows.lock().await;
        match rows.iter_mut().find(|a| a.id == id) {
            Some(app) => {
                app.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|a| a.id != id);
        Ok(rows.len() != before)
    }
}

/// Wraps the in-memory repository and can hold one `list_by_owner` call
/// after it has read its snapshot, until the test releases it.
#[derive(Default)]
pub struct PausingRepository {
    pub inner: InMemoryApplicationRepository,
    armed: AtomicBool,
    paused: Notify,
    resume: Notify,
}

impl PausingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold the next list read
    pub fn pause_next_list(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Resolves once the held read has taken its snapshot
    pub async fn wait_until_paused(&self) {
        self.paused.notified().await;
    }

    pub fn resume(&self) {
        self.resume.notify_one();
    }
}

#[async_trait]
impl ApplicationRepository for PausingRepository {
    async fn insert(&self, application: &NewApplication) -> Result<ApplicationId> {
        self.inner.insert(application).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Application>> {
        self.inner.find_by_id(id).await
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Application>> {
        let snapshot = self.inner.list_by_owner(owner).await?;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.paused.notify_one();
            self.resume.notified().await;
        }
        Ok(snapshot)
    }

    async fn update_status(&self, id: &str, status: ApplicationStatus) -> Result<bool> {
        self.inner.update_status(id, status).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.inner.delete(id).await
    }
}
