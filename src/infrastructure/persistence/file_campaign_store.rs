//! JSON-file implementation of the campaign store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::json;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, error, info};

use super::memory_campaign_store::{already_exists, not_found, sort_for_listing};
use crate::domain::entities::{Campaign, CampaignPatch, Link};
use crate::domain::repositories::CampaignStore;
use crate::error::AppError;

/// Pending change to the persisted document.
enum Change<'a> {
    Put(&'a Campaign),
    Remove(&'a str),
}

/// Campaign store persisted as a JSON array in a single file.
///
/// Reads are served from an in-memory mirror. A mutation:
///
/// 1. takes the per-id lock (serialises read-modify-write for that id only),
/// 2. computes the new campaign from the current one,
/// 3. under the writer lock, writes a full snapshot to a temp file and renames
///    it over the target, then publishes the change to the mirror.
///
/// If the disk write fails the mirror is left untouched, so a mutation is
/// either fully applied or not at all.
pub struct FileCampaignStore {
    path: PathBuf,
    campaigns: DashMap<String, Campaign>,
    id_locks: DashMap<String, Arc<Mutex<()>>>,
    writer: Mutex<()>,
}

impl FileCampaignStore {
    /// Opens the store, loading existing campaigns if the file exists.
    ///
    /// A missing file is treated as an empty store and created on first write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the file cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let campaigns = DashMap::new();
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) if contents.trim().is_empty() => {}
            Ok(contents) => {
                let records: Vec<Campaign> = serde_json::from_str(&contents).map_err(|e| {
                    error!(path = %path.display(), error = %e, "Corrupt campaign file");
                    AppError::internal(
                        "Failed to parse campaign file",
                        json!({ "path": path.display().to_string(), "reason": e.to_string() }),
                    )
                })?;
                for campaign in records {
                    campaigns.insert(campaign.id.clone(), campaign);
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Campaign file not found, starting empty");
            }
            Err(e) => return Err(io_error(&path, e)),
        }

        info!(path = %path.display(), campaigns = campaigns.len(), "File store opened");

        Ok(Self {
            path,
            campaigns,
            id_locks: DashMap::new(),
            writer: Mutex::new(()),
        })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Takes the per-id lock of an existing campaign.
    ///
    /// Lock entries exist only for stored campaigns: unknown ids fail before
    /// anything is inserted, and an entry created for a campaign that vanished
    /// meanwhile is removed again. If the entry was replaced while waiting
    /// (delete, then re-create), the stale lock is released and the new one taken.
    async fn lock_existing(&self, id: &str) -> Result<OwnedMutexGuard<()>, AppError> {
        loop {
            if !self.campaigns.contains_key(id) {
                return Err(not_found(id));
            }

            let lock = self.id_locks.entry(id.to_string()).or_default().clone();
            let guard = lock.clone().lock_owned().await;

            let current = self
                .id_locks
                .get(id)
                .is_some_and(|entry| Arc::ptr_eq(entry.value(), &lock));
            if !current {
                continue;
            }

            if !self.campaigns.contains_key(id) {
                self.release_lock_entry(id, &guard);
                return Err(not_found(id));
            }

            return Ok(guard);
        }
    }

    /// Drops the lock entry for `id` if it is still the one `guard` holds.
    fn release_lock_entry(&self, id: &str, guard: &OwnedMutexGuard<()>) {
        let held = OwnedMutexGuard::mutex(guard);
        self.id_locks.remove_if(id, |_, entry| Arc::ptr_eq(entry, held));
    }

    /// Persists a snapshot including `change`, then publishes it to the mirror.
    async fn write_through(&self, change: Change<'_>) -> Result<(), AppError> {
        let _writer = self.writer.lock().await;
        self.persist(change).await
    }

    /// Same as [`Self::write_through`]; the caller holds the writer lock.
    async fn persist(&self, change: Change<'_>) -> Result<(), AppError> {
        let changed_id = match &change {
            Change::Put(campaign) => campaign.id.as_str(),
            Change::Remove(id) => *id,
        };

        let mut snapshot: Vec<Campaign> = self
            .campaigns
            .iter()
            .filter(|c| c.key() != changed_id)
            .map(|c| c.value().clone())
            .collect();
        if let Change::Put(campaign) = &change {
            snapshot.push((*campaign).clone());
        }
        sort_for_listing(&mut snapshot);

        self.write_file(&snapshot).await?;

        match change {
            Change::Put(campaign) => {
                self.campaigns.insert(campaign.id.clone(), campaign.clone());
            }
            Change::Remove(id) => {
                self.campaigns.remove(id);
            }
        }

        Ok(())
    }

    async fn write_file(&self, snapshot: &[Campaign]) -> Result<(), AppError> {
        let body = serde_json::to_vec_pretty(snapshot).map_err(|e| {
            AppError::internal(
                "Failed to serialize campaigns",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, body)
            .await
            .map_err(|e| io_error(&tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        debug!(path = %self.path.display(), campaigns = snapshot.len(), "Campaign file written");
        Ok(())
    }

    async fn mutate<F>(&self, id: &str, f: F) -> Result<Campaign, AppError>
    where
        F: FnOnce(&mut Campaign) + Send,
    {
        let _guard = self.lock_existing(id).await?;

        let mut campaign = self
            .campaigns
            .get(id)
            .map(|c| c.value().clone())
            .ok_or_else(|| not_found(id))?;
        f(&mut campaign);

        self.write_through(Change::Put(&campaign)).await?;
        Ok(campaign)
    }
}

fn io_error(path: &Path, e: std::io::Error) -> AppError {
    error!(path = %path.display(), error = %e, "Campaign file I/O failed");
    AppError::internal(
        "Campaign file I/O failed",
        json!({ "path": path.display().to_string(), "reason": e.to_string() }),
    )
}

#[async_trait]
impl CampaignStore for FileCampaignStore {
    async fn get(&self, id: &str) -> Result<Option<Campaign>, AppError> {
        Ok(self.campaigns.get(id).map(|c| c.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Campaign>, AppError> {
        let mut campaigns: Vec<Campaign> =
            self.campaigns.iter().map(|c| c.value().clone()).collect();
        sort_for_listing(&mut campaigns);
        Ok(campaigns)
    }

    async fn create(&self, campaign: Campaign) -> Result<Campaign, AppError> {
        // No per-id lock: the id has no campaign yet, and the writer lock
        // serialises the existence check with every other write.
        let _writer = self.writer.lock().await;

        if self.campaigns.contains_key(&campaign.id) {
            return Err(already_exists(&campaign.id));
        }

        self.persist(Change::Put(&campaign)).await?;
        Ok(campaign)
    }

    async fn update(&self, id: &str, patch: CampaignPatch) -> Result<Campaign, AppError> {
        self.mutate(id, |c| c.apply(&patch)).await
    }

    async fn add_link(&self, id: &str, link: Link) -> Result<Campaign, AppError> {
        self.mutate(id, |c| c.links.push(link)).await
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let guard = self.lock_existing(id).await?;

        self.write_through(Change::Remove(id)).await?;
        self.release_lock_entry(id, &guard);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => tokio::fs::metadata(dir).await.is_ok(),
            _ => true,
        }
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
