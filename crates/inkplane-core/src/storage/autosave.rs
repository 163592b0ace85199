//! Autosave: revision-driven periodic persistence.
//!
//! The scene bumps its revision counter after every mutation; the manager
//! observes that counter, turns drift into a dirty flag, and saves once the
//! configured interval has elapsed. Save failures are logged and non-fatal —
//! drawing continues from in-memory state.

use crate::scene::Scene;
use crate::snapshot::SceneSnapshot;
use crate::storage::{Storage, StorageResult};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default autosave interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Reserved id for the most recently edited scene, used for
/// restore-on-startup.
pub const LAST_SCENE_KEY: &str = "__last_scene__";

/// Manages automatic scene persistence against a storage backend.
pub struct AutosaveManager<S: Storage> {
    storage: Arc<S>,
    interval: Duration,
    last_save: Option<Instant>,
    dirty: bool,
    /// Scene revision seen at the last `observe` call.
    last_revision: u64,
    scene_id: Option<String>,
}

impl<S: Storage> AutosaveManager<S> {
    /// Create a manager over a storage backend.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_save: None,
            dirty: false,
            last_revision: 0,
            scene_id: None,
        }
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Compare the scene's revision against the last one seen and mark dirty
    /// on drift. Call once per event-loop turn.
    pub fn observe(&mut self, scene: &Scene) {
        if scene.revision() != self.last_revision {
            self.last_revision = scene.revision();
            self.dirty = true;
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_scene_id(&mut self, id: Option<String>) {
        self.scene_id = id;
    }

    pub fn scene_id(&self) -> Option<&str> {
        self.scene_id.as_deref()
    }

    /// Whether a save is due (dirty and the interval has elapsed).
    pub fn should_save(&self) -> bool {
        if !self.dirty {
            return false;
        }
        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Save if due. Returns true when a save was performed.
    pub async fn maybe_save(&mut self, scene: &Scene) -> StorageResult<bool> {
        if !self.should_save() {
            return Ok(false);
        }
        self.save(scene).await?;
        Ok(true)
    }

    /// Save the scene now, regardless of interval.
    pub async fn save(&mut self, scene: &Scene) -> StorageResult<()> {
        let snapshot = scene.save_snapshot();
        let id = self.scene_id.clone().unwrap_or_else(|| LAST_SCENE_KEY.to_string());

        self.storage.save(&id, &snapshot).await?;
        if id != LAST_SCENE_KEY {
            // Also track the last edited scene for restore-on-startup.
            self.storage.save(LAST_SCENE_KEY, &snapshot).await?;
        }

        self.last_save = Some(Instant::now());
        self.last_revision = scene.revision();
        self.dirty = false;
        Ok(())
    }

    /// Load a snapshot by id.
    pub async fn load(&mut self, id: &str) -> StorageResult<SceneSnapshot> {
        let snapshot = self.storage.load(id).await?;
        self.scene_id = Some(id.to_string());
        self.dirty = false;
        self.last_save = Some(Instant::now());
        Ok(snapshot)
    }

    /// Restore the last edited scene, if any. Load failures (missing or
    /// corrupt) are logged and yield None; the caller starts fresh.
    pub async fn load_last(&mut self) -> Option<SceneSnapshot> {
        match self.storage.load(LAST_SCENE_KEY).await {
            Ok(snapshot) => {
                self.dirty = false;
                self.last_save = Some(Instant::now());
                Some(snapshot)
            }
            Err(e) => {
                log::warn!("no restorable scene: {e}");
                None
            }
        }
    }

    /// List stored scene ids, hiding the reserved last-scene slot.
    pub async fn list_scenes(&self) -> StorageResult<Vec<String>> {
        let mut ids = self.storage.list().await?;
        ids.retain(|id| id != LAST_SCENE_KEY);
        Ok(ids)
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}
