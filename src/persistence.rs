//! Persistence service: saved-document format, sinks, export and autosave.
//!
//! DESIGN
//! ======
//! The persistence contract is the JSON object `{slides, presentationMeta}`
//! ([`SavedPresentation`]). Sinks receive a fully owned copy, so they never
//! hold a lock on the live store while doing I/O.
//!
//! The autosave task ticks on a fixed interval. Each tick snapshots the
//! document under a read lock, releases the lock, then hands the snapshot to
//! the sink. Mutations take the write lock and run to completion, so a tick
//! never observes a half-applied edit.
//!
//! ERROR HANDLING
//! ==============
//! A failed periodic write is logged and retried on the next tick with fresh
//! state. The final write made by [`AutosaveHandle::shutdown`] returns its
//! error to the caller.
//! Documents holding non-finite numbers are refused before anything is
//! written, so a sink never produces a file that cannot be reopened.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::doc::{PresentationMeta, Slide};
use crate::error::{DeckError, SnapshotError};
use crate::history;
use crate::store::PresentationStore;

/// The store as shared between editing code and the autosave task.
pub type SharedStore = Arc<RwLock<PresentationStore>>;

/// Shortest period the autosave task will tick at.
pub const MIN_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(1);

// =============================================================================
// DOCUMENT
// =============================================================================

/// Everything a persistence collaborator needs to restore a presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPresentation {
    pub slides: Vec<Slide>,
    #[serde(default)]
    pub presentation_meta: PresentationMeta,
}

impl SavedPresentation {
    /// # Errors
    ///
    /// Returns the first element number that JSON cannot represent.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        history::validate(&self.slides)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Fails on non-finite numbers or serialization errors.
    pub fn to_json_pretty(&self) -> Result<String, DeckError> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Read a saved presentation from `path`.
///
/// # Errors
///
/// Returns [`DeckError::Io`] if the file cannot be read and
/// [`DeckError::Json`] if it is not a saved presentation.
pub async fn load_saved(path: &Path) -> Result<SavedPresentation, DeckError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

/// Pretty JSON of the slide array, as handed to the export collaborator.
///
/// # Errors
///
/// Fails on non-finite numbers or serialization errors.
pub fn export_slides_json(slides: &[Slide]) -> Result<String, DeckError> {
    history::validate(slides)?;
    Ok(serde_json::to_string_pretty(slides)?)
}

// =============================================================================
// SINKS
// =============================================================================

/// Destination for saved presentations. Enables swapping storage in tests.
#[async_trait::async_trait]
pub trait PresentationSink: Send + Sync {
    /// Persist one snapshot of the document.
    ///
    /// # Errors
    ///
    /// Returns a [`DeckError`] if the document is invalid or the write fails.
    async fn save(&self, doc: &SavedPresentation) -> Result<(), DeckError>;
}

/// Writes pretty JSON to a local file, replacing it atomically.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut raw = self.path.clone().into_os_string();
        raw.push(".tmp");
        PathBuf::from(raw)
    }
}

#[async_trait::async_trait]
impl PresentationSink for FileSink {
    async fn save(&self, doc: &SavedPresentation) -> Result<(), DeckError> {
        let json = doc.to_json_pretty()?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), slides = doc.slides.len(), "presentation written");
        Ok(())
    }
}

/// Keeps the most recent saves in memory.
#[derive(Debug)]
pub struct MemorySink {
    saves: Mutex<Vec<SavedPresentation>>,
    capacity: usize,
}

impl MemorySink {
    /// A sink that keeps the last `capacity` saves (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { saves: Mutex::new(Vec::new()), capacity: capacity.max(1) }
    }

    /// Saves currently held, oldest first.
    pub async fn saves(&self) -> Vec<SavedPresentation> {
        self.saves.lock().await.clone()
    }

    pub async fn last(&self) -> Option<SavedPresentation> {
        self.saves.lock().await.last().cloned()
    }

    pub async fn len(&self) -> usize {
        self.saves.lock().await.len()
    }
}

#[async_trait::async_trait]
impl PresentationSink for MemorySink {
    async fn save(&self, doc: &SavedPresentation) -> Result<(), DeckError> {
        doc.validate()?;
        let mut saves = self.saves.lock().await;
        saves.push(doc.clone());
        if saves.len() > self.capacity {
            let excess = saves.len() - self.capacity;
            saves.drain(..excess);
        }
        Ok(())
    }
}

// =============================================================================
// AUTOSAVE
// =============================================================================

/// Snapshot the store and write it to `sink`.
///
/// The read lock is released before the sink is called.
///
/// # Errors
///
/// Propagates the sink's error.
pub async fn save_now(store: &SharedStore, sink: &dyn PresentationSink) -> Result<(), DeckError> {
    let doc = store.read().await.to_saved();
    sink.save(&doc).await
}

/// Handle to a running autosave task.
///
/// Dropping the handle aborts the task, so nothing is written after the
/// owner is torn down. Use [`AutosaveHandle::shutdown`] for a graceful stop
/// with a final save.
#[derive(Debug)]
pub struct AutosaveHandle {
    task: Option<JoinHandle<Result<(), DeckError>>>,
    stop: Option<oneshot::Sender<()>>,
}

impl AutosaveHandle {
    /// Stop the task after one final save and wait for it to exit.
    ///
    /// # Errors
    ///
    /// Returns the final save's error, or [`DeckError::Task`] if the task
    /// died before it could flush.
    pub async fn shutdown(mut self) -> Result<(), DeckError> {
        if let Some(stop) = self.stop.take()
            && stop.send(()).is_err()
        {
            debug!("autosave task already stopped");
        }
        match self.task.take() {
            Some(task) => task.await?,
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Spawn the periodic autosave task. The first save happens one `interval`
/// after spawning; missed ticks are skipped rather than replayed. Intervals
/// below [`MIN_AUTOSAVE_INTERVAL`] are raised to it.
#[must_use]
pub fn spawn_autosave(store: SharedStore, sink: Arc<dyn PresentationSink>, interval: Duration) -> AutosaveHandle {
    let interval = if interval < MIN_AUTOSAVE_INTERVAL {
        warn!(requested = ?interval, "autosave interval below minimum, clamped");
        MIN_AUTOSAVE_INTERVAL
    } else {
        interval
    };
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    info!(interval_secs = interval.as_secs(), "autosave configured");

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    autosave_tick(&store, sink.as_ref()).await;
                }
                _ = &mut stop_rx => {
                    let flushed = save_now(&store, sink.as_ref()).await;
                    info!(flushed = flushed.is_ok(), "autosave stopped");
                    return flushed;
                }
            }
        }
    });

    AutosaveHandle { task: Some(task), stop: Some(stop_tx) }
}

async fn autosave_tick(store: &SharedStore, sink: &dyn PresentationSink) {
    if let Err(e) = save_now(store, sink).await {
        error!(error = %e, code = e.error_code(), "autosave failed");
    }
}
