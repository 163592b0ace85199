//! Storage abstraction for scene persistence.

mod autosave;
mod file;
mod memory;

pub use autosave::{AutosaveManager, DEFAULT_AUTOSAVE_INTERVAL_SECS, LAST_SCENE_KEY};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::snapshot::SceneSnapshot;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors. None of these are fatal to the caller; the scene keeps
/// working from in-memory state when persistence fails.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("scene not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A backend that can persist scene snapshots by id.
///
/// Futures let a multithreaded embedder dispatch saves off the input thread;
/// the core itself never blocks on them.
pub trait Storage: Send + Sync {
    /// Save a snapshot under an id.
    fn save(&self, id: &str, snapshot: &SceneSnapshot) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a snapshot by id.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<SceneSnapshot>>;

    /// Delete a snapshot.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored snapshot ids.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check whether a snapshot exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Minimal polling executor for driving storage futures in tests and
/// single-threaded embedders.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
