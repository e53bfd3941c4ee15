use crate::error::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Weak};

/// Filename every downloaded result is saved under.
pub const RESULT_FILENAME: &str = "result.png";

type Slots = Mutex<HashMap<u64, Arc<Vec<u8>>>>;

/// Issues revocable handles over in-memory blobs, standing in for the
/// object URLs a browser session would mint and revoke.
///
/// A handle revokes its slot when dropped, so superseding a result (or
/// letting the session end) releases the old resource without any
/// explicit bookkeeping at the call sites.
#[derive(Default)]
pub struct BlobRegistry {
    slots: Arc<Slots>,
    next_id: Mutex<u64>,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `bytes` and returns the sole handle over them.
    pub fn publish(&self, bytes: Vec<u8>) -> BlobHandle {
        let id = {
            let mut next = self.next_id.lock().expect("registry poisoned");
            *next += 1;
            *next
        };
        let bytes = Arc::new(bytes);
        self.slots
            .lock()
            .expect("registry poisoned")
            .insert(id, Arc::clone(&bytes));
        BlobHandle {
            id,
            bytes,
            slots: Arc::downgrade(&self.slots),
        }
    }

    /// Number of live (unrevoked) blobs. The workflow holds at most one
    /// durable result here at any time.
    pub fn live(&self) -> usize {
        self.slots.lock().expect("registry poisoned").len()
    }
}

/// Exclusive handle over one registered blob. Not cloneable: whoever
/// holds it owns the release obligation, discharged automatically on
/// drop.
pub struct BlobHandle {
    id: u64,
    bytes: Arc<Vec<u8>>,
    slots: Weak<Slots>,
}

impl BlobHandle {
    /// Stable, session-scoped URL naming this blob.
    pub fn url(&self) -> String {
        format!("blob:tripcanvas/{}", self.id)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for BlobHandle {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.upgrade() {
            slots.lock().expect("registry poisoned").remove(&self.id);
        }
    }
}

impl std::fmt::Debug for BlobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobHandle")
            .field("id", &self.id)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The displayable/downloadable outcome of one successful processing
/// attempt. Dropping it (when superseded or when the session ends)
/// revokes its backing blob.
#[derive(Debug)]
pub struct ProcessingResult {
    handle: BlobHandle,
}

impl ProcessingResult {
    pub fn new(handle: BlobHandle) -> Self {
        Self { handle }
    }

    pub fn url(&self) -> String {
        self.handle.url()
    }

    pub fn bytes(&self) -> &[u8] {
        self.handle.bytes()
    }

    /// Saves the result as `result.png` under `dir`. Pure side effect;
    /// in-memory state is untouched.
    pub fn download_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(RESULT_FILENAME);
        std::fs::write(&path, self.handle.bytes())?;
        Ok(path)
    }
}
