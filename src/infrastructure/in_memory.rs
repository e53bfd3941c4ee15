//! In-memory collaborator doubles.
//!
//! Each one records the calls it received so tests can assert on the
//! workflow's interaction shape (how many uploads, how many intents)
//! rather than only on its final state.

use crate::domain::image::StagedImage;
use crate::domain::payment::ClientSecret;
use crate::domain::ports::{ImageStore, OutpaintJob, OutpaintService, PaymentBackend, PaymentConfirmer};
use crate::error::{Result, WorkflowError};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::RwLock;

/// Stores staged payloads and hands out `memory://` URLs.
#[derive(Default, Clone)]
pub struct InMemoryImageStore {
    uploads: Arc<RwLock<Vec<Vec<u8>>>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upload_count(&self) -> usize {
        self.uploads.read().await.len()
    }

    pub async fn last_upload(&self) -> Option<Vec<u8>> {
        self.uploads.read().await.last().cloned()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn stage(&self, png: Vec<u8>) -> Result<StagedImage> {
        let mut uploads = self.uploads.write().await;
        uploads.push(png);
        Ok(StagedImage(format!("memory://staged/{}", uploads.len())))
    }
}

/// Always refuses the upload, as an unreachable storage backend would.
pub struct FailingImageStore;

#[async_trait]
impl ImageStore for FailingImageStore {
    async fn stage(&self, _png: Vec<u8>) -> Result<StagedImage> {
        Err(WorkflowError::Upload("storage unreachable".into()))
    }
}

/// Issues sequential client secrets and counts intent creations.
#[derive(Default, Clone)]
pub struct RecordingPaymentBackend {
    amounts: Arc<std::sync::Mutex<Vec<u32>>>,
}

impl RecordingPaymentBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intents_created(&self) -> usize {
        self.amounts.lock().expect("poisoned").len()
    }

    pub fn amounts(&self) -> Vec<u32> {
        self.amounts.lock().expect("poisoned").clone()
    }
}

#[async_trait]
impl PaymentBackend for RecordingPaymentBackend {
    async fn create_intent(&self, amount_minor_units: u32) -> Result<ClientSecret> {
        let mut amounts = self.amounts.lock().expect("poisoned");
        amounts.push(amount_minor_units);
        Ok(ClientSecret::new(format!("pi_{}_secret_test", amounts.len())))
    }
}

/// Intent creation fails outright; no secret is ever issued.
pub struct FailingPaymentBackend {
    message: String,
}

impl FailingPaymentBackend {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl PaymentBackend for FailingPaymentBackend {
    async fn create_intent(&self, _amount_minor_units: u32) -> Result<ClientSecret> {
        Err(WorkflowError::PaymentIntent(self.message.clone()))
    }
}

/// Confirms every secret on first submission.
#[derive(Default, Clone)]
pub struct AutoConfirmer {
    confirmations: Arc<AtomicU32>,
}

impl AutoConfirmer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirmations(&self) -> u32 {
        self.confirmations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentConfirmer for AutoConfirmer {
    async fn confirm(&self, _secret: &ClientSecret) -> Result<()> {
        self.confirmations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Declines every confirmation with a fixed provider message.
#[derive(Default, Clone)]
pub struct DecliningConfirmer {
    message: String,
    attempts: Arc<AtomicU32>,
}

impl DecliningConfirmer {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            attempts: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentConfirmer for DecliningConfirmer {
    async fn confirm(&self, _secret: &ClientSecret) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(WorkflowError::PaymentDeclined(self.message.clone()))
    }
}

/// Returns a fixed archive for every job and records the jobs it saw.
#[derive(Default, Clone)]
pub struct FixedOutpaintService {
    archive: Vec<u8>,
    jobs: Arc<RwLock<Vec<OutpaintJob>>>,
}

impl FixedOutpaintService {
    pub fn new(archive: Vec<u8>) -> Self {
        Self {
            archive,
            jobs: Arc::default(),
        }
    }

    pub async fn jobs(&self) -> Vec<OutpaintJob> {
        self.jobs.read().await.clone()
    }

    pub async fn dispatch_count(&self) -> usize {
        self.jobs.read().await.len()
    }
}

#[async_trait]
impl OutpaintService for FixedOutpaintService {
    async fn outpaint(&self, job: &OutpaintJob) -> Result<Vec<u8>> {
        self.jobs.write().await.push(job.clone());
        Ok(self.archive.clone())
    }
}

/// Fails every dispatch with a fixed status text.
pub struct FailingOutpaintService {
    status_text: String,
}

impl FailingOutpaintService {
    pub fn new(status_text: impl Into<String>) -> Self {
        Self {
            status_text: status_text.into(),
        }
    }
}

#[async_trait]
impl OutpaintService for FailingOutpaintService {
    async fn outpaint(&self, _job: &OutpaintJob) -> Result<Vec<u8>> {
        Err(WorkflowError::Processing(self.status_text.clone()))
    }
}
