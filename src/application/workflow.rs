use crate::config::WorkflowConfig;
use crate::domain::blob::{BlobRegistry, ProcessingResult};
use crate::domain::image::{self, SourceImage};
use crate::domain::location::Landmark;
use crate::domain::payment::PaymentGate;
use crate::domain::ports::{
    ImageStoreBox, OutpaintJob, OutpaintServiceBox, PaymentBackendBox, PaymentConfirmerBox,
};
use crate::error::Result;
use crate::interfaces::archive::result_reader;
use std::path::{Path, PathBuf};

/// One user session of the outpainting purchase workflow.
///
/// Owns the four collaborator ports, the payment gate, the blob registry
/// backing display/download, the current result and the current
/// user-facing error. Attempts run strictly one at a time: `process`
/// takes `&mut self`, so serialization is by construction rather than by
/// locking.
pub struct OutpaintSession {
    store: ImageStoreBox,
    payments: PaymentBackendBox,
    confirmer: PaymentConfirmerBox,
    service: OutpaintServiceBox,
    config: WorkflowConfig,
    gate: PaymentGate,
    blobs: BlobRegistry,
    result: Option<ProcessingResult>,
    last_error: Option<String>,
}

impl OutpaintSession {
    pub fn new(
        store: ImageStoreBox,
        payments: PaymentBackendBox,
        confirmer: PaymentConfirmerBox,
        service: OutpaintServiceBox,
        config: WorkflowConfig,
    ) -> Self {
        let gate = PaymentGate::new(config.amount_minor_units);
        Self {
            store,
            payments,
            confirmer,
            service,
            config,
            gate,
            blobs: BlobRegistry::new(),
            result: None,
            last_error: None,
        }
    }

    /// Runs one processing attempt end to end.
    ///
    /// Clears the previous error first, then: normalize, stage (always a
    /// fresh upload, even when only the location changed), pass the
    /// payment gate (a no-op once the session has paid), dispatch, and
    /// extract. On success the new result supersedes and revokes the old
    /// one. On failure the error is recorded as the session's current
    /// message and the session stays usable for the next attempt.
    pub async fn process(
        &mut self,
        source: &SourceImage,
        location: &Landmark,
    ) -> Result<&ProcessingResult> {
        self.last_error = None;
        match self.attempt(source, location).await {
            Ok(result) => {
                // Supersession drops (and thereby revokes) the previous
                // result's handle.
                Ok(&*self.result.insert(result))
            }
            Err(e) => {
                tracing::warn!(error = %e, "processing attempt failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn attempt(
        &mut self,
        source: &SourceImage,
        location: &Landmark,
    ) -> Result<ProcessingResult> {
        let normalized = image::normalize(source)?;
        let geometry = normalized.geometry();
        tracing::info!(width = geometry.width, height = geometry.height, "image normalized");

        let staged = self.store.stage(normalized.to_png()?).await?;
        tracing::info!(url = staged.url(), "image staged");

        self.gate.pass(&*self.payments, &*self.confirmer).await?;
        debug_assert!(self.gate.is_authorized());

        let job = OutpaintJob {
            image: staged.url().to_string(),
            location: location.label().to_string(),
            tourist_spot: self.config.tourist_spot.clone(),
        };
        let archive = self.service.outpaint(&job).await?;
        tracing::info!(len = archive.len(), location = location.label(), "archive received");

        // The archive itself only lives long enough to be unpacked; its
        // handle is revoked at the end of this scope.
        let archive_blob = self.blobs.publish(archive);
        let result_bytes = result_reader::first_entry(archive_blob.bytes())?;
        drop(archive_blob);

        Ok(ProcessingResult::new(self.blobs.publish(result_bytes)))
    }

    /// The current result, if the last attempt succeeded.
    pub fn result(&self) -> Option<&ProcessingResult> {
        self.result.as_ref()
    }

    /// The current user-facing error message, if the last attempt failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_paid(&self) -> bool {
        self.gate.is_authorized()
    }

    /// Live revocable handles owned by the session's registry.
    pub fn live_blobs(&self) -> usize {
        self.blobs.live()
    }

    /// Saves the current result as `result.png` under `dir`.
    pub fn download_to(&self, dir: &Path) -> Result<Option<PathBuf>> {
        match &self.result {
            Some(result) => Ok(Some(result.download_to(dir)?)),
            None => Ok(None),
        }
    }

    /// Discards the current result, e.g. when the user picks a new photo.
    /// The backing blob is revoked by the drop.
    pub fn clear_result(&mut self) {
        self.result = None;
    }
}
