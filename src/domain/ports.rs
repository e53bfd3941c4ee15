use super::image::StagedImage;
use super::payment::ClientSecret;
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Object-storage collaborator. Stages a normalized image so the
/// processing service can fetch it by URL.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Uploads the PNG-encoded image and returns its fetchable URL.
    /// Called once per attempt; staged copies are never reused.
    async fn stage(&self, png: Vec<u8>) -> Result<StagedImage>;
}

/// Backend collaborator that creates payment intents.
#[async_trait]
pub trait PaymentBackend: Send + Sync {
    async fn create_intent(&self, amount_minor_units: u32) -> Result<ClientSecret>;
}

/// The interactive payment-confirmation collaborator (the provider's
/// widget, in whatever shape the frontend gives it). Success means the
/// intent behind `secret` was charged; failure carries the provider's
/// message verbatim.
#[async_trait]
pub trait PaymentConfirmer: Send + Sync {
    async fn confirm(&self, secret: &ClientSecret) -> Result<()>;
}

/// One outpainting job as the remote service expects it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutpaintJob {
    /// Staged image URL.
    pub image: String,
    /// Human-readable landmark label.
    pub location: String,
    /// Fixed identifier for the default spot.
    pub tourist_spot: String,
}

/// The remote outpainting service. A single synchronous call per job;
/// the response body is a zip archive containing the result image.
#[async_trait]
pub trait OutpaintService: Send + Sync {
    async fn outpaint(&self, job: &OutpaintJob) -> Result<Vec<u8>>;
}

pub type ImageStoreBox = Box<dyn ImageStore>;
pub type PaymentBackendBox = Box<dyn PaymentBackend>;
pub type PaymentConfirmerBox = Box<dyn PaymentConfirmer>;
pub type OutpaintServiceBox = Box<dyn OutpaintService>;
