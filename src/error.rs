use thiserror::Error;

/// Every failure the workflow can surface to the user.
///
/// Each variant's display string is the user-facing message for the step
/// that produced it. Nothing here is retried automatically; the session
/// stays usable after any of these.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("image is too large: {size} bytes (max {max})")]
    InputTooLarge { size: u64, max: u64 },
    #[error("cannot read file")]
    Decode(#[source] image::ImageError),
    #[error("failed to prepare image for processing")]
    Upload(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("failed to request payment: {0}")]
    PaymentIntent(String),
    /// The payment provider's decline message, relayed verbatim.
    #[error("{0}")]
    PaymentDeclined(String),
    #[error("failed to process image: {0}")]
    Processing(String),
    #[error("no files found in the archive")]
    ArchiveEmpty,
    #[error("unknown location: {0}")]
    UnknownLocation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("something went wrong: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
