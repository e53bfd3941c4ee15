use serde::Deserialize;
use std::path::Path;

/// Fixed fee for one outpainting session, in minor currency units ($5.00).
pub const FEE_MINOR_UNITS: u32 = 500;

/// Endpoints and fixed parameters for one workflow session.
///
/// Loadable from a JSON file; every field has a default so a partial file
/// (or none at all) still yields a usable configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Object-storage upload endpoint. Responds with the staged URL.
    pub upload_url: String,
    /// Backend endpoint that creates payment intents.
    pub payment_intent_url: String,
    /// Provider endpoint that confirms a payment intent.
    pub payment_confirm_url: String,
    /// Remote outpainting endpoint. Responds with a zip archive.
    pub processing_url: String,
    /// Amount charged on the first attempt of a session.
    pub amount_minor_units: u32,
    /// Fixed identifier for the default tourist spot, sent on every
    /// processing request.
    pub tourist_spot: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            upload_url: "https://storage.tripcanvas.app/upload".to_string(),
            payment_intent_url: "https://api.tripcanvas.app/create-payment-intent".to_string(),
            payment_confirm_url: "https://api.tripcanvas.app/confirm-payment".to_string(),
            processing_url: "https://api.tripcanvas.app/process".to_string(),
            amount_minor_units: FEE_MINOR_UNITS,
            tourist_spot: "default".to_string(),
        }
    }
}

impl WorkflowConfig {
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| crate::error::WorkflowError::Unknown(format!("bad config file: {e}")))
    }
}
