//! reqwest-backed adapters for the four collaborator ports.
//!
//! One shared [`reqwest::Client`] serves all adapters. The client is
//! built without an overall timeout: a hung outpainting call hangs the
//! attempt indefinitely, matching the original design's known
//! limitation.

use crate::config::WorkflowConfig;
use crate::domain::image::StagedImage;
use crate::domain::payment::ClientSecret;
use crate::domain::ports::{
    ImageStore, ImageStoreBox, OutpaintJob, OutpaintService, OutpaintServiceBox, PaymentBackend,
    PaymentBackendBox, PaymentConfirmer, PaymentConfirmerBox,
};
use crate::error::{Result, WorkflowError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Builds the production port set from one shared client.
pub fn http_ports(
    config: &WorkflowConfig,
) -> Result<(
    ImageStoreBox,
    PaymentBackendBox,
    PaymentConfirmerBox,
    OutpaintServiceBox,
)> {
    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| WorkflowError::Unknown(e.to_string()))?;
    Ok((
        Box::new(HttpImageStore::new(client.clone(), config.upload_url.clone())),
        Box::new(HttpPaymentBackend::new(
            client.clone(),
            config.payment_intent_url.clone(),
        )),
        Box::new(HttpPaymentConfirmer::new(
            client.clone(),
            config.payment_confirm_url.clone(),
        )),
        Box::new(HttpOutpaintService::new(client, config.processing_url.clone())),
    ))
}

/// Uploads the normalized PNG to object storage. The response body is
/// the staged image's fetchable URL.
pub struct HttpImageStore {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpImageStore {
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn stage(&self, png: Vec<u8>) -> Result<StagedImage> {
        let upload_err = |e: reqwest::Error| WorkflowError::Upload(Box::new(e));
        let part = reqwest::multipart::Part::bytes(png)
            .file_name("image.png")
            .mime_str("image/png")
            .map_err(upload_err)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(upload_err)?
            .error_for_status()
            .map_err(upload_err)?;
        let url = response.text().await.map_err(upload_err)?;
        Ok(StagedImage(url.trim().to_string()))
    }
}

#[derive(Serialize)]
struct IntentRequest {
    amount: u32,
}

#[derive(Deserialize)]
struct IntentResponse {
    #[serde(rename = "clientSecret")]
    client_secret: String,
}

/// Creates payment intents against the backend.
pub struct HttpPaymentBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPaymentBackend {
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl PaymentBackend for HttpPaymentBackend {
    async fn create_intent(&self, amount_minor_units: u32) -> Result<ClientSecret> {
        let intent_err = |e: reqwest::Error| WorkflowError::PaymentIntent(e.to_string());
        let response: IntentResponse = self
            .client
            .post(&self.endpoint)
            .json(&IntentRequest {
                amount: amount_minor_units,
            })
            .send()
            .await
            .map_err(intent_err)?
            .error_for_status()
            .map_err(intent_err)?
            .json()
            .await
            .map_err(intent_err)?;
        Ok(ClientSecret::new(response.client_secret))
    }
}

#[derive(Serialize)]
struct ConfirmRequest<'a> {
    #[serde(rename = "clientSecret")]
    client_secret: &'a str,
}

/// Hands the client secret to the provider's confirmation endpoint. A
/// declined confirmation relays the provider's response body verbatim.
pub struct HttpPaymentConfirmer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPaymentConfirmer {
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl PaymentConfirmer for HttpPaymentConfirmer {
    async fn confirm(&self, secret: &ClientSecret) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ConfirmRequest {
                client_secret: secret.expose(),
            })
            .send()
            .await
            .map_err(|e| WorkflowError::Unknown(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = match response.text().await {
            Ok(body) if !body.trim().is_empty() => body.trim().to_string(),
            _ => status.to_string(),
        };
        Err(WorkflowError::PaymentDeclined(message))
    }
}

/// Dispatches one outpainting job and returns the zip envelope bytes.
pub struct HttpOutpaintService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpOutpaintService {
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl OutpaintService for HttpOutpaintService {
    async fn outpaint(&self, job: &OutpaintJob) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(job)
            .send()
            .await
            .map_err(|e| WorkflowError::Unknown(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WorkflowError::Processing(status.to_string()));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| WorkflowError::Unknown(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
