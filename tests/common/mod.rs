use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use std::collections::VecDeque;
use std::io::{Cursor, Write};
use std::sync::Mutex;
use tripcanvas::domain::payment::ClientSecret;
use tripcanvas::domain::ports::{OutpaintJob, OutpaintService, PaymentConfirmer};
use tripcanvas::error::{Result, WorkflowError};
use zip::write::SimpleFileOptions;

/// A solid-color PNG of the given dimensions.
pub fn png_of(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::new_rgb8(width, height);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// A zip archive with the given entries, in order.
pub fn zip_of(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Declines the first `declines` confirmations with the given message,
/// then confirms. Mirrors a user whose card fails before they switch to
/// one that works.
pub struct ScriptedConfirmer {
    message: String,
    declines_left: Mutex<u32>,
}

impl ScriptedConfirmer {
    pub fn declining_first(declines: u32, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            declines_left: Mutex::new(declines),
        }
    }
}

#[async_trait]
impl PaymentConfirmer for ScriptedConfirmer {
    async fn confirm(&self, _secret: &ClientSecret) -> Result<()> {
        let mut left = self.declines_left.lock().unwrap();
        if *left > 0 {
            *left -= 1;
            return Err(WorkflowError::PaymentDeclined(self.message.clone()));
        }
        Ok(())
    }
}

/// Plays back a queue of dispatch outcomes, one per job.
pub struct ScriptedOutpaintService {
    outcomes: Mutex<VecDeque<Result<Vec<u8>>>>,
}

impl ScriptedOutpaintService {
    pub fn new(outcomes: Vec<Result<Vec<u8>>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
        }
    }
}

#[async_trait]
impl OutpaintService for ScriptedOutpaintService {
    async fn outpaint(&self, _job: &OutpaintJob) -> Result<Vec<u8>> {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(WorkflowError::Processing("503 Service Unavailable".into())))
    }
}
