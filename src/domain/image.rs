use crate::error::{Result, WorkflowError};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// Largest accepted input file: 10 MiB. Checked before anything touches
/// the network; a file of exactly this size is accepted.
pub const MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

/// Neither axis of the normalized image exceeds this.
pub const MAX_EDGE: u32 = 1024;

/// The user's uploaded photo, exactly as selected. Replaced wholesale on
/// re-upload, never mutated.
#[derive(Debug, Clone)]
pub struct SourceImage {
    bytes: Vec<u8>,
    mime: String,
}

impl SourceImage {
    /// Accepts raw file bytes, rejecting oversized inputs up front.
    pub fn from_bytes(bytes: Vec<u8>, mime: impl Into<String>) -> Result<Self> {
        let size = bytes.len() as u64;
        if size > MAX_INPUT_BYTES {
            return Err(WorkflowError::InputTooLarge {
                size,
                max: MAX_INPUT_BYTES,
            });
        }
        Ok(Self {
            bytes,
            mime: mime.into(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let mime = match path.extension().and_then(|e| e.to_str()) {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            _ => "image/png",
        };
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes, mime)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Dimensions of the normalized raster. Derived from the source's natural
/// dimensions; recomputed whenever the source changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedGeometry {
    pub width: u32,
    pub height: u32,
}

/// Scales (w, h) down so both axes fit within `max_edge`, preserving
/// aspect ratio. Never scales up: dimensions already within bounds come
/// back unchanged.
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> NormalizedGeometry {
    if width <= max_edge && height <= max_edge {
        return NormalizedGeometry { width, height };
    }
    let scale = f64::from(max_edge) / f64::from(width.max(height));
    let scaled = |axis: u32| ((f64::from(axis) * scale).round() as u32).max(1);
    NormalizedGeometry {
        width: scaled(width),
        height: scaled(height),
    }
}

/// The decoded, bounded raster ready for staging.
#[derive(Debug)]
pub struct NormalizedImage {
    raster: DynamicImage,
    geometry: NormalizedGeometry,
}

impl NormalizedImage {
    pub fn geometry(&self) -> NormalizedGeometry {
        self.geometry
    }

    /// Re-encodes the normalized raster as PNG for upload.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.raster
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(WorkflowError::Decode)?;
        Ok(buf.into_inner())
    }
}

/// Decodes the source and bounds it to [`MAX_EDGE`] per axis.
///
/// Undecodable input is fatal for the attempt; there is nothing to retry.
/// The resize only runs when the geometry actually changed, so images
/// already within bounds pass through pixel-identical.
pub fn normalize(source: &SourceImage) -> Result<NormalizedImage> {
    let decoded = image::load_from_memory(source.bytes()).map_err(WorkflowError::Decode)?;
    let (width, height) = decoded.dimensions();
    let geometry = fit_within(width, height, MAX_EDGE);

    let raster = if geometry == (NormalizedGeometry { width, height }) {
        decoded
    } else {
        decoded.resize_exact(geometry.width, geometry.height, FilterType::Lanczos3)
    };

    Ok(NormalizedImage { raster, geometry })
}

/// URL of the staged copy in external storage. Valid for one attempt;
/// a fresh one is created every time the dispatcher runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedImage(pub String);

impl StagedImage {
    pub fn url(&self) -> &str {
        &self.0
    }
}
