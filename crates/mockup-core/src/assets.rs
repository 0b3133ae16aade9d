//! Decoded image resources and the pending-decode queue.
//!
//! Image decoding is the only asynchronous step in the editor. Requests are
//! queued and completed later by the host loop (see `Session::pump_decodes`),
//! so a layer never exists before its pixels do.

use crate::catalog::ProductView;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Asset loading errors.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("Decode failed: {0}")]
    Decode(String),
}

/// Result type for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;

/// A decoded raster image (straight-alpha RGBA8, row-major).
#[derive(Clone)]
pub struct ImageResource {
    id: Uuid,
    width: u32,
    height: u32,
    rgba: Arc<[u8]>,
}

impl ImageResource {
    /// Wrap already-decoded RGBA8 pixels.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> AssetResult<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(AssetError::Decode(format!(
                "expected {} bytes for {}x{} image, got {}",
                expected,
                width,
                height,
                rgba.len()
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            width,
            height,
            rgba: rgba.into(),
        })
    }

    /// A single-color image. Zero dimensions are bumped to 1.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            id: Uuid::new_v4(),
            width,
            height,
            rgba: rgba.repeat(width as usize * height as usize).into(),
        }
    }

    /// Decode PNG, JPEG or WebP bytes.
    pub fn decode(bytes: &[u8]) -> AssetResult<Self> {
        let decoded = image::load_from_memory(bytes).map_err(|e| AssetError::Decode(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    /// Stable identity, usable as a cache key by renderers.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw straight-alpha RGBA8 pixels.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

impl fmt::Debug for ImageResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageResource")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// A user-supplied file offered for upload.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Whether the declared media type is an image type.
    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }
}

/// Check a declared media type for the `image/` family.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .to_ascii_lowercase()
        .strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty())
}

/// Supplies a paintable stand-in when a backdrop fails to load.
pub trait BackdropFallback {
    fn placeholder(&self, key: ProductView) -> ImageResource;
}

/// What a completed decode is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeTarget {
    /// The backdrop of a bucket.
    Backdrop(ProductView),
    /// A new image layer for a bucket.
    Layer(ProductView),
}

impl DecodeTarget {
    pub fn key(&self) -> ProductView {
        match self {
            DecodeTarget::Backdrop(key) | DecodeTarget::Layer(key) => *key,
        }
    }
}

/// A queued decode request.
#[derive(Debug)]
pub struct DecodeJob {
    pub target: DecodeTarget,
    /// Source bytes, or the load error if they could not be read.
    pub source: AssetResult<Vec<u8>>,
}

/// FIFO of decode requests awaiting completion.
#[derive(Debug, Default)]
pub struct DecodeQueue {
    jobs: VecDeque<DecodeJob>,
}

impl DecodeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: DecodeTarget, source: AssetResult<Vec<u8>>) {
        self.jobs.push_back(DecodeJob { target, source });
    }

    pub fn pop(&mut self) -> Option<DecodeJob> {
        self.jobs.pop_front()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
