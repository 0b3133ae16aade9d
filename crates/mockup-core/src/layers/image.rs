//! Image layer for uploaded raster images.

use super::{LayerId, scaled_clamped};
use crate::assets::ImageResource;
use kurbo::{Point, Size};
use uuid::Uuid;

/// Image format of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// WebP format.
    WebP,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }

        None
    }
}

/// A decoded image drawn centered on `position`.
#[derive(Debug, Clone)]
pub struct ImageLayer {
    pub(crate) id: LayerId,
    /// Center point.
    pub position: Point,
    /// Size at scale 1, fixed at creation.
    pub base_size: Size,
    /// Current scale factor.
    pub scale: f64,
    /// Decoded pixels.
    pub image: ImageResource,
}

impl ImageLayer {
    /// Default base width and height.
    pub const DEFAULT_BASE_SIZE: f64 = 150.0;
    pub const MIN_SCALE: f64 = 0.2;
    pub const MAX_SCALE: f64 = 3.0;

    /// Create an image layer with the default base size and scale 1.
    pub fn new(position: Point, image: ImageResource) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            base_size: Size::new(Self::DEFAULT_BASE_SIZE, Self::DEFAULT_BASE_SIZE),
            scale: 1.0,
            image,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Set the base size.
    pub fn with_base_size(mut self, size: Size) -> Self {
        self.base_size = size;
        self
    }

    /// Displayed size (base size times scale).
    pub fn size(&self) -> Size {
        Size::new(
            self.base_size.width * self.scale,
            self.base_size.height * self.scale,
        )
    }

    pub(crate) fn scale_by(&mut self, ratio: f64) {
        self.scale = scaled_clamped(self.scale, ratio, Self::MIN_SCALE, Self::MAX_SCALE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> ImageResource {
        ImageResource::from_rgba(1, 1, vec![0, 0, 0, 255]).unwrap()
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("PNG"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("webp"), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_extension("gif"), None);
    }

    #[test]
    fn test_magic_bytes() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(ImageFormat::from_magic_bytes(&png), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_magic_bytes(b"GIF8"), None);
    }

    #[test]
    fn test_default_size() {
        let layer = ImageLayer::new(Point::new(300.0, 300.0), resource());
        let size = layer.size();
        assert!((size.width - 150.0).abs() < f64::EPSILON);
        assert!((size.height - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scale_clamps() {
        let mut layer = ImageLayer::new(Point::ZERO, resource());
        layer.scale_by(2.5);
        assert!((layer.scale - 2.5).abs() < 1e-9);
        layer.scale_by(2.0);
        assert!((layer.scale - ImageLayer::MAX_SCALE).abs() < f64::EPSILON);
        layer.scale_by(0.0);
        assert!((layer.scale - ImageLayer::MIN_SCALE).abs() < f64::EPSILON);
        assert!((layer.size().width - 30.0).abs() < 1e-9);
    }
}
