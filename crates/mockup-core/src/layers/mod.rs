//! Decoration layers placed over a product backdrop.

mod image;
mod text;

pub use image::{ImageFormat, ImageLayer};
pub use text::TextLayer;

use kurbo::{Point, Vec2};
use uuid::Uuid;

/// Unique identifier for layers.
pub type LayerId = Uuid;

/// A decoration layer: either text or a raster image.
///
/// Layers are edited in place; their id never changes, which is what the
/// selection refers to.
#[derive(Debug, Clone)]
pub enum Layer {
    Text(TextLayer),
    Image(ImageLayer),
}

impl Layer {
    pub fn id(&self) -> LayerId {
        match self {
            Layer::Text(t) => t.id,
            Layer::Image(i) => i.id,
        }
    }

    /// Center point in drawing-surface units.
    pub fn position(&self) -> Point {
        match self {
            Layer::Text(t) => t.position,
            Layer::Image(i) => i.position,
        }
    }

    /// Move the layer by a delta. Nothing else changes.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Layer::Text(t) => t.position += delta,
            Layer::Image(i) => i.position += delta,
        }
    }

    /// Multiply the layer's size attribute by `ratio`, clamped to its range.
    ///
    /// Text scales its font size, images their scale factor.
    pub fn scale_by(&mut self, ratio: f64) {
        match self {
            Layer::Text(t) => t.scale_by(ratio),
            Layer::Image(i) => i.scale_by(ratio),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Layer::Text(_))
    }

    pub fn as_text(&self) -> Option<&TextLayer> {
        match self {
            Layer::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextLayer> {
        match self {
            Layer::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageLayer> {
        match self {
            Layer::Image(i) => Some(i),
            _ => None,
        }
    }
}

impl From<TextLayer> for Layer {
    fn from(layer: TextLayer) -> Self {
        Layer::Text(layer)
    }
}

impl From<ImageLayer> for Layer {
    fn from(layer: ImageLayer) -> Self {
        Layer::Image(layer)
    }
}

/// Clamp a scaled value, ignoring ratios that are not finite.
pub(crate) fn scaled_clamped(value: f64, ratio: f64, min: f64, max: f64) -> f64 {
    if !ratio.is_finite() {
        return value;
    }
    (value * ratio).clamp(min, max)
}
