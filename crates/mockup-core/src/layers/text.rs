//! Text layer.

use super::{LayerId, scaled_clamped};
use kurbo::Point;
use peniko::Color;
use uuid::Uuid;

/// A line of bold text, centered horizontally and vertically on `position`.
#[derive(Debug, Clone)]
pub struct TextLayer {
    pub(crate) id: LayerId,
    /// Anchor point (center/middle of the text).
    pub position: Point,
    /// The text content.
    pub content: String,
    /// Font size in drawing-surface pixels.
    pub font_size: f64,
    /// Fill color.
    pub color: Color,
}

impl TextLayer {
    pub const DEFAULT_FONT_SIZE: f64 = 48.0;
    pub const MIN_FONT_SIZE: f64 = 12.0;
    pub const MAX_FONT_SIZE: f64 = 120.0;
    /// Line box height as a multiple of the font size.
    pub const LINE_HEIGHT_FACTOR: f64 = 1.2;
    /// Average advance of a bold sans glyph relative to the font size.
    pub const APPROX_CHAR_WIDTH: f64 = 0.6;

    /// Create a new text layer with default size and black fill.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            font_size: Self::DEFAULT_FONT_SIZE,
            color: Color::BLACK,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Set the fill color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Replace the text content.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    /// Height of the line box used for bounds.
    pub fn line_height(&self) -> f64 {
        self.font_size * Self::LINE_HEIGHT_FACTOR
    }

    /// Rough width estimate when no font metrics are available.
    pub fn approximate_width(&self) -> f64 {
        self.content.chars().count() as f64 * self.font_size * Self::APPROX_CHAR_WIDTH
    }

    pub(crate) fn scale_by(&mut self, ratio: f64) {
        self.font_size = scaled_clamped(
            self.font_size,
            ratio,
            Self::MIN_FONT_SIZE,
            Self::MAX_FONT_SIZE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_creation() {
        let text = TextLayer::new(Point::new(300.0, 300.0), "HELLO".to_string());
        assert_eq!(text.content, "HELLO");
        assert!((text.font_size - 48.0).abs() < f64::EPSILON);
        assert_eq!(text.color, Color::BLACK);
    }

    #[test]
    fn test_line_height() {
        let text = TextLayer::new(Point::ZERO, "x".to_string()).with_font_size(50.0);
        assert!((text.line_height() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_clamps() {
        let mut text = TextLayer::new(Point::ZERO, "x".to_string());
        text.scale_by(2.0);
        assert!((text.font_size - 96.0).abs() < 1e-9);
        text.scale_by(10.0);
        assert!((text.font_size - TextLayer::MAX_FONT_SIZE).abs() < f64::EPSILON);
        text.scale_by(0.001);
        assert!((text.font_size - TextLayer::MIN_FONT_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_approximate_width_counts_chars() {
        let text = TextLayer::new(Point::ZERO, "héllo".to_string()).with_font_size(10.0);
        assert!((text.approximate_width() - 30.0).abs() < 1e-9);
    }
}
