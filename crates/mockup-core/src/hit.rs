//! Layer bounds and point hit-testing.

use crate::layers::{Layer, TextLayer};
use kurbo::{Point, Rect};

/// Measures rendered text width.
///
/// Bounds of a text layer depend on the font actually used for painting, so
/// the renderer that draws text is also what measures it.
pub trait TextMeasure {
    /// Width of `text` set in the bold layer font at `font_size`.
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

/// Fallback metrics based on an average glyph advance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMetrics;

impl TextMeasure for ApproximateMetrics {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * TextLayer::APPROX_CHAR_WIDTH
    }
}

/// Axis-aligned bounding box of a layer, centered on its position.
pub fn bounds(layer: &Layer, measure: &dyn TextMeasure) -> Rect {
    match layer {
        Layer::Text(text) => {
            let width = measure.text_width(&text.content, text.font_size);
            Rect::from_center_size(text.position, (width, text.line_height()))
        }
        Layer::Image(image) => Rect::from_center_size(image.position, image.size()),
    }
}

/// Point-in-box test, inclusive on all four edges.
pub fn contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Find the topmost layer whose bounds contain `point`.
///
/// `layers` is in paint order, so it is walked back to front.
pub fn hit_test<'a>(point: Point, layers: &'a [Layer], measure: &dyn TextMeasure) -> Option<&'a Layer> {
    layers
        .iter()
        .rev()
        .find(|layer| contains(bounds(layer, measure), point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageResource;
    use crate::layers::ImageLayer;

    fn image_at(x: f64, y: f64) -> Layer {
        let resource = ImageResource::from_rgba(1, 1, vec![255; 4]).unwrap();
        Layer::Image(ImageLayer::new(Point::new(x, y), resource))
    }

    fn text_at(x: f64, y: f64, content: &str) -> Layer {
        Layer::Text(TextLayer::new(Point::new(x, y), content.to_string()))
    }

    #[test]
    fn test_text_bounds() {
        let layer = text_at(300.0, 300.0, "HELLO");
        let rect = bounds(&layer, &ApproximateMetrics);
        // 5 chars * 48 * 0.6 = 144 wide, 48 * 1.2 = 57.6 tall
        assert!((rect.width() - 144.0).abs() < 1e-9);
        assert!((rect.height() - 57.6).abs() < 1e-9);
        assert!((rect.center().x - 300.0).abs() < 1e-9);
        assert!((rect.center().y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_image_bounds_follow_scale() {
        let mut layer = image_at(100.0, 100.0);
        layer.scale_by(2.0);
        let rect = bounds(&layer, &ApproximateMetrics);
        assert!((rect.x0 - -50.0).abs() < 1e-9);
        assert!((rect.x1 - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_center_hits_own_layer() {
        for layer in [image_at(10.0, 10.0), text_at(500.0, 40.0, "x"), text_at(0.0, 0.0, "")] {
            let layers = [layer];
            let hit = hit_test(layers[0].position(), &layers, &ApproximateMetrics);
            assert_eq!(hit.map(Layer::id), Some(layers[0].id()));
        }
    }

    #[test]
    fn test_edges_are_inclusive() {
        let layers = [image_at(100.0, 100.0)];
        // Image spans 25..175 on both axes
        assert!(hit_test(Point::new(25.0, 25.0), &layers, &ApproximateMetrics).is_some());
        assert!(hit_test(Point::new(175.0, 175.0), &layers, &ApproximateMetrics).is_some());
        assert!(hit_test(Point::new(175.1, 100.0), &layers, &ApproximateMetrics).is_none());
    }

    #[test]
    fn test_topmost_wins() {
        let a = image_at(100.0, 100.0);
        let b = image_at(100.0, 100.0);
        let b_id = b.id();
        let layers = [a, b];
        let hit = hit_test(Point::new(100.0, 100.0), &layers, &ApproximateMetrics);
        assert_eq!(hit.map(Layer::id), Some(b_id));
    }

    #[test]
    fn test_partial_overlap() {
        let a = image_at(100.0, 100.0);
        let b = image_at(200.0, 100.0);
        let a_id = a.id();
        let b_id = b.id();
        let layers = [a, b];
        assert_eq!(hit_test(Point::new(40.0, 100.0), &layers, &ApproximateMetrics).map(Layer::id), Some(a_id));
        assert_eq!(hit_test(Point::new(150.0, 100.0), &layers, &ApproximateMetrics).map(Layer::id), Some(b_id));
        assert!(hit_test(Point::new(400.0, 400.0), &layers, &ApproximateMetrics).is_none());
    }
}
