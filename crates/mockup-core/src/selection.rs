//! Selection decoration geometry.

use crate::hit::{TextMeasure, bounds};
use crate::layers::Layer;
use kurbo::{Point, Rect};

/// Handle diameter in drawing-surface pixels.
pub const HANDLE_SIZE: f64 = 16.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A circular corner handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Center position.
    pub position: Point,
    pub corner: Corner,
}

impl Handle {
    pub fn new(position: Point, corner: Corner) -> Self {
        Self { position, corner }
    }

    pub fn radius(&self) -> f64 {
        HANDLE_SIZE / 2.0
    }
}

/// Everything needed to paint the selection around one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOutline {
    /// Dashed box, identical to the layer's hit-test bounds.
    pub bounds: Rect,
    pub handles: [Handle; 4],
}

impl SelectionOutline {
    pub fn for_layer(layer: &Layer, measure: &dyn TextMeasure) -> Self {
        let bounds = bounds(layer, measure);
        Self {
            bounds,
            handles: corner_handles(bounds),
        }
    }
}

/// Generate corner handles for a bounding rectangle.
pub fn corner_handles(bounds: Rect) -> [Handle; 4] {
    [
        Handle::new(Point::new(bounds.x0, bounds.y0), Corner::TopLeft),
        Handle::new(Point::new(bounds.x1, bounds.y0), Corner::TopRight),
        Handle::new(Point::new(bounds.x0, bounds.y1), Corner::BottomLeft),
        Handle::new(Point::new(bounds.x1, bounds.y1), Corner::BottomRight),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::ApproximateMetrics;
    use crate::layers::TextLayer;

    #[test]
    fn test_corner_handles() {
        let handles = corner_handles(Rect::new(10.0, 20.0, 110.0, 70.0));
        assert_eq!(handles[0].position, Point::new(10.0, 20.0));
        assert_eq!(handles[1].position, Point::new(110.0, 20.0));
        assert_eq!(handles[2].position, Point::new(10.0, 70.0));
        assert_eq!(handles[3].position, Point::new(110.0, 70.0));
        assert!((handles[3].radius() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_outline_matches_bounds() {
        let layer = Layer::Text(TextLayer::new(Point::new(300.0, 300.0), "HI".to_string()));
        let outline = SelectionOutline::for_layer(&layer, &ApproximateMetrics);
        assert_eq!(outline.bounds, bounds(&layer, &ApproximateMetrics));
        assert_eq!(outline.handles[0].corner, Corner::TopLeft);
    }
}
