//! Display-to-surface coordinate mapping.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Where the drawing surface currently sits on screen.
///
/// The drawing surface has a fixed internal resolution, but the host may
/// display it at any size (responsive layout, device pixel ratio). Pointer
/// positions arrive in client coordinates and have to be converted before
/// they can be compared with layer positions. Hosts should build a fresh
/// geometry for every event since the display size can change at any time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGeometry {
    /// Top-left corner of the displayed surface in client coordinates.
    pub origin: Point,
    /// Size the surface is displayed at, in client units.
    pub display_size: Size,
    /// Internal drawing-surface resolution.
    pub internal_size: Size,
}

impl SurfaceGeometry {
    /// Create a geometry for a surface displayed at `display_size`.
    pub fn new(origin: Point, display_size: Size, internal_size: Size) -> Self {
        Self {
            origin,
            display_size,
            internal_size,
        }
    }

    /// Geometry where client units equal surface units.
    pub fn identity(internal_size: Size) -> Self {
        Self::new(Point::ZERO, internal_size, internal_size)
    }

    /// Per-axis factor from client units to surface units.
    ///
    /// A collapsed display axis maps with factor 1 so a zero-sized layout
    /// pass never produces NaN positions.
    pub fn scale(&self) -> Vec2 {
        let axis = |internal: f64, display: f64| {
            if display > 0.0 { internal / display } else { 1.0 }
        };
        Vec2::new(
            axis(self.internal_size.width, self.display_size.width),
            axis(self.internal_size.height, self.display_size.height),
        )
    }

    /// Convert a client-space point to drawing-surface units.
    pub fn to_surface(&self, client: Point) -> Point {
        let scale = self.scale();
        Point::new(
            (client.x - self.origin.x) * scale.x,
            (client.y - self.origin.y) * scale.y,
        )
    }

    /// Convert a drawing-surface point back to client coordinates.
    pub fn to_client(&self, surface: Point) -> Point {
        let scale = self.scale();
        Point::new(
            surface.x / scale.x + self.origin.x,
            surface.y / scale.y + self.origin.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        let geometry = SurfaceGeometry::identity(Size::new(600.0, 600.0));
        let p = geometry.to_surface(Point::new(120.0, 340.0));
        assert!((p.x - 120.0).abs() < f64::EPSILON);
        assert!((p.y - 340.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_half_size_display() {
        // 600x600 surface shown at 300x300, offset by (10, 20)
        let geometry = SurfaceGeometry::new(
            Point::new(10.0, 20.0),
            Size::new(300.0, 300.0),
            Size::new(600.0, 600.0),
        );
        let p = geometry.to_surface(Point::new(160.0, 170.0));
        assert!((p.x - 300.0).abs() < f64::EPSILON);
        assert!((p.y - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_axes_independent() {
        let geometry = SurfaceGeometry::new(
            Point::ZERO,
            Size::new(300.0, 1200.0),
            Size::new(600.0, 600.0),
        );
        let p = geometry.to_surface(Point::new(100.0, 100.0));
        assert!((p.x - 200.0).abs() < f64::EPSILON);
        assert!((p.y - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let geometry = SurfaceGeometry::new(
            Point::new(30.0, -20.0),
            Size::new(450.0, 375.0),
            Size::new(600.0, 600.0),
        );
        let original = Point::new(123.0, 456.0);
        let back = geometry.to_client(geometry.to_surface(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_collapsed_display() {
        let geometry = SurfaceGeometry::new(Point::ZERO, Size::ZERO, Size::new(600.0, 600.0));
        let p = geometry.to_surface(Point::new(5.0, 5.0));
        assert!(p.x.is_finite() && p.y.is_finite());
    }
}
