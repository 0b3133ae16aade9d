//! Placeholder backdrops for product views whose image failed to load.

use crate::font::LayerFont;
use crate::pixmap_impl::{skia_color, solid};
use crate::renderer::RenderStyle;
use kurbo::{Point, Size};
use mockup_core::assets::{BackdropFallback, ImageResource};
use mockup_core::catalog::ProductView;
use tiny_skia::{Mask, Pixmap, Transform};

/// Paints a flat panel labelled `"{product} - {view}"`.
#[derive(Debug, Clone)]
pub struct PlaceholderBackdrop {
    size: Size,
    style: RenderStyle,
    font: Option<LayerFont>,
}

impl PlaceholderBackdrop {
    pub fn new(size: Size, style: RenderStyle) -> Self {
        Self {
            size,
            style,
            font: None,
        }
    }

    /// Font for the label. Without one the panel is left blank.
    pub fn with_font(mut self, font: Option<LayerFont>) -> Self {
        self.font = font;
        self
    }

    /// Label text for a bucket.
    pub fn label(key: ProductView) -> String {
        format!("{} - {}", key.product.name(), key.view.name())
    }

    fn paint(&self, key: ProductView) -> Option<ImageResource> {
        let (width, height) = (self.size.width.round() as u32, self.size.height.round() as u32);
        let mut pixmap = Pixmap::new(width, height)?;
        pixmap.fill(skia_color(self.style.placeholder_background));

        if let Some(font) = &self.font {
            let mut mask = Mask::new(width, height)?;
            let center = Point::new(self.size.width / 2.0, self.size.height / 2.0);
            font.rasterize(&Self::label(key), self.style.placeholder_font_size, center, &mut mask);
            let full = tiny_skia::Rect::from_xywh(0.0, 0.0, width as f32, height as f32)?;
            pixmap.fill_rect(full, &solid(self.style.placeholder_text), Transform::identity(), Some(&mask));
        }

        // Opaque panel, so premultiplied and straight alpha are the same bytes
        ImageResource::from_rgba(width, height, pixmap.take()).ok()
    }
}

impl BackdropFallback for PlaceholderBackdrop {
    fn placeholder(&self, key: ProductView) -> ImageResource {
        self.paint(key).unwrap_or_else(|| {
            log::warn!("Could not paint placeholder for {}, using a flat panel", key);
            let c = self.style.placeholder_background.to_rgba8();
            ImageResource::solid(
                self.size.width as u32,
                self.size.height as u32,
                [c.r, c.g, c.b, c.a],
            )
        })
    }
}
