//! Per-view previews, batch export and the design summary.

use crate::pixmap_impl::PixmapRenderer;
use crate::renderer::{RenderContext, RenderResult, RenderStyle, Renderer, RendererError};
use base64::{Engine, engine::general_purpose::STANDARD};
use mockup_core::catalog::{CatalogError, Product, ProductView, View};
use mockup_core::session::Session;
use peniko::Color;
use std::time::Duration;
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Could not save {name}: {reason}")]
    Sink { name: String, reason: String },
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Encode straight-alpha RGBA8 pixels as PNG.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> ExportResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| ExportError::Encode(format!("header: {}", e)))?;
        writer
            .write_image_data(rgba_data)
            .map_err(|e| ExportError::Encode(format!("data: {}", e)))?;
    }
    Ok(png_data)
}

/// A rendered view, serialized as PNG.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub key: ProductView,
    pub png: Vec<u8>,
}

impl Preview {
    /// `{prefix}{product}-{view}.png`
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{}{}.png", prefix, self.key.file_stem())
    }

    /// Inline `data:` URL for embedding the preview.
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

/// Receives exported files (a download trigger, a directory, ...).
pub trait ExportSink {
    fn deliver(&mut self, name: &str, png: &[u8]) -> ExportResult<()>;
}

/// Keeps delivered files in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<(String, Vec<u8>)>,
}

impl ExportSink for MemorySink {
    fn deliver(&mut self, name: &str, png: &[u8]) -> ExportResult<()> {
        self.files.push((name.to_string(), png.to_vec()));
        Ok(())
    }
}

/// Product overview with a preview of every designed view.
#[derive(Debug, Clone)]
pub struct DesignSummary {
    pub product: Product,
    /// Previews in catalog view order, only for views with layers.
    pub previews: Vec<Preview>,
}

impl DesignSummary {
    pub fn display_name(&self) -> &'static str {
        self.product.display_name()
    }

    pub fn is_empty(&self) -> bool {
        self.previews.is_empty()
    }
}

/// Drives the renderer to produce previews without disturbing the editor.
#[derive(Debug, Clone)]
pub struct Exporter {
    base_color: Color,
    style: RenderStyle,
    prefix: String,
    delay: Duration,
}

impl Default for Exporter {
    fn default() -> Self {
        Self {
            base_color: Color::WHITE,
            style: RenderStyle::default(),
            prefix: String::new(),
            delay: Duration::from_millis(200),
        }
    }
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_color(mut self, color: Color) -> Self {
        self.base_color = color;
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Prefix prepended to every exported file name.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Pause between consecutive deliveries in [`Exporter::export_all`].
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Paint the session's active view.
    pub fn render(&self, session: &Session, renderer: &mut PixmapRenderer) -> RenderResult<()> {
        let ctx = RenderContext::for_session(session)
            .with_base_color(self.base_color)
            .with_style(self.style);
        renderer.render(&ctx)
    }

    /// Render one view of the active product to PNG.
    ///
    /// The active view is swapped in with no selection, painted, serialized,
    /// then restored and repainted. The selection is not restored.
    pub fn preview_for(
        &self,
        session: &mut Session,
        renderer: &mut PixmapRenderer,
        view: View,
    ) -> ExportResult<Preview> {
        let original = session.active();
        let key = ProductView::new(original.product, view)?;

        session.set_active(key);
        let png = self.snapshot(session, renderer);
        session.set_active(original);
        self.render(session, renderer)?;

        Ok(Preview { key, png: png? })
    }

    fn snapshot(&self, session: &Session, renderer: &mut PixmapRenderer) -> ExportResult<Vec<u8>> {
        self.render(session, renderer)?;
        let size = renderer.surface_size();
        encode_png(&renderer.to_rgba(), size.width as u32, size.height as u32)
    }

    /// Views of the active product that have at least one layer.
    pub fn designed_views(session: &Session) -> Vec<View> {
        let product = session.product();
        product
            .views()
            .iter()
            .copied()
            .filter(|&view| {
                ProductView::new(product, view).is_ok_and(|key| !session.layers_for(key).is_empty())
            })
            .collect()
    }

    /// Preview and deliver every designed view of the active product.
    ///
    /// Returns the number of files delivered.
    pub fn export_all(
        &self,
        session: &mut Session,
        renderer: &mut PixmapRenderer,
        sink: &mut dyn ExportSink,
    ) -> ExportResult<usize> {
        let views = Self::designed_views(session);
        for (index, &view) in views.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
            let preview = self.preview_for(session, renderer, view)?;
            let name = preview.file_name(&self.prefix);
            sink.deliver(&name, &preview.png)?;
            log::info!("Exported {} ({} bytes)", name, preview.png.len());
        }
        Ok(views.len())
    }

    /// Summarize the active product with a preview per designed view.
    pub fn summary(&self, session: &mut Session, renderer: &mut PixmapRenderer) -> ExportResult<DesignSummary> {
        let previews = Self::designed_views(session)
            .into_iter()
            .map(|view| self.preview_for(session, renderer, view))
            .collect::<ExportResult<Vec<_>>>()?;
        Ok(DesignSummary {
            product: session.product(),
            previews,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_signature() {
        let png = encode_png(&[255, 0, 0, 255], 1, 1).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_png_rejects_short_data() {
        assert!(matches!(encode_png(&[0, 0, 0], 1, 1), Err(ExportError::Encode(_))));
    }

    #[test]
    fn test_preview_naming() {
        let preview = Preview {
            key: ProductView::new(Product::Cap, View::Left).unwrap(),
            png: vec![1, 2, 3],
        };
        assert_eq!(preview.file_name(""), "cap-left.png");
        assert_eq!(preview.file_name("404-cafe-"), "404-cafe-cap-left.png");
        assert_eq!(preview.data_url(), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_designed_views() {
        let mut session = Session::default();
        assert!(Exporter::designed_views(&session).is_empty());
        session.select_view(View::Back).unwrap();
        session.add_text("BACK");
        assert_eq!(Exporter::designed_views(&session), vec![View::Back]);
    }
}
