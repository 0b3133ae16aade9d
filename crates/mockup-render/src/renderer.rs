//! Renderer trait abstraction.

use kurbo::Size;
use mockup_core::assets::ImageResource;
use mockup_core::catalog::ProductView;
use mockup_core::layers::{Layer, LayerId};
use mockup_core::session::Session;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Font load failed: {0}")]
    FontLoad(String),
    #[error("Image upload failed: {0}")]
    ImageUpload(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Fixed styling for selection decoration and placeholder backdrops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// Dashed box and handle outline color.
    pub selection_color: Color,
    pub selection_width: f32,
    /// On/off dash lengths of the selection box.
    pub selection_dash: [f32; 2],
    /// Handle diameter.
    pub handle_size: f64,
    pub handle_fill: Color,
    /// Placeholder backdrop panel color.
    pub placeholder_background: Color,
    /// Placeholder label color.
    pub placeholder_text: Color,
    pub placeholder_font_size: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            selection_color: Color::from_rgba8(0x2C, 0x18, 0x10, 255),
            selection_width: 3.0,
            selection_dash: [8.0, 8.0],
            handle_size: mockup_core::selection::HANDLE_SIZE,
            handle_fill: Color::WHITE,
            placeholder_background: Color::from_rgba8(0xF0, 0xF0, 0xF0, 255),
            placeholder_text: Color::from_rgba8(0x66, 0x66, 0x66, 255),
            placeholder_font_size: 24.0,
        }
    }
}

/// Context for a single render pass.
pub struct RenderContext<'a> {
    /// Bucket being painted.
    pub key: ProductView,
    /// Layers in paint order.
    pub layers: &'a [Layer],
    /// Layer to decorate with selection handles.
    pub selected: Option<LayerId>,
    /// Backdrop, if its decode has completed.
    pub backdrop: Option<&'a ImageResource>,
    /// Surface fill drawn under everything.
    pub base_color: Color,
    pub style: RenderStyle,
}

impl<'a> RenderContext<'a> {
    /// Create a context for a bucket with no selection or backdrop.
    pub fn new(key: ProductView, layers: &'a [Layer]) -> Self {
        Self {
            key,
            layers,
            selected: None,
            backdrop: None,
            base_color: Color::WHITE,
            style: RenderStyle::default(),
        }
    }

    /// Capture the active view of a session.
    pub fn for_session(session: &'a Session) -> Self {
        let key = session.active();
        Self::new(key, session.active_layers())
            .with_selected(session.selected_layer().map(Layer::id))
            .with_backdrop(session.backdrop(key))
    }

    pub fn with_selected(mut self, selected: Option<LayerId>) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_backdrop(mut self, backdrop: Option<&'a ImageResource>) -> Self {
        self.backdrop = backdrop;
        self
    }

    /// Set the base fill color.
    pub fn with_base_color(mut self, color: Color) -> Self {
        self.base_color = color;
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }
}

/// Trait for rendering backends.
///
/// A render pass fully repaints the surface; nothing from a previous pass
/// survives.
pub trait Renderer {
    /// Paint one frame.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Internal surface size.
    fn surface_size(&self) -> Size;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.base_color
    }
}
