//! Mockup Render Library
//!
//! Renderer abstraction and a CPU implementation for the mockup editor,
//! plus PNG previews and export.

mod export;
mod font;
mod pixmap_impl;
mod placeholder;
mod renderer;

pub use export::{
    DesignSummary, ExportError, ExportResult, ExportSink, Exporter, MemorySink, Preview, encode_png,
};
pub use font::LayerFont;
pub use pixmap_impl::{PixmapRenderer, cover_fit};
pub use placeholder::PlaceholderBackdrop;
pub use renderer::{RenderContext, RenderResult, RenderStyle, Renderer, RendererError};
