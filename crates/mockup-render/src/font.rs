//! Glyph measurement and rasterisation for text layers.

use crate::renderer::{RenderResult, RendererError};
use ab_glyph::{Font, FontArc, GlyphId, ScaleFont, point};
use kurbo::Point;
use mockup_core::hit::TextMeasure;
use std::path::Path;
use tiny_skia::Mask;

/// DejaVu Sans Bold, used when no font file is configured.
const BUNDLED_FONT: &[u8] = include_bytes!("../fonts/DejaVuSans-Bold.ttf");

/// The font used to measure and paint every text layer.
///
/// Text layers are always set in one bold face, so the caller should supply a
/// bold font file.
#[derive(Clone)]
pub struct LayerFont {
    font: FontArc,
}

impl std::fmt::Debug for LayerFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerFont").finish_non_exhaustive()
    }
}

impl LayerFont {
    /// Parse a TTF/OTF font.
    pub fn from_bytes(bytes: Vec<u8>) -> RenderResult<Self> {
        let font = FontArc::try_from_vec(bytes).map_err(|e| RendererError::FontLoad(e.to_string()))?;
        Ok(Self { font })
    }

    /// The bold face shipped with the renderer.
    pub fn bundled() -> RenderResult<Self> {
        let font = FontArc::try_from_slice(BUNDLED_FONT).map_err(|e| RendererError::FontLoad(e.to_string()))?;
        Ok(Self { font })
    }

    /// Read and parse a font file.
    pub fn load(path: &Path) -> RenderResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| RendererError::FontLoad(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(bytes)
    }

    /// Horizontal pen positions for each glyph, starting at 0, plus the total advance.
    fn advances(&self, text: &str, font_size: f32) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = self.font.as_scaled(font_size);
        let mut glyphs = Vec::with_capacity(text.len());
        let mut x = 0.0;
        let mut prev: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = self.font.glyph_id(ch);
            if let Some(prev) = prev {
                x += scaled.kern(prev, id);
            }
            glyphs.push((id, x));
            x += scaled.h_advance(id);
            prev = Some(id);
        }
        (glyphs, x)
    }

    /// Rasterise `text` centered (horizontally and on the em-box middle) at
    /// `center` into `mask`, keeping the strongest coverage per pixel.
    pub fn rasterize(&self, text: &str, font_size: f64, center: Point, mask: &mut Mask) {
        let size = font_size as f32;
        let scaled = self.font.as_scaled(size);
        let (glyphs, width) = self.advances(text, size);
        let left = center.x as f32 - width / 2.0;
        let baseline = center.y as f32 + (scaled.ascent() + scaled.descent()) / 2.0;

        let mask_width = mask.width() as i64;
        let mask_height = mask.height() as i64;
        let data = mask.data_mut();

        for (id, x) in glyphs {
            let glyph = id.with_scale_and_position(size, point(left + x, baseline));
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = bounds.min.x as i64 + px as i64;
                let y = bounds.min.y as i64 + py as i64;
                if x < 0 || y < 0 || x >= mask_width || y >= mask_height {
                    return;
                }
                let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                let cell = &mut data[(y * mask_width + x) as usize];
                *cell = (*cell).max(value);
            });
        }
    }
}

impl TextMeasure for LayerFont {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        self.advances(text, font_size as f32).1 as f64
    }
}
