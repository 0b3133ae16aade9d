//! tiny-skia based renderer implementation.

use crate::font::LayerFont;
use crate::renderer::{RenderContext, RenderResult, RenderStyle, Renderer, RendererError};
use kurbo::{Point, Rect, Size};
use mockup_core::assets::ImageResource;
use mockup_core::hit::{ApproximateMetrics, TextMeasure, bounds};
use mockup_core::layers::{ImageLayer, Layer, TextLayer};
use mockup_core::selection::SelectionOutline;
use peniko::Color;
use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;
use tiny_skia::{
    FillRule, FilterQuality, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, StrokeDash,
    Transform,
};
use uuid::Uuid;

/// CPU renderer painting into a fixed-resolution RGBA pixel buffer.
pub struct PixmapRenderer {
    /// The drawing surface.
    pixmap: Pixmap,
    /// Font for text layers; approximate metrics are used without one.
    font: Option<LayerFont>,
    /// Premultiplied copies of image resources, keyed by resource id.
    image_cache: HashMap<Uuid, Pixmap>,
}

impl PixmapRenderer {
    /// Create a renderer with a surface of the given size.
    pub fn new(size: Size) -> RenderResult<Self> {
        let pixmap = Pixmap::new(size.width.round() as u32, size.height.round() as u32).ok_or_else(|| {
            RendererError::InitFailed(format!("cannot allocate {}x{} surface", size.width, size.height))
        })?;
        Ok(Self {
            pixmap,
            font: None,
            image_cache: HashMap::new(),
        })
    }

    /// Use `font` for measuring and painting text.
    pub fn with_font(mut self, font: Option<LayerFont>) -> Self {
        self.font = font;
        self
    }

    pub fn font(&self) -> Option<&LayerFont> {
        self.font.as_ref()
    }

    /// The drawing surface (premultiplied RGBA).
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Surface pixels as straight-alpha RGBA8, ready for encoding.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        rgba
    }

    /// Straight-alpha color of one surface pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Number of image resources held in premultiplied form.
    pub fn cached_images(&self) -> usize {
        self.image_cache.len()
    }

    /// Drop cached pixmaps for resources no longer in use.
    pub fn retain_images(&mut self, keep: impl Fn(&Uuid) -> bool) {
        self.image_cache.retain(|id, _| keep(id));
    }

    fn measure(&self) -> &dyn TextMeasure {
        match &self.font {
            Some(font) => font as &dyn TextMeasure,
            None => &ApproximateMetrics,
        }
    }

    /// Draw an image scaled into `dest`.
    fn draw_image(&mut self, image: &ImageResource, dest: Rect) -> RenderResult<()> {
        let source = match self.image_cache.entry(image.id()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(upload(image)?),
        };
        let sx = dest.width() / image.width() as f64;
        let sy = dest.height() / image.height() as f64;
        let transform = Transform::from_row(sx as f32, 0.0, 0.0, sy as f32, dest.x0 as f32, dest.y0 as f32);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
        Ok(())
    }

    /// Cover-fit the backdrop: scale to fill the surface, crop overflow evenly.
    fn render_backdrop(&mut self, image: &ImageResource) -> RenderResult<()> {
        let surface = self.surface_size();
        let dest = cover_fit(surface, Size::new(image.width() as f64, image.height() as f64));
        self.draw_image(image, dest)
    }

    fn render_layer(&mut self, layer: &Layer) -> RenderResult<()> {
        match layer {
            Layer::Text(text) => {
                self.render_text(text);
                Ok(())
            }
            Layer::Image(image) => self.render_image(image),
        }
    }

    fn render_text(&mut self, text: &TextLayer) {
        let Some(font) = &self.font else {
            self.render_text_placeholder(text);
            return;
        };
        let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) else {
            return;
        };
        font.rasterize(&text.content, text.font_size, text.position, &mut mask);
        let full = tiny_skia::Rect::from_xywh(0.0, 0.0, self.pixmap.width() as f32, self.pixmap.height() as f32);
        if let Some(full) = full {
            self.pixmap.fill_rect(full, &solid(text.color), Transform::identity(), Some(&mask));
        }
    }

    /// Without a font, paint one block per visible character inside the
    /// layer's bounds.
    fn render_text_placeholder(&mut self, text: &TextLayer) {
        let bounds = bounds(&Layer::Text(text.clone()), &ApproximateMetrics);
        let count = text.content.chars().count().max(1);
        let cell = bounds.width() / count as f64;
        let paint = solid(text.color);
        for (i, ch) in text.content.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x = bounds.x0 + cell * i as f64 + cell * 0.1;
            let rect = tiny_skia::Rect::from_xywh(
                x as f32,
                (text.position.y - text.font_size * 0.35) as f32,
                (cell * 0.8) as f32,
                (text.font_size * 0.7) as f32,
            );
            if let Some(rect) = rect {
                self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
    }

    fn render_image(&mut self, image: &ImageLayer) -> RenderResult<()> {
        let dest = Rect::from_center_size(image.position, image.size());
        self.draw_image(&image.image, dest)
    }

    /// Dashed box plus four circular corner handles.
    fn render_selection(&mut self, layer: &Layer, style: &RenderStyle) {
        let outline = SelectionOutline::for_layer(layer, self.measure());
        let b = outline.bounds;

        let paint = solid(style.selection_color);
        let dashed = Stroke {
            width: style.selection_width,
            dash: StrokeDash::new(style.selection_dash.to_vec(), 0.0),
            ..Stroke::default()
        };
        if let Some(rect) = tiny_skia::Rect::from_ltrb(b.x0 as f32, b.y0 as f32, b.x1 as f32, b.y1 as f32) {
            let path = PathBuilder::from_rect(rect);
            self.pixmap.stroke_path(&path, &paint, &dashed, Transform::identity(), None);
        }

        let solid_stroke = Stroke {
            width: style.selection_width,
            ..Stroke::default()
        };
        let radius = (style.handle_size / 2.0) as f32;
        let fill = solid(style.handle_fill);
        for handle in outline.handles {
            let Point { x, y } = handle.position;
            let Some(circle) = PathBuilder::from_circle(x as f32, y as f32, radius) else {
                continue;
            };
            self.pixmap.fill_path(&circle, &fill, FillRule::Winding, Transform::identity(), None);
            self.pixmap.stroke_path(&circle, &paint, &solid_stroke, Transform::identity(), None);
        }
    }
}

impl TextMeasure for PixmapRenderer {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        self.measure().text_width(text, font_size)
    }
}

impl Renderer for PixmapRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        self.pixmap.fill(skia_color(self.background_color(ctx)));

        if let Some(backdrop) = ctx.backdrop {
            self.render_backdrop(backdrop)?;
        }

        for layer in ctx.layers {
            self.render_layer(layer)?;
            if ctx.selected == Some(layer.id()) {
                self.render_selection(layer, &ctx.style);
            }
        }

        // Only resources on screen stay cached
        let live: HashSet<Uuid> = ctx
            .layers
            .iter()
            .filter_map(|layer| layer.as_image().map(|image| image.image.id()))
            .chain(ctx.backdrop.map(ImageResource::id))
            .collect();
        self.retain_images(|id| live.contains(id));
        Ok(())
    }

    fn surface_size(&self) -> Size {
        Size::new(self.pixmap.width() as f64, self.pixmap.height() as f64)
    }
}

/// Destination rect for cover-fitting `image` onto `surface`, centered.
pub fn cover_fit(surface: Size, image: Size) -> Rect {
    let scale = (surface.width / image.width).max(surface.height / image.height);
    let size = Size::new(image.width * scale, image.height * scale);
    Rect::from_origin_size(
        ((surface.width - size.width) / 2.0, (surface.height - size.height) / 2.0),
        size,
    )
}

/// Premultiply a straight-alpha resource into a pixmap.
fn upload(image: &ImageResource) -> RenderResult<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height()).ok_or_else(|| {
        RendererError::ImageUpload(format!("cannot allocate {}x{} image", image.width(), image.height()))
    })?;
    for (dst, src) in pixmap.data_mut().chunks_exact_mut(4).zip(image.rgba().chunks_exact(4)) {
        let alpha = src[3] as u16;
        dst[0] = ((src[0] as u16 * alpha + 127) / 255) as u8;
        dst[1] = ((src[1] as u16 * alpha + 127) / 255) as u8;
        dst[2] = ((src[2] as u16 * alpha + 127) / 255) as u8;
        dst[3] = src[3];
    }
    Ok(pixmap)
}

pub(crate) fn skia_color(color: Color) -> tiny_skia::Color {
    let c = color.to_rgba8();
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

pub(crate) fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}
