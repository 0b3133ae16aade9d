//! Editing session: active product/view, layers, backdrops and pending work.
//!
//! The session is the single owner of mutable editor state. Hosts feed it
//! input and decode completions, then check [`Session::take_redraw`] to decide
//! whether to repaint.

use crate::assets::{AssetResult, BackdropFallback, DecodeQueue, DecodeTarget, ImageResource, Upload};
use crate::catalog::{CatalogError, Product, ProductView, View};
use crate::confirm::{ConfirmAction, ConfirmRequest};
use crate::gesture::{GestureController, GestureTarget};
use crate::hit::TextMeasure;
use crate::input::InputEvent;
use crate::layers::{ImageLayer, Layer, LayerId, TextLayer};
use crate::mapper::SurfaceGeometry;
use crate::model::LayerModel;
use kurbo::{Point, Size};
use peniko::Color;
use std::collections::HashMap;

/// Defaults applied to new layers.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Internal drawing-surface resolution.
    pub surface_size: Size,
    /// Fill color for new text layers.
    pub text_color: Color,
    /// Font size for new text layers.
    pub font_size: f64,
    /// Base size for new image layers.
    pub image_base_size: Size,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            surface_size: Size::new(600.0, 600.0),
            text_color: Color::BLACK,
            font_size: TextLayer::DEFAULT_FONT_SIZE,
            image_base_size: Size::new(ImageLayer::DEFAULT_BASE_SIZE, ImageLayer::DEFAULT_BASE_SIZE),
        }
    }
}

/// Runtime editor state (not persisted).
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    active: ProductView,
    model: LayerModel,
    backdrops: HashMap<ProductView, ImageResource>,
    decodes: DecodeQueue,
    gestures: GestureController,
    needs_redraw: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// Create a session showing the front of the default product.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            active: ProductView::default(),
            model: LayerModel::new(),
            backdrops: HashMap::new(),
            decodes: DecodeQueue::new(),
            gestures: GestureController::new(),
            needs_redraw: true,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn surface_size(&self) -> Size {
        self.config.surface_size
    }

    /// Center of the drawing surface, where new layers are placed.
    pub fn surface_center(&self) -> Point {
        Point::new(
            self.config.surface_size.width / 2.0,
            self.config.surface_size.height / 2.0,
        )
    }

    /// The bucket currently shown.
    pub fn active(&self) -> ProductView {
        self.active
    }

    pub fn product(&self) -> Product {
        self.active.product
    }

    pub fn view(&self) -> View {
        self.active.view
    }

    pub fn model(&self) -> &LayerModel {
        &self.model
    }

    /// Layers of any bucket.
    pub fn layers_for(&self, key: ProductView) -> &[Layer] {
        self.model.layers_for(key)
    }

    /// Layers of the active bucket.
    pub fn active_layers(&self) -> &[Layer] {
        self.model.layers_for(self.active)
    }

    /// The selected layer (always in the active bucket).
    pub fn selected_layer(&self) -> Option<&Layer> {
        self.model.selected_in(self.active)
    }

    pub fn selected_id(&self) -> Option<LayerId> {
        self.model.selected()
    }

    /// Backdrop of a bucket, once its decode has completed.
    pub fn backdrop(&self, key: ProductView) -> Option<&ImageResource> {
        self.backdrops.get(&key)
    }

    /// Switch product. The view resets to the product's first view.
    pub fn select_product(&mut self, product: Product) {
        self.set_active(ProductView::default_for(product));
    }

    /// Switch view within the current product.
    pub fn select_view(&mut self, view: View) -> Result<(), CatalogError> {
        let key = ProductView::new(self.active.product, view)?;
        self.set_active(key);
        Ok(())
    }

    /// Make `key` the active bucket. Always clears the selection.
    pub fn set_active(&mut self, key: ProductView) {
        self.active = key;
        self.model.clear_selection();
        self.gestures.reset();
        self.needs_redraw = true;
    }

    /// Add a text layer at the surface center. Blank input is ignored.
    pub fn add_text(&mut self, content: &str) -> Option<LayerId> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        let layer = TextLayer::new(self.surface_center(), content.to_string())
            .with_font_size(self.config.font_size)
            .with_color(self.config.text_color);
        let id = self.model.add_layer(self.active, layer.into());
        self.needs_redraw = true;
        Some(id)
    }

    /// Queue an uploaded file for decoding into a new image layer.
    ///
    /// Files that do not declare an image media type are silently ignored.
    pub fn upload_image(&mut self, upload: Upload) -> bool {
        if !upload.is_image() {
            log::debug!("Ignoring upload with media type '{}'", upload.media_type);
            return false;
        }
        self.decodes.push(DecodeTarget::Layer(self.active), Ok(upload.bytes));
        true
    }

    /// Queue backdrop bytes (or the error from reading them) for decoding.
    pub fn request_backdrop(&mut self, key: ProductView, source: AssetResult<Vec<u8>>) {
        self.decodes.push(DecodeTarget::Backdrop(key), source);
    }

    /// Number of decodes waiting for completion.
    pub fn pending_decodes(&self) -> usize {
        self.decodes.len()
    }

    /// Complete every queued decode. Returns how many were processed.
    ///
    /// Results rejoin the bucket they were requested for even if the user
    /// has moved on; a repaint is only requested for the active bucket.
    pub fn pump_decodes(&mut self, fallback: &dyn BackdropFallback) -> usize {
        let mut processed = 0;
        while let Some(job) = self.decodes.pop() {
            processed += 1;
            let decoded = job.source.and_then(|bytes| ImageResource::decode(&bytes));
            match (job.target, decoded) {
                (DecodeTarget::Backdrop(key), Ok(image)) => {
                    self.backdrops.insert(key, image);
                }
                (DecodeTarget::Backdrop(key), Err(e)) => {
                    log::warn!("Failed to load backdrop for {}, using fallback: {}", key, e);
                    self.backdrops.insert(key, fallback.placeholder(key));
                }
                (DecodeTarget::Layer(key), Ok(image)) => {
                    let layer = ImageLayer::new(self.surface_center(), image)
                        .with_base_size(self.config.image_base_size);
                    if key == self.active {
                        self.model.add_layer(key, layer.into());
                    } else {
                        log::debug!("Image decoded for inactive view {}", key);
                        self.model.append(key, layer.into());
                    }
                }
                (DecodeTarget::Layer(key), Err(e)) => {
                    log::warn!("Dropping image upload for {}: {}", key, e);
                    continue;
                }
            }
            if job.target.key() == self.active {
                self.needs_redraw = true;
            }
        }
        processed
    }

    /// Feed a raw input event through the gesture controller.
    ///
    /// Returns a confirmation request when the gesture asks to delete.
    pub fn handle_input(
        &mut self,
        event: &InputEvent,
        geometry: &SurfaceGeometry,
        measure: &dyn TextMeasure,
    ) -> Option<ConfirmRequest> {
        let target = GestureTarget {
            model: &mut self.model,
            key: self.active,
            measure,
        };
        let response = self.gestures.handle(event, geometry, target);
        self.needs_redraw |= response.redraw;
        response.confirm
    }

    /// Ask to clear the active view.
    pub fn request_clear(&self) -> ConfirmRequest {
        ConfirmRequest::clear_view(self.active)
    }

    /// Apply the answer to a confirmation request.
    ///
    /// Declined requests, and requests whose layer no longer exists, leave
    /// the state untouched. Returns whether anything changed.
    pub fn resolve(&mut self, request: ConfirmRequest, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        let changed = match request.action {
            ConfirmAction::DeleteLayer { key, id } => {
                let removed = self.model.remove_layer(key, id).is_some();
                if removed {
                    self.model.clear_selection();
                }
                removed
            }
            ConfirmAction::ClearView(key) => {
                self.model.clear(key);
                true
            }
        };
        if changed && request.key() == self.active {
            self.needs_redraw = true;
        }
        changed
    }

    /// Replace the content of the selected text layer. Blank input is ignored.
    pub fn set_text_content(&mut self, content: &str) -> bool {
        let content = content.trim();
        if content.is_empty() {
            return false;
        }
        let Some(text) = self.selected_text_mut() else {
            return false;
        };
        text.set_content(content.to_string());
        self.needs_redraw = true;
        true
    }

    /// Recolor the selected text layer.
    pub fn set_text_color(&mut self, color: Color) -> bool {
        let Some(text) = self.selected_text_mut() else {
            return false;
        };
        text.color = color;
        self.needs_redraw = true;
        true
    }

    fn selected_text_mut(&mut self) -> Option<&mut TextLayer> {
        self.model.selected_in_mut(self.active)?.as_text_mut()
    }

    /// Mark the surface as needing a repaint.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Take the pending repaint request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
