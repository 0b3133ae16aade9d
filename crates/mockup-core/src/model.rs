//! Layer model: one ordered layer sequence per (product, view) bucket.

use crate::catalog::ProductView;
use crate::layers::{Layer, LayerId};
use std::collections::HashMap;

/// The scene graph for every product view, plus the single global selection.
///
/// Sequence order is paint order (later = on top). The model never renders;
/// callers decide when a mutation needs a repaint.
#[derive(Debug, Clone)]
pub struct LayerModel {
    buckets: HashMap<ProductView, Vec<Layer>>,
    selected: Option<LayerId>,
}

impl Default for LayerModel {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerModel {
    /// Create a model with an empty bucket for every catalog entry.
    pub fn new() -> Self {
        Self {
            buckets: ProductView::all().map(|key| (key, Vec::new())).collect(),
            selected: None,
        }
    }

    /// Append a layer to a bucket and select it.
    pub fn add_layer(&mut self, key: ProductView, layer: Layer) -> LayerId {
        let id = layer.id();
        self.append(key, layer);
        self.selected = Some(id);
        id
    }

    /// Append a layer without touching the selection.
    pub fn append(&mut self, key: ProductView, layer: Layer) {
        self.buckets.entry(key).or_default().push(layer);
    }

    /// Remove a layer by identity. Deselects it if it was selected.
    pub fn remove_layer(&mut self, key: ProductView, id: LayerId) -> Option<Layer> {
        let layers = self.buckets.get_mut(&key)?;
        let index = layers.iter().position(|layer| layer.id() == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(layers.remove(index))
    }

    /// Empty one bucket and clear the selection.
    pub fn clear(&mut self, key: ProductView) {
        if let Some(layers) = self.buckets.get_mut(&key) {
            layers.clear();
        }
        self.selected = None;
    }

    /// Layers of a bucket in paint order.
    pub fn layers_for(&self, key: ProductView) -> &[Layer] {
        self.buckets.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get a layer of a bucket by id.
    pub fn get(&self, key: ProductView, id: LayerId) -> Option<&Layer> {
        self.layers_for(key).iter().find(|layer| layer.id() == id)
    }

    /// Get a mutable layer of a bucket by id.
    pub fn get_mut(&mut self, key: ProductView, id: LayerId) -> Option<&mut Layer> {
        self.buckets
            .get_mut(&key)?
            .iter_mut()
            .find(|layer| layer.id() == id)
    }

    pub fn selected(&self) -> Option<LayerId> {
        self.selected
    }

    pub fn select(&mut self, id: LayerId) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected layer, if it lives in `key`.
    pub fn selected_in(&self, key: ProductView) -> Option<&Layer> {
        self.selected.and_then(|id| self.get(key, id))
    }

    /// Mutable access to the selected layer, if it lives in `key`.
    pub fn selected_in_mut(&mut self, key: ProductView) -> Option<&mut Layer> {
        let id = self.selected?;
        self.get_mut(key, id)
    }

    /// Check if a bucket has no layers.
    pub fn is_empty(&self, key: ProductView) -> bool {
        self.layers_for(key).is_empty()
    }

    /// Total number of layers across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}
