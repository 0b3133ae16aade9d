//! Gesture controller: turns pointer/touch sequences into layer edits.
//!
//! Single-finger drag and two-finger pinch are tracked independently; the
//! number of fingers in each touch event decides which path applies.

use crate::catalog::ProductView;
use crate::confirm::ConfirmRequest;
use crate::hit::{TextMeasure, hit_test};
use crate::input::{InputEvent, TapTracker};
use crate::mapper::SurfaceGeometry;
use crate::model::LayerModel;
use kurbo::Point;
use std::time::Instant;

/// Current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Moving the selected layer; `anchor` is the last pointer position.
    Dragging { anchor: Point },
    /// Scaling the selected layer; `last_distance` is the last finger spread.
    Pinching { last_distance: f64 },
}

/// What the host should do after an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureResponse {
    /// The active view changed visibly and should be repainted.
    pub redraw: bool,
    /// A destructive action waiting for confirmation.
    pub confirm: Option<ConfirmRequest>,
}

impl GestureResponse {
    fn redraw(redraw: bool) -> Self {
        Self {
            redraw,
            confirm: None,
        }
    }
}

/// The layers a gesture operates on: the active bucket of a model.
pub struct GestureTarget<'a> {
    pub model: &'a mut LayerModel,
    pub key: ProductView,
    pub measure: &'a dyn TextMeasure,
}

impl GestureTarget<'_> {
    /// Borrow the same target for a shorter call.
    pub fn reborrow(&mut self) -> GestureTarget<'_> {
        GestureTarget {
            model: &mut *self.model,
            key: self.key,
            measure: self.measure,
        }
    }
}

/// State machine for select / drag / pinch / delete gestures.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
    taps: TapTracker,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Drop any gesture in progress (used when the active view changes).
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.taps.reset();
    }

    /// Dispatch a raw event. Client positions are mapped with `geometry`.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        geometry: &SurfaceGeometry,
        target: GestureTarget<'_>,
    ) -> GestureResponse {
        match event {
            InputEvent::PointerDown { position } => {
                GestureResponse::redraw(self.press(geometry.to_surface(*position), target))
            }
            InputEvent::PointerMove { position } => {
                GestureResponse::redraw(self.drag_to(geometry.to_surface(*position), target))
            }
            InputEvent::PointerUp | InputEvent::TouchEnd => {
                self.release();
                GestureResponse::default()
            }
            InputEvent::TouchStart { touches } => self.touch_start(touches, geometry, target),
            InputEvent::TouchMove { touches } => match touches.as_slice() {
                [one] => GestureResponse::redraw(self.drag_to(geometry.to_surface(*one), target)),
                [a, b] => GestureResponse::redraw(self.pinch_to(
                    geometry.to_surface(*a),
                    geometry.to_surface(*b),
                    target,
                )),
                _ => GestureResponse::default(),
            },
            InputEvent::DoubleClick { .. } => GestureResponse {
                redraw: false,
                confirm: self.double_press(&target),
            },
        }
    }

    fn touch_start(
        &mut self,
        touches: &[Point],
        geometry: &SurfaceGeometry,
        mut target: GestureTarget<'_>,
    ) -> GestureResponse {
        match touches {
            [one] => {
                let point = geometry.to_surface(*one);
                let redraw = self.press(point, target.reborrow());
                let confirm = if self.taps.register_tap(point, Instant::now()) {
                    self.double_press(&target)
                } else {
                    None
                };
                GestureResponse { redraw, confirm }
            }
            [a, b] => {
                self.pinch_start(geometry.to_surface(*a), geometry.to_surface(*b), &target);
                GestureResponse::default()
            }
            _ => GestureResponse::default(),
        }
    }

    /// Select the topmost layer under `point` and start dragging it, or
    /// clear the selection if nothing is hit. Always requests a redraw.
    pub fn press(&mut self, point: Point, target: GestureTarget<'_>) -> bool {
        let layers = target.model.layers_for(target.key);
        match hit_test(point, layers, target.measure).map(|layer| layer.id()) {
            Some(id) => {
                target.model.select(id);
                self.state = GestureState::Dragging { anchor: point };
            }
            None => {
                target.model.clear_selection();
                self.state = GestureState::Idle;
            }
        }
        true
    }

    /// Move the selected layer by the pointer delta since the last event.
    pub fn drag_to(&mut self, point: Point, target: GestureTarget<'_>) -> bool {
        let GestureState::Dragging { anchor } = self.state else {
            return false;
        };
        let Some(layer) = target.model.selected_in_mut(target.key) else {
            return false;
        };
        layer.translate(point - anchor);
        self.state = GestureState::Dragging { anchor: point };
        true
    }

    /// End any drag or pinch.
    pub fn release(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Begin pinching if a layer is selected in the active view.
    pub fn pinch_start(&mut self, a: Point, b: Point, target: &GestureTarget<'_>) {
        if target.model.selected_in(target.key).is_some() {
            self.state = GestureState::Pinching {
                last_distance: a.distance(b),
            };
        }
    }

    /// Scale the selected layer by the change in finger spread.
    ///
    /// The ratio is taken against the previous move, not the pinch start, so
    /// scaling follows the fingers continuously.
    pub fn pinch_to(&mut self, a: Point, b: Point, target: GestureTarget<'_>) -> bool {
        let GestureState::Pinching { last_distance } = self.state else {
            return false;
        };
        let Some(layer) = target.model.selected_in_mut(target.key) else {
            return false;
        };
        let distance = a.distance(b);
        self.state = GestureState::Pinching {
            last_distance: distance,
        };
        if last_distance <= 0.0 {
            return false;
        }
        layer.scale_by(distance / last_distance);
        true
    }

    /// Ask to delete the selected layer, if there is one in the active view.
    pub fn double_press(&self, target: &GestureTarget<'_>) -> Option<ConfirmRequest> {
        let layer = target.model.selected_in(target.key)?;
        Some(ConfirmRequest::delete_layer(target.key, layer.id()))
    }
}
