//! Raw pointer/touch events and double-tap detection.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// An input event as delivered by the host, in client coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Mouse button pressed.
    PointerDown { position: Point },
    /// Mouse moved.
    PointerMove { position: Point },
    /// Mouse button released.
    PointerUp,
    /// A finger landed; `touches` lists every finger currently down.
    TouchStart { touches: Vec<Point> },
    /// Fingers moved; `touches` lists every finger currently down.
    TouchMove { touches: Vec<Point> },
    /// A finger lifted.
    TouchEnd,
    /// Host-detected double click.
    DoubleClick { position: Point },
}

/// Double-tap detection constants.
const DOUBLE_TAP_TIME: Duration = Duration::from_millis(500);
const DOUBLE_TAP_DISTANCE: f64 = 5.0;

/// Detects double taps from successive single-finger touch starts.
///
/// Touch hosts do not deliver a double-click event, so taps are paired up
/// here by time and distance.
#[derive(Debug, Clone, Default)]
pub struct TapTracker {
    /// Last tap time and position (surface units).
    last_tap: Option<(Instant, Point)>,
}

impl TapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tap; returns true if it completes a double tap.
    pub fn register_tap(&mut self, position: Point, now: Instant) -> bool {
        if let Some((last_time, last_pos)) = self.last_tap {
            let elapsed = now.saturating_duration_since(last_time);
            if elapsed < DOUBLE_TAP_TIME && last_pos.distance(position) < DOUBLE_TAP_DISTANCE {
                // Reset so a third tap does not pair with the second
                self.last_tap = None;
                return true;
            }
        }
        self.last_tap = Some((now, position));
        false
    }

    /// Forget any pending tap.
    pub fn reset(&mut self) {
        self.last_tap = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_tap_detection() {
        let mut taps = TapTracker::new();
        let now = Instant::now();
        let pos = Point::new(100.0, 100.0);

        assert!(!taps.register_tap(pos, now));
        assert!(taps.register_tap(pos, now + Duration::from_millis(200)));
        // Third tap starts a new pair
        assert!(!taps.register_tap(pos, now + Duration::from_millis(300)));
    }

    #[test]
    fn test_double_tap_too_far() {
        let mut taps = TapTracker::new();
        let now = Instant::now();
        assert!(!taps.register_tap(Point::new(100.0, 100.0), now));
        assert!(!taps.register_tap(Point::new(200.0, 200.0), now));
    }

    #[test]
    fn test_double_tap_too_slow() {
        let mut taps = TapTracker::new();
        let now = Instant::now();
        let pos = Point::new(10.0, 10.0);
        assert!(!taps.register_tap(pos, now));
        assert!(!taps.register_tap(pos, now + Duration::from_millis(800)));
    }

    #[test]
    fn test_event_json_shape() {
        let event: InputEvent =
            serde_json::from_str(r#"{"type":"touch_start","touches":[{"x":1.0,"y":2.0}]}"#).unwrap();
        assert_eq!(
            event,
            InputEvent::TouchStart {
                touches: vec![Point::new(1.0, 2.0)]
            }
        );
    }
}
