//! Pointer events delivered by the host window and double-click detection.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Raw pointer event in integer canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { x: i32, y: i32, button: MouseButton },
    Move { x: i32, y: i32 },
    Up { x: i32, y: i32, button: MouseButton },
}

impl PointerEvent {
    pub fn pixel(&self) -> (i32, i32) {
        match *self {
            PointerEvent::Down { x, y, .. }
            | PointerEvent::Move { x, y }
            | PointerEvent::Up { x, y, .. } => (x, y),
        }
    }

    pub fn position(&self) -> Point {
        let (x, y) = self.pixel();
        Point::new(f64::from(x), f64::from(y))
    }

    /// The button involved, `None` for moves.
    pub fn button(&self) -> Option<MouseButton> {
        match *self {
            PointerEvent::Down { button, .. } | PointerEvent::Up { button, .. } => Some(button),
            PointerEvent::Move { .. } => None,
        }
    }
}

/// Detects two presses at (nearly) the same pixel within a time window.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    window: Duration,
    max_distance: f64,
    last: Option<(Instant, (i32, i32))>,
}

impl ClickTracker {
    pub fn new(window: Duration, max_distance: f64) -> Self {
        Self {
            window,
            max_distance,
            last: None,
        }
    }

    /// Record a press. Returns true when it completes a double-click.
    pub fn register(&mut self, pixel: (i32, i32), now: Instant) -> bool {
        if let Some((last_time, last_pixel)) = self.last {
            let elapsed = now.saturating_duration_since(last_time);
            let dx = f64::from(pixel.0) - f64::from(last_pixel.0);
            let dy = f64::from(pixel.1) - f64::from(last_pixel.1);
            if elapsed <= self.window && dx.hypot(dy) <= self.max_distance {
                // Reset so a third press starts a new sequence.
                self.last = None;
                return true;
            }
        }
        self.last = Some((now, pixel));
        false
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_click_detection() {
        let mut clicks = ClickTracker::default();
        let t0 = Instant::now();
        assert!(!clicks.register((100, 100), t0));
        assert!(clicks.register((100, 100), t0 + Duration::from_millis(200)));
        // Third press starts over.
        assert!(!clicks.register((100, 100), t0 + Duration::from_millis(300)));
    }

    #[test]
    fn test_double_click_too_far() {
        let mut clicks = ClickTracker::default();
        let t0 = Instant::now();
        clicks.register((100, 100), t0);
        assert!(!clicks.register((101, 100), t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_presses_at_opposite_extremes() {
        let mut clicks = ClickTracker::new(Duration::from_millis(500), 10.0);
        let t0 = Instant::now();
        clicks.register((i32::MIN, i32::MIN), t0);
        assert!(!clicks.register((i32::MAX, i32::MAX), t0));
        assert!(clicks.register((i32::MAX - 3, i32::MAX), t0));
    }

    #[test]
    fn test_double_click_too_slow() {
        let mut clicks = ClickTracker::default();
        let t0 = Instant::now();
        clicks.register((5, 5), t0);
        assert!(!clicks.register((5, 5), t0 + Duration::from_millis(501)));
        assert!(clicks.register((5, 5), t0 + Duration::from_millis(900)));
    }

    #[test]
    fn test_event_accessors() {
        let down = PointerEvent::Down {
            x: 3,
            y: -4,
            button: MouseButton::Left,
        };
        assert_eq!(down.position(), Point::new(3.0, -4.0));
        assert_eq!(down.button(), Some(MouseButton::Left));
        assert_eq!(PointerEvent::Move { x: 0, y: 0 }.button(), None);
    }
}
