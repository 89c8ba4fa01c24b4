// Turns a pointer drag into discrete line segments.
// One segment per movement event, from the previous contact point to the new one.

use tracing::trace;

use crate::types::{Point, Segment};

#[derive(Debug, Default, Clone)]
pub struct GestureTracker {
    last: Option<Point>, // previous contact point while a drag is active
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer went down: remember where, emit nothing.
    /// A non-finite contact point leaves the tracker idle.
    pub fn begin(&mut self, at: Point) {
        if !at.is_finite() {
            trace!(x = at.x, y = at.y, "ignoring non-finite gesture start");
            self.last = None;
            return;
        }
        trace!(x = at.x, y = at.y, "gesture start");
        self.last = Some(at);
    }

    /// Pointer moved. Returns the segment from the previous point, if the
    /// pointer actually moved during an active drag.
    pub fn move_to(&mut self, to: Point) -> Option<Segment> {
        let from = self.last?;
        if from == to || !to.is_finite() {
            return None;
        }
        self.last = Some(to);
        Some(Segment::new(from, to))
    }

    /// Same as `move_to`, for hosts that report a position plus the delta
    /// since the previous event.
    pub fn drag_by(&mut self, position: Point, delta: Point) -> Option<Segment> {
        if self.last.is_none() {
            self.begin(position - delta);
        }
        self.move_to(position)
    }

    /// Pointer released. No closing segment is produced.
    pub fn end(&mut self) {
        self.last = None;
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }
}
