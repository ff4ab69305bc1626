use egui::Pos2;

use crate::history::Snapshot;

/// One pointer-down to pointer-up gesture in progress.
///
/// Only its rasterized effect survives; the session itself is dropped when the
/// gesture ends. It carries the surface as it was before the gesture so that
/// completing it can checkpoint the pre-stroke state.
#[derive(Debug)]
pub struct StrokeSession {
    last_point: Pos2,
    marks: usize,
    baseline: Snapshot,
}

impl StrokeSession {
    pub fn new(start: Pos2, baseline: Snapshot) -> Self {
        Self {
            last_point: start,
            marks: 0,
            baseline,
        }
    }

    /// The last recorded point, where the next segment starts
    pub fn last_point(&self) -> Pos2 {
        self.last_point
    }

    /// Move the cursor; the next segment starts at `point`
    pub fn advance_to(&mut self, point: Pos2) {
        self.last_point = point;
    }

    /// Record that a segment or dab actually changed the surface
    pub fn record_mark(&mut self) {
        self.marks += 1;
    }

    /// Number of segments or dabs that changed the surface
    pub fn marks(&self) -> usize {
        self.marks
    }

    pub fn is_empty(&self) -> bool {
        self.marks == 0
    }

    /// The surface before this gesture started
    pub fn into_baseline(self) -> Snapshot {
        self.baseline
    }
}
