use std::collections::VecDeque;
use std::sync::Arc;

use image::RgbImage;

use crate::error::{SketchError, SketchResult};
use crate::surface::RasterSurface;

/// Immutable copy of a surface's pixels at one point in time
#[derive(Clone, PartialEq)]
pub struct Snapshot {
    pixels: Arc<RgbImage>,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish()
    }
}

impl Snapshot {
    /// Copy the surface's current pixels
    pub fn capture(surface: &RasterSurface) -> Self {
        Self {
            pixels: Arc::new(surface.pixels().clone()),
        }
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    fn restore_into(&self, surface: &mut RasterSurface) {
        surface.replace_pixels(&self.pixels);
    }
}

/// Bounded LIFO stack of surface snapshots.
///
/// The top entry is always the surface as it was right before the most recent
/// completed mutation. When full, the oldest snapshot is evicted.
#[derive(Debug)]
pub struct SnapshotHistory {
    snapshots: VecDeque<Snapshot>,
    capacity: usize,
}

impl SnapshotHistory {
    /// Creates an empty history holding at most `capacity` snapshots (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Capture the surface and push it
    pub fn checkpoint(&mut self, surface: &RasterSurface) {
        self.push(Snapshot::capture(surface));
    }

    /// Push an already captured snapshot
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
            log::debug!("History full ({}), evicted oldest snapshot", self.capacity);
        }
        self.snapshots.push_back(snapshot);
    }

    /// Pop the most recent snapshot and restore the surface to it.
    ///
    /// Returns `NothingToUndo` and leaves the surface untouched when empty.
    pub fn undo(&mut self, surface: &mut RasterSurface) -> SketchResult<()> {
        let snapshot = self.snapshots.pop_back().ok_or(SketchError::NothingToUndo)?;
        snapshot.restore_into(surface);
        log::debug!("Restored snapshot, {} remaining", self.snapshots.len());
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
