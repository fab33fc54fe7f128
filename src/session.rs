// ============================================================================
// EDIT SESSION — the surface the UI collaborator talks to.
//
// The session owns the history stack and the pending click list; the UI owns
// nothing but widgets.  Every mutation either fully succeeds (new image
// computed, snapshot pushed) or fully fails with the prior image untouched.
// ============================================================================

use crate::buffer::PixelBuffer;
use crate::error::EditError;
use crate::history::HistoryStack;
use crate::ops::region::{self, Point, Selection};
use crate::ops::registry::{self, TransformKind};

/// Maximum clicks a selection collects; extra clicks are ignored until the
/// selection is cleared, matching the click-capture behavior of the UI.
const SELECTION_POINTS: usize = 4;

/// One open image plus its linear undo history and the in-progress selection.
#[derive(Debug, Default)]
pub struct EditSession {
    history: HistoryStack,
    pending: Vec<Point>,
}

impl EditSession {
    pub fn new() -> Self {
        Self { history: HistoryStack::new(), pending: Vec::new() }
    }

    /// Load a new image: history is reset with this as entry 0 and any
    /// half-collected selection is discarded.
    pub fn load_fresh(&mut self, image: PixelBuffer) {
        self.history.reset(image);
        self.pending.clear();
    }

    /// The fixed, ordered transform-name list (for populating a selector).
    pub fn transform_names() -> [&'static str; 10] {
        registry::transform_names()
    }

    /// Current image — top of the history stack.
    pub fn current(&self) -> Result<&PixelBuffer, EditError> {
        self.history.current()
    }

    /// Snapshots currently held (1 after a fresh load, +1 per apply).
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Record a click. Returns `false` once four points are already
    /// collected; the click is then dropped.
    pub fn add_point(&mut self, point: Point) -> bool {
        if self.pending.len() >= SELECTION_POINTS {
            return false;
        }
        self.pending.push(point);
        true
    }

    pub fn pending_points(&self) -> &[Point] {
        &self.pending
    }

    pub fn clear_points(&mut self) {
        self.pending.clear();
    }

    /// Apply `kind` to the bounding box of `selection` on the current image.
    /// On success the composited image becomes current and is snapshotted.
    pub fn apply(
        &mut self,
        selection: &Selection,
        kind: TransformKind,
    ) -> Result<&PixelBuffer, EditError> {
        let current = self.history.current()?;
        let next = region::apply_to_region(current, selection, kind)?;
        self.history.push(&next);
        self.history.current()
    }

    /// `apply` with the transform resolved from its display name — the
    /// string-keyed entry point for UI boundaries.
    pub fn apply_named(
        &mut self,
        selection: &Selection,
        name: &str,
    ) -> Result<&PixelBuffer, EditError> {
        let kind = TransformKind::from_name(name)?;
        self.apply(selection, kind)
    }

    /// Consume the pending click list as the selection. Fails with
    /// `InvalidRegion` until exactly four points are collected; the points
    /// are cleared only on success, exactly like a failed apply leaves the
    /// image untouched.
    pub fn apply_pending(&mut self, kind: TransformKind) -> Result<&PixelBuffer, EditError> {
        if self.pending.len() != SELECTION_POINTS {
            return Err(EditError::InvalidRegion(format!(
                "selection needs {} points, have {}",
                SELECTION_POINTS,
                self.pending.len()
            )));
        }
        let selection = Selection::new([
            self.pending[0],
            self.pending[1],
            self.pending[2],
            self.pending[3],
        ]);
        self.apply(&selection, kind)?;
        self.pending.clear();
        self.history.current()
    }

    /// Step back one snapshot. `NothingToUndo` when only the initial load
    /// remains — benign, the current image is unchanged.
    pub fn undo(&mut self) -> Result<&PixelBuffer, EditError> {
        self.history.undo()
    }
}
