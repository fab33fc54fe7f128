// ============================================================================
// HISTORY STACK — linear undo over full-image snapshots
// ============================================================================

use crate::buffer::PixelBuffer;
use crate::error::EditError;

/// Append-only-until-pop stack of image snapshots, insertion order =
/// chronological.  Every stored entry is a deep copy: a later transform can
/// never retroactively alter a snapshot.  Once an image has been loaded the
/// stack never drains below one entry.
#[derive(Debug, Default)]
pub struct HistoryStack {
    snapshots: Vec<PixelBuffer>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop all history and seed the stack with `image` as entry 0.
    /// Called on every fresh image load.
    pub fn reset(&mut self, image: PixelBuffer) {
        self.snapshots.clear();
        self.snapshots.push(image);
    }

    /// Append a snapshot of `image`.
    pub fn push(&mut self, image: &PixelBuffer) {
        self.snapshots.push(image.clone());
    }

    /// Top of the stack — the current image.
    pub fn current(&self) -> Result<&PixelBuffer, EditError> {
        self.snapshots.last().ok_or(EditError::EmptyHistory)
    }

    /// Pop the top snapshot and return the new top. The initial entry is
    /// never popped: with one snapshot remaining this is `NothingToUndo`.
    pub fn undo(&mut self) -> Result<&PixelBuffer, EditError> {
        if self.snapshots.len() <= 1 {
            return Err(EditError::NothingToUndo);
        }
        self.snapshots.pop();
        // len >= 1 after the guard above
        Ok(self.snapshots.last().unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    fn tagged(tag: u8) -> PixelBuffer {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set(0, 0, Rgb(tag, 0, 0)).unwrap();
        buf
    }

    #[test]
    fn current_before_any_load_is_empty_history() {
        let stack = HistoryStack::new();
        assert_eq!(stack.current().unwrap_err(), EditError::EmptyHistory);
    }

    #[test]
    fn push_and_undo_walk_back_in_order() {
        let mut stack = HistoryStack::new();
        stack.reset(tagged(1));
        stack.push(&tagged(2));
        stack.push(&tagged(3));
        assert_eq!(stack.len(), 3);

        assert_eq!(stack.undo().unwrap().get(0, 0).unwrap(), Rgb(2, 0, 0));
        assert_eq!(stack.undo().unwrap().get(0, 0).unwrap(), Rgb(1, 0, 0));
        assert_eq!(stack.undo().unwrap_err(), EditError::NothingToUndo);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.current().unwrap().get(0, 0).unwrap(), Rgb(1, 0, 0));
    }

    #[test]
    fn reset_discards_prior_history() {
        let mut stack = HistoryStack::new();
        stack.reset(tagged(1));
        stack.push(&tagged(2));
        stack.reset(tagged(9));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.current().unwrap().get(0, 0).unwrap(), Rgb(9, 0, 0));
        assert_eq!(stack.undo().unwrap_err(), EditError::NothingToUndo);
    }

    #[test]
    fn snapshots_do_not_alias_the_pushed_image() {
        let mut stack = HistoryStack::new();
        let mut img = tagged(5);
        stack.reset(img.clone());
        stack.push(&img);
        img.set(0, 0, Rgb(99, 99, 99)).unwrap();
        assert_eq!(stack.current().unwrap().get(0, 0).unwrap(), Rgb(5, 0, 0));
    }
}
