// ============================================================================
// ENGINE ERRORS — one enum for everything the core can refuse to do
// ============================================================================

/// Error type for core editing operations.
///
/// `OutOfBounds` is an internal invariant violation and should never reach the
/// user; the remaining variants are reported to the calling collaborator.
/// No operation that returns an error leaves the history stack or the current
/// image in a partially-updated state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Pixel access outside the buffer grid.
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },
    /// Fewer than four points, a zero-area bounding box, or a box that
    /// extends past the image edge. User-correctable; the operation aborts
    /// with no state change.
    InvalidRegion(String),
    /// Transform name not in the registry. Defensive — a UI that only offers
    /// registry names can never trigger this.
    UnknownTransform(String),
    /// `current()` called before any image was loaded.
    EmptyHistory,
    /// `undo()` with a single remaining snapshot. Benign no-op at the UI
    /// level, never destructive.
    NothingToUndo,
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::OutOfBounds { x, y, width, height } => {
                write!(f, "pixel ({}, {}) outside {}x{} buffer", x, y, width, height)
            }
            EditError::InvalidRegion(msg) => write!(f, "invalid region: {}", msg),
            EditError::UnknownTransform(name) => write!(f, "unknown transform: {:?}", name),
            EditError::EmptyHistory => write!(f, "no image loaded"),
            EditError::NothingToUndo => write!(f, "nothing to undo"),
        }
    }
}

impl std::error::Error for EditError {}
