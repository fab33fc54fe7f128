//! rustouch — region-select raster editing engine.
//!
//! The core is UI-free: callers hand it an image buffer, four points and a
//! transform name, and get a new image back. [`EditSession`] carries the
//! linear undo history; `src/cli.rs` wraps the same API for headless use.

pub mod buffer;
pub mod cli;
pub mod error;
pub mod history;
pub mod io;
pub mod logger;
pub mod ops;
pub mod session;

pub use buffer::{PixelBuffer, Rect, Rgb};
pub use error::EditError;
pub use history::HistoryStack;
pub use ops::region::{Point, Selection, apply_to_region};
pub use ops::registry::{TransformKind, transform_names};
pub use session::EditSession;
