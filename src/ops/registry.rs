// ============================================================================
// TRANSFORM REGISTRY — static name → function mapping
// ============================================================================

use crate::buffer::PixelBuffer;
use crate::error::EditError;
use crate::ops::transforms;

/// The ten built-in transforms. Dispatch is static; the string name exists
/// only for display and for resolving user input at the UI/CLI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Grayscale,
    BlackWhite,
    Posterize,
    Tint,
    ColorShiftRight,
    Mirror,
    Pixelate,
    ShowBorders,
    EliminateRed,
    Negative,
}

impl TransformKind {
    /// Every transform, in the order the selector presents them.
    pub const ALL: [TransformKind; 10] = [
        TransformKind::Grayscale,
        TransformKind::BlackWhite,
        TransformKind::Posterize,
        TransformKind::Tint,
        TransformKind::ColorShiftRight,
        TransformKind::Mirror,
        TransformKind::Pixelate,
        TransformKind::ShowBorders,
        TransformKind::EliminateRed,
        TransformKind::Negative,
    ];

    /// Display name, as shown in the transform selector.
    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::Grayscale => "Grayscale",
            TransformKind::BlackWhite => "Black-White",
            TransformKind::Posterize => "Posterize",
            TransformKind::Tint => "Tint",
            TransformKind::ColorShiftRight => "Color Shift Right",
            TransformKind::Mirror => "Mirror",
            TransformKind::Pixelate => "Pixelate",
            TransformKind::ShowBorders => "Show Borders",
            TransformKind::EliminateRed => "Eliminate Red",
            TransformKind::Negative => "Negative",
        }
    }

    /// Resolve a display name back to its kind.
    pub fn from_name(name: &str) -> Result<TransformKind, EditError> {
        TransformKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == name)
            .ok_or_else(|| EditError::UnknownTransform(name.to_string()))
    }

    /// Run the transform. Pure: the input is untouched, the output freshly
    /// allocated with identical dimensions.
    pub fn apply(&self, src: &PixelBuffer) -> PixelBuffer {
        match self {
            TransformKind::Grayscale => transforms::grayscale(src),
            TransformKind::BlackWhite => transforms::black_white(src),
            TransformKind::Posterize => transforms::posterize(src),
            TransformKind::Tint => transforms::tint(src),
            TransformKind::ColorShiftRight => transforms::color_shift_right(src),
            TransformKind::Mirror => transforms::mirror(src),
            TransformKind::Pixelate => transforms::pixelate(src),
            TransformKind::ShowBorders => transforms::show_borders(src),
            TransformKind::EliminateRed => transforms::eliminate_red(src),
            TransformKind::Negative => transforms::negative(src),
        }
    }
}

/// The fixed, ordered transform-name list for populating a selector.
pub fn transform_names() -> [&'static str; 10] {
    let mut names = [""; 10];
    for (i, k) in TransformKind::ALL.iter().enumerate() {
        names[i] = k.name();
    }
    names
}
