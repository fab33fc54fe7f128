// ============================================================================
// REGION COMPOSITOR — bounding box of a 4-point selection, transform the
// slice, paste it back onto a copy of the full image.
// ============================================================================

use crate::buffer::{PixelBuffer, Rect};
use crate::error::EditError;
use crate::ops::registry::TransformKind;

/// Integer image coordinate of a user click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Exactly four points, clicked in arbitrary order. Consumed by a single
/// apply; the quadrilateral degenerates to its axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub points: [Point; 4],
}

impl Selection {
    pub fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    /// Selection covering the whole image. Useful for callers (the CLI)
    /// that want a full-frame apply without synthesizing clicks.
    pub fn full_image(image: &PixelBuffer) -> Self {
        let w = image.width() as i32;
        let h = image.height() as i32;
        Self::new([
            Point::new(0, 0),
            Point::new(w, 0),
            Point::new(w, h),
            Point::new(0, h),
        ])
    }

    /// Min/max over the four x's and y's independently, validated against
    /// the image bounds. Half-open on both axes.
    pub fn bounding_rect(&self, image: &PixelBuffer) -> Result<Rect, EditError> {
        let min_x = self.points.iter().map(|p| p.x).min().unwrap_or(0);
        let max_x = self.points.iter().map(|p| p.x).max().unwrap_or(0);
        let min_y = self.points.iter().map(|p| p.y).min().unwrap_or(0);
        let max_y = self.points.iter().map(|p| p.y).max().unwrap_or(0);

        if min_x >= max_x || min_y >= max_y {
            return Err(EditError::InvalidRegion(format!(
                "points span a zero-area box ({}, {})..({}, {})",
                min_x, min_y, max_x, max_y
            )));
        }
        if min_x < 0
            || min_y < 0
            || max_x as i64 > image.width() as i64
            || max_y as i64 > image.height() as i64
        {
            return Err(EditError::InvalidRegion(format!(
                "box ({}, {})..({}, {}) lies outside the {}x{} image",
                min_x,
                min_y,
                max_x,
                max_y,
                image.width(),
                image.height()
            )));
        }

        Ok(Rect {
            min_x: min_x as u32,
            min_y: min_y as u32,
            max_x: max_x as u32,
            max_y: max_y as u32,
        })
    }
}

/// Apply `kind` to the bounding box of `selection` and composite the result
/// onto a copy of `image`. Pixels outside the box are byte-identical to the
/// input; the input itself is never touched.
pub fn apply_to_region(
    image: &PixelBuffer,
    selection: &Selection,
    kind: TransformKind,
) -> Result<PixelBuffer, EditError> {
    let rect = selection.bounding_rect(image)?;
    let slice = image.subregion(rect)?;
    let transformed = kind.apply(&slice);

    let mut out = image.clone();
    out.blit(rect.min_x, rect.min_y, &transformed)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    fn gradient(w: u32, h: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h);
        for y in 0..h {
            for x in 0..w {
                buf.set(x, y, Rgb((x * 3 % 256) as u8, (y * 5 % 256) as u8, 200)).unwrap();
            }
        }
        buf
    }

    fn sel(points: [(i32, i32); 4]) -> Selection {
        Selection::new(points.map(|(x, y)| Point::new(x, y)))
    }

    #[test]
    fn bounding_rect_over_arbitrary_click_order() {
        let img = gradient(20, 20);
        let s = sel([(12, 4), (3, 15), (12, 15), (3, 4)]);
        let rect = s.bounding_rect(&img).unwrap();
        assert_eq!(rect, Rect { min_x: 3, min_y: 4, max_x: 12, max_y: 15 });
    }

    #[test]
    fn degenerate_and_out_of_bounds_selections_fail() {
        let img = gradient(10, 10);
        // All four points on one vertical line — zero width.
        let flat = sel([(5, 1), (5, 2), (5, 7), (5, 3)]);
        assert!(matches!(flat.bounding_rect(&img), Err(EditError::InvalidRegion(_))));
        // Negative coordinate.
        let neg = sel([(-1, 0), (4, 0), (4, 4), (-1, 4)]);
        assert!(matches!(neg.bounding_rect(&img), Err(EditError::InvalidRegion(_))));
        // Box past the right edge.
        let over = sel([(2, 2), (11, 2), (11, 6), (2, 6)]);
        assert!(matches!(over.bounding_rect(&img), Err(EditError::InvalidRegion(_))));
    }

    #[test]
    fn composite_touches_only_the_box() {
        let img = gradient(16, 16);
        let s = sel([(4, 4), (12, 4), (12, 12), (4, 12)]);
        let out = apply_to_region(&img, &s, TransformKind::Negative).unwrap();

        for y in 0..16u32 {
            for x in 0..16u32 {
                let before = img.get(x, y).unwrap();
                let after = out.get(x, y).unwrap();
                let inside = (4..12).contains(&x) && (4..12).contains(&y);
                if inside {
                    assert_eq!(after, Rgb(255 - before.0, 255 - before.1, 255 - before.2));
                } else {
                    assert_eq!(after, before);
                }
            }
        }
    }

    #[test]
    fn region_result_matches_transform_of_subregion() {
        let img = gradient(10, 8);
        let s = sel([(1, 1), (7, 1), (7, 6), (1, 6)]);
        let rect = s.bounding_rect(&img).unwrap();
        let expected = TransformKind::Mirror.apply(&img.subregion(rect).unwrap());

        let out = apply_to_region(&img, &s, TransformKind::Mirror).unwrap();
        let got = out.subregion(rect).unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn full_image_selection_covers_everything() {
        let img = gradient(5, 4);
        let s = Selection::full_image(&img);
        let out = apply_to_region(&img, &s, TransformKind::Negative).unwrap();
        assert_eq!(out, TransformKind::Negative.apply(&img));
    }

    #[test]
    fn input_image_is_never_mutated() {
        let img = gradient(8, 8);
        let copy = img.clone();
        let s = sel([(0, 0), (8, 0), (8, 8), (0, 8)]);
        let _ = apply_to_region(&img, &s, TransformKind::Posterize).unwrap();
        assert_eq!(img, copy);
    }
}
