// ============================================================================
// TRANSFORM LIBRARY — the ten pixel filters.
//
// Every transform is a pure function: it reads an immutable input buffer and
// allocates a fresh output of the same dimensions.  Nothing here may mutate
// its input — history snapshots alias nothing.
// ============================================================================

use rayon::prelude::*;

use crate::buffer::{PixelBuffer, Rgb};

/// BT.709 luma, rounded to nearest. Used by Grayscale and Black-White.
#[inline]
fn luma(px: Rgb) -> u8 {
    let l = 0.2126 * px.0 as f32 + 0.7152 * px.1 as f32 + 0.0722 * px.2 as f32;
    l.round().clamp(0.0, 255.0) as u8
}

/// Apply a per-pixel map over the whole buffer, parallel by row.
fn map_pixels(src: &PixelBuffer, f: impl Fn(Rgb) -> Rgb + Sync) -> PixelBuffer {
    let mut out = PixelBuffer::new(src.width(), src.height());
    let stride = src.stride();
    if stride == 0 || src.height() == 0 {
        return out;
    }
    let src_raw = src.as_raw();
    out.as_raw_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            let row_in = &src_raw[y * stride..(y + 1) * stride];
            for pi in (0..stride).step_by(3) {
                let px = f(Rgb(row_in[pi], row_in[pi + 1], row_in[pi + 2]));
                row_out[pi] = px.0;
                row_out[pi + 1] = px.1;
                row_out[pi + 2] = px.2;
            }
        });
    out
}

/// Luma replicated across all three channels.
pub fn grayscale(src: &PixelBuffer) -> PixelBuffer {
    map_pixels(src, |px| {
        let l = luma(px);
        Rgb(l, l, l)
    })
}

/// Binary threshold: luma at or above 128 goes white, below goes black.
pub fn black_white(src: &PixelBuffer) -> PixelBuffer {
    map_pixels(src, |px| {
        let v = if luma(px) >= 128 { 255 } else { 0 };
        Rgb(v, v, v)
    })
}

/// Keep the top three bits of each channel — eight levels per channel.
pub fn posterize(src: &PixelBuffer) -> PixelBuffer {
    map_pixels(src, |px| Rgb(px.0 & 0xE0, px.1 & 0xE0, px.2 & 0xE0))
}

/// Warm tint: +40 on red and green, saturating; blue untouched.
pub fn tint(src: &PixelBuffer) -> PixelBuffer {
    map_pixels(src, |px| Rgb(px.0.saturating_add(40), px.1.saturating_add(40), px.2))
}

/// Cyclic channel rotation: new R = old B, new G = old R, new B = old G.
pub fn color_shift_right(src: &PixelBuffer) -> PixelBuffer {
    map_pixels(src, |px| Rgb(px.2, px.0, px.1))
}

/// Horizontal flip.
pub fn mirror(src: &PixelBuffer) -> PixelBuffer {
    let mut out = PixelBuffer::new(src.width(), src.height());
    let stride = src.stride();
    if stride == 0 || src.height() == 0 {
        return out;
    }
    let w = src.width() as usize;
    let src_raw = src.as_raw();
    out.as_raw_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            let row_in = &src_raw[y * stride..(y + 1) * stride];
            for x in 0..w {
                let src_i = x * 3;
                let dst_i = (w - 1 - x) * 3;
                row_out[dst_i..dst_i + 3].copy_from_slice(&row_in[src_i..src_i + 3]);
            }
        });
    out
}

/// Block size for `pixelate`.
const PIXELATE_BLOCK: u32 = 10;

/// Mosaic effect: the image is tiled into 10×10 blocks (clipped at the
/// right/bottom edges) and every pixel in a block takes the color of the
/// block's top-left source pixel.
pub fn pixelate(src: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (src.width(), src.height());
    let mut out = PixelBuffer::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    for by in (0..h).step_by(PIXELATE_BLOCK as usize) {
        for bx in (0..w).step_by(PIXELATE_BLOCK as usize) {
            // unwrap: (bx, by) is a loop coordinate inside the grid
            let color = src.get(bx, by).unwrap();
            for y in by..(by + PIXELATE_BLOCK).min(h) {
                for x in bx..(bx + PIXELATE_BLOCK).min(w) {
                    out.set(x, y, color).unwrap();
                }
            }
        }
    }
    out
}

const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Sobel edge detection over the blue channel.
///
/// Matches the original filter this engine reproduces: the gradient reads
/// only the low (blue) byte of each neighbor rather than a true luminance.
/// Border pixels (the outermost ring) stay black; images narrower or shorter
/// than 3 pixels have no interior and come back all black.  The gradient
/// magnitude is clamped to 255 — the original packed an unclamped value and
/// overflowed across channels, a glitch not carried over.
pub fn show_borders(src: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (src.width(), src.height());
    let mut out = PixelBuffer::new(w, h);
    if w < 3 || h < 3 {
        return out;
    }

    let stride = src.stride();
    let src_raw = src.as_raw();
    // Blue byte of the neighbor at (x, y); bounds guaranteed by the caller loop.
    let blue = |x: u32, y: u32| -> i32 { src_raw[y as usize * stride + x as usize * 3 + 2] as i32 };

    let out_stride = stride;
    out.as_raw_mut()
        .par_chunks_mut(out_stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            let y = y as u32;
            if y == 0 || y == h - 1 {
                return;
            }
            for x in 1..w - 1 {
                let mut gx = 0i32;
                let mut gy = 0i32;
                for ky in 0..3u32 {
                    for kx in 0..3u32 {
                        let v = blue(x + kx - 1, y + ky - 1);
                        gx += SOBEL_X[ky as usize][kx as usize] * v;
                        gy += SOBEL_Y[ky as usize][kx as usize] * v;
                    }
                }
                let mag = ((gx * gx + gy * gy) as f64).sqrt().round() as i64;
                let m = mag.min(255) as u8;
                let pi = x as usize * 3;
                row_out[pi] = m;
                row_out[pi + 1] = m;
                row_out[pi + 2] = m;
            }
        });
    out
}

/// Drop the red channel entirely; green and blue pass through.
pub fn eliminate_red(src: &PixelBuffer) -> PixelBuffer {
    map_pixels(src, |px| Rgb(0, px.1, px.2))
}

/// Photographic negative: every channel inverted.
pub fn negative(src: &PixelBuffer) -> PixelBuffer {
    map_pixels(src, |px| Rgb(255 - px.0, 255 - px.1, 255 - px.2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    fn solid(w: u32, h: u32, px: Rgb) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h);
        for y in 0..h {
            for x in 0..w {
                buf.set(x, y, px).unwrap();
            }
        }
        buf
    }

    fn ramp(w: u32, h: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h);
        for y in 0..h {
            for x in 0..w {
                buf.set(x, y, Rgb((x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) * 11 % 256) as u8))
                    .unwrap();
            }
        }
        buf
    }

    #[test]
    fn grayscale_replicates_luma() {
        let out = grayscale(&solid(2, 2, Rgb(255, 0, 0)));
        // 0.2126 * 255 rounds to 54
        assert_eq!(out.get(0, 0).unwrap(), Rgb(54, 54, 54));
    }

    #[test]
    fn black_white_thresholds_at_128() {
        let dark = black_white(&solid(1, 1, Rgb(100, 100, 100)));
        assert_eq!(dark.get(0, 0).unwrap(), Rgb(0, 0, 0));
        let light = black_white(&solid(1, 1, Rgb(128, 128, 128)));
        assert_eq!(light.get(0, 0).unwrap(), Rgb(255, 255, 255));
    }

    #[test]
    fn posterize_masks_low_bits() {
        let out = posterize(&solid(1, 1, Rgb(200, 150, 90)));
        assert_eq!(out.get(0, 0).unwrap(), Rgb(192, 128, 64));
    }

    #[test]
    fn tint_saturates_red_and_green() {
        let out = tint(&solid(1, 1, Rgb(250, 250, 10)));
        assert_eq!(out.get(0, 0).unwrap(), Rgb(255, 255, 10));
        let out = tint(&solid(1, 1, Rgb(10, 20, 30)));
        assert_eq!(out.get(0, 0).unwrap(), Rgb(50, 60, 30));
    }

    #[test]
    fn color_shift_rotates_channels() {
        let out = color_shift_right(&solid(1, 1, Rgb(10, 20, 30)));
        assert_eq!(out.get(0, 0).unwrap(), Rgb(30, 10, 20));
    }

    #[test]
    fn mirror_flips_horizontally() {
        let mut buf = PixelBuffer::new(3, 1);
        buf.set(0, 0, Rgb(1, 1, 1)).unwrap();
        buf.set(2, 0, Rgb(3, 3, 3)).unwrap();
        let out = mirror(&buf);
        assert_eq!(out.get(0, 0).unwrap(), Rgb(3, 3, 3));
        assert_eq!(out.get(2, 0).unwrap(), Rgb(1, 1, 1));
    }

    #[test]
    fn mirror_is_an_involution() {
        let img = ramp(17, 9);
        assert_eq!(mirror(&mirror(&img)), img);
    }

    #[test]
    fn negative_is_an_involution() {
        let img = ramp(8, 8);
        assert_eq!(negative(&negative(&img)), img);
        let once = negative(&solid(1, 1, Rgb(0, 128, 255)));
        assert_eq!(once.get(0, 0).unwrap(), Rgb(255, 127, 0));
    }

    #[test]
    fn pixelate_copies_block_top_left() {
        let mut buf = PixelBuffer::new(20, 20);
        buf.set(0, 0, Rgb(9, 9, 9)).unwrap();
        buf.set(10, 0, Rgb(5, 5, 5)).unwrap();
        let out = pixelate(&buf);
        // Every pixel of the first block is the (0,0) color.
        assert_eq!(out.get(9, 9).unwrap(), Rgb(9, 9, 9));
        // Second block column takes (10,0).
        assert_eq!(out.get(19, 9).unwrap(), Rgb(5, 5, 5));
    }

    #[test]
    fn pixelate_clips_partial_edge_blocks() {
        let mut buf = PixelBuffer::new(12, 5);
        buf.set(10, 0, Rgb(77, 0, 0)).unwrap();
        let out = pixelate(&buf);
        assert_eq!(out.get(11, 4).unwrap(), Rgb(77, 0, 0));
    }

    #[test]
    fn eliminate_red_zeroes_only_red() {
        let out = eliminate_red(&solid(1, 1, Rgb(200, 150, 90)));
        assert_eq!(out.get(0, 0).unwrap(), Rgb(0, 150, 90));
    }

    #[test]
    fn show_borders_leaves_border_black_and_finds_a_vertical_edge() {
        // Left half blue=0, right half blue=200: a hard vertical edge.
        let mut buf = PixelBuffer::new(6, 5);
        for y in 0..5 {
            for x in 3..6 {
                buf.set(x, y, Rgb(0, 0, 200)).unwrap();
            }
        }
        let out = show_borders(&buf);
        // Border ring stays black.
        assert_eq!(out.get(0, 0).unwrap(), Rgb(0, 0, 0));
        assert_eq!(out.get(5, 4).unwrap(), Rgb(0, 0, 0));
        // Interior pixel adjacent to the edge: |gx| = 4 * 200 = 800, clamped.
        assert_eq!(out.get(2, 2).unwrap(), Rgb(255, 255, 255));
        // Flat interior far from the edge: no gradient.
        assert_eq!(out.get(1, 2).unwrap(), Rgb(0, 0, 0));
    }

    #[test]
    fn show_borders_needs_a_3x3_interior() {
        let out = show_borders(&solid(2, 5, Rgb(200, 200, 200)));
        for y in 0..5 {
            for x in 0..2 {
                assert_eq!(out.get(x, y).unwrap(), Rgb(0, 0, 0));
            }
        }
    }

    #[test]
    fn all_transforms_preserve_dimensions() {
        let fns: [fn(&PixelBuffer) -> PixelBuffer; 10] = [
            grayscale,
            black_white,
            posterize,
            tint,
            color_shift_right,
            mirror,
            pixelate,
            show_borders,
            eliminate_red,
            negative,
        ];
        for f in fns {
            for (w, h) in [(0, 0), (1, 1), (3, 2), (16, 9)] {
                let out = f(&ramp(w, h));
                assert_eq!((out.width(), out.height()), (w, h));
            }
        }
    }
}
