// ============================================================================
// PIXEL BUFFER — owned RGB8 grid that every transform reads from and
// writes to.  Codec conversions live in io.rs; this type stays format-free.
// ============================================================================

use crate::error::EditError;

/// A single RGB pixel. Single-channel results (grayscale, black-white) are
/// stored with the value replicated across all three channels so region
/// compositing never has to negotiate formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Axis-aligned pixel rectangle, half-open on both axes:
/// covers `[min_x, max_x) × [min_y, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Rect {
    pub fn width(&self) -> u32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> u32 {
        self.max_y.saturating_sub(self.min_y)
    }
}

/// Row-major RGB8 pixel buffer.
///
/// Invariant: `data.len() == width * height * 3`.  Transforms never mutate
/// their input; they allocate a fresh buffer of the same shape, so a snapshot
/// stored in history can never be aliased by a later operation.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// All-black buffer of the given size. A zero dimension yields an empty
    /// (but valid) buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        }
    }

    /// Wrap an existing interleaved RGB byte buffer.
    /// Returns `None` when the length does not match `width * height * 3`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize * 3 {
            return None;
        }
        Some(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full-image rectangle, `[0, width) × [0, height)`.
    pub fn bounds(&self) -> Rect {
        Rect { min_x: 0, min_y: 0, max_x: self.width, max_y: self.height }
    }

    /// Interleaved RGB bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Mutable interleaved bytes — used by the transform library's row-parallel
    /// passes so rayon can split the buffer by row stride.
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Byte stride of one row.
    pub fn stride(&self) -> usize {
        self.width as usize * 3
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    pub fn get(&self, x: u32, y: u32) -> Result<Rgb, EditError> {
        if x >= self.width || y >= self.height {
            return Err(EditError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        let i = self.offset(x, y);
        Ok(Rgb(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    pub fn set(&mut self, x: u32, y: u32, px: Rgb) -> Result<(), EditError> {
        if x >= self.width || y >= self.height {
            return Err(EditError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        let i = self.offset(x, y);
        self.data[i] = px.0;
        self.data[i + 1] = px.1;
        self.data[i + 2] = px.2;
        Ok(())
    }

    /// Extract a deep copy of `rect`. Fails with `InvalidRegion` when the
    /// rect has zero area or reaches past the buffer edge.
    pub fn subregion(&self, rect: Rect) -> Result<PixelBuffer, EditError> {
        if rect.width() == 0 || rect.height() == 0 {
            return Err(EditError::InvalidRegion(format!(
                "zero-area rectangle ({}, {})..({}, {})",
                rect.min_x, rect.min_y, rect.max_x, rect.max_y
            )));
        }
        if rect.max_x > self.width || rect.max_y > self.height {
            return Err(EditError::InvalidRegion(format!(
                "rectangle ({}, {})..({}, {}) exceeds {}x{} image",
                rect.min_x, rect.min_y, rect.max_x, rect.max_y, self.width, self.height
            )));
        }

        let mut out = PixelBuffer::new(rect.width(), rect.height());
        let src_stride = self.stride();
        let dst_stride = out.stride();
        let x_bytes = rect.min_x as usize * 3;
        for (dy, y) in (rect.min_y..rect.max_y).enumerate() {
            let src = y as usize * src_stride + x_bytes;
            let dst = dy * dst_stride;
            out.data[dst..dst + dst_stride].copy_from_slice(&self.data[src..src + dst_stride]);
        }
        Ok(out)
    }

    /// Overwrite the rectangle starting at `(min_x, min_y)` with `patch`.
    /// Fails with `InvalidRegion` when the patch would not fit.
    pub fn blit(&mut self, min_x: u32, min_y: u32, patch: &PixelBuffer) -> Result<(), EditError> {
        let max_x = min_x as u64 + patch.width as u64;
        let max_y = min_y as u64 + patch.height as u64;
        if max_x > self.width as u64 || max_y > self.height as u64 {
            return Err(EditError::InvalidRegion(format!(
                "{}x{} patch at ({}, {}) exceeds {}x{} image",
                patch.width, patch.height, min_x, min_y, self.width, self.height
            )));
        }

        let dst_stride = self.stride();
        let src_stride = patch.stride();
        let x_bytes = min_x as usize * 3;
        for dy in 0..patch.height as usize {
            let dst = (min_y as usize + dy) * dst_stride + x_bytes;
            let src = dy * src_stride;
            self.data[dst..dst + src_stride].copy_from_slice(&patch.data[src..src + src_stride]);
        }
        Ok(())
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
