// ============================================================================
// IMAGE I/O — decode/encode boundary between files and PixelBuffer.
//
// The core never touches a codec; everything format-shaped lives here.
// ============================================================================

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, RgbImage};

use crate::buffer::PixelBuffer;
use crate::log_warn;

/// Decode any supported raster file into an RGB pixel buffer.
/// Alpha, palettes and 16-bit depths are collapsed to RGB8 on load.
pub fn load_image(path: &Path) -> Result<PixelBuffer, String> {
    let dynamic = image::open(path)
        .map_err(|e| format!("failed to decode {}: {}", path.display(), e))?;
    let rgb = dynamic.to_rgb8();
    let (w, h) = (rgb.width(), rgb.height());
    PixelBuffer::from_raw(w, h, rgb.into_raw())
        .ok_or_else(|| format!("decoded {} has inconsistent dimensions", path.display()))
}

/// Encode a pixel buffer to `path`, format inferred from the extension.
/// `quality` applies to JPEG only (1–100).
pub fn save_image(path: &Path, buffer: &PixelBuffer, quality: u8) -> Result<(), String> {
    let rgb: RgbImage =
        ImageBuffer::from_raw(buffer.width(), buffer.height(), buffer.as_raw().to_vec())
            .ok_or_else(|| "pixel buffer has inconsistent dimensions".to_string())?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => {
            let file = File::create(path)
                .map_err(|e| format!("failed to create {}: {}", path.display(), e))?;
            let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality.clamp(1, 100));
            encoder
                .encode_image(&rgb)
                .map_err(|e| format!("failed to encode {}: {}", path.display(), e))
        }
        "png" | "bmp" | "webp" | "tga" | "tif" | "tiff" => rgb
            .save(path)
            .map_err(|e| format!("failed to encode {}: {}", path.display(), e)),
        other => {
            log_warn!("unrecognized extension {:?}, writing PNG data", other);
            rgb.save_with_format(path, image::ImageFormat::Png)
                .map_err(|e| format!("failed to encode {}: {}", path.display(), e))
        }
    }
}
