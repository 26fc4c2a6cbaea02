use super::core::{Im, LabelIm};
use image::{DynamicImage, ImageResult};
use std::path::Path;

// Helpers for i32 PNG packing/unpacking
// -----------------------------------------------------------------------------
fn dim_mismatch_err() -> image::ImageError {
    image::ImageError::Parameter(image::error::ParameterError::from_kind(
        image::error::ParameterErrorKind::DimensionMismatch,
    ))
}

fn pack_i32_as_rgba8(pixels: &[i32]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::with_capacity(pixels.len() * 4);
    for v in pixels {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

fn unpack_rgba8_as_i32(raw_rgba: &[u8]) -> Result<Vec<i32>, image::ImageError> {
    if raw_rgba.len() % 4 != 0 {
        return Err(dim_mismatch_err());
    }

    let mut out: Vec<i32> = Vec::with_capacity(raw_rgba.len() / 4);
    for px in raw_rgba.chunks_exact(4) {
        out.push(i32::from_le_bytes([px[0], px[1], px[2], px[3]]));
    }
    Ok(out)
}

// Label image decoding
// -----------------------------------------------------------------------------

/// Interpret a decoded image as labels. Grayscale images use the luminance
/// value as the label; everything else is read as RGBA8-packed i32.
pub fn labels_from_dynamic(img: DynamicImage) -> ImageResult<LabelIm> {
    let w = img.width() as usize;
    let h = img.height() as usize;

    let arr: Vec<i32> = match img {
        DynamicImage::ImageLuma8(buf) => buf.into_raw().into_iter().map(i32::from).collect(),
        DynamicImage::ImageLuma16(buf) => buf.into_raw().into_iter().map(i32::from).collect(),
        other => {
            let raw = other.into_rgba8().into_raw();
            if raw.len() != w * h * 4 {
                return Err(dim_mismatch_err());
            }
            unpack_rgba8_as_i32(&raw)?
        }
    };

    Im::from_vec(w, h, arr).ok_or_else(dim_mismatch_err)
}

// PNG I/O
// -----------------------------------------------------------------------------

impl Im<i32, 1> {
    // PNG doesn't support 32-bit single-channel integer pixels, so we losslessly
    // round-trip by packing each i32 into RGBA8 (little-endian bytes).
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let raw = pack_i32_as_rgba8(&self.arr);

        let img = image::RgbaImage::from_raw(self.w as u32, self.h as u32, raw)
            .ok_or_else(dim_mismatch_err)?;

        img.save_with_format(path, image::ImageFormat::Png)
    }

    /// Load a label image: 8/16-bit grayscale or RGBA8-packed i32.
    pub fn load_png<P: AsRef<Path>>(path: P) -> ImageResult<Self> {
        labels_from_dynamic(image::open(path)?)
    }
}

// Tests
// -----------------------------------------------------------------------------
