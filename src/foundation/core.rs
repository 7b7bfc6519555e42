use crate::foundation::error::{OutfillError, OutfillResult};

pub use kurbo::Rect;

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Fully transparent black; the "keep" value of an outpaint mask.
pub const TRANSPARENT: Rgba8 = [0, 0, 0, 0];

/// Opaque white; the "generate here" value of an outpaint mask.
pub const OPAQUE_WHITE: Rgba8 = [255, 255, 255, 255];

/// Byte length of a `width x height` RGBA8 buffer, with overflow checks.
pub fn rgba8_len(width: u32, height: u32) -> OutfillResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| OutfillError::validation("rgba8 buffer size overflow"))
}

/// Checks that `buf` holds exactly `width * height` RGBA8 pixels.
pub fn ensure_rgba8_len(buf: &[u8], width: u32, height: u32, what: &str) -> OutfillResult<()> {
    let expected = rgba8_len(width, height)?;
    if buf.len() != expected {
        return Err(OutfillError::validation(format!(
            "{what} expects {expected} bytes for {width}x{height} rgba8, got {}",
            buf.len()
        )));
    }
    Ok(())
}
