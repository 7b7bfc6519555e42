use crate::foundation::{
    core::ensure_rgba8_len,
    error::{OutfillError, OutfillResult},
};

const Q16_ONE: i64 = 1 << 16;

/// Separable gaussian blur over an RGBA8 buffer; edges clamp to the nearest pixel.
///
/// All four channels are filtered identically, so alpha feathers along with color.
pub fn blur_rgba8(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> OutfillResult<Vec<u8>> {
    ensure_rgba8_len(src, width, height, "blur_rgba8")?;
    if radius == 0 || src.is_empty() {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; src.len()];
    let mut out = vec![0u8; src.len()];

    convolve(src, &mut tmp, width, height, &kernel, Axis::Horizontal);
    convolve(&tmp, &mut out, width, height, &kernel, Axis::Vertical);
    Ok(out)
}

/// Radius and sigma for a feather strength in `[0, 1]`; `None` when no blur applies.
pub fn feather_params(strength: f32) -> Option<(u32, f32)> {
    if !strength.is_finite() || strength <= 0.0 {
        return None;
    }
    let radius = (strength * 100.0).round() as u32;
    if radius == 0 {
        return None;
    }
    Some((radius, (radius as f32 / 2.0).max(0.5)))
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> OutfillResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(OutfillError::validation("blur sigma must be > 0"));
    }

    let r = radius as i64;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(OutfillError::validation("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * Q16_ONE as f64).round().clamp(0.0, Q16_ONE as f64) as u32)
        .collect();

    // Rounding drift goes to the centre tap so the kernel sums to exactly 1.0.
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = Q16_ONE - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, Q16_ONE) as u32;
    }

    Ok(weights)
}

#[derive(Clone, Copy, Debug)]
enum Axis {
    Horizontal,
    Vertical,
}

fn convolve(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(width);
    let h = i64::from(height);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i64 - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => ((x + d).clamp(0, w - 1), y),
                    Axis::Vertical => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for (c, a) in acc.into_iter().enumerate() {
                dst[out_idx + c] = q16_to_u8(a);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
