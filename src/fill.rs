//! Nearest-source fill of transparent pixels.
//!
//! Every pixel whose alpha is at or below a threshold takes the color of the closest pixel
//! above the threshold, measured as 4-connected grid distance. All sources are seeded into
//! one FIFO frontier in row-major order, so equidistant sources resolve to whichever comes
//! first in scan order. Pixels above the threshold are never written.
//!
//! Buffers are straight-alpha RGBA8, row-major, `width * height * 4` bytes.

use image::RgbaImage;

/// Alpha written into pixels that receive a propagated color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillAlpha {
    /// Filled pixels become fully opaque.
    #[default]
    Opaque,
    /// Filled pixels keep the alpha of their source; a propagated alpha of 0 becomes 255.
    Propagate,
}

impl FillAlpha {
    fn resolve(self, propagated: u8) -> u8 {
        match self {
            FillAlpha::Opaque => 255,
            FillAlpha::Propagate if propagated == 0 => 255,
            FillAlpha::Propagate => propagated,
        }
    }
}

/// Counters from one fill call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Pixels above the threshold that seeded the propagation.
    pub sources: usize,
    /// Pixels at or below the threshold that were overwritten.
    pub filled: usize,
}

/// Multi-source breadth-first fill over a 4-connected pixel grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillPropagator {
    alpha_threshold: u8,
    alpha: FillAlpha,
}

impl FillPropagator {
    /// Pixels with alpha strictly greater than `alpha_threshold` act as sources.
    pub fn new(alpha_threshold: u8) -> Self {
        Self {
            alpha_threshold,
            alpha: FillAlpha::Opaque,
        }
    }

    pub fn with_alpha(mut self, alpha: FillAlpha) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn alpha_threshold(&self) -> u8 {
        self.alpha_threshold
    }

    pub fn alpha(&self) -> FillAlpha {
        self.alpha
    }

    /// Fills `rgba` in place.
    ///
    /// A zero-area image, or one without any source pixel, is left untouched.
    ///
    /// # Panics
    ///
    /// `rgba` must hold at least `width * height * 4` bytes; shorter buffers panic on
    /// indexing. Use [`crate::Frame`] when the length is not already guaranteed.
    pub fn fill(&self, rgba: &mut [u8], width: u32, height: u32) -> FillStats {
        let w = width as usize;
        let h = height as usize;
        let total = w * h;
        if total == 0 {
            return FillStats::default();
        }
        let threshold = self.alpha_threshold;

        let mut visited = vec![false; total];
        let mut assigned = vec![0u8; total * 4];
        let mut queue = Vec::<usize>::with_capacity(total);

        for (i, px) in rgba[..total * 4].chunks_exact(4).enumerate() {
            if px[3] > threshold {
                visited[i] = true;
                assigned[i * 4..i * 4 + 4].copy_from_slice(px);
                queue.push(i);
            }
        }

        let sources = queue.len();
        if sources == 0 {
            return FillStats::default();
        }

        let mut head = 0usize;
        while head < queue.len() {
            let idx = queue[head];
            head += 1;
            let x = idx % w;
            let y = idx / w;

            // right, left, down, up
            let neighbours = [
                (x + 1 < w).then(|| idx + 1),
                (x > 0).then(|| idx - 1),
                (y + 1 < h).then(|| idx + w),
                (y > 0).then(|| idx - w),
            ];
            for n in neighbours.into_iter().flatten() {
                if visited[n] {
                    continue;
                }
                assigned.copy_within(idx * 4..idx * 4 + 4, n * 4);
                visited[n] = true;
                queue.push(n);
            }
        }

        let mut filled = 0usize;
        for (px, staged) in rgba[..total * 4]
            .chunks_exact_mut(4)
            .zip(assigned.chunks_exact(4))
        {
            if px[3] > threshold || staged[3] == 0 {
                continue;
            }
            px[0] = staged[0];
            px[1] = staged[1];
            px[2] = staged[2];
            px[3] = self.alpha.resolve(staged[3]);
            filled += 1;
        }

        tracing::debug!(width, height, threshold, sources, filled, "filled transparent pixels");
        FillStats { sources, filled }
    }

    /// Returns a filled copy of `rgba`, leaving the input untouched.
    pub fn fill_copy(&self, rgba: &[u8], width: u32, height: u32) -> Vec<u8> {
        let mut out = rgba.to_vec();
        self.fill(&mut out, width, height);
        out
    }

    pub fn fill_image(&self, img: &mut RgbaImage) -> FillStats {
        let (width, height) = img.dimensions();
        let data: &mut [u8] = img;
        self.fill(data, width, height)
    }
}

/// Fills transparent pixels of `rgba` in place with fully opaque nearest-source colors.
///
/// See [`FillPropagator::fill`] for the buffer precondition.
pub fn fill_transparent_in_place(rgba: &mut [u8], width: u32, height: u32, alpha_threshold: u8) {
    FillPropagator::new(alpha_threshold).fill(rgba, width, height);
}

/// Copying form of [`fill_transparent_in_place`].
pub fn fill_transparent(rgba: &[u8], width: u32, height: u32, alpha_threshold: u8) -> Vec<u8> {
    FillPropagator::new(alpha_threshold).fill_copy(rgba, width, height)
}

/// [`fill_transparent_in_place`] over an `image` buffer.
pub fn fill_transparent_image(img: &mut RgbaImage, alpha_threshold: u8) {
    FillPropagator::new(alpha_threshold).fill_image(img);
}

#[cfg(test)]
#[path = "../tests/unit/fill.rs"]
mod tests;
