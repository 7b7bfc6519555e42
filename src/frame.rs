use std::path::Path;

use anyhow::Context as _;
use image::RgbaImage;

use crate::{
    fill::{FillAlpha, FillPropagator, FillStats},
    foundation::{
        core::{Rgba8, TRANSPARENT, ensure_rgba8_len, rgba8_len},
        error::{OutfillError, OutfillResult},
    },
};

/// Owned straight-alpha RGBA8 image whose buffer length always matches its dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> OutfillResult<Self> {
        ensure_rgba8_len(&data, width, height, "Frame::new")?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn solid(width: u32, height: u32, px: Rgba8) -> OutfillResult<Self> {
        let len = rgba8_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: px.repeat(len / 4),
        })
    }

    pub fn transparent(width: u32, height: u32) -> OutfillResult<Self> {
        Self::solid(width, height, TRANSPARENT)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        let i = self.offset(x, y)?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, px: Rgba8) -> OutfillResult<()> {
        let i = self.offset(x, y).ok_or_else(|| {
            OutfillError::validation(format!(
                "pixel ({x}, {y}) outside {}x{} frame",
                self.width, self.height
            ))
        })?;
        self.data[i..i + 4].copy_from_slice(&px);
        Ok(())
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    /// Fills pixels at or below `alpha_threshold` with their nearest source color.
    pub fn fill_transparent(&mut self, alpha_threshold: u8, alpha: FillAlpha) -> FillStats {
        FillPropagator::new(alpha_threshold)
            .with_alpha(alpha)
            .fill(&mut self.data, self.width, self.height)
    }

    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    pub fn into_rgba_image(self) -> RgbaImage {
        // Length is checked on every constructor.
        RgbaImage::from_raw(self.width, self.height, self.data)
            .unwrap_or_else(|| unreachable!("frame buffer length matches its dimensions"))
    }

    pub fn decode(bytes: &[u8]) -> OutfillResult<Self> {
        let img = image::load_from_memory(bytes).context("decode image from memory")?;
        Ok(Self::from_rgba_image(img.to_rgba8()))
    }

    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> OutfillResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
        let frame = Self::from_rgba_image(img.to_rgba8());
        tracing::debug!(width = frame.width, height = frame.height, "loaded frame");
        Ok(frame)
    }

    /// Writes the frame as PNG, creating missing parent directories.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save_png(&self, path: impl AsRef<Path>) -> OutfillResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}
