//! Outpaint mask: opaque white where new content is generated, transparent where the
//! existing images are kept.

use std::str::FromStr;

use crate::{
    effects::blur::{blur_rgba8, feather_params},
    foundation::{
        core::{OPAQUE_WHITE, Rect, TRANSPARENT},
        error::{OutfillError, OutfillResult},
    },
    frame::Frame,
};

/// An image laid out on the canvas, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "unit_scale")]
    pub scale_x: f64,
    #[serde(default = "unit_scale")]
    pub scale_y: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl Placement {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Placement covering a whole `width x height` frame at the origin.
    pub fn covering(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, f64::from(width), f64::from(height))
    }

    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    /// Region of this image that is kept once it shrinks by `expand` of its unscaled size.
    ///
    /// Half the shrink is taken from the top-left; the result may be empty or inverted
    /// when `expand` eats the whole image.
    pub fn keep_rect(&self, expand: f64) -> Rect {
        let expand_x = (expand * self.width).round();
        let expand_y = (expand * self.height).round();
        let x0 = (self.x + expand_x / 2.0).floor();
        let y0 = (self.y + expand_y / 2.0).floor();
        let w = (self.width * self.scale_x - expand_x).round();
        let h = (self.height * self.scale_y - expand_y).round();
        Rect::new(x0, y0, x0 + w, y0 + h)
    }

    fn validate(&self) -> OutfillResult<()> {
        let all_finite = [
            self.x,
            self.y,
            self.width,
            self.height,
            self.scale_x,
            self.scale_y,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(OutfillError::validation("placement values must be finite"));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(OutfillError::validation(
                "placement width and height must be >= 0",
            ));
        }
        Ok(())
    }
}

/// Parses `x,y,w,h` or `x,y,w,h,scale_x,scale_y`.
impl FromStr for Placement {
    type Err = OutfillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| OutfillError::validation(format!("placement '{s}': {e}")))?;
        let placement = match parts.as_slice() {
            [x, y, w, h] => Placement::new(*x, *y, *w, *h),
            [x, y, w, h, sx, sy] => Placement::new(*x, *y, *w, *h).with_scale(*sx, *sy),
            _ => {
                return Err(OutfillError::validation(format!(
                    "placement '{s}' must be x,y,w,h or x,y,w,h,scale_x,scale_y"
                )));
            }
        };
        placement.validate()?;
        Ok(placement)
    }
}

/// Builds the outpaint mask for a `width x height` canvas.
///
/// Every pixel starts as "generate"; each placement's keep rect, clipped to the canvas, is
/// cleared. A positive `blur` feathers the mask edges afterwards.
#[tracing::instrument(skip(placements), fields(placements = placements.len()))]
pub fn build_mask(
    width: u32,
    height: u32,
    placements: &[Placement],
    expand: f32,
    blur: f32,
) -> OutfillResult<Frame> {
    if !expand.is_finite() || !(0.0..=1.0).contains(&expand) {
        return Err(OutfillError::validation(format!(
            "expand must be within [0, 1], got {expand}"
        )));
    }

    let mut mask = Frame::solid(width, height, OPAQUE_WHITE)?;
    let canvas = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));

    for placement in placements {
        placement.validate()?;
        let keep = placement.keep_rect(f64::from(expand));
        if keep.width() <= 0.0 || keep.height() <= 0.0 {
            tracing::debug!(?placement, "keep region collapsed; skipping");
            continue;
        }
        let clipped = keep.intersect(canvas);
        if clipped.width() <= 0.0 || clipped.height() <= 0.0 {
            continue;
        }
        clear_rect(&mut mask, clipped);
    }

    if let Some((radius, sigma)) = feather_params(blur) {
        let feathered = blur_rgba8(mask.data(), width, height, radius, sigma)?;
        mask = Frame::new(width, height, feathered)?;
    }

    Ok(mask)
}

fn clear_rect(mask: &mut Frame, r: Rect) {
    let width = mask.width() as usize;
    let x0 = r.x0 as usize;
    let x1 = r.x1 as usize;
    let data = mask.data_mut();
    for y in r.y0 as usize..r.y1 as usize {
        let row = y * width;
        for px in data[(row + x0) * 4..(row + x1) * 4].chunks_exact_mut(4) {
            px.copy_from_slice(&TRANSPARENT);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/outpaint/mask.rs"]
mod tests;
