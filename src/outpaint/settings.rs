use std::path::Path;

use anyhow::Context as _;

use crate::{
    fill::FillAlpha,
    foundation::error::{OutfillError, OutfillResult},
};

/// Knobs for one outpaint preparation.
///
/// Missing JSON fields take their defaults, so `{}` is a valid settings file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutpaintSettings {
    /// Produce a nearest-color fill layer for the transparent region.
    pub fill: bool,
    /// Alpha written into filled pixels.
    pub fill_alpha: FillAlpha,
    /// Pixels with alpha above this value are treated as existing content.
    pub alpha_threshold: u8,
    /// Fraction of each image's size by which its keep-region shrinks, in `[0, 1]`.
    pub expand: f32,
    /// Mask edge feather strength in `[0, 1]`; `0` keeps hard edges.
    pub blur: f32,
}

impl Default for OutpaintSettings {
    fn default() -> Self {
        Self {
            fill: true,
            fill_alpha: FillAlpha::Opaque,
            alpha_threshold: 0,
            expand: 0.1,
            blur: 0.1,
        }
    }
}

impl OutpaintSettings {
    pub fn from_json_str(s: &str) -> OutfillResult<Self> {
        let settings: Self = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> OutfillResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> OutfillResult<()> {
        unit_interval("expand", self.expand)?;
        unit_interval("blur", self.blur)?;
        Ok(())
    }
}

fn unit_interval(name: &str, v: f32) -> OutfillResult<()> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(OutfillError::validation(format!(
            "{name} must be within [0, 1], got {v}"
        )));
    }
    Ok(())
}
