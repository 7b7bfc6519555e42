use crate::{
    fill::FillPropagator,
    foundation::error::OutfillResult,
    frame::Frame,
    outpaint::{
        mask::{Placement, build_mask},
        settings::OutpaintSettings,
    },
};

/// Inputs handed to the generation step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutpaintPlan {
    /// Canvas with its transparent region filled; meant to sit beneath the existing
    /// content. `None` when fill is disabled.
    pub fill: Option<Frame>,
    /// Same size as the canvas; opaque white marks the region to generate.
    pub mask: Frame,
}

/// Builds the fill layer and expansion mask for `canvas`.
///
/// `placements` locate the images already on the canvas; the mask keeps a shrunken copy
/// of each and marks the rest for generation.
#[tracing::instrument(skip_all, fields(width = canvas.width(), height = canvas.height()))]
pub fn prepare_outpaint(
    canvas: &Frame,
    placements: &[Placement],
    settings: &OutpaintSettings,
) -> OutfillResult<OutpaintPlan> {
    settings.validate()?;

    let fill = if settings.fill {
        let mut layer = canvas.clone();
        let stats = FillPropagator::new(settings.alpha_threshold)
            .with_alpha(settings.fill_alpha)
            .fill(layer.data_mut(), canvas.width(), canvas.height());
        if stats.sources == 0 {
            tracing::warn!("canvas has no pixels above the alpha threshold; fill layer is unchanged");
        }
        Some(layer)
    } else {
        None
    };

    let mask = build_mask(
        canvas.width(),
        canvas.height(),
        placements,
        settings.expand,
        settings.blur,
    )?;

    tracing::info!(
        fill = fill.is_some(),
        placements = placements.len(),
        expand = settings.expand,
        blur = settings.blur,
        "prepared outpaint"
    );
    Ok(OutpaintPlan { fill, mask })
}
