//! Outfill prepares RGBA8 canvases for outpainting.
//!
//! The core is [`FillPropagator`]: transparent pixels take the color of their nearest opaque
//! pixel (4-connected grid distance, multi-source breadth-first search), so an image
//! generator sees continuous color instead of a hard transparent edge. Around it sit a
//! validated [`Frame`] buffer with PNG I/O, the expansion mask built by [`build_mask`], and
//! [`prepare_outpaint`], which produces both from [`OutpaintSettings`].
//!
//! Buffers are straight-alpha RGBA8, row-major, `width * height * 4` bytes.
#![forbid(unsafe_code)]

mod effects;
mod fill;
mod foundation;
mod frame;
mod outpaint;

pub use effects::blur::{blur_rgba8, feather_params};
pub use fill::{
    FillAlpha, FillPropagator, FillStats, fill_transparent, fill_transparent_image,
    fill_transparent_in_place,
};
pub use foundation::core::{OPAQUE_WHITE, Rect, Rgba8, TRANSPARENT, rgba8_len};
pub use foundation::error::{OutfillError, OutfillResult};
pub use frame::Frame;
pub use outpaint::mask::{Placement, build_mask};
pub use outpaint::pipeline::{OutpaintPlan, prepare_outpaint};
pub use outpaint::settings::OutpaintSettings;
