//! Seam blending of two Laplacian pyramids.
//!
//! The seam is a vertical line at `width / 2`. At pyramid level `k` the
//! left image has weight 1 up to a soft band of `2 * (k + 1)` columns that
//! ramps from 0.9 towards 0, and weight 0 to its right. Fine levels therefore
//! switch sides over a few columns while coarse levels cross-dissolve over a
//! wider stretch, which hides the seam without ghosting fine detail.
//!
//! Masks depend on the column only and are generated as a 1-D weight vector
//! per level.

mod blend;
mod mask;
mod pipeline;

pub use blend::{blend_level, blend_pyramids};
pub use mask::{RAMP_PEAK, SeamBand, mask_for_level, seam_band, seam_weights};
pub use pipeline::{
    BlendResult, RoundTrip, RoundTripReport, blend_images_f32, blend_images_u8,
    blend_pyramids_u8, validate_roundtrip,
};
