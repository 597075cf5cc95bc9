//! Laplacian pyramids over single-channel `f32` images.
//!
//! A pyramid of `levels` entries holds `levels - 1` band-pass layers followed
//! by one low-pass residual. Each build step:
//! 1. smooths the current image with a 5x5 separable Gaussian,
//! 2. shrinks it by `resize_ratio` (bilinear or area),
//! 3. resizes it back to the current shape with bilinear interpolation,
//! 4. stores `current - upsampled` and continues with the shrunk image.
//!
//! Reconstruction walks the levels coarse to fine, bilinear-upsampling the
//! running image onto each band and adding it. Since step 3 and the
//! reconstructor share one upsampler, a pyramid that was not modified
//! collapses back to its source up to `f32` rounding.
//!
//! Sizing policy:
//! - A shrunk axis is `round_half_even(len * resize_ratio)`, at least 1.
//! - Once an axis reaches 1 it stays there; the pyramid still has exactly
//!   `levels` entries.

mod config;
mod pyramid;
mod resize;

pub use config::{Downsample, PyramidConfig};
pub use pyramid::{LaplacianPyramid, build_pyramid, reconstruct, reconstruct_levels};
pub use resize::{
    downsample_f32, downsample2x2_mean_f32, resize_area_f32, resize_bilinear_f32, scaled_dim,
    scaled_shape,
};
