//! Foundational primitives for multi-resolution image blending.
//!
//! ## Images and Views
//! [`Image`] owns a contiguous row-major buffer. [`ImageView`] borrows one with
//! an element stride (not byte stride) that may exceed `width`, so padded
//! buffers and subviews can be processed without copying.
//!
//! Shapes are always reported as `(width, height)`.
//!
//! ## Border Modes
//! Filters and samplers resolve out-of-range taps with [`BorderMode`]: clamp
//! (edge replicate), constant fill (zero padding with `Constant(0.0)`),
//! reflect (edge sample repeated) and reflect-101 (edge sample not repeated,
//! the default).
//!
//! ## Sampling Coordinates
//! Integer coordinates refer to pixel centers; bilinear sampling uses the
//! floor-based 2x2 neighborhood.

mod border;
mod error;
mod image;
mod metrics;
mod sample;

pub use border::{BorderMode, map_index};
pub use error::Error;
pub use image::{Image, ImageView, ensure_same_shape, to_f32, to_u8_saturating};
pub use metrics::{mean_squared_error, psnr};
pub use sample::sample_bilinear_f32;
