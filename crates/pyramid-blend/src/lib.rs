//! Umbrella crate for the `pyramid-blend` workspace.
//!
//! Re-exports the image core, the smoothing filters, Laplacian pyramids and
//! seam blending so that applications depend on a single crate.

pub use pb_blend::*;
pub use pb_core::*;
pub use pb_filter::{GaussianKernel1D, blur_separable_f32, gaussian_blur5_f32};
pub use pb_pyr::*;
