//! Smoothing filters used ahead of pyramid downsampling.
//!
//! Convolution follows the usual definition
//! `out[i] = sum_k in[i + r - k] * kernel[k]`; all kernels here are symmetric
//! so this coincides with correlation. Border taps are resolved with
//! [`pb_core::BorderMode`].

pub mod blur2d;
pub mod conv1d;
pub mod kernels1d;

pub use blur2d::{blur_separable_f32, gaussian_blur5_f32};
pub use conv1d::convolve_f32;
pub use kernels1d::{BINOMIAL5, GaussianKernel1D};
