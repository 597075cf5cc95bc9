use pb_core::{BorderMode, Image, ImageView};

use crate::conv1d::convolve_f32;
use crate::kernels1d::GaussianKernel1D;

/// Separable blur: rows first, then columns, both with the same kernel and
/// border policy.
pub fn blur_separable_f32(
    src: &ImageView<'_, f32>,
    kernel: &GaussianKernel1D,
    border: &BorderMode<f32>,
) -> Image<f32> {
    let (w, h) = src.shape();
    let mut rows = Image::new_fill(w, h, 0.0f32);
    if w == 0 || h == 0 {
        return rows;
    }

    for (y, out_row) in rows.data_mut().chunks_exact_mut(w).enumerate() {
        convolve_f32(src.row(y), &kernel.taps, kernel.radius, border, out_row);
    }

    let mut out = Image::new_fill(w, h, 0.0f32);
    let mut column = vec![0.0f32; h];
    let mut column_out = vec![0.0f32; h];
    for x in 0..w {
        for (y, c) in column.iter_mut().enumerate() {
            *c = rows.data()[y * w + x];
        }
        convolve_f32(&column, &kernel.taps, kernel.radius, border, &mut column_out);
        let dst = out.data_mut();
        for (y, &v) in column_out.iter().enumerate() {
            dst[y * w + x] = v;
        }
    }

    out
}

/// 5x5 Gaussian smoothing; `sigma = None` uses the binomial kernel.
///
/// # Panics
/// If `sigma` is `Some` and not finite and strictly positive;
/// `PyramidConfig::validate` rejects such values up front.
pub fn gaussian_blur5_f32(
    src: &ImageView<'_, f32>,
    sigma: Option<f32>,
    border: &BorderMode<f32>,
) -> Image<f32> {
    blur_separable_f32(src, &GaussianKernel1D::five_tap(sigma), border)
}
