use crate::Error;
use crate::image::{ImageView, ensure_same_shape};

/// Mean of squared per-pixel differences, accumulated in `f64`.
///
/// Empty images have an MSE of zero.
pub fn mean_squared_error<A, B>(a: &ImageView<'_, A>, b: &ImageView<'_, B>) -> Result<f64, Error>
where
    A: Copy + Into<f32>,
    B: Copy + Into<f32>,
{
    ensure_same_shape(a.shape(), b.shape())?;
    let count = a.width() * a.height();
    if count == 0 {
        return Ok(0.0);
    }

    let mut sum = 0.0f64;
    for y in 0..a.height() {
        for (&pa, &pb) in a.row(y).iter().zip(b.row(y).iter()) {
            let d = f64::from(pa.into()) - f64::from(pb.into());
            sum += d * d;
        }
    }
    Ok(sum / count as f64)
}

/// Peak signal-to-noise ratio in dB for the given peak value.
///
/// Returns `f64::INFINITY` for identical images.
pub fn psnr(mse: f64, peak: f64) -> f64 {
    if mse <= 0.0 {
        return f64::INFINITY;
    }
    10.0 * (peak * peak / mse).log10()
}
