use pb_core::{Error, Image, ensure_same_shape};
use pb_pyr::LaplacianPyramid;
use tracing::debug;

use crate::mask::seam_weights;

/// Cross-dissolves two pyramids level by level under the seam mask.
///
/// Level `k` of the result is `a * m + b * (1 - m)` with
/// `m = mask_for_level(width, height, k)`.
/// `a` is the image kept where the mask is 1 (left of the seam), `b` where
/// it is 0 (right of the seam).
///
/// Both pyramids must have the same number of levels, the same resize ratio
/// and identical shapes at every level.
pub fn blend_pyramids(a: &LaplacianPyramid, b: &LaplacianPyramid) -> Result<LaplacianPyramid, Error> {
    if a.num_levels() != b.num_levels() {
        return Err(Error::invalid_parameter(format!(
            "pyramids must have the same number of levels, got {} and {}",
            a.num_levels(),
            b.num_levels()
        )));
    }
    if a.resize_ratio() != b.resize_ratio() {
        return Err(Error::invalid_parameter(format!(
            "pyramids must share a resize ratio, got {} and {}",
            a.resize_ratio(),
            b.resize_ratio()
        )));
    }

    let mut levels = Vec::with_capacity(a.num_levels());
    for (level, (la, lb)) in a.levels().iter().zip(b.levels()).enumerate() {
        levels.push(blend_level(la, lb, level)?);
        debug!(
            level,
            width = la.width(),
            height = la.height(),
            "blended pyramid level"
        );
    }

    LaplacianPyramid::from_levels(levels, a.resize_ratio())
}

/// Blends one pair of same-shaped levels with the seam mask of `level`.
pub fn blend_level(a: &Image<f32>, b: &Image<f32>, level: usize) -> Result<Image<f32>, Error> {
    ensure_same_shape(a.shape(), b.shape())?;
    let (w, h) = a.shape();
    let weights = seam_weights(w, level);

    let mut out = Image::new_fill(w, h, 0.0f32);
    if w == 0 {
        return Ok(out);
    }
    for (y, out_row) in out.data_mut().chunks_exact_mut(w).enumerate() {
        let (row_a, row_b) = (a.row(y), b.row(y));
        for (x, dst) in out_row.iter_mut().enumerate() {
            let m = weights[x];
            *dst = row_a[x] * m + row_b[x] * (1.0 - m);
        }
    }
    Ok(out)
}
