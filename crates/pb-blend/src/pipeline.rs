use pb_core::{Error, Image, ImageView, ensure_same_shape, mean_squared_error, psnr};
use pb_pyr::{LaplacianPyramid, PyramidConfig};
use serde::Serialize;
use tracing::info;

use crate::blend::blend_pyramids;

/// Fidelity summary of one build/reconstruct cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundTripReport {
    pub levels: usize,
    pub resize_ratio: f32,
    /// `(width, height)` per level, finest first.
    pub level_shapes: Vec<(usize, usize)>,
    pub mse: f64,
    /// `None` when the reconstruction is exact.
    pub psnr_db: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct RoundTrip {
    pub pyramid: LaplacianPyramid,
    pub restored: Image<u8>,
    pub report: RoundTripReport,
}

/// Builds a pyramid of `src`, collapses it again and measures the loss.
pub fn validate_roundtrip(src: &ImageView<'_, u8>, cfg: &PyramidConfig) -> Result<RoundTrip, Error> {
    let pyramid = LaplacianPyramid::build_u8(src, cfg)?;
    let restored = pyramid.reconstruct();
    let mse = mean_squared_error(src, &restored.as_view())?;
    let psnr_db = Some(psnr(mse, 255.0)).filter(|v| v.is_finite());

    info!(
        levels = pyramid.num_levels(),
        width = src.width(),
        height = src.height(),
        mse,
        "pyramid round trip"
    );

    let report = RoundTripReport {
        levels: pyramid.num_levels(),
        resize_ratio: pyramid.resize_ratio(),
        level_shapes: pyramid.level_shapes(),
        mse,
        psnr_db,
    };
    Ok(RoundTrip {
        pyramid,
        restored,
        report,
    })
}

/// Pyramids of both inputs together with their blend.
#[derive(Debug, Clone)]
pub struct BlendResult {
    pub left: LaplacianPyramid,
    pub right: LaplacianPyramid,
    pub blended: LaplacianPyramid,
}

impl BlendResult {
    pub fn reconstruct(&self) -> Image<u8> {
        self.blended.reconstruct()
    }
}

/// Builds both pyramids and blends them; `left` shows left of the seam.
pub fn blend_pyramids_u8(
    left: &ImageView<'_, u8>,
    right: &ImageView<'_, u8>,
    cfg: &PyramidConfig,
) -> Result<BlendResult, Error> {
    ensure_same_shape(left.shape(), right.shape())?;
    let left = LaplacianPyramid::build_u8(left, cfg)?;
    let right = LaplacianPyramid::build_u8(right, cfg)?;
    let blended = blend_pyramids(&left, &right)?;
    info!(
        levels = blended.num_levels(),
        width = blended.levels()[0].width(),
        height = blended.levels()[0].height(),
        "blended image pair"
    );
    Ok(BlendResult {
        left,
        right,
        blended,
    })
}

/// Seam-blends two same-sized 8-bit images.
pub fn blend_images_u8(
    left: &ImageView<'_, u8>,
    right: &ImageView<'_, u8>,
    cfg: &PyramidConfig,
) -> Result<Image<u8>, Error> {
    Ok(blend_pyramids_u8(left, right, cfg)?.reconstruct())
}

/// Seam-blends two same-sized `f32` images without quantizing the result.
pub fn blend_images_f32(
    left: &ImageView<'_, f32>,
    right: &ImageView<'_, f32>,
    cfg: &PyramidConfig,
) -> Result<Image<f32>, Error> {
    ensure_same_shape(left.shape(), right.shape())?;
    let left = LaplacianPyramid::build_f32(left, cfg)?;
    let right = LaplacianPyramid::build_f32(right, cfg)?;
    Ok(blend_pyramids(&left, &right)?.reconstruct_f32())
}
