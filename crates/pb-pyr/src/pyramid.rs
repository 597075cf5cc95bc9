use pb_core::{Error, Image, ImageView, to_f32, to_u8_saturating};
use pb_filter::gaussian_blur5_f32;
use tracing::{debug, warn};

use crate::config::{PyramidConfig, validate_resize_ratio};
use crate::resize::{downsample_f32, resize_bilinear_f32, scaled_shape};

/// Laplacian (band-pass) pyramid.
///
/// Entries `0..n-1` are band-pass layers: the difference between the image
/// entering a build step and its blurred, downsampled and re-upsampled
/// approximation. They keep that image's shape and may be negative. The last
/// entry is the low-pass residual at the coarsest resolution.
///
/// Level shapes never grow from one entry to the next, and a pyramid always
/// holds at least one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LaplacianPyramid {
    levels: Vec<Image<f32>>,
    resize_ratio: f32,
}

impl LaplacianPyramid {
    pub fn build_u8(src: &ImageView<'_, u8>, cfg: &PyramidConfig) -> Result<Self, Error> {
        cfg.validate()?;
        Self::build_validated(to_f32(src), cfg)
    }

    pub fn build_f32(src: &ImageView<'_, f32>, cfg: &PyramidConfig) -> Result<Self, Error> {
        cfg.validate()?;
        Self::build_validated(to_f32(src), cfg)
    }

    fn build_validated(mut current: Image<f32>, cfg: &PyramidConfig) -> Result<Self, Error> {
        if current.is_empty() {
            return Err(Error::invalid_parameter(format!(
                "input image must be non-empty, got {}x{}",
                current.width(),
                current.height()
            )));
        }

        let mut levels = Vec::with_capacity(cfg.levels);
        for level in 0..cfg.levels - 1 {
            let shape = current.shape();
            let blurred = gaussian_blur5_f32(&current.as_view(), cfg.blur_sigma, &cfg.border);
            let (dw, dh) = scaled_shape(shape, cfg.resize_ratio);
            if axis_stalled(shape, (dw, dh)) {
                warn!(
                    level,
                    width = dw,
                    height = dh,
                    "pyramid level cannot shrink further in some axis"
                );
            }

            let downsampled = downsample_f32(&blurred.as_view(), dw, dh, cfg.downsample);
            let upsampled = resize_bilinear_f32(&downsampled.as_view(), shape.0, shape.1);
            let band = current.zip_map(&upsampled, |c, u| c - u)?;
            debug!(
                level,
                width = shape.0,
                height = shape.1,
                "built band-pass level"
            );

            levels.push(band);
            current = downsampled;
        }
        debug!(
            level = cfg.levels - 1,
            width = current.width(),
            height = current.height(),
            "built residual level"
        );
        levels.push(current);

        Ok(Self {
            levels,
            resize_ratio: cfg.resize_ratio,
        })
    }

    /// Wraps externally produced levels, e.g. a blended pyramid.
    ///
    /// Fails with `EmptyPyramid` for no levels and `ShapeMismatch` when a level
    /// is larger than its predecessor in either axis.
    pub fn from_levels(levels: Vec<Image<f32>>, resize_ratio: f32) -> Result<Self, Error> {
        validate_resize_ratio(resize_ratio)?;
        validate_level_chain(&levels)?;
        Ok(Self {
            levels,
            resize_ratio,
        })
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self, i: usize) -> Option<&Image<f32>> {
        self.levels.get(i)
    }

    pub fn levels(&self) -> &[Image<f32>] {
        &self.levels
    }

    pub fn into_levels(self) -> Vec<Image<f32>> {
        self.levels
    }

    /// The coarsest, low-pass entry.
    pub fn residual(&self) -> &Image<f32> {
        &self.levels[self.levels.len() - 1]
    }

    pub fn resize_ratio(&self) -> f32 {
        self.resize_ratio
    }

    /// `(width, height)` of every level, finest first.
    pub fn level_shapes(&self) -> Vec<(usize, usize)> {
        self.levels.iter().map(Image::shape).collect()
    }

    /// Collapses the pyramid back into a full-resolution `f32` image.
    pub fn reconstruct_f32(&self) -> Image<f32> {
        collapse(&self.levels)
    }

    /// Collapses the pyramid and rounds into `u8`, saturating at `[0, 255]`.
    pub fn reconstruct(&self) -> Image<u8> {
        to_u8_saturating(&self.reconstruct_f32().as_view())
    }
}

/// Builds a pyramid with the default border, blur and interpolation.
pub fn build_pyramid(
    image: &ImageView<'_, f32>,
    levels: usize,
    resize_ratio: f32,
) -> Result<LaplacianPyramid, Error> {
    let cfg = PyramidConfig {
        levels,
        resize_ratio,
        ..PyramidConfig::default()
    };
    LaplacianPyramid::build_f32(image, &cfg)
}

/// Collapses `pyramid` into an 8-bit image.
pub fn reconstruct(pyramid: &LaplacianPyramid) -> Image<u8> {
    pyramid.reconstruct()
}

/// Collapses a raw level sequence (finest first, residual last) without
/// clamping.
pub fn reconstruct_levels(levels: &[Image<f32>]) -> Result<Image<f32>, Error> {
    validate_level_chain(levels)?;
    Ok(collapse(levels))
}

/// True when at least one axis keeps its length across a build step.
fn axis_stalled(shape: (usize, usize), next: (usize, usize)) -> bool {
    next.0 == shape.0 || next.1 == shape.1
}

fn validate_level_chain(levels: &[Image<f32>]) -> Result<(), Error> {
    if levels.is_empty() {
        return Err(Error::EmptyPyramid);
    }
    for pair in levels.windows(2) {
        let (finer, coarser) = (pair[0].shape(), pair[1].shape());
        if coarser.0 > finer.0 || coarser.1 > finer.1 {
            return Err(Error::ShapeMismatch {
                expected: finer,
                actual: coarser,
            });
        }
    }
    Ok(())
}

fn collapse(levels: &[Image<f32>]) -> Image<f32> {
    let Some((residual, bands)) = levels.split_last() else {
        return Image::new_fill(0, 0, 0.0);
    };

    let mut restored = residual.clone();
    for band in bands.iter().rev() {
        let mut upsampled = resize_bilinear_f32(&restored.as_view(), band.width(), band.height());
        for (u, &b) in upsampled.data_mut().iter_mut().zip(band.data()) {
            *u += b;
        }
        restored = upsampled;
    }
    restored
}

#[cfg(test)]
mod tests {
    use pb_core::{Error, Image, mean_squared_error};

    use crate::config::{Downsample, PyramidConfig};
    use crate::pyramid::{
        LaplacianPyramid, axis_stalled, build_pyramid, reconstruct, reconstruct_levels,
    };
    use crate::resize::scaled_shape;

    fn textured(width: usize, height: usize) -> Image<u8> {
        Image::from_fn(width, height, |x, y| {
            let v = (x * 37 + y * 91 + (x * y) % 23) % 256;
            v as u8
        })
    }

    #[test]
    fn pyramid_has_requested_length_and_halving_shapes() {
        let src = textured(256, 256);
        let pyr = LaplacianPyramid::build_u8(&src.as_view(), &PyramidConfig::default())
            .expect("valid build");

        assert_eq!(pyr.num_levels(), 5);
        assert_eq!(
            pyr.level_shapes(),
            vec![(256, 256), (128, 128), (64, 64), (32, 32), (16, 16)]
        );
        assert_eq!(pyr.residual().shape(), (16, 16));
    }

    #[test]
    fn shapes_never_grow_for_odd_sizes() {
        let src = textured(37, 19);
        let cfg = PyramidConfig {
            levels: 7,
            resize_ratio: 0.6,
            ..PyramidConfig::default()
        };
        let pyr = LaplacianPyramid::build_u8(&src.as_view(), &cfg).expect("valid build");
        assert_eq!(pyr.num_levels(), 7);
        let shapes = pyr.level_shapes();
        assert_eq!(shapes[0], (37, 19));
        for pair in shapes.windows(2) {
            assert!(pair[1].0 <= pair[0].0 && pair[1].1 <= pair[0].1, "{shapes:?}");
        }
    }

    #[test]
    fn single_pixel_axis_counts_as_stalled() {
        assert!(axis_stalled((1, 64), scaled_shape((1, 64), 0.5)));
        assert!(axis_stalled((64, 1), scaled_shape((64, 1), 0.5)));
        assert!(axis_stalled((1, 1), scaled_shape((1, 1), 0.5)));
        assert!(!axis_stalled((64, 64), scaled_shape((64, 64), 0.5)));
        assert!(!axis_stalled((3, 3), scaled_shape((3, 3), 0.5)));
    }

    #[test]
    fn thin_strip_keeps_requested_levels() {
        let src = textured(1, 64);
        let pyr = LaplacianPyramid::build_u8(&src.as_view(), &PyramidConfig::default())
            .expect("valid build");
        assert_eq!(
            pyr.level_shapes(),
            vec![(1, 64), (1, 32), (1, 16), (1, 8), (1, 4)]
        );
        assert_eq!(pyr.reconstruct(), src);
    }

    #[test]
    fn round_trip_is_near_lossless_and_non_decreasing_in_levels() {
        let src = textured(64, 48);
        let mut previous = 0.0f64;
        for levels in 1..=5 {
            for downsample in [Downsample::Bilinear, Downsample::Area] {
                let cfg = PyramidConfig {
                    levels,
                    downsample,
                    ..PyramidConfig::default()
                };
                let pyr = LaplacianPyramid::build_u8(&src.as_view(), &cfg).expect("valid build");
                let restored = reconstruct(&pyr);
                let mse = mean_squared_error(&src.as_view(), &restored.as_view())
                    .expect("same shape");
                assert!(mse < 1e-3, "levels={levels} {downsample:?}: mse={mse}");
                if downsample == Downsample::Bilinear {
                    assert!(mse + 1e-12 >= previous);
                    previous = mse;
                }
            }
        }
    }

    #[test]
    fn band_levels_carry_detail_and_residual_carries_mean() {
        let src = Image::from_fn(32, 32, |x, _| if x < 16 { 40.0f32 } else { 220.0 });
        let pyr = build_pyramid(&src.as_view(), 3, 0.5).expect("valid build");

        let band0 = pyr.level(0).expect("band level");
        let near_edge = band0.get(16, 10).expect("in bounds").abs();
        let flat = band0.get(3, 10).expect("in bounds").abs();
        assert!(near_edge > 1.0);
        assert!(flat < 1e-3);
        assert!(band0.data().iter().any(|&v| v < 0.0));

        let residual = pyr.residual();
        let mean: f32 = residual.data().iter().sum::<f32>() / residual.data().len() as f32;
        assert!((mean - 130.0).abs() < 1.0);
    }

    #[test]
    fn single_level_pyramid_is_a_float_copy() {
        let src = Image::from_vec(3, 2, vec![1u8, 2, 3, 4, 5, 6]).expect("valid image");
        let pyr = LaplacianPyramid::build_u8(&src.as_view(), &PyramidConfig::with_levels(1))
            .expect("valid build");

        assert_eq!(pyr.num_levels(), 1);
        assert_eq!(pyr.residual().data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(pyr.reconstruct(), src);
    }

    #[test]
    fn reconstruct_clamps_out_of_range_values() {
        let residual = Image::from_vec(3, 1, vec![-12.0f32, 127.6, 400.0]).expect("valid");
        let pyr = LaplacianPyramid::from_levels(vec![residual], 0.5).expect("valid levels");
        assert_eq!(pyr.reconstruct().data(), &[0, 128, 255]);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let src = textured(8, 8);
        let zero_levels = PyramidConfig::with_levels(0);
        assert!(matches!(
            LaplacianPyramid::build_u8(&src.as_view(), &zero_levels),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            build_pyramid(&Image::new_fill(4, 4, 0.0f32).as_view(), 3, 1.5),
            Err(Error::InvalidParameter(_))
        ));

        let empty = Image::<u8>::new_fill(0, 4, 0);
        assert!(matches!(
            LaplacianPyramid::build_u8(&empty.as_view(), &PyramidConfig::default()),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn raw_level_chains_are_validated() {
        assert_eq!(reconstruct_levels(&[]), Err(Error::EmptyPyramid));
        assert_eq!(
            LaplacianPyramid::from_levels(Vec::new(), 0.5),
            Err(Error::EmptyPyramid)
        );

        let growing = vec![Image::new_fill(4, 4, 0.0f32), Image::new_fill(8, 4, 0.0f32)];
        assert_eq!(
            reconstruct_levels(&growing),
            Err(Error::ShapeMismatch {
                expected: (4, 4),
                actual: (8, 4)
            })
        );
    }
}
