use pb_core::Image;

/// Weight of the first column inside the seam band.
pub const RAMP_PEAK: f32 = 0.9;

/// Column range of the soft transition at one pyramid level.
///
/// `start` is signed: on narrow levels the band may begin left of column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeamBand {
    pub start: isize,
    pub width: usize,
}

impl SeamBand {
    /// One past the last band column.
    pub fn end(&self) -> isize {
        self.start + self.width as isize
    }

    pub fn contains(&self, column: isize) -> bool {
        column >= self.start && column < self.end()
    }
}

/// Band geometry for `level`: width `2 * (level + 1)`, starting
/// `level + 1` columns left of `width / 2`.
pub fn seam_band(width: usize, level: usize) -> SeamBand {
    let half = level + 1;
    SeamBand {
        start: (width / 2) as isize - half as isize,
        width: 2 * half,
    }
}

/// Per-column weights of the left image at `level`.
///
/// Columns left of the band are 1, band column `i` is
/// `RAMP_PEAK * (1 - i / band.width)` and everything to the right is 0.
pub fn seam_weights(width: usize, level: usize) -> Vec<f32> {
    let band = seam_band(width, level);
    let band_w = band.width as f32;
    (0..width)
        .map(|x| {
            let x = x as isize;
            if x < band.start {
                1.0
            } else if band.contains(x) {
                let i = (x - band.start) as f32;
                RAMP_PEAK - RAMP_PEAK * i / band_w
            } else {
                0.0
            }
        })
        .collect()
}

/// Seam mask for one pyramid level: [`seam_weights`] repeated on every row.
pub fn mask_for_level(width: usize, height: usize, level: usize) -> Image<f32> {
    let weights = seam_weights(width, level);
    Image::from_fn(width, height, |x, _| weights[x])
}

#[cfg(test)]
mod tests {
    use super::{RAMP_PEAK, SeamBand, mask_for_level, seam_band, seam_weights};

    #[test]
    fn weights_stay_in_unit_range() {
        for width in [1usize, 2, 3, 7, 16, 64, 255, 256] {
            for level in 0..10 {
                let w = seam_weights(width, level);
                assert_eq!(w.len(), width);
                assert!(
                    w.iter().all(|&v| (0.0..=1.0).contains(&v)),
                    "width={width} level={level}: {w:?}"
                );
            }
        }
    }

    #[test]
    fn band_widens_by_two_per_level() {
        for level in 0..8 {
            let a = seam_band(256, level);
            let b = seam_band(256, level + 1);
            assert_eq!(b.width, a.width + 2);
            assert_eq!(b.start, a.start - 1);
        }
    }

    #[test]
    fn level_zero_geometry_on_even_width() {
        assert_eq!(
            seam_band(256, 0),
            SeamBand {
                start: 127,
                width: 2
            }
        );
        let w = seam_weights(256, 0);
        assert_eq!(w[0], 1.0);
        assert_eq!(w[126], 1.0);
        assert_eq!(w[127], RAMP_PEAK);
        assert!((w[128] - 0.45).abs() < 1e-6);
        assert_eq!(w[129], 0.0);
        assert_eq!(w[255], 0.0);
    }

    #[test]
    fn weights_never_increase_left_to_right() {
        for level in 0..5 {
            let w = seam_weights(37, level);
            for pair in w.windows(2) {
                assert!(pair[1] <= pair[0], "{w:?}");
            }
        }
    }

    #[test]
    fn band_wider_than_level_is_clipped() {
        let band = seam_band(4, 3);
        assert_eq!(band.start, -2);
        assert_eq!(band.end(), 6);

        let w = seam_weights(4, 3);
        // Offsets 2..6 of an 8-column ramp.
        let expected: Vec<f32> = (2..6).map(|i| RAMP_PEAK - RAMP_PEAK * i as f32 / 8.0).collect();
        assert_eq!(w, expected);
    }

    #[test]
    fn mask_rows_are_identical() {
        let mask = mask_for_level(20, 6, 2);
        assert_eq!(mask.shape(), (20, 6));
        let first = mask.row(0).to_vec();
        for y in 1..6 {
            assert_eq!(mask.row(y), first.as_slice());
        }
        assert_eq!(first, seam_weights(20, 2));
    }
}
