/// Taps of the 5-tap binomial smoothing kernel, `[1, 4, 6, 4, 1] / 16`.
///
/// This is the kernel a 5x5 Gaussian blur with automatically derived sigma
/// reduces to.
pub const BINOMIAL5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Symmetric, unit-sum 1D smoothing kernel.
///
/// Conventions:
/// - `taps.len() == 2 * radius + 1`.
/// - `taps` is normalized such that `sum(taps) ~= 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel1D {
    pub radius: usize,
    pub taps: Vec<f32>,
}

impl GaussianKernel1D {
    /// Fixed `[1, 4, 6, 4, 1] / 16` kernel.
    pub fn binomial5() -> Self {
        Self {
            radius: 2,
            taps: BINOMIAL5.to_vec(),
        }
    }

    /// Sampled Gaussian truncated to exactly five taps.
    ///
    /// `None` selects [`GaussianKernel1D::binomial5`].
    ///
    /// # Panics
    /// If `sigma` is `Some` and not finite and strictly positive.
    pub fn five_tap(sigma: Option<f32>) -> Self {
        match sigma {
            None => Self::binomial5(),
            Some(sigma) => {
                assert!(
                    sigma.is_finite() && sigma > 0.0,
                    "sigma must be > 0 and finite"
                );
                Self::sampled(2, sigma)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    fn sampled(radius: usize, sigma: f32) -> Self {
        let sigma2 = sigma * sigma;
        let mut taps: Vec<f32> = (0..2 * radius + 1)
            .map(|i| {
                let x = i as f32 - radius as f32;
                (-(x * x) / (2.0 * sigma2)).exp()
            })
            .collect();

        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }

        Self { radius, taps }
    }
}
