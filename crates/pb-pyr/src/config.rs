use pb_core::{BorderMode, Error};
use serde::{Deserialize, Serialize};

/// Interpolation used when shrinking a blurred level.
///
/// Upsampling always uses bilinear interpolation so that the reconstructor
/// can invert the builder exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Downsample {
    /// Pixel-center aligned bilinear resampling.
    #[default]
    Bilinear,
    /// Box-coverage averaging; exact 2x2 mean when a dimension halves evenly.
    Area,
}

/// Parameters of a Laplacian pyramid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PyramidConfig {
    /// Total number of entries, band-pass layers plus the residual.
    pub levels: usize,
    /// Per-step scale factor in `(0, 1)`.
    pub resize_ratio: f32,
    /// Border policy of the 5x5 smoothing kernel.
    pub border: BorderMode<f32>,
    pub downsample: Downsample,
    /// `None` selects the `[1, 4, 6, 4, 1] / 16` binomial kernel.
    pub blur_sigma: Option<f32>,
}

impl Default for PyramidConfig {
    fn default() -> Self {
        Self {
            levels: 5,
            resize_ratio: 0.5,
            border: BorderMode::Reflect101,
            downsample: Downsample::Bilinear,
            blur_sigma: None,
        }
    }
}

impl PyramidConfig {
    pub fn with_levels(levels: usize) -> Self {
        Self {
            levels,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.levels < 1 {
            return Err(Error::invalid_parameter(format!(
                "levels must be >= 1, got {}",
                self.levels
            )));
        }
        validate_resize_ratio(self.resize_ratio)?;
        if let Some(sigma) = self.blur_sigma
            && !(sigma.is_finite() && sigma > 0.0)
        {
            return Err(Error::invalid_parameter(format!(
                "blur_sigma must be finite and > 0, got {sigma}"
            )));
        }
        if let BorderMode::Constant(c) = self.border
            && !c.is_finite()
        {
            return Err(Error::invalid_parameter(format!(
                "constant border value must be finite, got {c}"
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_resize_ratio(ratio: f32) -> Result<(), Error> {
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(Error::invalid_parameter(format!(
            "resize_ratio must lie in (0, 1), got {ratio}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pb_core::{BorderMode, Error};

    use super::{Downsample, PyramidConfig};

    #[test]
    fn default_is_valid() {
        let cfg = PyramidConfig::default();
        assert_eq!(cfg.levels, 5);
        assert_eq!(cfg.resize_ratio, 0.5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_domain_values() {
        let bad = [
            PyramidConfig::with_levels(0),
            PyramidConfig {
                resize_ratio: 1.0,
                ..PyramidConfig::default()
            },
            PyramidConfig {
                resize_ratio: 0.0,
                ..PyramidConfig::default()
            },
            PyramidConfig {
                resize_ratio: f32::NAN,
                ..PyramidConfig::default()
            },
            PyramidConfig {
                blur_sigma: Some(-1.0),
                ..PyramidConfig::default()
            },
            PyramidConfig {
                border: BorderMode::Constant(f32::INFINITY),
                ..PyramidConfig::default()
            },
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate(), Err(Error::InvalidParameter(_))),
                "{cfg:?}"
            );
        }
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: PyramidConfig =
            serde_json::from_str(r#"{"levels": 3, "downsample": "area"}"#).expect("valid json");
        assert_eq!(cfg.levels, 3);
        assert_eq!(cfg.downsample, Downsample::Area);
        assert_eq!(cfg.resize_ratio, 0.5);
        assert_eq!(cfg.border, BorderMode::Reflect101);

        let zero_pad: PyramidConfig =
            serde_json::from_str(r#"{"border": {"constant": 0.0}}"#).expect("valid json");
        assert_eq!(zero_pad.border, BorderMode::Constant(0.0));
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let cfg = PyramidConfig {
            levels: 4,
            resize_ratio: 0.6,
            border: BorderMode::Reflect,
            downsample: Downsample::Area,
            blur_sigma: Some(1.1),
        };
        let text = serde_json::to_string(&cfg).expect("serialize");
        let back: PyramidConfig = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, cfg);
    }
}
