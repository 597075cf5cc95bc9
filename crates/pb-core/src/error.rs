use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two grids that must agree in `(width, height)` do not.
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// A configuration value is outside its valid domain.
    InvalidParameter(String),
    /// A pyramid with zero levels was handed to an operation that needs one.
    EmptyPyramid,
    /// A backing buffer does not hold `width * height` elements.
    SizeMismatch { expected: usize, actual: usize },
    OutOfBounds,
    InvalidStride,
}

impl Error {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, actual } => write!(
                f,
                "shape mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::EmptyPyramid => write!(f, "pyramid has no levels"),
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::InvalidStride => write!(f, "invalid stride"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_names_the_offending_shape() {
        let err = Error::ShapeMismatch {
            expected: (256, 256),
            actual: (128, 256),
        };
        assert_eq!(
            err.to_string(),
            "shape mismatch: expected 256x256, got 128x256"
        );
        assert_eq!(
            Error::invalid_parameter("levels must be >= 1").to_string(),
            "invalid parameter: levels must be >= 1"
        );
    }
}
