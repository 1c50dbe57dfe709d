use thiserror::Error;

#[derive(Error, Debug)]
pub enum EceiError {
    #[error("Profile shape mismatch: ne={ne:?}, B={b:?}")]
    ShapeMismatch { ne: [usize; 2], b: [usize; 2] },

    #[error("Profile grid is empty: shape={shape:?}")]
    EmptyProfile { shape: [usize; 2] },

    #[error("Row index out of bounds: row={row}, nrows={nrows}")]
    RowOutOfBounds { row: usize, nrows: usize },

    #[error("Radial coordinate length {found} does not match column count {expected}")]
    RadialLengthMismatch { expected: usize, found: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Plotting backend error: {0}")]
    Plot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type EceiResult<T> = Result<T, EceiError>;
