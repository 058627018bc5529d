use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("invalid surface size: width={width}, height={height}")]
    InvalidSurface { width: u32, height: u32 },

    #[error("series must contain at least one entry")]
    EmptySeries,

    #[error("series length mismatch: {values} values vs {colors} colors")]
    LengthMismatch { values: usize, colors: usize },

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("drawing backend failure: {0}")]
    Backend(String),
}
