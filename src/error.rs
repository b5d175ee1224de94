// src/error.rs

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FigureError>;

#[derive(Debug, Error)]
pub enum FigureError {
    #[error("unknown template '{0}' (expected one of PPT, PPTTwo, PPTBig, OL, OE)")]
    UnknownTemplate(String),

    #[error("invalid subplot geometry {rows}x{cols}: both dimensions must be at least 1")]
    InvalidGeometry { rows: usize, cols: usize },

    #[error("unknown colormap '{0}'")]
    UnknownColormap(String),

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("cannot derive {axis} limits: the current subplot has no lines")]
    NoLineData { axis: char },

    #[error("invalid {axis} limits ({min}, {max}): bounds must be finite")]
    InvalidLimits { axis: char, min: f64, max: f64 },

    #[error("file name '{0}' has no extension to derive the output format from")]
    MissingExtension(String),

    #[error("unsupported output format '{0}' (supported: png, jpg, jpeg, bmp, svg, pdf)")]
    UnsupportedFormat(String),

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("pdf conversion failed: {0}")]
    Pdf(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl<E> From<DrawingAreaErrorKind<E>> for FigureError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        FigureError::Render(err.to_string())
    }
}
