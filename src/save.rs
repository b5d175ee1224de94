// src/save.rs

use std::path::{is_separator, PathBuf};

use plotters::style::RGBColor;

use crate::constants::{COLOR_FACE, DEFAULT_DPI};
use crate::error::{FigureError, Result};

/// Positional argument to `save`: an integer DPI or an extra output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveArg {
    Dpi(u32),
    Format(String),
}

impl SaveArg {
    pub fn format(name: impl Into<String>) -> Self {
        SaveArg::Format(name.into())
    }
}

impl From<u32> for SaveArg {
    fn from(dpi: u32) -> Self {
        SaveArg::Dpi(dpi)
    }
}

impl From<&str> for SaveArg {
    fn from(format: &str) -> Self {
        SaveArg::Format(format.to_string())
    }
}

impl From<String> for SaveArg {
    fn from(format: String) -> Self {
        SaveArg::Format(format)
    }
}

/// Options passed through to the export step.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOptions {
    /// Takes precedence over any `SaveArg::Dpi`.
    pub dpi: Option<u32>,
    pub facecolor: RGBColor,
    pub tight_layout: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            dpi: None,
            facecolor: COLOR_FACE,
            tight_layout: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
    Pdf,
}

impl OutputFormat {
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "bmp" => Ok(OutputFormat::Bmp),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            _ => Err(FigureError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn is_vector(self) -> bool {
        matches!(self, OutputFormat::Svg | OutputFormat::Pdf)
    }
}

/// One file to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTarget {
    pub path: PathBuf,
    pub format: OutputFormat,
}

/// Resolved outcome of parsing a `save` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    pub base: PathBuf,
    pub dpi: u32,
    pub targets: Vec<SaveTarget>,
}

/// Splits `filename` on the last `.` of its final component into base name and extension.
/// A leading dot counts: `out/.png` has base `out/` and extension `png`.
pub fn split_filename(filename: &str) -> Result<(PathBuf, String)> {
    let name_start = filename.rfind(is_separator).map_or(0, |i| i + 1);
    let (stem, ext) = filename[name_start..]
        .rsplit_once('.')
        .filter(|(_, ext)| !ext.is_empty())
        .ok_or_else(|| FigureError::MissingExtension(filename.to_string()))?;
    let base = &filename[..name_start + stem.len()];
    Ok((PathBuf::from(base), ext.to_string()))
}

impl SavePlan {
    /// Integer arguments set the DPI (last one wins); the others add formats. The
    /// extension of `filename` is always the first format and duplicates are dropped.
    pub fn resolve(filename: &str, args: &[SaveArg], options: &SaveOptions) -> Result<Self> {
        let (base, primary) = split_filename(filename)?;
        let mut dpi = DEFAULT_DPI;
        let mut formats = vec![primary];
        for arg in args {
            match arg {
                SaveArg::Dpi(value) => dpi = *value,
                SaveArg::Format(name) => {
                    let name = name.trim_start_matches('.');
                    if !formats.iter().any(|f| f == name) {
                        formats.push(name.to_string());
                    }
                }
            }
        }
        let dpi = options.dpi.unwrap_or(dpi);

        let targets = formats
            .into_iter()
            .map(|name| {
                let format = OutputFormat::from_extension(&name)?;
                let mut file_name = base.clone().into_os_string();
                file_name.push(".");
                file_name.push(&name);
                Ok(SaveTarget {
                    path: PathBuf::from(file_name),
                    format,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SavePlan { base, dpi, targets })
    }
}
