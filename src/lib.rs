// src/lib.rs - Library interface

pub mod axes;
pub mod constants;
pub mod display;
pub mod error;
pub mod figure;
pub mod font_config;
pub mod plot_framework;
pub mod save;
pub mod style;
pub mod template;

pub use axes::{Axes, LineOptions, MeshOptions};
pub use display::{NoViewer, SystemViewer, Viewer};
pub use error::{FigureError, Result};
pub use figure::{Figure, FigureOptions, FigureSession};
pub use save::{SaveArg, SaveOptions};
pub use style::{Colormap, LineStyle, Style, StyleCycle};
pub use template::{Template, TemplateSpec};

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
