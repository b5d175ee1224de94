// src/figure.rs

use std::path::PathBuf;

use ndarray::Array2;
use tracing::debug;

use crate::axes::{finite_min_max, Axes, AxisKind, Line, LineOptions, Mesh, MeshOptions};
use crate::constants::CM_PER_INCH;
use crate::display::{SystemViewer, Viewer};
use crate::error::{FigureError, Result};
use crate::plot_framework;
use crate::save::{SaveArg, SaveOptions, SavePlan};
use crate::style::Style;
use crate::template::Template;

/// Subplot grid and everything drawn on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// (rows, cols)
    pub geometry: (usize, usize),
    pub share_x: bool,
    pub share_y: bool,
    pub width_cm: f64,
    pub height_cm: f64,
    pub suptitle: Option<String>,
    /// Row-major, `rows * cols` entries.
    pub axes: Vec<Axes>,
}

impl Figure {
    pub fn new(
        geometry: (usize, usize),
        share_x: bool,
        share_y: bool,
        width_cm: f64,
        height_cm: f64,
    ) -> Self {
        let (rows, cols) = geometry;
        let axes = (0..rows * cols)
            .map(|i| Axes::new(i / cols, i % cols))
            .collect();
        Self {
            geometry,
            share_x,
            share_y,
            width_cm,
            height_cm,
            suptitle: None,
            axes,
        }
    }

    pub fn subplot_count(&self) -> usize {
        self.axes.len()
    }

    pub fn size_inches(&self) -> (f64, f64) {
        (self.width_cm / CM_PER_INCH, self.height_cm / CM_PER_INCH)
    }
}

/// Construction parameters. Zero sizes and an empty font family mean "use the template value".
#[derive(Debug, Clone, PartialEq)]
pub struct FigureOptions {
    pub template: Template,
    /// (rows, cols)
    pub geometry: (usize, usize),
    pub share_x: bool,
    pub share_y: bool,
    pub width_cm: f64,
    pub height_cm: f64,
    pub font_family: String,
    pub font_size: f64,
    pub line_width: f64,
    /// Hand saved files to the viewer after `save`.
    pub show_on_save: bool,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            template: Template::Ppt,
            geometry: (1, 1),
            share_x: false,
            share_y: false,
            width_cm: 0.0,
            height_cm: 0.0,
            font_family: String::new(),
            font_size: 0.0,
            line_width: 0.0,
            show_on_save: true,
        }
    }
}

fn or_default(value: f64, default: f64) -> f64 {
    if value == 0.0 {
        default
    } else {
        value
    }
}

/// A figure with a current-subplot cursor. Plotting, labeling and limit calls apply to
/// the subplot the cursor points at.
///
/// ```no_run
/// use fig_session::{FigureOptions, FigureSession, SaveArg, Template};
///
/// let mut fig = FigureSession::new(FigureOptions {
///     template: Template::Oe,
///     geometry: (3, 2),
///     ..FigureOptions::default()
/// })?;
/// fig.next_subplot();
/// fig.plot(&[0.0, 1.0, 2.0], &[1.0, 0.5, 2.0])?;
/// fig.set_xlim(None)?;
/// fig.title("Random numbers");
/// fig.save("fig_test.png", &[SaveArg::Dpi(600), SaveArg::format("pdf")])?;
/// # Ok::<(), fig_session::FigureError>(())
/// ```
#[derive(Debug)]
pub struct FigureSession {
    figure: Figure,
    style: Style,
    template: Template,
    current_index: usize,
    show_on_save: bool,
    viewer: Box<dyn Viewer>,
}

impl FigureSession {
    pub fn new(options: FigureOptions) -> Result<Self> {
        let (rows, cols) = options.geometry;
        if rows == 0 || cols == 0 {
            return Err(FigureError::InvalidGeometry { rows, cols });
        }

        let spec = options.template.spec();
        let mut style = Style::from_template(&spec);
        if !options.font_family.is_empty() {
            style.font_family = options.font_family.clone();
        }
        style.font_size = or_default(options.font_size, spec.font_size);
        style.line_width = or_default(options.line_width, spec.line_width);

        let figure = Figure::new(
            options.geometry,
            options.share_x,
            options.share_y,
            or_default(options.width_cm, spec.width_cm),
            or_default(options.height_cm, spec.height_cm),
        );
        debug!(
            template = %options.template,
            rows,
            cols,
            width_cm = figure.width_cm,
            height_cm = figure.height_cm,
            font = %style.font_family,
            "figure session created"
        );

        Ok(Self {
            figure,
            style,
            template: options.template,
            current_index: 0,
            show_on_save: options.show_on_save,
            viewer: Box::new(SystemViewer),
        })
    }

    /// Session from a template name (case-insensitive) and geometry, other options default.
    pub fn with_template(name: &str, geometry: (usize, usize)) -> Result<Self> {
        Self::new(FigureOptions {
            template: name.parse()?,
            geometry,
            ..FigureOptions::default()
        })
    }

    pub fn template(&self) -> Template {
        self.template
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn subplot_geometry(&self) -> (usize, usize) {
        self.figure.geometry
    }

    pub fn subplot_count(&self) -> usize {
        self.figure.subplot_count()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// (width, height) in centimeters.
    pub fn size_cm(&self) -> (f64, f64) {
        (self.figure.width_cm, self.figure.height_cm)
    }

    /// (width, height) in inches.
    pub fn size_inches(&self) -> (f64, f64) {
        self.figure.size_inches()
    }

    pub fn show_on_save(&self) -> bool {
        self.show_on_save
    }

    pub fn set_show_on_save(&mut self, show: bool) {
        self.show_on_save = show;
    }

    pub fn set_viewer(&mut self, viewer: impl Viewer + 'static) {
        self.viewer = Box::new(viewer);
    }

    pub fn axis_current(&self) -> &Axes {
        &self.figure.axes[self.current_index % self.subplot_count()]
    }

    pub fn axis_current_mut(&mut self) -> &mut Axes {
        let index = self.current_index % self.subplot_count();
        &mut self.figure.axes[index]
    }

    /// `None` advances to the next subplot, `Some(k)` jumps to `k`. Always wraps around.
    pub fn select_subplot(&mut self, index: Option<i64>) -> usize {
        let count = self.subplot_count() as i64;
        let target = match index {
            None => self.current_index as i64 + 1,
            Some(k) => k,
        };
        self.current_index = target.rem_euclid(count) as usize;
        debug!(requested = ?index, current = self.current_index, "subplot selected");
        self.current_index
    }

    pub fn next_subplot(&mut self) -> usize {
        self.select_subplot(None)
    }

    pub fn suptitle(&mut self, text: impl Into<String>) {
        self.figure.suptitle = Some(text.into());
    }

    pub fn title(&mut self, text: impl Into<String>) {
        self.axis_current_mut().title = Some(text.into());
    }

    pub fn xlabel(&mut self, text: impl Into<String>) {
        self.axis_current_mut().xlabel = Some(text.into());
    }

    pub fn ylabel(&mut self, text: impl Into<String>) {
        self.axis_current_mut().ylabel = Some(text.into());
    }

    pub fn plot(&mut self, x: &[f64], y: &[f64]) -> Result<()> {
        self.plot_with(x, y, &LineOptions::default())
    }

    /// Plots `y` against its indices.
    pub fn plot_y(&mut self, y: &[f64]) -> Result<()> {
        let x: Vec<f64> = (0..y.len()).map(|i| i as f64).collect();
        self.plot(&x, y)
    }

    pub fn plot_with(&mut self, x: &[f64], y: &[f64], options: &LineOptions) -> Result<()> {
        if x.len() != y.len() {
            return Err(FigureError::ShapeMismatch(format!(
                "x has {} values but y has {}",
                x.len(),
                y.len()
            )));
        }
        let index = self.current_index % self.figure.axes.len();
        let default_width = self.style.line_width;
        let cycle = &self.style.cycle;
        let axes = &mut self.figure.axes[index];
        let (color, line_style) = match (options.color, options.line_style) {
            (Some(color), Some(line_style)) => (color, line_style),
            (color, line_style) => {
                let (cycle_color, cycle_style) = cycle.get(axes.next_cycle_position());
                (color.unwrap_or(cycle_color), line_style.unwrap_or(cycle_style))
            }
        };
        axes.lines.push(Line {
            x: x.to_vec(),
            y: y.to_vec(),
            color,
            line_style,
            line_width: options.line_width.unwrap_or(default_width),
        });
        Ok(())
    }

    /// One line per column of `y`, each against `x`.
    pub fn plot_columns(&mut self, x: &[f64], y: &Array2<f64>) -> Result<()> {
        if y.nrows() != x.len() {
            return Err(FigureError::ShapeMismatch(format!(
                "x has {} values but y has {} rows",
                x.len(),
                y.nrows()
            )));
        }
        for column in y.columns() {
            self.plot(x, &column.to_vec())?;
        }
        Ok(())
    }

    /// Colored mesh of `values` (rows along y, columns along x) with the default colormap.
    pub fn pcolor(&mut self, values: &Array2<f64>) -> Result<()> {
        self.pcolor_with(values, MeshOptions::default())
    }

    pub fn pcolor_with(&mut self, values: &Array2<f64>, options: MeshOptions) -> Result<()> {
        let (rows, cols) = values.dim();
        if rows == 0 || cols == 0 {
            return Err(FigureError::ShapeMismatch("mesh values are empty".to_string()));
        }
        let x_edges = edges_or_default(options.x_edges, cols, 'x')?;
        let y_edges = edges_or_default(options.y_edges, rows, 'y')?;
        let flat: Vec<f64> = values.iter().copied().collect();
        let (data_min, data_max) = finite_min_max(&flat).unwrap_or((0.0, 1.0));

        self.axis_current_mut().meshes.push(Mesh {
            values: values.clone(),
            x_edges,
            y_edges,
            colormap: options.colormap.unwrap_or_default(),
            vmin: options.vmin.unwrap_or(data_min),
            vmax: options.vmax.unwrap_or(data_max),
        });
        Ok(())
    }

    /// `None` derives the bounds from the lines on the current subplot.
    pub fn set_xlim(&mut self, limits: Option<(f64, f64)>) -> Result<(f64, f64)> {
        self.set_limits(AxisKind::X, limits)
    }

    /// `None` derives the bounds from the lines on the current subplot.
    pub fn set_ylim(&mut self, limits: Option<(f64, f64)>) -> Result<(f64, f64)> {
        self.set_limits(AxisKind::Y, limits)
    }

    fn set_limits(&mut self, axis: AxisKind, limits: Option<(f64, f64)>) -> Result<(f64, f64)> {
        let bounds = match limits {
            Some((min, max)) => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(FigureError::InvalidLimits {
                        axis: axis.letter(),
                        min,
                        max,
                    });
                }
                (min, max)
            }
            None => self
                .axis_current()
                .line_extent(axis)
                .ok_or(FigureError::NoLineData {
                    axis: axis.letter(),
                })?,
        };

        let shared = match axis {
            AxisKind::X => self.figure.share_x,
            AxisKind::Y => self.figure.share_y,
        };
        if shared {
            for axes in &mut self.figure.axes {
                axes.set_limits(axis, bounds);
            }
        } else {
            self.axis_current_mut().set_limits(axis, bounds);
        }
        debug!(axis = %axis.letter(), ?bounds, shared, "limits set");
        Ok(bounds)
    }

    /// Saves with default export options. See [`FigureSession::save_with`].
    pub fn save(&mut self, filename: &str, args: &[SaveArg]) -> Result<Vec<PathBuf>> {
        self.save_with(filename, args, &SaveOptions::default())
    }

    /// Writes `base.<format>` for the extension of `filename` and every extra format in
    /// `args`, at the last DPI in `args` (300 if none) unless `options.dpi` is set.
    pub fn save_with(
        &mut self,
        filename: &str,
        args: &[SaveArg],
        options: &SaveOptions,
    ) -> Result<Vec<PathBuf>> {
        let plan = SavePlan::resolve(filename, args, options)?;
        let written = plot_framework::export(&self.figure, &self.style, &plan, options)?;
        if self.show_on_save {
            self.viewer.show(&written)?;
        }
        Ok(written)
    }
}

fn edges_or_default(edges: Option<Vec<f64>>, cells: usize, axis: char) -> Result<Vec<f64>> {
    match edges {
        Some(edges) if edges.len() == cells + 1 => Ok(edges),
        Some(edges) => Err(FigureError::ShapeMismatch(format!(
            "{axis} edges need {} values for {cells} cells, got {}",
            cells + 1,
            edges.len()
        ))),
        None => Ok((0..=cells).map(|i| i as f64).collect()),
    }
}
