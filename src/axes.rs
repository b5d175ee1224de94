// src/axes.rs

use ndarray::Array2;
use plotters::style::RGBColor;

use crate::style::{Colormap, LineStyle};

/// Per-call options for a line plot. Unset fields come from the session style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineOptions {
    pub color: Option<RGBColor>,
    pub line_style: Option<LineStyle>,
    /// Points.
    pub line_width: Option<f64>,
}

/// Per-call options for a mesh plot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshOptions {
    /// Defaults to nipy_spectral.
    pub colormap: Option<Colormap>,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
    /// Cell edges along x, `cols + 1` values. Defaults to `0..=cols`.
    pub x_edges: Option<Vec<f64>>,
    /// Cell edges along y, `rows + 1` values. Defaults to `0..=rows`.
    pub y_edges: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: RGBColor,
    pub line_style: LineStyle,
    pub line_width: f64,
}

impl Line {
    pub fn x_range(&self) -> Option<(f64, f64)> {
        finite_min_max(&self.x)
    }

    pub fn y_range(&self) -> Option<(f64, f64)> {
        finite_min_max(&self.y)
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub values: Array2<f64>,
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    pub colormap: Colormap,
    pub vmin: f64,
    pub vmax: f64,
}

impl Mesh {
    pub fn x_range(&self) -> Option<(f64, f64)> {
        finite_min_max(&self.x_edges)
    }

    pub fn y_range(&self) -> Option<(f64, f64)> {
        finite_min_max(&self.y_edges)
    }

    /// Cells as `(x0, x1, y0, y1, value)`, row-major, skipping non-finite values.
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64, f64, f64, f64)> + '_ {
        self.values
            .indexed_iter()
            .filter(|(_, v)| v.is_finite())
            .map(move |((row, col), &v)| {
                (
                    self.x_edges[col],
                    self.x_edges[col + 1],
                    self.y_edges[row],
                    self.y_edges[row + 1],
                    v,
                )
            })
    }
}

/// Which coordinate a limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    X,
    Y,
}

impl AxisKind {
    pub fn letter(self) -> char {
        match self {
            AxisKind::X => 'x',
            AxisKind::Y => 'y',
        }
    }
}

/// One subplot of a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    position: (usize, usize),
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub lines: Vec<Line>,
    pub meshes: Vec<Mesh>,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    cycle_position: usize,
}

impl Axes {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            position: (row, col),
            title: None,
            xlabel: None,
            ylabel: None,
            lines: Vec::new(),
            meshes: Vec::new(),
            xlim: None,
            ylim: None,
            cycle_position: 0,
        }
    }

    /// Grid position as `(row, col)`.
    pub fn position(&self) -> (usize, usize) {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.meshes.is_empty()
    }

    /// Position in the style cycle the next automatically styled line takes.
    pub fn next_cycle_position(&mut self) -> usize {
        let position = self.cycle_position;
        self.cycle_position += 1;
        position
    }

    pub fn limits(&self, axis: AxisKind) -> Option<(f64, f64)> {
        match axis {
            AxisKind::X => self.xlim,
            AxisKind::Y => self.ylim,
        }
    }

    pub fn set_limits(&mut self, axis: AxisKind, bounds: (f64, f64)) {
        match axis {
            AxisKind::X => self.xlim = Some(bounds),
            AxisKind::Y => self.ylim = Some(bounds),
        }
    }

    /// Global min/max of the coordinate data of every line, ignoring NaN.
    pub fn line_extent(&self, axis: AxisKind) -> Option<(f64, f64)> {
        self.lines
            .iter()
            .filter_map(|line| match axis {
                AxisKind::X => line.x_range(),
                AxisKind::Y => line.y_range(),
            })
            .reduce(merge_ranges)
    }

    /// Extent covered by mesh cells.
    pub fn mesh_extent(&self, axis: AxisKind) -> Option<(f64, f64)> {
        self.meshes
            .iter()
            .filter_map(|mesh| match axis {
                AxisKind::X => mesh.x_range(),
                AxisKind::Y => mesh.y_range(),
            })
            .reduce(merge_ranges)
    }
}

pub fn merge_ranges(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0.min(b.0), a.1.max(b.1))
}

/// Min and max of the finite values, or `None` when there are none.
pub fn finite_min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn line(x: Vec<f64>, y: Vec<f64>) -> Line {
        Line {
            x,
            y,
            color: RGBColor(0, 0, 0),
            line_style: LineStyle::Solid,
            line_width: 1.0,
        }
    }

    #[test]
    fn finite_min_max_skips_nan_and_infinities() {
        assert_eq!(finite_min_max(&[]), None);
        assert_eq!(finite_min_max(&[f64::NAN]), None);
        assert_eq!(
            finite_min_max(&[3.0, f64::NAN, -1.0, f64::INFINITY, 2.0]),
            Some((-1.0, 3.0))
        );
    }

    #[test]
    fn line_extent_spans_all_lines() {
        let mut axes = Axes::new(0, 0);
        assert_eq!(axes.line_extent(AxisKind::X), None);
        axes.lines.push(line(vec![0.0, 1.0], vec![5.0, 6.0]));
        axes.lines.push(line(vec![-2.0, 0.5], vec![7.0, -3.0]));
        assert_eq!(axes.line_extent(AxisKind::X), Some((-2.0, 1.0)));
        assert_eq!(axes.line_extent(AxisKind::Y), Some((-3.0, 7.0)));
    }

    #[test]
    fn mesh_cells_follow_edges_and_skip_nan() {
        let mesh = Mesh {
            values: array![[1.0, f64::NAN], [3.0, 4.0]],
            x_edges: vec![0.0, 10.0, 20.0],
            y_edges: vec![0.0, 1.0, 2.0],
            colormap: Colormap::NipySpectral,
            vmin: 1.0,
            vmax: 4.0,
        };
        let cells: Vec<_> = mesh.cells().collect();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0], (0.0, 10.0, 0.0, 1.0, 1.0));
        assert_eq!(cells[1], (0.0, 10.0, 1.0, 2.0, 3.0));
        assert_eq!(cells[2], (10.0, 20.0, 1.0, 2.0, 4.0));
        assert_eq!(mesh.x_range(), Some((0.0, 20.0)));
    }

    #[test]
    fn cycle_position_advances() {
        let mut axes = Axes::new(1, 2);
        assert_eq!(axes.position(), (1, 2));
        assert_eq!(axes.next_cycle_position(), 0);
        assert_eq!(axes.next_cycle_position(), 1);
    }
}
