// src/plot_framework.rs

use plotters::backend::{BitMapBackend, DrawingBackend, SVGBackend};
use plotters::chart::ChartBuilder;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{PathElement, Rectangle};
use plotters::style::{Color, IntoFont, RGBColor};
use svg2pdf::usvg;
use svg2pdf::{ConversionOptions, PageOptions};
use tracing::{debug, info};

use std::fs;
use std::ops::Range;
use std::path::PathBuf;

use crate::axes::{merge_ranges, Axes, AxisKind};
use crate::constants::{
    AUTOSCALE_MARGIN, COLOR_AXIS, COLOR_TEXT, DEGENERATE_RANGE_PADDING, FIGURE_MARGIN_PT,
    LOOSE_X_LABEL_AREA_PT, LOOSE_Y_LABEL_AREA_PT, POINTS_PER_INCH, SUBPLOT_MARGIN_PT,
    SVG_UNITS_PER_INCH, TEXT_LINE_HEIGHT_FACTOR, TICK_LABEL_COUNT_X, TICK_LABEL_COUNT_Y,
};
use crate::error::{FigureError, Result};
use crate::figure::Figure;
use crate::font_config::{ensure_font, measure_text_width, LoadedFont};
use crate::save::{OutputFormat, SaveOptions, SavePlan};
use crate::style::{normalize, Style};

const TITLE_SCALE: f64 = 1.2;

/// Per-output rendering parameters.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Output pixels per typographic point.
    pub px_per_pt: f64,
    pub facecolor: RGBColor,
    pub tight_layout: bool,
    /// Font when text can be drawn.
    pub font: Option<&'static LoadedFont>,
}

impl RenderSettings {
    fn font_px(&self, style: &Style) -> f64 {
        style.font_size * self.px_per_pt
    }

    fn text_enabled(&self) -> bool {
        self.font.is_some()
    }
}

/// Space reserved around one subplot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubplotLayout {
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
    pub x_tick_labels: bool,
    pub y_tick_labels: bool,
}

/// Compact tick label: plain decimals with trailing zeros removed, scientific for extremes.
pub fn format_tick(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    if !(1e-3..1e5).contains(&magnitude) {
        return format!("{value:.1e}");
    }
    let text = format!("{value:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Expands `[min, max]` by `margin` of its span on each side; zero-width ranges get a fixed padding.
pub fn calculate_range(min_val: f64, max_val: f64, margin: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let span = max - min;
    if span < 1e-12 {
        (min - DEGENERATE_RANGE_PADDING, max + DEGENERATE_RANGE_PADDING)
    } else {
        (min - span * margin, max + span * margin)
    }
}

fn auto_range(axes: &Axes, axis: AxisKind) -> Option<(f64, f64)> {
    let lines = axes
        .line_extent(axis)
        .map(|(lo, hi)| calculate_range(lo, hi, AUTOSCALE_MARGIN));
    let mesh = axes.mesh_extent(axis);
    match (lines, mesh) {
        (Some(a), Some(b)) => Some(merge_ranges(a, b)),
        (a, b) => a.or(b),
    }
}

fn resolve_ranges(figure: &Figure, axis: AxisKind, shared: bool) -> Vec<Range<f64>> {
    let shared_auto = if shared {
        figure
            .axes
            .iter()
            .filter_map(|a| auto_range(a, axis))
            .reduce(merge_ranges)
    } else {
        None
    };
    figure
        .axes
        .iter()
        .map(|axes| {
            let (lo, hi) = axes
                .limits(axis)
                .or(shared_auto)
                .or_else(|| auto_range(axes, axis))
                .unwrap_or((0.0, 1.0));
            if (hi - lo).abs() < 1e-12 {
                let (lo, hi) = calculate_range(lo, hi, 0.0);
                lo..hi
            } else {
                lo..hi
            }
        })
        .collect()
}

/// View ranges for every subplot, honoring explicit limits and axis sharing.
pub fn view_ranges(figure: &Figure) -> Vec<(Range<f64>, Range<f64>)> {
    let xs = resolve_ranges(figure, AxisKind::X, figure.share_x);
    let ys = resolve_ranges(figure, AxisKind::Y, figure.share_y);
    xs.into_iter().zip(ys).collect()
}

fn widest_tick_label(range: &Range<f64>, font_px: f64, font: Option<&LoadedFont>) -> f64 {
    let mid = (range.start + range.end) / 2.0;
    [range.start, mid, range.end]
        .iter()
        .map(|&v| measure_text_width(&format_tick(v), font_px, font))
        .fold(0.0, f64::max)
}

/// Tight layout pass: reserve room only for the text each subplot actually shows.
pub fn compute_layout(
    figure: &Figure,
    style: &Style,
    views: &[(Range<f64>, Range<f64>)],
    settings: &RenderSettings,
) -> Vec<SubplotLayout> {
    let (rows, _) = figure.geometry;
    let text = settings.text_enabled();
    let font_px = settings.font_px(style);
    let band = font_px * TEXT_LINE_HEIGHT_FACTOR;
    let margin = (SUBPLOT_MARGIN_PT * settings.px_per_pt).round() as u32;

    figure
        .axes
        .iter()
        .zip(views)
        .map(|(axes, (_, y_range))| {
            let (row, col) = axes.position();
            let x_tick_labels = text && (!figure.share_x || row == rows - 1);
            let y_tick_labels = text && (!figure.share_y || col == 0);

            if !settings.tight_layout {
                return SubplotLayout {
                    margin,
                    x_label_area: (LOOSE_X_LABEL_AREA_PT * settings.px_per_pt).round() as u32,
                    y_label_area: (LOOSE_Y_LABEL_AREA_PT * settings.px_per_pt).round() as u32,
                    x_tick_labels,
                    y_tick_labels,
                };
            }

            let mut x_area = if x_tick_labels { band } else { font_px * 0.5 };
            if text && axes.xlabel.is_some() {
                x_area += band;
            }
            let mut y_area = if y_tick_labels {
                widest_tick_label(y_range, font_px, settings.font) + font_px
            } else {
                font_px * 0.5
            };
            if text && axes.ylabel.is_some() {
                y_area += band;
            }
            SubplotLayout {
                margin,
                x_label_area: x_area.round() as u32,
                y_label_area: y_area.round() as u32,
                x_tick_labels,
                y_tick_labels,
            }
        })
        .collect()
}

fn ordered(range: &Range<f64>) -> (f64, f64) {
    (range.start.min(range.end), range.start.max(range.end))
}

/// Liang-Barsky clipping of one segment against the view box.
pub fn clip_segment(
    a: (f64, f64),
    b: (f64, f64),
    x: &Range<f64>,
    y: &Range<f64>,
) -> Option<((f64, f64), (f64, f64))> {
    let (xmin, xmax) = ordered(x);
    let (ymin, ymax) = ordered(y);
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    for (p, q) in [
        (-dx, a.0 - xmin),
        (dx, xmax - a.0),
        (-dy, a.1 - ymin),
        (dy, ymax - a.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }
    if t0 > t1 {
        return None;
    }
    let at = |t: f64| (a.0 + t * dx, a.1 + t * dy);
    let start = if t0 == 0.0 { a } else { at(t0) };
    let end = if t1 == 1.0 { b } else { at(t1) };
    Some((start, end))
}

/// Splits a polyline into the runs visible inside the view box. Non-finite points break the line.
pub fn clip_polyline(
    points: &[(f64, f64)],
    x: &Range<f64>,
    y: &Range<f64>,
) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let finite = |p: (f64, f64)| p.0.is_finite() && p.1.is_finite();

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let clipped = if finite(a) && finite(b) {
            clip_segment(a, b, x, y)
        } else {
            None
        };
        match clipped {
            Some((start, end)) => {
                if current.last() != Some(&start) {
                    if current.len() >= 2 {
                        runs.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(start);
                }
                current.push(end);
                if end != b {
                    runs.push(std::mem::take(&mut current));
                }
            }
            None => {
                if current.len() >= 2 {
                    runs.push(std::mem::take(&mut current));
                }
                current.clear();
            }
        }
    }
    if current.len() >= 2 {
        runs.push(current);
    }
    runs
}

/// Cuts a polyline into dashes. `pattern` holds alternating on/off lengths in pixels and
/// `to_px` maps data coordinates to pixels, so dashes keep their length whatever the scale.
pub fn dash_polyline<F>(points: &[(f64, f64)], to_px: F, pattern: &[f64]) -> Vec<Vec<(f64, f64)>>
where
    F: Fn((f64, f64)) -> (f64, f64),
{
    if pattern.is_empty() || pattern.iter().sum::<f64>() <= 0.0 {
        return vec![points.to_vec()];
    }
    let is_on = |idx: usize| idx % 2 == 0;
    let mut dashes = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let mut idx = 0;
    let mut remaining = pattern[0];

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let (pa, pb) = (to_px(a), to_px(b));
        let seg_len = (pb.0 - pa.0).hypot(pb.1 - pa.1);
        if seg_len <= 0.0 {
            continue;
        }
        if is_on(idx) && current.is_empty() {
            current.push(a);
        }
        let mut t = 0.0;
        while t < 1.0 {
            let left = (1.0 - t) * seg_len;
            if remaining > left {
                remaining -= left;
                t = 1.0;
                if is_on(idx) {
                    current.push(b);
                }
            } else {
                t = (t + remaining / seg_len).min(1.0);
                let p = (a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1));
                current.push(p);
                if is_on(idx) {
                    dashes.push(std::mem::take(&mut current));
                }
                idx = (idx + 1) % pattern.len();
                remaining = pattern[idx];
            }
        }
    }
    if current.len() >= 2 {
        dashes.push(current);
    }
    dashes.retain(|d| d.len() >= 2);
    dashes
}

fn draw_axes<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    axes: &Axes,
    view: &(Range<f64>, Range<f64>),
    layout: &SubplotLayout,
    style: &Style,
    settings: &RenderSettings,
) -> Result<()> {
    let (x_range, y_range) = view;
    let family = style.font_family.as_str();
    let font_px = settings.font_px(style);
    let text = settings.text_enabled();

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(layout.margin)
        .x_label_area_size(layout.x_label_area)
        .y_label_area_size(layout.y_label_area);
    if let Some(title) = axes.title.as_deref().filter(|_| text) {
        builder.caption(title, (family, font_px * TITLE_SCALE));
    }
    let mut chart = builder.build_cartesian_2d(x_range.clone(), y_range.clone())?;

    if text {
        let tick_formatter = |v: &f64| format_tick(*v);
        let hidden_formatter = |_: &f64| String::new();
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .x_labels(TICK_LABEL_COUNT_X)
            .y_labels(TICK_LABEL_COUNT_Y)
            .axis_style(COLOR_AXIS.stroke_width(1))
            .label_style((family, font_px).into_font().color(&COLOR_TEXT))
            .axis_desc_style((family, font_px).into_font().color(&COLOR_TEXT));
        if layout.x_tick_labels {
            mesh.x_label_formatter(&tick_formatter);
        } else {
            mesh.x_label_formatter(&hidden_formatter);
        }
        if layout.y_tick_labels {
            mesh.y_label_formatter(&tick_formatter);
        } else {
            mesh.y_label_formatter(&hidden_formatter);
        }
        if let Some(xlabel) = &axes.xlabel {
            mesh.x_desc(xlabel.as_str());
        }
        if let Some(ylabel) = &axes.ylabel {
            mesh.y_desc(ylabel.as_str());
        }
        mesh.draw()?;
    }

    // Meshes below lines.
    let (xmin, xmax) = ordered(x_range);
    let (ymin, ymax) = ordered(y_range);
    for mesh in &axes.meshes {
        let cells: Vec<_> = mesh
            .cells()
            .filter_map(|(x0, x1, y0, y1, value)| {
                let (x0, x1) = (x0.min(x1).max(xmin), x0.max(x1).min(xmax));
                let (y0, y1) = (y0.min(y1).max(ymin), y0.max(y1).min(ymax));
                if x0 >= x1 || y0 >= y1 {
                    return None;
                }
                let color = mesh.colormap.eval(normalize(value, mesh.vmin, mesh.vmax));
                Some(Rectangle::new([(x0, y0), (x1, y1)], color.filled()))
            })
            .collect();
        chart.draw_series(cells)?;
    }

    for line in &axes.lines {
        let width_px = (line.line_width * settings.px_per_pt).max(1.0);
        let shape = line.color.stroke_width(width_px.round() as u32);
        let pattern: Vec<f64> = line
            .line_style
            .dash_pattern()
            .iter()
            .map(|len| len * width_px)
            .collect();
        let points: Vec<(f64, f64)> = line.points().collect();
        let mut pieces = Vec::new();
        for run in clip_polyline(&points, x_range, y_range) {
            if pattern.is_empty() {
                pieces.push(run);
            } else {
                let to_px = |p: (f64, f64)| {
                    let (px, py) = chart.backend_coord(&p);
                    (px as f64, py as f64)
                };
                pieces.extend(dash_polyline(&run, to_px, &pattern));
            }
        }
        chart.draw_series(pieces.into_iter().map(|p| PathElement::new(p, shape)))?;
    }

    // Frame on all four sides.
    chart.plotting_area().draw(&Rectangle::new(
        [(x_range.start, y_range.start), (x_range.end, y_range.end)],
        COLOR_AXIS.stroke_width(1),
    ))?;
    Ok(())
}

/// Draws the whole figure: suptitle, then the subplot grid split evenly over the remaining area.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    style: &Style,
    settings: &RenderSettings,
) -> Result<()> {
    root.fill(&settings.facecolor)?;
    let pad = (FIGURE_MARGIN_PT * settings.px_per_pt).round() as u32;
    let body = root.margin(pad, pad, pad, pad);
    let body = match figure.suptitle.as_deref() {
        Some(suptitle) if settings.text_enabled() => {
            let font_px = settings.font_px(style) * TITLE_SCALE;
            body.titled(
                suptitle,
                (style.font_family.as_str(), font_px)
                    .into_font()
                    .color(&COLOR_TEXT),
            )?
        }
        _ => body,
    };

    let views = view_ranges(figure);
    let layouts = compute_layout(figure, style, &views, settings);
    let areas = body.split_evenly(figure.geometry);
    for (((area, axes), view), layout) in areas.iter().zip(&figure.axes).zip(&views).zip(&layouts) {
        draw_axes(area, axes, view, layout, style, settings)?;
    }
    Ok(())
}

/// Pixel size of the output for `units_per_inch` (DPI for bitmaps, points for SVG).
pub fn output_size(figure: &Figure, units_per_inch: f64) -> (u32, u32) {
    let (w_in, h_in) = figure.size_inches();
    (
        (w_in * units_per_inch).round().max(1.0) as u32,
        (h_in * units_per_inch).round().max(1.0) as u32,
    )
}

/// Converts rendered SVG to a single-page PDF. Text uses the session font when one was found.
fn svg_to_pdf(svg: &str, font: Option<&LoadedFont>) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    if let Some(font) = font {
        let db = options.fontdb_mut();
        db.load_font_data(font.bytes.to_vec());
        let family = db
            .faces()
            .next()
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone());
        if let Some(family) = family {
            db.set_sans_serif_family(family.clone());
            db.set_serif_family(family.clone());
            db.set_monospace_family(family);
        }
    }
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| FigureError::Pdf(e.to_string()))?;
    svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|e| FigureError::Pdf(e.to_string()))
}

/// Writes every target of `plan`. Returns the written paths in plan order.
pub fn export(
    figure: &Figure,
    style: &Style,
    plan: &SavePlan,
    options: &SaveOptions,
) -> Result<Vec<PathBuf>> {
    let font = ensure_font(&style.font_family);
    let mut written = Vec::with_capacity(plan.targets.len());

    for target in &plan.targets {
        let units_per_inch = if target.format.is_vector() {
            SVG_UNITS_PER_INCH
        } else {
            plan.dpi as f64
        };
        let settings = RenderSettings {
            px_per_pt: units_per_inch / POINTS_PER_INCH,
            facecolor: options.facecolor,
            tight_layout: options.tight_layout,
            font,
        };
        let size = output_size(figure, units_per_inch);
        debug!(path = %target.path.display(), ?size, dpi = plan.dpi, "rendering figure");

        match target.format {
            OutputFormat::Svg => {
                let root = SVGBackend::new(&target.path, size).into_drawing_area();
                draw_figure(&root, figure, style, &settings)?;
                root.present()?;
            }
            OutputFormat::Pdf => {
                let mut svg = String::new();
                {
                    let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
                    draw_figure(&root, figure, style, &settings)?;
                    root.present()?;
                }
                fs::write(&target.path, svg_to_pdf(&svg, font)?)?;
            }
            OutputFormat::Png | OutputFormat::Jpeg | OutputFormat::Bmp => {
                let root = BitMapBackend::new(&target.path, size).into_drawing_area();
                draw_figure(&root, figure, style, &settings)?;
                root.present()?;
            }
        }
        info!(path = %target.path.display(), "figure saved");
        written.push(target.path.clone());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::Line;
    use crate::style::LineStyle;

    fn no_metrics() -> &'static LoadedFont {
        Box::leak(Box::new(LoadedFont::new(&[])))
    }

    fn figure_with(geometry: (usize, usize)) -> Figure {
        Figure::new(geometry, false, false, 10.0, 5.0)
    }

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
    fn calculate_range_pads_and_orders() {
        assert_eq!(calculate_range(0.0, 10.0, 0.05), (-0.5, 10.5));
        assert_eq!(calculate_range(10.0, 0.0, 0.0), (0.0, 10.0));
        assert_eq!(calculate_range(3.0, 3.0, 0.05), (2.5, 3.5));
    }

    #[test]
    fn clip_segment_inside_keeps_endpoints() {
        let r = clip_segment((0.2, 0.2), (0.8, 0.7), &(0.0..1.0), &(0.0..1.0));
        assert_eq!(r, Some(((0.2, 0.2), (0.8, 0.7))));
    }

    #[test]
    fn clip_segment_crossing_boundary() {
        let (a, b) = clip_segment((-1.0, 0.5), (2.0, 0.5), &(0.0..1.0), &(0.0..1.0)).unwrap();
        assert!((a.0 - 0.0).abs() < 1e-12 && (b.0 - 1.0).abs() < 1e-12);
        assert_eq!(clip_segment((2.0, 2.0), (3.0, 3.0), &(0.0..1.0), &(0.0..1.0)), None);
    }

    #[test]
    fn clip_polyline_splits_at_exits_and_nan() {
        let pts = [
            (0.0, 0.5),
            (0.5, 0.5),
            (0.5, 2.0), // leaves the box
            (0.8, 2.0),
            (0.8, 0.5), // re-enters
            (0.9, 0.5),
            (f64::NAN, 0.5),
            (0.1, 0.1),
            (0.2, 0.2),
        ];
        let close = |a: (f64, f64), b: (f64, f64)| (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9;
        let runs = clip_polyline(&pts, &(0.0..1.0), &(0.0..1.0));
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].len(), 3);
        assert!(close(runs[0][2], (0.5, 1.0)));
        assert_eq!(runs[1].len(), 3);
        assert!(close(runs[1][0], (0.8, 1.0)));
        assert_eq!(runs[1][2], (0.9, 0.5));
        assert_eq!(runs[2], vec![(0.1, 0.1), (0.2, 0.2)]);
    }

    #[test]
    fn dash_polyline_solid_pattern_is_passthrough() {
        let pts = vec![(0.0, 0.0), (1.0, 1.0)];
        assert_eq!(dash_polyline(&pts, |p| p, &[]), vec![pts.clone()]);
    }

    #[test]
    fn dash_polyline_cuts_in_pixel_space() {
        let pts = [(0.0, 0.0), (10.0, 0.0)];
        let dashes = dash_polyline(&pts, |p| p, &[2.0, 1.0]);
        assert_eq!(dashes.len(), 4);
        assert_eq!(dashes[0], vec![(0.0, 0.0), (2.0, 0.0)]);
        let last = dashes.last().unwrap();
        assert!((last[0].0 - 9.0).abs() < 1e-9);
        assert_eq!(last[1], (10.0, 0.0));

        // Doubling the pixel scale halves the data length of each dash.
        let scaled = dash_polyline(&pts, |(x, y)| (x * 2.0, y), &[2.0, 1.0]);
        assert!((scaled[0][1].0 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn dash_polyline_continues_across_vertices() {
        let pts = [(0.0, 0.0), (1.0, 0.0), (1.0, 3.0)];
        let dashes = dash_polyline(&pts, |p| p, &[2.0, 10.0]);
        assert_eq!(dashes.len(), 1);
        assert_eq!(dashes[0].len(), 3);
        assert_eq!(dashes[0][1], (1.0, 0.0));
        assert!((dashes[0][2].1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn view_ranges_prefer_explicit_limits() {
        let mut figure = figure_with((1, 2));
        figure.axes[0].lines.push(line(vec![0.0, 10.0], vec![0.0, 1.0]));
        figure.axes[0].xlim = Some((2.0, 4.0));
        let views = view_ranges(&figure);
        assert_eq!(views[0].0, 2.0..4.0);
        assert_eq!(views[0].1, -0.05..1.05);
        // Empty subplot falls back to the unit range.
        assert_eq!(views[1], (0.0..1.0, 0.0..1.0));
    }

    #[test]
    fn shared_axes_use_the_union_of_data() {
        let mut figure = Figure::new((2, 1), true, false, 10.0, 5.0);
        figure.axes[0].lines.push(line(vec![0.0, 10.0], vec![0.0, 1.0]));
        figure.axes[1].lines.push(line(vec![-10.0, 0.0], vec![5.0, 6.0]));
        let views = view_ranges(&figure);
        assert_eq!(views[0].0, views[1].0);
        assert_eq!(views[0].0, -10.5..10.5);
        assert_ne!(views[0].1, views[1].1);
    }

    #[test]
    fn layout_hides_inner_tick_labels_of_shared_axes() {
        let figure = Figure::new((2, 2), true, true, 10.0, 5.0);
        let style = Style::from_template(&crate::template::Template::Ppt.spec());
        let settings = RenderSettings {
            px_per_pt: 1.0,
            facecolor: RGBColor(255, 255, 255),
            tight_layout: true,
            font: Some(no_metrics()),
        };
        let layout = compute_layout(&figure, &style, &view_ranges(&figure), &settings);
        assert!(!layout[0].x_tick_labels && layout[0].y_tick_labels);
        assert!(!layout[1].x_tick_labels && !layout[1].y_tick_labels);
        assert!(layout[2].x_tick_labels && layout[2].y_tick_labels);
        assert!(layout[3].x_tick_labels && !layout[3].y_tick_labels);
    }

    #[test]
    fn layout_reserves_room_for_axis_labels() {
        let mut figure = figure_with((1, 2));
        figure.axes[1].xlabel = Some("time".into());
        figure.axes[1].ylabel = Some("value".into());
        let style = Style::from_template(&crate::template::Template::Ppt.spec());
        let settings = RenderSettings {
            px_per_pt: 1.0,
            facecolor: RGBColor(255, 255, 255),
            tight_layout: true,
            font: Some(no_metrics()),
        };
        let layout = compute_layout(&figure, &style, &view_ranges(&figure), &settings);
        assert!(layout[1].x_label_area > layout[0].x_label_area);
        assert!(layout[1].y_label_area > layout[0].y_label_area);
    }

    #[test]
    fn rendered_svg_converts_to_pdf() {
        let mut figure = figure_with((1, 1));
        figure.axes[0].lines.push(line(vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 1.0]));
        let style = Style::from_template(&crate::template::Template::Ol.spec());
        let settings = RenderSettings {
            px_per_pt: 1.0,
            facecolor: RGBColor(255, 255, 255),
            tight_layout: true,
            font: None,
        };
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, output_size(&figure, SVG_UNITS_PER_INCH))
                .into_drawing_area();
            draw_figure(&root, &figure, &style, &settings).unwrap();
            root.present().unwrap();
        }
        let pdf = svg_to_pdf(&svg, None).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn malformed_svg_is_a_pdf_error() {
        assert!(matches!(
            svg_to_pdf("<svg", None),
            Err(FigureError::Pdf(_))
        ));
    }

    #[test]
    fn output_size_converts_centimeters() {
        let figure = Figure::new((1, 1), false, false, 2.54, 5.08);
        assert_eq!(output_size(&figure, 300.0), (300, 600));
        assert_eq!(output_size(&figure, 72.0), (72, 144));
    }
}
