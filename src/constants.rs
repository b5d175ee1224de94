// src/constants.rs

use plotters::style::RGBColor;

// Unit conversions.
pub const CM_PER_INCH: f64 = 2.54;
pub const POINTS_PER_INCH: f64 = 72.0;

// Export defaults.
pub const DEFAULT_DPI: u32 = 300;
/// Vector output is laid out in points, one unit per point.
pub const SVG_UNITS_PER_INCH: f64 = POINTS_PER_INCH;

// --- Template presets: (width cm, height cm, font family, font size pt, line width pt) ---
pub const TEMPLATE_PPT: (f64, f64, &str, f64, f64) = (15.0, 10.0, FONT_FAMILY_SANS, 12.0, 2.0);
pub const TEMPLATE_PPT_TWO: (f64, f64, &str, f64, f64) = (10.0, 8.0, FONT_FAMILY_SANS, 12.0, 2.0);
pub const TEMPLATE_PPT_BIG: (f64, f64, &str, f64, f64) = (20.0, 15.0, FONT_FAMILY_SANS, 12.0, 3.0);
pub const TEMPLATE_OL: (f64, f64, &str, f64, f64) = (8.0, 6.0, FONT_FAMILY_SERIF, 9.0, 1.0);
pub const TEMPLATE_OE: (f64, f64, &str, f64, f64) = (12.0, 8.0, FONT_FAMILY_SERIF, 10.0, 1.0);

pub const FONT_FAMILY_SANS: &str = "sans-serif";
pub const FONT_FAMILY_SERIF: &str = "serif";
pub const FONT_FAMILY_MONO: &str = "monospace";

// --- Palette ---
pub const COLOR_BLUE: RGBColor = RGBColor(33, 101, 146);
pub const COLOR_RED: RGBColor = RGBColor(218, 4, 19);
pub const COLOR_GREEN: RGBColor = RGBColor(70, 173, 52);
pub const COLOR_ORANGE: RGBColor = RGBColor(235, 149, 0);
pub const PALETTE: [RGBColor; 4] = [COLOR_BLUE, COLOR_RED, COLOR_GREEN, COLOR_ORANGE];

pub const COLOR_FACE: RGBColor = RGBColor(255, 255, 255);
pub const COLOR_TEXT: RGBColor = RGBColor(0, 0, 0);
pub const COLOR_AXIS: RGBColor = RGBColor(0, 0, 0);

// Dash patterns as on/off lengths in multiples of the line width.
pub const DASH_PATTERN_DASHED: &[f64] = &[3.7, 1.6];
pub const DASH_PATTERN_DOTTED: &[f64] = &[1.0, 1.65];
pub const DASH_PATTERN_DASH_DOT: &[f64] = &[6.4, 1.6, 1.0, 1.6];

// Default mesh colormap name.
pub const DEFAULT_COLORMAP: &str = "nipy_spectral";

// --- Layout ---
pub const AUTOSCALE_MARGIN: f64 = 0.05; // Fraction of the data span added on each side of line data
pub const DEGENERATE_RANGE_PADDING: f64 = 0.5;
pub const TICK_LABEL_COUNT_X: usize = 6;
pub const TICK_LABEL_COUNT_Y: usize = 6;
pub const TEXT_LINE_HEIGHT_FACTOR: f64 = 1.5; // Text band height relative to font size
pub const SUBPLOT_MARGIN_PT: f64 = 6.0;
pub const FIGURE_MARGIN_PT: f64 = 4.0;
pub const CHAR_WIDTH_RATIO: f64 = 0.6; // Fallback glyph width relative to font size
// Label areas used when the tight layout pass is switched off.
pub const LOOSE_X_LABEL_AREA_PT: f64 = 36.0;
pub const LOOSE_Y_LABEL_AREA_PT: f64 = 48.0;

// --- Environment ---
pub const FONT_PATH_ENV: &str = "FIG_SESSION_FONT";
