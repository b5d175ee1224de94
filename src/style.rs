// src/style.rs

use std::fmt;
use std::str::FromStr;

use plotters::style::RGBColor;

use crate::constants::{
    DASH_PATTERN_DASHED, DASH_PATTERN_DASH_DOT, DASH_PATTERN_DOTTED, DEFAULT_COLORMAP, PALETTE,
};
use crate::error::FigureError;
use crate::template::TemplateSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// On/off lengths in multiples of the line width. Empty for solid lines.
    pub fn dash_pattern(self) -> &'static [f64] {
        match self {
            LineStyle::Solid => &[],
            LineStyle::Dashed => DASH_PATTERN_DASHED,
            LineStyle::Dotted => DASH_PATTERN_DOTTED,
            LineStyle::DashDot => DASH_PATTERN_DASH_DOT,
        }
    }

    /// Short matplotlib-like notation.
    pub fn symbol(self) -> &'static str {
        match self {
            LineStyle::Solid => "-",
            LineStyle::Dashed => "--",
            LineStyle::Dotted => ":",
            LineStyle::DashDot => "-.",
        }
    }
}

/// Repeating sequence of (color, line style) pairs handed out to new lines.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleCycle {
    entries: Vec<(RGBColor, LineStyle)>,
}

impl StyleCycle {
    pub fn new(entries: Vec<(RGBColor, LineStyle)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `position`, wrapping around. An empty cycle yields the first palette color.
    pub fn get(&self, position: usize) -> (RGBColor, LineStyle) {
        if self.entries.is_empty() {
            return (PALETTE[0], LineStyle::Solid);
        }
        self.entries[position % self.entries.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &(RGBColor, LineStyle)> {
        self.entries.iter()
    }
}

impl Default for StyleCycle {
    /// The four palette colors with each line style; colors vary fastest.
    fn default() -> Self {
        let styles = [
            LineStyle::Solid,
            LineStyle::Dashed,
            LineStyle::Dotted,
            LineStyle::DashDot,
        ];
        let entries = styles
            .iter()
            .flat_map(|&style| PALETTE.iter().map(move |&color| (color, style)))
            .collect();
        Self { entries }
    }
}

/// Styling owned by one figure session and applied to every drawing call it makes.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub font_family: String,
    /// Points.
    pub font_size: f64,
    /// Points.
    pub line_width: f64,
    pub cycle: StyleCycle,
}

impl Style {
    pub fn from_template(spec: &TemplateSpec) -> Self {
        Self {
            font_family: spec.font_family.clone(),
            font_size: spec.font_size,
            line_width: spec.line_width,
            cycle: StyleCycle::default(),
        }
    }
}

/// Colormaps available for mesh plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    #[default]
    NipySpectral,
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Turbo,
    Spectral,
    Greys,
}

// nipy_spectral control points, evenly spaced over [0, 1].
const NIPY_SPECTRAL: [(f64, f64, f64); 21] = [
    (0.0, 0.0, 0.0),
    (0.4667, 0.0, 0.5333),
    (0.5333, 0.0, 0.6),
    (0.0, 0.0, 0.6667),
    (0.0, 0.0, 0.8667),
    (0.0, 0.4667, 0.8667),
    (0.0, 0.6, 0.8667),
    (0.0, 0.6667, 0.6667),
    (0.0, 0.6667, 0.5333),
    (0.0, 0.6, 0.0),
    (0.0, 0.7333, 0.0),
    (0.0, 0.8667, 0.0),
    (0.0, 1.0, 0.0),
    (0.7333, 1.0, 0.0),
    (0.9333, 0.9333, 0.0),
    (1.0, 0.8, 0.0),
    (1.0, 0.6, 0.0),
    (1.0, 0.0, 0.0),
    (0.8667, 0.0, 0.0),
    (0.8, 0.0, 0.0),
    (0.8, 0.8, 0.8),
];

fn eval_nipy_spectral(t: f64) -> RGBColor {
    let scaled = t * (NIPY_SPECTRAL.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(NIPY_SPECTRAL.len() - 2);
    let frac = scaled - lo as f64;
    let (r0, g0, b0) = NIPY_SPECTRAL[lo];
    let (r1, g1, b1) = NIPY_SPECTRAL[lo + 1];
    let channel = |a: f64, b: f64| ((a + (b - a) * frac) * 255.0).round().clamp(0.0, 255.0) as u8;
    RGBColor(channel(r0, r1), channel(g0, g1), channel(b0, b1))
}

impl Colormap {
    pub const ALL: [Colormap; 9] = [
        Colormap::NipySpectral,
        Colormap::Viridis,
        Colormap::Plasma,
        Colormap::Inferno,
        Colormap::Magma,
        Colormap::Cividis,
        Colormap::Turbo,
        Colormap::Spectral,
        Colormap::Greys,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Colormap::NipySpectral => DEFAULT_COLORMAP,
            Colormap::Viridis => "viridis",
            Colormap::Plasma => "plasma",
            Colormap::Inferno => "inferno",
            Colormap::Magma => "magma",
            Colormap::Cividis => "cividis",
            Colormap::Turbo => "turbo",
            Colormap::Spectral => "spectral",
            Colormap::Greys => "greys",
        }
    }

    /// Color at normalized position `t`. Values outside [0, 1] are clamped,
    /// non-finite values map to black.
    pub fn eval(self, t: f64) -> RGBColor {
        if !t.is_finite() {
            return RGBColor(0, 0, 0);
        }
        let t = t.clamp(0.0, 1.0);
        let gradient = match self {
            Colormap::NipySpectral => return eval_nipy_spectral(t),
            Colormap::Viridis => colorous::VIRIDIS,
            Colormap::Plasma => colorous::PLASMA,
            Colormap::Inferno => colorous::INFERNO,
            Colormap::Magma => colorous::MAGMA,
            Colormap::Cividis => colorous::CIVIDIS,
            Colormap::Turbo => colorous::TURBO,
            Colormap::Spectral => colorous::SPECTRAL,
            Colormap::Greys => colorous::GREYS,
        };
        let color = gradient.eval_continuous(t);
        RGBColor(color.r, color.g, color.b)
    }
}

impl FromStr for Colormap {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colormap::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FigureError::UnknownColormap(s.to_string()))
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps `value` in `[min, max]` to `[0, 1]`, guarding against a zero span.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let span = (max - min).abs().max(1e-12);
    ((value - min) / span).clamp(0.0, 1.0)
}
