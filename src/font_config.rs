// src/font_config.rs

// Font discovery for plot text.
// plotters keeps a process-wide registry of font families; families are registered
// from TTF files found on the system (or from $FIG_SESSION_FONT) the first time a
// session needs them. When nothing can be found, text is left out of the output.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use plotters::style::{register_font, FontStyle};
use tracing::{debug, warn};

use crate::constants::{CHAR_WIDTH_RATIO, FONT_PATH_ENV};

const SANS_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const SERIF_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/TTF/DejaVuSerif.ttf",
    "/usr/share/fonts/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSerif.ttf",
    "/System/Library/Fonts/Supplemental/Times New Roman.ttf",
    "/Library/Fonts/Times New Roman.ttf",
    "C:\\Windows\\Fonts\\times.ttf",
];

const MONO_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeMono.ttf",
    "/System/Library/Fonts/Supplemental/Courier New.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

/// Generic font class a family name falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontClass {
    Sans,
    Serif,
    Mono,
}

impl FontClass {
    pub fn of(family: &str) -> Self {
        let lower = family.to_ascii_lowercase();
        if lower.contains("mono") || lower.contains("courier") {
            FontClass::Mono
        } else if (lower.contains("serif") && !lower.contains("sans")) || lower.contains("times") {
            FontClass::Serif
        } else {
            FontClass::Sans
        }
    }

    fn candidates(self) -> &'static [&'static str] {
        match self {
            FontClass::Sans => SANS_CANDIDATES,
            FontClass::Serif => SERIF_CANDIDATES,
            FontClass::Mono => MONO_CANDIDATES,
        }
    }
}

/// Font data registered for a family, with the parsed face used for text measurement.
pub struct LoadedFont {
    pub bytes: &'static [u8],
    metrics: Option<rusttype::Font<'static>>,
}

impl LoadedFont {
    pub fn new(bytes: &'static [u8]) -> Self {
        Self {
            bytes,
            metrics: rusttype::Font::try_from_bytes(bytes),
        }
    }
}

impl fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedFont")
            .field("bytes", &self.bytes.len())
            .field("parsed", &self.metrics.is_some())
            .finish()
    }
}

// Family name -> font registered with plotters (None when nothing was found).
static REGISTERED: OnceLock<Mutex<HashMap<String, Option<&'static LoadedFont>>>> =
    OnceLock::new();

fn read_font(path: &Path) -> Option<&'static [u8]> {
    match fs::read(path) {
        // Leaked once per family; plotters and rusttype need 'static font data.
        Ok(bytes) => Some(&*Box::leak(bytes.into_boxed_slice())),
        Err(err) => {
            debug!(path = %path.display(), %err, "font file not readable");
            None
        }
    }
}

fn find_font_bytes(family: &str) -> Option<&'static [u8]> {
    if let Some(path) = std::env::var_os(FONT_PATH_ENV).map(PathBuf::from) {
        if let Some(bytes) = read_font(&path) {
            return Some(bytes);
        }
        warn!(path = %path.display(), "{FONT_PATH_ENV} does not point to a readable font");
    }
    FontClass::of(family)
        .candidates()
        .iter()
        .map(Path::new)
        .filter(|p| p.exists())
        .find_map(read_font)
}

/// Makes `family` usable for plotters text. Returns the font when text can be drawn.
pub fn ensure_font(family: &str) -> Option<&'static LoadedFont> {
    let registry = REGISTERED.get_or_init(|| Mutex::new(HashMap::new()));
    let mut registry = match registry.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(entry) = registry.get(family) {
        return *entry;
    }

    let font = find_font_bytes(family).and_then(|bytes| {
        match register_font(family, FontStyle::Normal, bytes) {
            // Parsed once per family, like the bytes.
            Ok(()) => Some(&*Box::leak(Box::new(LoadedFont::new(bytes)))),
            Err(_) => {
                warn!(family, "font data could not be parsed");
                None
            }
        }
    });
    if font.is_none() {
        warn!(
            family,
            "no font found for family; text will be omitted (set {FONT_PATH_ENV} to a TTF file)"
        );
    }
    registry.insert(family.to_string(), font);
    font
}

/// Text width in pixels at `font_px`, measured with the font when available.
pub fn measure_text_width(text: &str, font_px: f64, font: Option<&LoadedFont>) -> f64 {
    let measured = font
        .and_then(|loaded| loaded.metrics.as_ref())
        .map(|font| {
            let scale = rusttype::Scale::uniform(font_px as f32);
            text.chars()
                .map(|ch| font.glyph(ch).scaled(scale).h_metrics().advance_width as f64)
                .sum::<f64>()
        });
    measured.unwrap_or_else(|| text.chars().count() as f64 * font_px * CHAR_WIDTH_RATIO)
}
