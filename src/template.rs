// src/template.rs

use std::fmt;
use std::str::FromStr;

use crate::constants::{TEMPLATE_OE, TEMPLATE_OL, TEMPLATE_PPT, TEMPLATE_PPT_BIG, TEMPLATE_PPT_TWO};
use crate::error::FigureError;

/// Named figure preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Template {
    /// Full slide.
    #[default]
    Ppt,
    /// Half slide, two figures side by side.
    PptTwo,
    /// Large slide figure.
    PptBig,
    /// Single-column journal figure.
    Ol,
    /// Double-column journal figure.
    Oe,
}

/// Dimensions and fonts a template resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSpec {
    pub width_cm: f64,
    pub height_cm: f64,
    pub font_family: String,
    pub font_size: f64,
    pub line_width: f64,
}

impl Template {
    pub const ALL: [Template; 5] = [
        Template::Ppt,
        Template::PptTwo,
        Template::PptBig,
        Template::Ol,
        Template::Oe,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Template::Ppt => "PPT",
            Template::PptTwo => "PPTTwo",
            Template::PptBig => "PPTBig",
            Template::Ol => "OL",
            Template::Oe => "OE",
        }
    }

    pub fn spec(self) -> TemplateSpec {
        let (width_cm, height_cm, family, font_size, line_width) = match self {
            Template::Ppt => TEMPLATE_PPT,
            Template::PptTwo => TEMPLATE_PPT_TWO,
            Template::PptBig => TEMPLATE_PPT_BIG,
            Template::Ol => TEMPLATE_OL,
            Template::Oe => TEMPLATE_OE,
        };
        TemplateSpec {
            width_cm,
            height_cm,
            font_family: family.to_string(),
            font_size,
            line_width,
        }
    }
}

impl FromStr for Template {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FigureError::UnknownTemplate(s.to_string()))
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("ppt".parse::<Template>().unwrap(), Template::Ppt);
        assert_eq!("PPTtwo".parse::<Template>().unwrap(), Template::PptTwo);
        assert_eq!("pptBIG".parse::<Template>().unwrap(), Template::PptBig);
        assert_eq!("ol".parse::<Template>().unwrap(), Template::Ol);
        assert_eq!("Oe".parse::<Template>().unwrap(), Template::Oe);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "poster".parse::<Template>().unwrap_err();
        assert!(matches!(err, FigureError::UnknownTemplate(ref n) if n == "poster"));
    }

    #[test]
    fn presets_match_documented_values() {
        let ol = Template::Ol.spec();
        assert_eq!((ol.width_cm, ol.height_cm), (8.0, 6.0));
        assert_eq!(ol.font_family, "serif");
        assert_eq!((ol.font_size, ol.line_width), (9.0, 1.0));

        let big = Template::PptBig.spec();
        assert_eq!((big.width_cm, big.height_cm), (20.0, 15.0));
        assert_eq!(big.font_family, "sans-serif");
        assert_eq!(big.line_width, 3.0);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for t in Template::ALL {
            assert_eq!(t.to_string().parse::<Template>().unwrap(), t);
        }
    }
}
