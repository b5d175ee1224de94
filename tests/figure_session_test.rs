// tests/figure_session_test.rs

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fig_session::{
    FigureError, FigureOptions, FigureSession, LineStyle, Result, SaveArg, SaveOptions, Template,
    Viewer,
};
use ndarray::Array2;
use tempfile::tempdir;

fn session(template: Template, geometry: (usize, usize)) -> FigureSession {
    FigureSession::new(FigureOptions {
        template,
        geometry,
        show_on_save: false,
        ..FigureOptions::default()
    })
    .expect("valid options")
}

fn path_str(path: &Path) -> String {
    path.to_str().expect("utf-8 temp path").to_string()
}

#[derive(Debug, Default, Clone)]
struct RecordingViewer {
    shown: Rc<RefCell<Vec<PathBuf>>>,
}

impl Viewer for RecordingViewer {
    fn show(&self, files: &[PathBuf]) -> Result<()> {
        self.shown.borrow_mut().extend_from_slice(files);
        Ok(())
    }
}

#[test]
fn templates_resolve_to_documented_defaults() {
    let expected = [
        ("ppt", (15.0, 10.0), "sans-serif", 12.0, 2.0),
        ("PPTTWO", (10.0, 8.0), "sans-serif", 12.0, 2.0),
        ("PptBig", (20.0, 15.0), "sans-serif", 12.0, 3.0),
        ("ol", (8.0, 6.0), "serif", 9.0, 1.0),
        ("OE", (12.0, 8.0), "serif", 10.0, 1.0),
    ];
    for (name, size, family, font_size, line_width) in expected {
        let fig = FigureSession::with_template(name, (1, 1)).unwrap();
        assert_eq!(fig.size_cm(), size, "{name}");
        assert_eq!(fig.style().font_family, family, "{name}");
        assert_eq!(fig.style().font_size, font_size, "{name}");
        assert_eq!(fig.style().line_width, line_width, "{name}");
        assert_eq!(fig.current_index(), 0);
    }
}

#[test]
fn unknown_template_fails_fast() {
    let err = FigureSession::with_template("A4", (1, 1)).unwrap_err();
    assert!(matches!(err, FigureError::UnknownTemplate(_)));
}

#[test]
fn single_subplot_is_always_current() {
    let mut fig = session(Template::Ppt, (1, 1));
    for k in [-5, 0, 1, 7] {
        fig.select_subplot(Some(k));
        assert_eq!(fig.current_index(), 0);
        assert_eq!(fig.axis_current().position(), (0, 0));
    }
    fig.next_subplot();
    assert_eq!(fig.axis_current().position(), (0, 0));
}

#[test]
fn grid_addresses_row_major() {
    let mut fig = session(Template::Oe, (3, 2));
    assert_eq!(fig.subplot_count(), 6);
    for i in 0..6 {
        fig.select_subplot(Some(i));
        assert_eq!(fig.axis_current().position(), (i as usize / 2, i as usize % 2));
    }
}

#[test]
fn one_dimensional_grids_address_flat_positions() {
    let mut row = session(Template::Ppt, (1, 4));
    let mut col = session(Template::Ppt, (4, 1));
    for i in 0..4 {
        row.select_subplot(Some(i));
        col.select_subplot(Some(i));
        assert_eq!(row.axis_current().position(), (0, i as usize));
        assert_eq!(col.axis_current().position(), (i as usize, 0));
    }
}

#[test]
fn cursor_wraps_modulo_subplot_count() {
    let mut fig = session(Template::Ppt, (2, 3));
    for step in 1..=12 {
        assert_eq!(fig.select_subplot(None), step % 6);
    }
    assert_eq!(fig.select_subplot(Some(6)), 0);
    assert_eq!(fig.select_subplot(Some(-1)), 5);
    assert_eq!(fig.select_subplot(Some(-13)), 5);
    assert_eq!(fig.select_subplot(Some(1_000_003)), 1_000_003 % 6);
}

#[test]
fn auto_limits_equal_global_min_max_of_lines() {
    let mut fig = session(Template::Ppt, (1, 1));
    fig.plot(&[0.5, 1.5, 3.0], &[10.0, -2.0, 4.0]).unwrap();
    fig.plot(&[-1.0, 2.0], &[0.0, 11.0]).unwrap();
    assert_eq!(fig.set_xlim(None).unwrap(), (-1.0, 3.0));
    assert_eq!(fig.set_ylim(None).unwrap(), (-2.0, 11.0));
}

#[test]
fn second_line_on_subplot_is_dashed_after_four_colors() {
    let mut fig = session(Template::Ppt, (1, 1));
    for _ in 0..5 {
        fig.plot(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
    }
    let lines = &fig.axis_current().lines;
    assert_eq!(lines[3].line_style, LineStyle::Solid);
    assert_eq!(lines[4].line_style, LineStyle::Dashed);
    assert_eq!(lines[4].color, lines[0].color);
}

#[test]
fn save_png_writes_one_file_at_300_dpi() {
    let dir = tempdir().unwrap();
    let mut fig = session(Template::Ppt, (1, 1));
    fig.plot(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.5]).unwrap();

    let written = fig.save(&path_str(&dir.path().join("a.png")), &[]).unwrap();
    assert_eq!(written, vec![dir.path().join("a.png")]);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

    // 15 x 10 cm at 300 DPI.
    let (w, h) = image::image_dimensions(&written[0]).unwrap();
    assert_eq!((w, h), (1772, 1181));
}

#[test]
fn save_with_dpi_and_pdf_writes_both() {
    let dir = tempdir().unwrap();
    let mut fig = session(Template::Ol, (2, 2));
    fig.plot(&[0.0, 1.0], &[1.0, 2.0]).unwrap();
    fig.select_subplot(Some(3));
    fig.pcolor(&Array2::from_shape_fn((4, 5), |(r, c)| (r * c) as f64))
        .unwrap();

    let target = path_str(&dir.path().join("a.png"));
    let written = fig
        .save(&target, &[SaveArg::Dpi(600), SaveArg::format("pdf")])
        .unwrap();
    assert_eq!(
        written,
        vec![dir.path().join("a.png"), dir.path().join("a.pdf")]
    );

    // 8 x 6 cm at 600 DPI.
    let (w, h) = image::image_dimensions(&written[0]).unwrap();
    assert_eq!((w, h), (1890, 1417));

    let pdf = std::fs::read(&written[1]).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn only_last_dot_separates_extension() {
    let dir = tempdir().unwrap();
    let mut fig = session(Template::Ol, (1, 1));
    let written = fig
        .save(&path_str(&dir.path().join("a.b.png")), &[SaveArg::Dpi(50)])
        .unwrap();
    assert_eq!(written, vec![dir.path().join("a.b.png")]);
    assert!(dir.path().join("a.b.png").exists());
}

#[test]
fn dpi_option_overrides_positional_dpi() {
    let dir = tempdir().unwrap();
    let mut fig = session(Template::Ol, (1, 1));
    let options = SaveOptions {
        dpi: Some(100),
        ..SaveOptions::default()
    };
    let written = fig
        .save_with(
            &path_str(&dir.path().join("fig.png")),
            &[SaveArg::Dpi(600)],
            &options,
        )
        .unwrap();
    let (w, _) = image::image_dimensions(&written[0]).unwrap();
    assert_eq!(w, 315);
}

#[test]
fn unsupported_format_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut fig = session(Template::Ppt, (1, 1));
    let err = fig
        .save(
            &path_str(&dir.path().join("a.png")),
            &[SaveArg::format("eps")],
        )
        .unwrap_err();
    assert!(matches!(err, FigureError::UnsupportedFormat(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn show_on_save_hands_files_to_viewer() {
    let dir = tempdir().unwrap();
    let viewer = RecordingViewer::default();
    let mut fig = FigureSession::new(FigureOptions {
        template: Template::Ol,
        ..FigureOptions::default()
    })
    .unwrap();
    assert!(fig.show_on_save());
    fig.set_viewer(viewer.clone());

    let written = fig
        .save(
            &path_str(&dir.path().join("shown.png")),
            &[SaveArg::Dpi(50), SaveArg::format("svg")],
        )
        .unwrap();
    assert_eq!(*viewer.shown.borrow(), written);

    viewer.shown.borrow_mut().clear();
    fig.set_show_on_save(false);
    fig.save(&path_str(&dir.path().join("quiet.png")), &[SaveArg::Dpi(50)])
        .unwrap();
    assert!(viewer.shown.borrow().is_empty());
}

#[test]
fn shared_axes_render() {
    let dir = tempdir().unwrap();
    let mut fig = FigureSession::new(FigureOptions {
        template: Template::PptTwo,
        geometry: (2, 2),
        share_x: true,
        share_y: true,
        show_on_save: false,
        ..FigureOptions::default()
    })
    .unwrap();
    fig.suptitle("Shared");
    for i in 0..4 {
        fig.select_subplot(Some(i));
        let x: Vec<f64> = (0..20).map(|k| k as f64 * 0.1).collect();
        let y: Vec<f64> = x.iter().map(|v| (v * (i + 1) as f64).sin()).collect();
        fig.plot(&x, &y).unwrap();
        fig.title(format!("subplot {i}"));
    }
    fig.set_ylim(Some((-1.0, 1.0))).unwrap();
    let written = fig
        .save(&path_str(&dir.path().join("shared.png")), &[SaveArg::Dpi(72)])
        .unwrap();
    assert!(written[0].exists());
}

#[test]
fn svg_output_is_written_alongside_bitmap() {
    let dir = tempdir().unwrap();
    let mut fig = session(Template::Oe, (1, 2));
    fig.plot(&[0.0, 1.0, 2.0], &[2.0, 1.0, 3.0]).unwrap();
    let written = fig
        .save(
            &path_str(&dir.path().join("both.png")),
            &[SaveArg::Dpi(72), SaveArg::format("svg")],
        )
        .unwrap();
    let svg = std::fs::read_to_string(&written[1]).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn file_name_that_is_only_an_extension_keeps_its_directory() {
    let dir = tempdir().unwrap();
    let mut fig = session(Template::Ol, (1, 1));
    let target = format!("{}/.png", path_str(dir.path()));
    let written = fig.save(&target, &[SaveArg::Dpi(50)]).unwrap();
    assert_eq!(written, vec![dir.path().join(".png")]);
    assert!(dir.path().join(".png").exists());
}
