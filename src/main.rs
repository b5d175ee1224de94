// src/main.rs

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use csv::ReaderBuilder;
use ndarray::Array2;
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fig_session::{FigureOptions, FigureSession, SaveArg, Template};

#[derive(Parser, Debug)]
#[command(name = "fig_session", version = fig_session::crate_version(), about = "Render template-styled figures")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the 3x2 demo figure (random lines and a random mesh)
    Demo {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Plot every column of a CSV file against its first column
    Csv {
        /// Input CSV file with a header row
        input: PathBuf,

        /// Figure title (defaults to the file stem)
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Template: PPT, PPTTwo, PPTBig, OL or OE
    #[arg(short, long, default_value = "OE")]
    template: String,

    /// Output file; its extension selects the primary format
    #[arg(short, long, default_value = "fig_test.png")]
    output: String,

    /// Resolution for bitmap formats
    #[arg(long)]
    dpi: Option<u32>,

    /// Additional output format (repeatable)
    #[arg(short, long = "format")]
    formats: Vec<String>,

    /// Open the first written file in the system viewer
    #[arg(long)]
    show: bool,
}

impl OutputArgs {
    fn options(&self, geometry: (usize, usize)) -> Result<FigureOptions, Box<dyn Error>> {
        Ok(FigureOptions {
            template: self.template.parse::<Template>()?,
            geometry,
            show_on_save: self.show,
            ..FigureOptions::default()
        })
    }

    fn save_args(&self) -> Vec<SaveArg> {
        self.dpi
            .map(SaveArg::Dpi)
            .into_iter()
            .chain(self.formats.iter().map(|f| SaveArg::format(f.as_str())))
            .collect()
    }

    fn save(&self, fig: &mut FigureSession) -> Result<(), Box<dyn Error>> {
        for path in fig.save(&self.output, &self.save_args())? {
            println!("Figure saved as '{}'.", path.display());
        }
        Ok(())
    }
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..n)
            .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

fn run_demo(output: &OutputArgs) -> Result<(), Box<dyn Error>> {
    let mut rng = rand::thread_rng();
    let mut fig = FigureSession::new(output.options((3, 2))?)?;

    fig.next_subplot();
    let x = linspace(0.0, 2.0, 10);
    let y = Array2::from_shape_fn((10, 3), |_| rng.gen::<f64>());
    fig.plot_columns(&x, &y)?;
    fig.set_xlim(None)?;
    fig.title("Random numbers");
    fig.xlabel("Test");

    fig.select_subplot(Some(4));
    fig.pcolor(&Array2::from_shape_fn((10, 10), |_| rng.gen::<f64>()))?;
    fig.ylabel("Numbers");

    output.save(&mut fig)
}

/// Reads the header and columns of a CSV file. Cells that do not parse become NaN.
fn read_columns(input: &Path) -> fig_session::Result<(Vec<String>, Vec<Vec<f64>>)> {
    let file = File::open(input)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut columns = vec![Vec::new(); headers.len()];

    for (row_index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(row = row_index + 2, %err, "skipping malformed row");
                continue;
            }
        };
        for (column, cell) in columns.iter_mut().zip(record.iter().chain(std::iter::repeat(""))) {
            column.push(cell.parse::<f64>().unwrap_or(f64::NAN));
        }
    }
    Ok((headers, columns))
}

fn run_csv(input: &Path, title: Option<&str>, output: &OutputArgs) -> Result<(), Box<dyn Error>> {
    let (headers, columns) = read_columns(input)?;
    if columns.len() < 2 {
        return Err(format!(
            "'{}' needs at least two columns (x and one series)",
            input.display()
        )
        .into());
    }
    info!(columns = headers.len(), rows = columns[0].len(), "read csv");

    let mut fig = FigureSession::new(output.options((1, 1))?)?;
    for column in &columns[1..] {
        fig.plot(&columns[0], column)?;
    }
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    fig.title(title.map(str::to_string).unwrap_or(stem));
    fig.xlabel(headers[0].as_str());
    if headers.len() == 2 {
        fig.ylabel(headers[1].as_str());
    }
    output.save(&mut fig)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Demo { output } => run_demo(output),
        Command::Csv {
            input,
            title,
            output,
        } => run_csv(input, title.as_deref(), output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        assert_eq!(linspace(0.0, 2.0, 5), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(linspace(1.0, 3.0, 1), vec![1.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn save_args_put_dpi_first() {
        let args = OutputArgs {
            template: "OE".into(),
            output: "a.png".into(),
            dpi: Some(600),
            formats: vec!["pdf".into()],
            show: false,
        };
        assert_eq!(
            args.save_args(),
            vec![SaveArg::Dpi(600), SaveArg::format("pdf")]
        );
    }
}
