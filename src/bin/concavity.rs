//! Command-line front end for sampling a function and reading its
//! derivatives, concavity and inflection points.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use concavity::analysis::{
    ConcavityInterval, DEFAULT_TOLERANCE, InflectionPoint, SlopeExtremum,
};
use concavity::{CatalogKey, Derivatives, FunctionSelection, PlotConfig, compute};

#[derive(Parser)]
#[command(name = "concavity")]
#[command(about = "Sample a function and estimate its first and second derivatives")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog functions
    List,
    /// Print x, f, f' and f'' for every sample
    Compute {
        #[command(flatten)]
        params: ParameterArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },
    /// Report concavity intervals and inflection points
    Inflections {
        #[command(flatten)]
        params: ParameterArgs,
        /// |f''| at or below this counts as zero
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,
        /// Emit JSON instead of a text report
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ParameterArgs {
    /// Catalog function to sample
    #[arg(short, long, conflicts_with = "expr")]
    function: Option<CatalogKey>,
    /// Free-form expression in x, e.g. "x^3 - 3*x"
    #[arg(short, long)]
    expr: Option<String>,
    /// Left edge of the domain
    #[arg(long, allow_negative_numbers = true)]
    x_min: Option<f64>,
    /// Right edge of the domain
    #[arg(long, allow_negative_numbers = true)]
    x_max: Option<f64>,
    /// Number of sample points
    #[arg(short = 'n', long)]
    samples: Option<usize>,
    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Serialize)]
struct Report {
    function: String,
    intervals: Vec<ConcavityInterval>,
    inflection_points: Vec<InflectionPoint>,
    slope_extrema: Vec<SlopeExtremum>,
}

impl ParameterArgs {
    fn into_config(self) -> Result<PlotConfig> {
        let mut config = match &self.config {
            Some(path) => PlotConfig::load_unchecked(path)
                .with_context(|| format!("reading {}", path.display()))?,
            None => PlotConfig::default(),
        };

        if let Some(key) = self.function {
            config = config.with_function(key);
        }
        if let Some(text) = &self.expr {
            config = config.with_function(FunctionSelection::parse(text)?);
        }
        let x_min = self.x_min.unwrap_or(config.x_min);
        let x_max = self.x_max.unwrap_or(config.x_max);
        config = config.with_domain(x_min, x_max);
        if let Some(samples) = self.samples {
            config = config.with_sample_count(samples);
        }

        Ok(config.checked()?)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error evaluating function: {e:#}");
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match command {
        Commands::List => {
            for key in CatalogKey::ALL {
                writeln!(out, "{:<8} {}", key, key.display_name())?;
            }
        }
        Commands::Compute { params, format } => {
            let derivatives = compute(&params.into_config()?)?;
            match format {
                Format::Csv => write_csv(&mut out, &derivatives)?,
                Format::Json => {
                    serde_json::to_writer_pretty(&mut out, &derivatives)?;
                    writeln!(out)?;
                }
            }
        }
        Commands::Inflections {
            params,
            tolerance,
            json,
        } => {
            let config = params.into_config()?;
            let derivatives = compute(&config)?;
            let report = Report {
                function: config.function.to_string(),
                intervals: derivatives.concavity_intervals(tolerance),
                inflection_points: derivatives.inflection_points(tolerance),
                slope_extrema: derivatives.slope_extrema(tolerance),
            };
            if json {
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            } else {
                write_report(&mut out, &report)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, derivatives: &Derivatives) -> io::Result<()> {
    writeln!(out, "x,f,f_prime,f_double_prime")?;
    for (x, f, df, ddf) in derivatives.rows() {
        writeln!(out, "{},{},{},{}", x, f, df, ddf)?;
    }
    Ok(())
}

fn write_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    writeln!(out, "f(x) = {}", report.function)?;
    writeln!(out)?;

    for interval in &report.intervals {
        writeln!(
            out,
            "{:>6}  [{:.4}, {:.4}]",
            format!("{:?}", interval.concavity).to_lowercase(),
            interval.x_start,
            interval.x_end
        )?;
    }

    writeln!(out)?;
    if report.inflection_points.is_empty() {
        writeln!(out, "no inflection points")?;
    }
    for point in &report.inflection_points {
        writeln!(
            out,
            "inflection at x = {:.4}: f = {:.4}, f' = {:.4} ({:?})",
            point.x, point.f, point.f_prime, point.transition
        )?;
    }
    for extremum in &report.slope_extrema {
        writeln!(
            out,
            "f' has a local {:?} of {:.4} at x = {:.4}",
            extremum.kind, extremum.f_prime, extremum.x
        )?;
    }
    Ok(())
}
