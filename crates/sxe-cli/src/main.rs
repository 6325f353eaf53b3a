use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::BoolishValueParser;
use clap::Parser;
use sxe_search::{
    load_config, run_search, write_report, SearchConfig, SearchOutcome, SearchPlan, SearchReport,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit status when a worker thread could not be started.
const EXIT_SPAWN_FAILURE: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "sxe-solve",
    about = "Exhaustively searches the extreme values of the simplex noise kernel"
)]
struct Cli {
    /// YAML search configuration; positional values override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the final report as JSON to this path.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Override the kernel falloff exponent.
    #[arg(long)]
    falloff_exponent: Option<i32>,
    /// Print the search size and worker ranges, then exit.
    #[arg(long)]
    plan_only: bool,
    /// Report every gradient assignment, not only improvements.
    #[arg(value_parser = BoolishValueParser::new())]
    show_every: Option<bool>,
    /// Worker threads; 0 or less uses every core.
    #[arg(allow_negative_numbers = true)]
    threads: Option<i64>,
    /// Simplex dimension, at least 2.
    #[arg(allow_negative_numbers = true)]
    dimensions: Option<i64>,
    /// Coarse sample density, at least 1.
    #[arg(allow_negative_numbers = true)]
    points: Option<i64>,
    /// Refinement sample density, at least 1.
    #[arg(allow_negative_numbers = true)]
    points_large: Option<i64>,
}

impl Cli {
    /// Layers positional values over the base configuration.
    fn search_config(&self, base: SearchConfig) -> SearchConfig {
        let mut config = base;
        if let Some(show_every) = self.show_every {
            config.show_every = show_every;
        }
        if let Some(threads) = self.threads {
            config.threads = threads.max(0) as usize;
        }
        if let Some(dimensions) = self.dimensions {
            config.dimensions = dimensions.max(0) as usize;
        }
        if let Some(points) = self.points {
            config.points = points.max(0) as u64;
        }
        if let Some(points_large) = self.points_large {
            config.points_large = points_large.max(0) as u64;
        }
        if self.falloff_exponent.is_some() {
            config.falloff_exponent = self.falloff_exponent;
        }
        config.normalized()
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(Some(outcome)) if outcome.spawn_failures > 0 => {
            error!(
                failures = outcome.spawn_failures,
                "some workers could not be launched; their ranges ran inline"
            );
            ExitCode::from(EXIT_SPAWN_FAILURE)
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Option<SearchOutcome>, Box<dyn Error>> {
    let base = match &cli.config {
        Some(path) => load_config(path)?,
        None => SearchConfig::default(),
    };
    let config = cli.search_config(base);

    if cli.plan_only {
        let plan = SearchPlan::new(&config)?;
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(None);
    }

    let outcome = run_search(&config)?;
    info!(
        min = outcome.minimum,
        max = outcome.maximum,
        largest = outcome.largest,
        normalization = outcome.normalization(),
        iterations = outcome.iterations_completed,
        updates = outcome.updates,
        elapsed_seconds = outcome.elapsed_seconds,
        "search complete"
    );
    if let Some(path) = &cli.report {
        let report = SearchReport::from_outcome(&config, outcome.clone())?;
        write_report(path, &report)?;
        info!(path = %path.display(), "report written");
    }
    Ok(Some(outcome))
}
