use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use shelf_tour::format::TourResult;
use shelf_tour::logging::{init_logger, LogFormat};
use shelf_tour::pipeline::{self, PipelineConfig};
use shelf_tour::projection::PcaProjection;
use shelf_tour::sa::CoolingSchedule;
use shelf_tour::store::{JsonStore, SqliteStore, VectorStore};
use shelf_tour::tour::TourConfig;
use shelf_tour::Error;

#[derive(Debug, Parser)]
#[command(name = "shelf-tour", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Bookshelf SQLite database to read embeddings from
    #[arg(long, global = true, default_value = "bookshelf.db")]
    db: PathBuf,

    /// Read items from a JSON array of {id, label, vector} instead of the database
    #[arg(long, global = true)]
    json: Option<PathBuf>,

    /// Wall-clock budget for the whole solve, in seconds
    #[arg(long, global = true, default_value_t = 60.0)]
    time_budget: f64,

    /// Seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Independent annealing runs; the shortest tour wins
    #[arg(long, global = true, default_value_t = 1)]
    restarts: usize,

    /// How the annealing temperature falls
    #[arg(long, global = true, value_enum, default_value_t = Cooling::Geometric)]
    cooling: Cooling,

    /// Geometric cooling factor
    #[arg(long, global = true, default_value_t = 0.95)]
    alpha: f64,

    /// Score the tour as a closed cycle instead of an open path
    #[arg(long, global = true)]
    no_suppress_return: bool,

    /// Directory for tour artifacts
    #[arg(long, global = true, default_value = ".")]
    out_dir: PathBuf,

    /// Print the result as JSON
    #[arg(long, global = true, value_enum, default_value_t = Output::Text)]
    output: Output,

    #[arg(long, global = true, value_enum, default_value_t = Level::Info)]
    log_level: Level,

    #[arg(long, global = true, value_enum, default_value_t = Style::Compact)]
    log_format: Style,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Tour the items in their native embedding space
    ///
    /// Distances are measured between the full embedding vectors. The
    /// ordered list is printed and written to `<timestamp>_tour.txt`.
    Full,
    /// Tour the items over a 2D projection of their embeddings
    ///
    /// Embeddings are projected onto their top two principal components and
    /// distances are measured between the projected points. The tour is
    /// drawn over the scatter and written to `<timestamp>_tour.svg`.
    Visual,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Cooling {
    Geometric,
    Linear,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Level {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Off => LevelFilter::Off,
            Level::Error => LevelFilter::Error,
            Level::Warn => LevelFilter::Warn,
            Level::Info => LevelFilter::Info,
            Level::Debug => LevelFilter::Debug,
            Level::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Style {
    Compact,
    Pretty,
}

impl Cli {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let budget = Duration::try_from_secs_f64(self.time_budget).with_context(|| {
            format!("--time-budget {} is not a usable number of seconds", self.time_budget)
        })?;
        let cooling = match self.cooling {
            Cooling::Geometric => CoolingSchedule::Geometric { alpha: self.alpha },
            Cooling::Linear => CoolingSchedule::Linear,
        };

        let mut tour = TourConfig::default()
            .with_time_budget(budget)
            .with_cooling(cooling)
            .with_restarts(self.restarts);
        if let Some(seed) = self.seed {
            tour = tour.with_seed(seed);
        }
        tour.validate().context("invalid tour settings")?;

        Ok(PipelineConfig {
            tour,
            suppress_return: !self.no_suppress_return,
            out_dir: self.out_dir.clone(),
        })
    }

    fn open_store(&self) -> Result<Box<dyn VectorStore>> {
        match &self.json {
            Some(path) => Ok(Box::new(JsonStore::new(path))),
            None => {
                let store = SqliteStore::open(&self.db)
                    .with_context(|| format!("failed to open {}", self.db.display()))?;
                Ok(Box::new(store))
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let style = match cli.log_format {
        Style::Compact => LogFormat::Compact,
        Style::Pretty => LogFormat::Pretty,
    };
    init_logger(cli.log_level.into(), style)?;

    let config = cli.pipeline_config()?;
    let store = cli.open_store()?;

    let result = match cli.command {
        Commands::Full => pipeline::full_space_tour(&*store, &config),
        Commands::Visual => pipeline::visual_tour(&*store, &PcaProjection, &config),
    };

    let result = match result {
        Ok(result) => result,
        Err(Error::NotFound(msg)) => anyhow::bail!("{msg}"),
        Err(e) => return Err(e).context("tour planning failed"),
    };

    print_result(&result, cli.output)
}

fn print_result(result: &TourResult, output: Output) -> Result<()> {
    match output {
        Output::Text => {
            for line in result.numbered() {
                println!("{line}");
            }
            println!("total length: {:.4}", result.total_length);
            if let Some(path) = &result.artifact {
                println!("saved to {}", path.display());
            }
        }
        Output::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shelf-tour").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_map_onto_tour_config() {
        let config = parse(&["full"]).pipeline_config().unwrap();
        assert_eq!(config.tour.time_budget, Duration::from_secs(60));
        assert_eq!(config.tour.cooling, CoolingSchedule::Geometric { alpha: 0.95 });
        assert!(config.suppress_return);
    }

    #[test]
    fn test_huge_or_negative_budget_is_rejected() {
        for budget in ["1e20", "-1", "NaN", "inf"] {
            let flag = format!("--time-budget={budget}");
            let cli = parse(&["full", &flag]);
            assert!(cli.pipeline_config().is_err(), "budget {budget}");
        }
    }

    #[test]
    fn test_fractional_budget_and_linear_cooling() {
        let cli = parse(&[
            "visual",
            "--time-budget",
            "0.25",
            "--cooling",
            "linear",
            "--no-suppress-return",
        ]);
        let config = cli.pipeline_config().unwrap();
        assert_eq!(config.tour.time_budget, Duration::from_millis(250));
        assert_eq!(config.tour.cooling, CoolingSchedule::Linear);
        assert!(!config.suppress_return);
        assert!(matches!(cli.command, Commands::Visual));
    }
}
