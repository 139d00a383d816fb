//! Command-line arguments

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use launchcast_core::{ScenarioAssumptions, ScenarioBuilder, ScenarioError};

use crate::data::storage::{DataDirectory, StorageError, load_scenario_file};
use crate::remote::{Attribution, RunContext};

#[derive(Parser, Debug)]
#[command(name = "launchcast")]
#[command(about = "Revenue, profit and break-even forecast for a single product launch")]
pub struct Args {
    /// Path to the data directory (default: ~/.launchcast/)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// Start from this scenario file instead of the saved scenario
    #[arg(long, global = true)]
    pub scenario: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(flatten)]
    pub context: ContextArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Interactive terminal view (default)
    Tui,
    /// Compute once and print the forecast
    Run(RunArgs),
}

#[derive(ClapArgs, Debug, Clone, Default, PartialEq)]
pub struct RunArgs {
    /// Export CSV; without a directory it goes to the data directory
    #[arg(long, value_name = "DIR", num_args = 0..=1)]
    pub csv: Option<Option<PathBuf>>,

    /// Append this run to the configured spreadsheet
    #[arg(long)]
    pub log_run: bool,

    /// Print JSON instead of the text table
    #[arg(long)]
    pub json: bool,
}

/// Per-field assumption overrides
#[derive(ClapArgs, Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    #[arg(long, global = true)]
    pub launch_year: Option<i32>,
    #[arg(long, global = true)]
    pub ramp_years: Option<u32>,
    /// Peak annual sales in billions USD
    #[arg(long, global = true)]
    pub peak_sales: Option<f64>,
    /// Probability of success, 0.3 to 1.0
    #[arg(long, global = true)]
    pub pos: Option<f64>,
    /// linear, fast or slow
    #[arg(long, global = true)]
    pub ramp_shape: Option<String>,
    /// COGS as a fraction of revenue
    #[arg(long, global = true)]
    pub cogs: Option<f64>,
    /// SG&A as a fraction of gross profit
    #[arg(long, global = true)]
    pub sga: Option<f64>,
    #[arg(long, global = true)]
    pub prelaunch_years: Option<u32>,
    #[arg(long, global = true)]
    pub postlaunch_years: Option<u32>,
    /// Total investment in millions USD
    #[arg(long, global = true)]
    pub investment: Option<f64>,
}

impl Overrides {
    /// Apply the given overrides to `base`, enforcing the input ranges
    pub fn apply(&self, base: ScenarioAssumptions) -> Result<ScenarioAssumptions, ScenarioError> {
        let mut builder = ScenarioBuilder::from_assumptions(base).within_input_bounds();
        if let Some(year) = self.launch_year {
            builder = builder.launch_year(year);
        }
        if let Some(years) = self.ramp_years {
            builder = builder.ramp_years(years);
        }
        if let Some(peak) = self.peak_sales {
            builder = builder.peak_sales(peak);
        }
        if let Some(pos) = self.pos {
            builder = builder.probability_of_success(pos);
        }
        if let Some(shape) = &self.ramp_shape {
            builder = builder.ramp_shape_str(shape);
        }
        if let Some(cogs) = self.cogs {
            builder = builder.cogs(cogs);
        }
        if let Some(sga) = self.sga {
            builder = builder.sga(sga);
        }
        if let Some(years) = self.prelaunch_years {
            builder = builder.prelaunch_years(years);
        }
        if let Some(years) = self.postlaunch_years {
            builder = builder.postlaunch_years(years);
        }
        if let Some(total) = self.investment {
            builder = builder.total_investment(total);
        }
        builder.build()
    }
}

/// Who is running the model and where they came from
#[derive(ClapArgs, Debug, Clone, Default, PartialEq)]
pub struct ContextArgs {
    /// Submitter name recorded with logged runs
    #[arg(long, global = true)]
    pub name: Option<String>,
    #[arg(long, global = true)]
    pub profile_url: Option<String>,
    #[arg(long, global = true)]
    pub utm_source: Option<String>,
    #[arg(long, global = true)]
    pub utm_medium: Option<String>,
    #[arg(long, global = true)]
    pub utm_campaign: Option<String>,
    /// Link the run was opened from; its utm_* parameters fill unset tags
    #[arg(long, global = true)]
    pub link: Option<String>,
}

impl ContextArgs {
    pub fn to_context(&self) -> RunContext {
        let explicit = Attribution {
            source: self.utm_source.clone(),
            medium: self.utm_medium.clone(),
            campaign: self.utm_campaign.clone(),
        };
        let attribution = match &self.link {
            Some(link) => explicit.or(Attribution::from_query(link)),
            None => explicit,
        };
        RunContext {
            submitter: self.name.clone().filter(|n| !n.trim().is_empty()),
            profile_url: self.profile_url.clone(),
            attribution,
        }
    }
}

impl Args {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(DataDirectory::default_path)
    }

    /// Scenario file if given, else the saved scenario, else the defaults
    pub fn base_assumptions(
        &self,
        storage: &DataDirectory,
    ) -> Result<ScenarioAssumptions, StorageError> {
        match &self.scenario {
            Some(path) => load_scenario_file(path),
            None => Ok(storage.load_scenario()?.unwrap_or_default()),
        }
    }
}
