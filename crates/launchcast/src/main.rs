use clap::Parser;
use jiff::Timestamp;
use launchcast::cli::{Args, Command, RunArgs};
use launchcast::data::config::AppConfig;
use launchcast::data::storage::{DataDirectory, StorageError};
use launchcast::remote::{RunContext, SheetsClient, log_run};
use launchcast::report::{render_json, render_report};
use launchcast::state::AppState;
use launchcast::{App, init_logging};
use launchcast_core::{ScenarioAssumptions, compute};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir();

    init_logging(&data_dir, &args.log_level)?;

    let storage = DataDirectory::new(data_dir);
    let (config, config_error) = storage.load_config_or_default();
    if let Some(e) = &config_error {
        eprintln!("Warning: ignoring config.yaml: {e}");
    }
    let context = args.context.to_context();
    let assumptions = args.overrides.apply(args.base_assumptions(&storage)?)?;

    match args.command.clone().unwrap_or(Command::Tui) {
        Command::Tui => run_tui(storage, config, assumptions, context, config_error),
        Command::Run(run) => run_headless(&run, &storage, &config, &assumptions, &context),
    }
}

fn run_tui(
    storage: DataDirectory,
    config: AppConfig,
    assumptions: ScenarioAssumptions,
    context: RunContext,
    config_error: Option<StorageError>,
) -> color_eyre::Result<()> {
    let mut state = AppState::new(storage, config, assumptions, context);
    if let Some(e) = config_error {
        state.set_warning(format!("Ignoring config.yaml: {e}"));
    }
    let mut app = App::new(state);

    ratatui::run(|terminal| app.run(terminal))?;

    tracing::info!("Application shutting down");

    if let Err(err) = ratatui::try_restore() {
        tracing::error!("Failed to restore terminal: {err}");
    }

    Ok(())
}

fn run_headless(
    run: &RunArgs,
    storage: &DataDirectory,
    config: &AppConfig,
    assumptions: &ScenarioAssumptions,
    context: &RunContext,
) -> color_eyre::Result<()> {
    let record = compute(assumptions)?;
    tracing::info!(
        launch_year = assumptions.launch_year,
        ramp_years = assumptions.ramp_years,
        break_even = ?record.break_even_year,
        "Computed forecast"
    );

    if run.json {
        println!("{}", render_json(&record)?);
    } else {
        print!("{}", render_report(&record));
    }

    if let Some(dir) = &run.csv {
        let path = storage.export_csv(&record, dir.as_deref())?;
        tracing::info!(path = %path.display(), "Exported CSV");
        eprintln!("Exported {}", path.display());
    }

    // Logging failures never change the exit status
    if run.log_run {
        let remote = &config.remote_log;
        let result = SheetsClient::from_env(remote)
            .and_then(|client| log_run(&client, &record, context, remote, Timestamp::now()));
        match result {
            Ok(()) => {
                tracing::info!("Run logged");
                eprintln!("Run logged");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Run not logged");
                eprintln!("Warning: run not logged: {e}");
            }
        }
    }

    Ok(())
}
