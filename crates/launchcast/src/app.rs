use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use jiff::Timestamp;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::components::{
    Component, EventResult, forecast_table::ForecastTable, parameters_panel::ParametersPanel,
    revenue_chart::RevenueChart, status_bar::StatusBar,
};
use crate::remote::{LogResponse, RemoteLogWorker, RunSink, SheetsClient, build_row};
use crate::state::AppState;

/// How long to wait for input before polling the log worker again
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    state: AppState,
    parameters_panel: ParametersPanel,
    forecast_table: ForecastTable,
    revenue_chart: RevenueChart,
    status_bar: StatusBar,
    /// Started on the first logged run
    worker: Option<RemoteLogWorker>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            parameters_panel: ParametersPanel::new(),
            forecast_table: ForecastTable::new(),
            revenue_chart: RevenueChart::new(),
            status_bar: StatusBar::new(),
            worker: None,
        }
    }

    /// Log runs to `sink` instead of the configured spreadsheet
    pub fn with_sink(state: AppState, sink: Box<dyn RunSink>) -> Self {
        let mut app = Self::new(state);
        app.worker = Some(RemoteLogWorker::new(sink));
        app
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// runs the application's main loop until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        while !self.state.exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
            self.poll_worker();
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Content
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(48), Constraint::Min(0)])
            .split(rows[0]);

        let views = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        self.parameters_panel.render(frame, columns[0], &self.state);
        self.revenue_chart.render(frame, views[0], &self.state);
        self.forecast_table.render(frame, views[1], &self.state);
        self.status_bar.render(frame, rows[1], &self.state);
    }

    fn handle_events(&mut self) -> std::io::Result<()> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(());
        }
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            _ => {}
        };
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        // Global key bindings
        match key_event.code {
            KeyCode::Char('q') if key_event.modifiers.is_empty() => {
                self.state.exit = true;
                return;
            }
            KeyCode::Char('c') if ctrl => {
                self.state.exit = true;
                return;
            }
            KeyCode::Char('s') => {
                self.save_scenario();
                return;
            }
            KeyCode::Char('e') => {
                self.export_csv();
                return;
            }
            KeyCode::Char('R') => {
                self.state.reset_all();
                return;
            }
            KeyCode::Char('L') => {
                self.log_run();
                return;
            }
            KeyCode::Esc => {
                self.state.clear_status();
                return;
            }
            _ => {}
        }

        let result = match self.parameters_panel.handle_key(key_event, &mut self.state) {
            EventResult::NotHandled => self.forecast_table.handle_key(key_event, &mut self.state),
            other => other,
        };

        if result == EventResult::Exit {
            self.state.exit = true
        }
    }

    fn save_scenario(&mut self) {
        match self.state.save_scenario() {
            Ok(path) => self.state.set_info(format!("Saved {}", path.display())),
            Err(e) => self.state.set_error(format!("Failed to save: {}", e)),
        }
    }

    fn export_csv(&mut self) {
        match self.state.export_csv() {
            Ok(path) => self.state.set_info(format!("Exported {}", path.display())),
            Err(e) => self.state.set_error(format!("Failed to export: {}", e)),
        }
    }

    // =========================================================================
    // Remote logging
    // =========================================================================

    fn log_run(&mut self) {
        let Some(record) = &self.state.record else {
            self.state.set_warning("Nothing to log".to_string());
            return;
        };
        let config = &self.state.config.remote_log;

        let row = match build_row(record, &self.state.context, config, Timestamp::now()) {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!(error = %e, "Run not logged");
                self.state.set_warning(format!("Run not logged: {e}"));
                return;
            }
        };

        if self.worker.is_none() {
            match SheetsClient::from_env(config) {
                Ok(client) => self.worker = Some(RemoteLogWorker::new(Box::new(client))),
                Err(e) => {
                    tracing::warn!(error = %e, "Run not logged");
                    self.state.set_warning(format!("Run not logged: {e}"));
                    return;
                }
            }
        }

        if let Some(worker) = &self.worker
            && worker.send(row)
        {
            self.state.log_pending = true;
            self.state.set_info("Logging run...".to_string());
        } else {
            self.state.set_warning("Run not logged: log worker stopped".to_string());
        }
    }

    fn poll_worker(&mut self) {
        let Some(worker) = &self.worker else {
            return;
        };
        while let Some(response) = worker.try_recv() {
            self.state.log_pending = false;
            match response {
                LogResponse::Logged => self.state.set_info("Run logged".to_string()),
                LogResponse::Failed(e) => self.state.set_warning(format!("Run not logged: {e}")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::config::AppConfig;
    use crate::data::storage::DataDirectory;
    use crate::remote::{ExternalServiceError, RunContext, RunLogRow};
    use crate::state::StatusKind;
    use launchcast_core::ScenarioAssumptions;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;
    use tempfile::tempdir;

    struct SharedSink(Arc<Mutex<Vec<RunLogRow>>>);

    impl RunSink for SharedSink {
        fn append(&self, row: &RunLogRow) -> Result<(), ExternalServiceError> {
            self.0.lock().unwrap().push(row.clone());
            Ok(())
        }
    }

    fn state_in(dir: &std::path::Path) -> AppState {
        let mut config = AppConfig::default();
        config.remote_log.timezone = "UTC".to_string();
        AppState::new(
            DataDirectory::new(dir.to_path_buf()),
            config,
            ScenarioAssumptions::default(),
            RunContext {
                submitter: Some("Tester".to_string()),
                ..Default::default()
            },
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let dir = tempdir().unwrap();
        let mut app = App::new(state_in(dir.path()));
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(app.state().exit);

        let mut app = App::new(state_in(dir.path()));
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.state().exit);
    }

    #[test]
    fn test_edit_then_export() {
        let dir = tempdir().unwrap();
        let mut app = App::new(state_in(dir.path()));

        app.handle_key_event(key(KeyCode::Char('l')));
        assert_eq!(app.state().assumptions.launch_year, 2028);

        app.handle_key_event(key(KeyCode::Char('e')));
        let status = app.state().status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Info);

        let csv = std::fs::read_to_string(
            dir.path().join("exports").join("ianalumab_model.csv"),
        )
        .unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("2028,"));
    }

    #[test]
    fn test_log_key_sends_row() {
        let dir = tempdir().unwrap();
        let rows = Arc::new(Mutex::new(Vec::new()));
        let mut app = App::with_sink(state_in(dir.path()), Box::new(SharedSink(rows.clone())));

        app.handle_key_event(key(KeyCode::Char('L')));
        assert!(app.state().log_pending);

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.state().log_pending {
            assert!(Instant::now() < deadline, "log worker did not respond");
            std::thread::sleep(Duration::from_millis(5));
            app.poll_worker();
        }

        assert_eq!(app.state().status.as_ref().unwrap().text, "Run logged");
        let rows = rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells()[2], "Tester");
        assert_eq!(rows[0].cells()[17], "2029");
    }

    #[test]
    fn test_esc_clears_status() {
        let dir = tempdir().unwrap();
        let mut app = App::new(state_in(dir.path()));
        app.handle_key_event(key(KeyCode::Char('R')));
        assert!(app.state().status.is_some());

        app.handle_key_event(key(KeyCode::Esc));
        assert!(app.state().status.is_none());
    }
}
