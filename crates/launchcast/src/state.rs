//! Interactive view state

use std::path::PathBuf;

use launchcast_core::{ParameterField, RunRecord, ScenarioAssumptions, compute};

use crate::data::config::AppConfig;
use crate::data::storage::{DataDirectory, StorageError};
use crate::remote::RunContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

pub struct AppState {
    pub assumptions: ScenarioAssumptions,
    /// Latest result; `None` only when the assumptions failed validation
    pub record: Option<RunRecord>,
    /// Index into [`ParameterField::ALL`]
    pub selected: usize,
    pub table_scroll: usize,
    pub status: Option<StatusMessage>,
    pub exit: bool,
    pub context: RunContext,
    pub config: AppConfig,
    pub storage: DataDirectory,
    /// A row is queued on the remote log worker
    pub log_pending: bool,
}

impl AppState {
    pub fn new(
        storage: DataDirectory,
        config: AppConfig,
        assumptions: ScenarioAssumptions,
        context: RunContext,
    ) -> Self {
        let mut state = Self {
            assumptions,
            record: None,
            selected: 0,
            table_scroll: 0,
            status: None,
            exit: false,
            context,
            config,
            storage,
            log_pending: false,
        };
        state.recompute();
        state
    }

    /// Re-run the forecast for the current assumptions
    pub fn recompute(&mut self) {
        match compute(&self.assumptions) {
            Ok(record) => {
                self.record = Some(record);
                let rows = self.record.as_ref().map_or(0, |r| r.yearly_results.len());
                self.table_scroll = self.table_scroll.min(rows.saturating_sub(1));
            }
            Err(e) => {
                self.record = None;
                self.set_error(e.to_string());
            }
        }
    }

    pub fn selected_field(&self) -> ParameterField {
        ParameterField::ALL[self.selected.min(ParameterField::ALL.len() - 1)]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % ParameterField::ALL.len();
    }

    pub fn select_prev(&mut self) {
        let len = ParameterField::ALL.len();
        self.selected = (self.selected + len - 1) % len;
    }

    /// Step the selected field and recompute
    pub fn adjust_selected(&mut self, steps: i32) {
        let field = self.selected_field();
        let next = field.adjust(&self.assumptions, steps);
        if next == self.assumptions {
            return;
        }
        self.assumptions = next;
        tracing::debug!(
            field = field.key(),
            value = %field.display(&self.assumptions),
            "Parameter changed"
        );
        self.recompute();
    }

    /// Restore the selected field to its default
    pub fn reset_selected(&mut self) {
        let defaults = ScenarioAssumptions::default();
        let field = self.selected_field();
        let mut next = self.assumptions;
        match field {
            ParameterField::LaunchYear => next.launch_year = defaults.launch_year,
            ParameterField::RampYears => next.ramp_years = defaults.ramp_years,
            ParameterField::PeakSales => next.peak_sales_billion = defaults.peak_sales_billion,
            ParameterField::ProbabilityOfSuccess => {
                next.probability_of_success = defaults.probability_of_success
            }
            ParameterField::RampShape => next.ramp_shape = defaults.ramp_shape,
            ParameterField::Cogs => next.cogs_fraction = defaults.cogs_fraction,
            ParameterField::Sga => next.sga_fraction = defaults.sga_fraction,
            ParameterField::PrelaunchYears => {
                next.prelaunch_investment_years = defaults.prelaunch_investment_years
            }
            ParameterField::PostlaunchYears => {
                next.postlaunch_investment_years = defaults.postlaunch_investment_years
            }
            ParameterField::TotalInvestment => {
                next.total_investment_millions = defaults.total_investment_millions
            }
        }
        self.assumptions = next;
        self.recompute();
    }

    pub fn reset_all(&mut self) {
        self.assumptions = ScenarioAssumptions::default();
        self.recompute();
        self.set_info("Reset to default assumptions".to_string());
    }

    pub fn scroll_down(&mut self) {
        let rows = self.record.as_ref().map_or(0, |r| r.yearly_results.len());
        if self.table_scroll + 1 < rows {
            self.table_scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.table_scroll = self.table_scroll.saturating_sub(1);
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write the current table as CSV into the data directory
    pub fn export_csv(&mut self) -> Result<PathBuf, StorageError> {
        let Some(record) = &self.record else {
            return Err(StorageError::Io("no forecast to export".to_string()));
        };
        let path = self.storage.export_csv(record, None)?;
        tracing::info!(path = %path.display(), "Exported CSV");
        Ok(path)
    }

    pub fn save_scenario(&mut self) -> Result<PathBuf, StorageError> {
        let path = self.storage.save_scenario(&self.assumptions)?;
        tracing::info!(path = %path.display(), "Saved scenario");
        Ok(path)
    }

    // =========================================================================
    // Status line
    // =========================================================================

    pub fn set_info(&mut self, text: String) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Info,
            text,
        });
    }

    pub fn set_warning(&mut self, text: String) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Warning,
            text,
        });
    }

    pub fn set_error(&mut self, text: String) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Error,
            text,
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchcast_core::model::RampShape;
    use tempfile::tempdir;

    fn state_in(dir: &std::path::Path) -> AppState {
        AppState::new(
            DataDirectory::new(dir.to_path_buf()),
            AppConfig::default(),
            ScenarioAssumptions::default(),
            RunContext::default(),
        )
    }

    #[test]
    fn test_initial_record_computed() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path());
        let record = state.record.as_ref().unwrap();
        assert_eq!(record.break_even_year, Some(2029));
        assert!(state.status.is_none());
    }

    #[test]
    fn test_selection_wraps() {
        let dir = tempdir().unwrap();
        let mut state = state_in(dir.path());

        state.select_prev();
        assert_eq!(state.selected_field(), ParameterField::TotalInvestment);
        state.select_next();
        assert_eq!(state.selected_field(), ParameterField::LaunchYear);
    }

    #[test]
    fn test_adjust_recomputes_and_clamps() {
        let dir = tempdir().unwrap();
        let mut state = state_in(dir.path());

        // Ramp years: 5 -> 8, then clamped
        state.select_next();
        state.adjust_selected(10);
        assert_eq!(state.assumptions.ramp_years, 8);
        assert_eq!(state.record.as_ref().unwrap().yearly_results.len(), 8);

        state.adjust_selected(-20);
        assert_eq!(state.assumptions.ramp_years, 3);
        assert_eq!(state.record.as_ref().unwrap().last_year(), Some(2029));
    }

    #[test]
    fn test_shape_cycles_and_changes_break_even() {
        let dir = tempdir().unwrap();
        let mut state = state_in(dir.path());

        while state.selected_field() != ParameterField::RampShape {
            state.select_next();
        }
        state.adjust_selected(1);
        assert_eq!(state.assumptions.ramp_shape, RampShape::Fast);
        assert_eq!(state.record.as_ref().unwrap().break_even_year, Some(2028));
    }

    #[test]
    fn test_reset_selected_and_all() {
        let dir = tempdir().unwrap();
        let mut state = state_in(dir.path());

        state.adjust_selected(3);
        assert_eq!(state.assumptions.launch_year, 2030);
        state.reset_selected();
        assert_eq!(state.assumptions.launch_year, 2027);

        state.select_next();
        state.adjust_selected(-1);
        state.reset_all();
        assert_eq!(state.assumptions, ScenarioAssumptions::default());
        assert_eq!(state.status.as_ref().unwrap().kind, StatusKind::Info);
    }

    #[test]
    fn test_scroll_stays_in_table() {
        let dir = tempdir().unwrap();
        let mut state = state_in(dir.path());

        for _ in 0..10 {
            state.scroll_down();
        }
        assert_eq!(state.table_scroll, 4);

        // Shrinking the ramp pulls the scroll offset back
        state.select_next();
        state.adjust_selected(-2);
        assert_eq!(state.table_scroll, 2);

        state.scroll_up();
        assert_eq!(state.table_scroll, 1);
    }

    #[test]
    fn test_export_and_save() {
        let dir = tempdir().unwrap();
        let mut state = state_in(dir.path());

        let csv = state.export_csv().unwrap();
        assert!(csv.ends_with("exports/ianalumab_model.csv"));

        state.adjust_selected(1);
        state.save_scenario().unwrap();
        let saved = state.storage.load_scenario().unwrap().unwrap();
        assert_eq!(saved.launch_year, 2028);
    }
}
