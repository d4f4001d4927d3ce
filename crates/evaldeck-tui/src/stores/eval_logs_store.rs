/// EvalLogsStore manages the execution log table shown on the Logs tab
use crate::actions::Action;
use evaldeck_core::models::EvalLogRecord;
use evaldeck_core::query::RemoteQuery;
use regex::Regex;
use std::sync::{Arc, RwLock};

/// Internal state for the execution log table
#[derive(Debug, Clone, Default)]
pub struct EvalLogsState {
    pub logs: RemoteQuery<Vec<EvalLogRecord>>,

    /// Row offset into the filtered table
    pub scroll_offset: usize,

    /// Regex filter applied to trace ids and error text
    pub filter_input: String,

    /// Whether keystrokes currently edit the filter
    pub filter_editing: bool,
}

/// Store that holds execution log state
#[derive(Clone)]
pub struct EvalLogsStore {
    state: Arc<RwLock<EvalLogsState>>,
}

impl EvalLogsStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(EvalLogsState::default())),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> EvalLogsState {
        self.state.read().unwrap().clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::RefreshConfig | Action::InvalidateEvals => {
                state.logs = RemoteQuery::Pending;
            }

            Action::EvalLogsLoaded(records) => {
                state.logs = RemoteQuery::Success(records.clone());
            }

            Action::EvalLogsLoadFailed(error) => {
                state.logs = RemoteQuery::Error(error.clone());
            }

            Action::ScrollEvalLogs(delta) => {
                if *delta >= 0 {
                    state.scroll_offset = state.scroll_offset.saturating_add(*delta as usize);
                } else {
                    state.scroll_offset =
                        state.scroll_offset.saturating_sub(delta.unsigned_abs() as usize);
                }
            }

            Action::UpdateLogFilter(filter) => {
                state.filter_input = filter.clone();
                state.scroll_offset = 0;
            }

            Action::SetLogFilterEditing(editing) => {
                state.filter_editing = *editing;
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }

    /// Log records with the regex filter applied. An invalid pattern shows
    /// all rows rather than none.
    pub fn get_filtered_logs(&self) -> Vec<EvalLogRecord> {
        let state = self.state.read().unwrap();
        let records = match state.logs.data() {
            Some(records) => records.clone(),
            None => return Vec::new(),
        };

        if state.filter_input.is_empty() {
            return records;
        }
        match Regex::new(&state.filter_input) {
            Ok(regex) => records
                .into_iter()
                .filter(|record| {
                    regex.is_match(&record.trace_id)
                        || record
                            .error
                            .as_ref()
                            .map(|e| regex.is_match(e))
                            .unwrap_or(false)
                })
                .collect(),
            Err(_) => records,
        }
    }
}
