/// AppLogsStore manages application logs displayed on the Admin view
use crate::actions::Action;
use crate::logger::LogBuffer;
use std::sync::{Arc, RwLock};

/// Internal state for application logs
#[derive(Debug, Clone)]
pub struct AppLogsState {
    /// Formatted log lines
    pub logs: Vec<String>,

    /// Scroll offset in lines measured from the bottom (0 = most recent)
    pub scroll_offset: usize,
}

/// Store that holds application log state
#[derive(Clone)]
pub struct AppLogsStore {
    state: Arc<RwLock<AppLogsState>>,
    log_buffer: LogBuffer,
}

impl AppLogsStore {
    pub fn new(log_buffer: LogBuffer) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppLogsState {
                logs: Vec::new(),
                scroll_offset: 0,
            })),
            log_buffer,
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> AppLogsState {
        self.state.read().unwrap().clone()
    }

    /// Refresh lines from the buffer, then handle scroll actions
    pub fn reduce(&self, action: &Action) {
        {
            let lines = self.log_buffer.get_logs();
            let mut state = self.state.write().unwrap();
            state.logs = lines;
        }

        if let Action::ScrollAppLogs(delta) = action {
            let mut state = self.state.write().unwrap();
            if *delta >= 0 {
                let max = state.logs.len();
                state.scroll_offset = state.scroll_offset.saturating_add(*delta as usize).min(max);
            } else {
                state.scroll_offset =
                    state.scroll_offset.saturating_sub(delta.unsigned_abs() as usize);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{LogBuffer, LogEntry};

    fn buffer_with_lines(count: usize) -> LogBuffer {
        let buffer = LogBuffer::new();
        for i in 0..count {
            buffer.add_log(LogEntry {
                timestamp: "2026-01-01 00:00:00.000".to_string(),
                level: "INFO".to_string(),
                target: "test".to_string(),
                message: format!("line {}", i),
            });
        }
        buffer
    }

    #[test]
    fn test_reduce_pulls_lines_from_buffer() {
        let store = AppLogsStore::new(buffer_with_lines(3));
        store.reduce(&Action::ClearError);
        assert_eq!(store.get_state().logs.len(), 3);
    }

    #[test]
    fn test_scroll_clamped_to_line_count() {
        let store = AppLogsStore::new(buffer_with_lines(2));
        store.reduce(&Action::ScrollAppLogs(10));
        assert_eq!(store.get_state().scroll_offset, 2);

        store.reduce(&Action::ScrollAppLogs(-10));
        assert_eq!(store.get_state().scroll_offset, 0);
    }
}
