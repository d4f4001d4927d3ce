/// Custom logger that captures logs to a memory buffer instead of stdout.
/// Writing to stdout would corrupt the raw-mode terminal display.
use log::{Level, Metadata, Record, SetLoggerError};
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

const MAX_LOG_LINES: usize = 10_000;

/// A log entry with timestamp and formatted message
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn format(&self) -> String {
        format!(
            "[{}] {} {}: {}",
            self.timestamp, self.level, self.target, self.message
        )
    }
}

/// Thread-safe log buffer
#[derive(Clone)]
pub struct LogBuffer {
    lines: Arc<RwLock<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self {
            lines: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    pub fn add_log(&self, entry: LogEntry) {
        let mut lines = self.lines.write().unwrap();
        if lines.len() >= MAX_LOG_LINES {
            lines.pop_front();
        }
        lines.push_back(entry);
    }

    pub fn get_logs(&self) -> Vec<String> {
        self.lines
            .read()
            .unwrap()
            .iter()
            .map(|entry| entry.format())
            .collect()
    }
}

/// Logger implementation backed by the memory buffer
pub struct BufferedLogger {
    buffer: LogBuffer,
}

impl log::Log for BufferedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.add_log(LogEntry {
                timestamp: chrono::Local::now()
                    .format("%Y-%m-%d %H:%M:%S%.3f")
                    .to_string(),
                level: record.level().to_string(),
                target: record.target().to_string(),
                message: format!("{}", record.args()),
            });
        }
    }

    fn flush(&self) {}
}

/// Install the buffered logger and return the buffer the Admin view reads.
/// Installation can only happen once per process; later calls still return
/// a working buffer, it just won't capture.
pub fn init_memory_logger() -> Result<LogBuffer, SetLoggerError> {
    let buffer = LogBuffer::new();
    let logger = BufferedLogger {
        buffer: buffer.clone(),
    };
    let _ = log::set_boxed_logger(Box::new(logger));
    log::set_max_level(log::LevelFilter::Debug);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: "2026-01-01 12:00:00.000".to_string(),
            level: "INFO".to_string(),
            target: "evaldeck".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_entry_format() {
        assert_eq!(
            entry("started").format(),
            "[2026-01-01 12:00:00.000] INFO evaldeck: started"
        );
    }

    #[test]
    fn test_buffer_rotates_at_capacity() {
        let buffer = LogBuffer::new();
        for i in 0..(MAX_LOG_LINES + 5) {
            buffer.add_log(entry(&format!("line {}", i)));
        }

        let logs = buffer.get_logs();
        assert_eq!(logs.len(), MAX_LOG_LINES);
        assert!(logs[0].ends_with("line 5"));
    }
}
