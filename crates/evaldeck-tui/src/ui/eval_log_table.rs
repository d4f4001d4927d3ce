/// Execution log table for the Logs tab of the detail view
use crate::stores::eval_logs_store::EvalLogsState;
use chrono::{DateTime, Local, Utc};
use evaldeck_core::models::{EvalLogRecord, ExecutionStatus};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

pub struct EvalLogTable {
    records: Vec<EvalLogRecord>,
    total: usize,
    scroll_offset: usize,
    filter_input: String,
    filter_editing: bool,
    error: Option<String>,
    is_pending: bool,
}

impl EvalLogTable {
    /// `records` is the filtered row set; `state` supplies the rest.
    pub fn new(records: Vec<EvalLogRecord>, state: &EvalLogsState) -> Self {
        Self {
            total: state.logs.data().map(|r| r.len()).unwrap_or(0),
            records,
            scroll_offset: state.scroll_offset,
            filter_input: state.filter_input.clone(),
            filter_editing: state.filter_editing,
            error: state.logs.error().map(|e| e.to_string()),
            is_pending: state.logs.is_pending(),
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let filter_display = if self.filter_editing {
            format!("{}█", self.filter_input)
        } else if self.filter_input.is_empty() {
            "_".to_string()
        } else {
            self.filter_input.clone()
        };
        let title = format!(
            " Logs ({}/{}) [/ Filter: {}] ",
            self.records.len(),
            self.total,
            filter_display
        );

        let block = Block::default().borders(Borders::ALL).title(title);

        if let Some(error) = &self.error {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(format!("Failed to load logs: {}", error))
                .style(Style::default().fg(Color::Red))
                .render(inner, buf);
            return;
        }

        if self.is_pending && self.records.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new("Loading...")
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        let header = Row::new(vec!["Trace", "Status", "Started", "Age", "Error"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = self
            .records
            .iter()
            .map(|record| {
                let status_color = match record.status {
                    ExecutionStatus::Completed => Color::Green,
                    ExecutionStatus::Error => Color::Red,
                    ExecutionStatus::Pending => Color::Yellow,
                };

                let started: DateTime<Local> = record.started_at.into();

                Row::new(vec![
                    Cell::from(record.trace_id.clone()),
                    Cell::from(record.status.to_string())
                        .style(Style::default().fg(status_color)),
                    Cell::from(started.format("%Y-%m-%d %H:%M:%S").to_string()),
                    Cell::from(relative_age(record.started_at)),
                    Cell::from(record.error.clone().unwrap_or_default()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(25),
                Constraint::Percentage(12),
                Constraint::Percentage(23),
                Constraint::Percentage(12),
                Constraint::Percentage(28),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray));

        let mut table_state = TableState::default();
        if !self.records.is_empty() {
            table_state.select(Some(self.scroll_offset.min(self.records.len() - 1)));
        }

        StatefulWidget::render(table, area, buf, &mut table_state);
    }
}

/// Human-readable age of a timestamp, e.g. "5m 3s ago"
fn relative_age(timestamp: DateTime<Utc>) -> String {
    let elapsed = (Utc::now() - timestamp)
        .to_std()
        .unwrap_or(std::time::Duration::ZERO);
    // drop sub-second precision so the column stays narrow
    let rounded = std::time::Duration::from_secs(elapsed.as_secs());
    format!("{} ago", humantime::format_duration(rounded))
}
