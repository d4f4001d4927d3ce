/// Admin panel displaying the application's own log buffer
use crate::stores::app_logs_store::AppLogsState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct AdminPanel {
    logs: Vec<String>,
    scroll_offset: usize,
}

impl AdminPanel {
    pub fn from_state(state: &AppLogsState) -> Self {
        Self {
            logs: state.logs.clone(),
            scroll_offset: state.scroll_offset,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Application Logs ({}) ", self.logs.len());
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.logs.is_empty() {
            Paragraph::new("No log output captured yet")
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        // Window from the bottom so offset 0 shows the most recent lines
        let total = self.logs.len();
        let visible_height = inner.height as usize;
        let end = total.saturating_sub(self.scroll_offset);
        let start = end.saturating_sub(visible_height);

        let lines: Vec<Line> = self.logs[start..end]
            .iter()
            .map(|line| Line::from(line.clone()))
            .collect();

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
