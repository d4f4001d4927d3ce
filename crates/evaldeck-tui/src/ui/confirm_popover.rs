/// Confirmation popover shown before the deactivation mutation is issued
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

pub struct ConfirmPopover;

impl ConfirmPopover {
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect(50, 30, area);

        // Clear the area behind the popover
        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Please confirm ")
            .title_style(
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // message
                Constraint::Length(1), // keys
            ])
            .split(inner);

        Paragraph::new(vec![
            Line::from(""),
            Line::from("This action permanently deactivates the evaluation job."),
            Line::from("No more traces will be evaluated for this job."),
        ])
        .wrap(Wrap { trim: false })
        .render(chunks[0], buf);

        Paragraph::new("Enter/y: Deactivate Eval Job | Esc/n: Cancel")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
    }
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
