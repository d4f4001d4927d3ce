/// Message list panel: the chat transcript editor view
use crate::stores::messages_store::MessagesState;
use evaldeck_core::models::{next_role, ChatMessage, MessageRole};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

pub struct MessageListPanel {
    messages: Vec<ChatMessage>,
    scroll_from_bottom: usize,
    next_role: MessageRole,
}

impl MessageListPanel {
    pub fn from_state(state: &MessagesState) -> Self {
        Self {
            next_role: next_role(&state.messages),
            messages: state.messages.clone(),
            scroll_from_bottom: state.scroll_from_bottom,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // transcript
                Constraint::Length(1), // add-message hint
            ])
            .split(area);

        self.render_transcript(chunks[0], buf);
        self.render_hint(chunks[1], buf);
    }

    fn render_transcript(&self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Messages ({}) ", self.messages.len());
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.messages.is_empty() {
            Paragraph::new("No messages yet")
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        // Window the transcript from the bottom: offset 0 keeps the most
        // recent message visible.
        let total = self.messages.len();
        let visible_height = inner.height as usize;
        let end = total.saturating_sub(self.scroll_from_bottom);
        let start = end.saturating_sub(visible_height);

        let lines: Vec<Line> = self.messages[start..end]
            .iter()
            .map(|message| self.message_line(message, inner.width as usize))
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }

    fn message_line(&self, message: &ChatMessage, width: usize) -> Line<'_> {
        let (prefix, color) = match message.role {
            MessageRole::User => ("User      ", Color::Cyan),
            MessageRole::Assistant => ("Assistant ", Color::Green),
        };

        let content_width = width.saturating_sub(prefix.len() + 1);
        let content = if message.content.is_empty() {
            Span::styled("(empty)", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(truncate_to_width(&message.content, content_width))
        };

        Line::from(vec![
            Span::styled(
                prefix,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            content,
        ])
    }

    fn render_hint(&self, area: Rect, buf: &mut Buffer) {
        let hint = format!(" [a] Add {} message", self.next_role.to_string());
        Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .render(area, buf);
    }
}

/// Truncate a string to the given display width, appending an ellipsis when
/// anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > max_width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += char_width;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate_to_width("hello", 20), "hello");
    }

    #[test]
    fn test_truncate_long_string_gets_ellipsis() {
        let truncated = truncate_to_width("a long chat message body", 10);
        assert!(truncated.ends_with('…'));
        assert!(truncated.chars().count() <= 10);
    }

    #[test]
    fn test_truncate_handles_wide_chars() {
        // CJK characters occupy two cells each
        let truncated = truncate_to_width("评估评估评估", 5);
        assert!(truncated.ends_with('…'));
    }
}
