/// Eval config detail view: template link, inner tabs, read-only form
use crate::actions::DetailTab;
use crate::stores::config_store::DetailViewState;
use crate::stores::eval_logs_store::EvalLogsState;
use crate::ui::EvalLogTable;
use evaldeck_core::models::{EvalConfig, EvalLogRecord, EvalTemplate, JobStatus};
use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Widget},
};

pub struct ConfigPanel<'a> {
    view: DetailViewState,
    detail_tab: DetailTab,
    eval_logs: &'a EvalLogsState,
    filtered_logs: Vec<EvalLogRecord>,
}

impl<'a> ConfigPanel<'a> {
    pub fn new(
        view: DetailViewState,
        detail_tab: DetailTab,
        eval_logs: &'a EvalLogsState,
        filtered_logs: Vec<EvalLogRecord>,
    ) -> Self {
        Self {
            view,
            detail_tab,
            eval_logs,
            filtered_logs,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        match &self.view {
            DetailViewState::Loading => {
                // no partial UI while either fetch is in flight
                render_placeholder(area, buf, "Loading...", Color::DarkGray);
            }
            DetailViewState::NotFound => {
                render_placeholder(area, buf, "Config not found", Color::Yellow);
            }
            DetailViewState::Failed(error) => {
                render_placeholder(area, buf, &format!("Failed to load: {}", error), Color::Red);
            }
            DetailViewState::Ready { config, templates } => {
                self.render_ready(area, buf, config, templates);
            }
        }
    }

    fn render_ready(
        &self,
        area: Rect,
        buf: &mut Buffer,
        config: &EvalConfig,
        templates: &[EvalTemplate],
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // template link
                Constraint::Length(3), // inner tabs
                Constraint::Min(1),    // tab content
            ])
            .split(area);

        self.render_template_link(chunks[0], buf, config);
        self.render_tabs(chunks[1], buf);

        match self.detail_tab {
            DetailTab::Logs => {
                EvalLogTable::new(self.filtered_logs.clone(), self.eval_logs)
                    .render(chunks[2], buf);
            }
            DetailTab::Configuration => {
                render_config_form(chunks[2], buf, config, templates);
            }
        }
    }

    fn render_template_link(&self, area: Rect, buf: &mut Buffer, config: &EvalConfig) {
        let line = match &config.eval_template {
            Some(template) => Line::from(vec![
                Span::styled("Eval Template  ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{} (v{})", template.name, template.version),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]),
            None => Line::from("Eval Template  -"),
        };

        Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL))
            .render(area, buf);
    }

    fn render_tabs(&self, area: Rect, buf: &mut Buffer) {
        let selected = match self.detail_tab {
            DetailTab::Logs => 0,
            DetailTab::Configuration => 1,
        };

        let tabs = Tabs::new(vec!["l: Logs", "c: Configuration"])
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .select(selected)
            .divider("|");

        tabs.render(area, buf);
    }
}

fn render_placeholder(area: Rect, buf: &mut Buffer, message: &str, color: Color) {
    Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Eval Config "))
        .render(area, buf);
}

/// Read-only form pre-populated from the loaded config and the fetched
/// template versions.
fn render_config_form(area: Rect, buf: &mut Buffer, config: &EvalConfig, templates: &[EvalTemplate]) {
    let status_color = match config.status {
        JobStatus::Active => Color::Green,
        JobStatus::Inactive => Color::Red,
    };

    let selected_version = config.eval_template.as_ref().map(|t| t.version);
    let version_spans = version_line(templates, selected_version);

    let lines = vec![
        Line::from(vec![
            Span::styled("Config ID:   ", Style::default().fg(Color::Yellow)),
            Span::raw(config.id.clone()),
        ]),
        Line::from(vec![
            Span::styled("Status:      ", Style::default().fg(Color::Yellow)),
            Span::styled(config.status.to_string(), Style::default().fg(status_color)),
        ]),
        Line::from(vec![
            Span::styled("Template:    ", Style::default().fg(Color::Yellow)),
            Span::raw(
                config
                    .eval_template
                    .as_ref()
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]),
        Line::from(vec![
            Span::styled("Template ID: ", Style::default().fg(Color::Yellow)),
            Span::raw(config.eval_template_id.clone()),
        ]),
        version_spans,
        Line::from(""),
        Line::styled(
            "Read-only view of the existing configuration",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Configuration "))
        .render(area, buf);
}

/// All fetched versions in order, with the configured one highlighted.
fn version_line(templates: &[EvalTemplate], selected: Option<u32>) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "Versions:    ",
        Style::default().fg(Color::Yellow),
    )];

    if templates.is_empty() {
        spans.push(Span::raw("-"));
        return Line::from(spans);
    }

    for version in templates.iter().map(|t| t.version).sorted() {
        if Some(version) == selected {
            spans.push(Span::styled(
                format!("[v{}] ", version),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::raw(format!("v{} ", version)));
        }
    }

    Line::from(spans)
}
