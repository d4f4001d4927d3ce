/// Layout manager for the TUI application
use crate::actions::ViewId;
use crate::stores::{AppLogsStore, ConfigStore, EvalLogsStore, MessagesStore, UIStore};
use crate::ui::{AdminPanel, ConfigPanel, ConfirmPopover, MessageListPanel};
use evaldeck_core::query::RemoteQuery;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Widget},
    Frame,
};

/// Render the complete application layout
pub fn render_layout(
    frame: &mut Frame,
    messages_store: &MessagesStore,
    config_store: &ConfigStore,
    eval_logs_store: &EvalLogsStore,
    ui_store: &UIStore,
    app_logs_store: &AppLogsStore,
) {
    let area = frame.area();

    // Main layout: Header | Tabs | Content | Footer
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // View tabs
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let ui_state = ui_store.get_state();

    render_header(frame, vertical_chunks[0], config_store, ui_store);
    render_view_tabs(frame, vertical_chunks[1], &ui_state.active_view);

    match ui_state.active_view {
        ViewId::Messages => {
            let panel = MessageListPanel::from_state(&messages_store.get_state());
            panel.render(vertical_chunks[2], frame.buffer_mut());
        }
        ViewId::EvalConfig => {
            let eval_logs_state = eval_logs_store.get_state();
            let panel = ConfigPanel::new(
                config_store.view_state(),
                ui_state.detail_tab,
                &eval_logs_state,
                eval_logs_store.get_filtered_logs(),
            );
            panel.render(vertical_chunks[2], frame.buffer_mut());
        }
        ViewId::Admin => {
            let panel = AdminPanel::from_state(&app_logs_store.get_state());
            panel.render(vertical_chunks[2], frame.buffer_mut());
        }
    }

    render_footer(frame, vertical_chunks[3], ui_store, config_store);

    // Render the confirmation popover on top if open
    if ui_state.popover_open {
        ConfirmPopover.render(area, frame.buffer_mut());
    }
}

fn render_header(frame: &mut Frame, area: Rect, config_store: &ConfigStore, ui_store: &UIStore) {
    let config_state = config_store.get_state();
    let ui_state = ui_store.get_state();

    // Status reflects the primary query: the config's own status once
    // loaded, the query phase otherwise
    let (status, status_color) = match &config_state.config {
        RemoteQuery::Idle | RemoteQuery::Pending => ("loading".to_string(), Color::Yellow),
        RemoteQuery::Error(_) => ("error".to_string(), Color::Red),
        RemoteQuery::Success(None) => ("not found".to_string(), Color::Yellow),
        RemoteQuery::Success(Some(config)) => {
            let color = if config.is_active() {
                Color::Green
            } else {
                Color::Red
            };
            (config.status.to_string().to_lowercase(), color)
        }
    };

    let breadcrumb = match &config_state.config {
        RemoteQuery::Success(Some(config)) => {
            format!("Eval Configs > {}", config.id)
        }
        _ => "Eval Configs".to_string(),
    };

    let mut spans = vec![
        Span::styled(
            " EVALDECK ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::raw(breadcrumb),
        Span::raw(" | "),
        Span::styled(status, Style::default().fg(status_color)),
    ];

    if let Some(error) = &ui_state.error_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ));
    }

    Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .render(area, frame.buffer_mut());
}

fn render_view_tabs(frame: &mut Frame, area: Rect, active_view: &ViewId) {
    let tab_titles = vec!["1: Messages", "2: Eval Config", "3: Admin"];
    let selected_index = match active_view {
        ViewId::Messages => 0,
        ViewId::EvalConfig => 1,
        ViewId::Admin => 2,
    };

    let tabs = Tabs::new(tab_titles)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected_index)
        .divider("|");

    frame.render_widget(tabs, area);
}

fn render_footer(frame: &mut Frame, area: Rect, ui_store: &UIStore, config_store: &ConfigStore) {
    let ui_state = ui_store.get_state();

    let help_text = if ui_state.popover_open {
        "Enter/y:Confirm | Esc/n:Cancel".to_string()
    } else if ui_state.show_help {
        "Press ? to hide help".to_string()
    } else {
        match ui_state.active_view {
            ViewId::Messages => {
                "q:Quit | 1/2/3:View | a:Add Message | j/k:Scroll | ?:Help".to_string()
            }
            ViewId::EvalConfig => {
                let deactivate = if config_store.deactivate_enabled() {
                    "d:Deactivate"
                } else {
                    "d:Deactivate (disabled)"
                };
                format!(
                    "q:Quit | 1/2/3:View | l/c:Tab | r:Refresh | /:Filter | {} | ?:Help",
                    deactivate
                )
            }
            ViewId::Admin => "q:Quit | 1/2/3:View | j/k:Scroll | ?:Help".to_string(),
        }
    };

    let footer_text = Line::from(vec![Span::raw(" "), Span::raw(help_text)]);

    Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL))
        .render(area, frame.buffer_mut());
}
