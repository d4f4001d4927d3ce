/// Keyboard input handling and key mapping
use crate::actions::{Action, DetailTab, ViewId};
use crate::stores::{ConfigStore, EvalLogsStore, MessagesStore, UIStore};
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input and return the appropriate Action
pub fn handle_key_event(
    key_event: KeyEvent,
    ui_store: &UIStore,
    messages_store: &MessagesStore,
    config_store: &ConfigStore,
    eval_logs_store: &EvalLogsStore,
) -> Option<Action> {
    let ui_state = ui_store.get_state();

    // While the confirmation popover is open its keys take precedence over
    // everything else
    if ui_state.popover_open {
        return handle_popover_keys(key_event);
    }

    // Filter editing on the Logs tab captures printable keys before the
    // global bindings
    if ui_state.active_view == ViewId::EvalConfig
        && ui_state.detail_tab == DetailTab::Logs
        && eval_logs_store.get_state().filter_editing
    {
        return handle_filter_editing_keys(key_event, eval_logs_store);
    }

    match key_event.code {
        // Global keys
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Esc => Some(Action::ClearError),

        // View switching
        KeyCode::Char('1') => Some(Action::SwitchView(ViewId::Messages)),
        KeyCode::Char('2') => Some(Action::SwitchView(ViewId::EvalConfig)),
        KeyCode::Char('3') => Some(Action::SwitchView(ViewId::Admin)),

        // View-specific keys
        _ => match ui_state.active_view {
            ViewId::Messages => handle_messages_keys(key_event, messages_store),
            ViewId::EvalConfig => {
                handle_detail_keys(key_event, &ui_state.detail_tab, config_store)
            }
            ViewId::Admin => handle_admin_keys(key_event),
        },
    }
}

fn handle_popover_keys(key_event: KeyEvent) -> Option<Action> {
    match key_event.code {
        KeyCode::Enter | KeyCode::Char('y') => Some(Action::ConfirmDeactivate),
        // any dismissal collapses the popover with no side effects
        KeyCode::Esc | KeyCode::Char('n') => Some(Action::CloseDeactivatePopover),
        _ => None,
    }
}

fn handle_messages_keys(key_event: KeyEvent, messages_store: &MessagesStore) -> Option<Action> {
    match key_event.code {
        // append a message whose role alternates with the previous one
        KeyCode::Char('a') => Some(Action::AddMessage(messages_store.next_role())),

        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollMessages(-1)),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollMessages(1)),
        KeyCode::PageDown => Some(Action::ScrollMessages(-5)),
        KeyCode::PageUp => Some(Action::ScrollMessages(5)),

        _ => None,
    }
}

fn handle_detail_keys(
    key_event: KeyEvent,
    detail_tab: &DetailTab,
    config_store: &ConfigStore,
) -> Option<Action> {
    match key_event.code {
        KeyCode::Char('l') => Some(Action::SwitchDetailTab(DetailTab::Logs)),
        KeyCode::Char('c') => Some(Action::SwitchDetailTab(DetailTab::Configuration)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::RefreshConfig),

        // The deactivation control is disabled unless the caller holds the
        // scope and the config is currently active
        KeyCode::Char('d') => {
            if config_store.deactivate_enabled() {
                Some(Action::OpenDeactivatePopover)
            } else {
                None
            }
        }

        KeyCode::Char('/') if *detail_tab == DetailTab::Logs => {
            Some(Action::SetLogFilterEditing(true))
        }

        KeyCode::Char('j') | KeyCode::Down if *detail_tab == DetailTab::Logs => {
            Some(Action::ScrollEvalLogs(1))
        }
        KeyCode::Char('k') | KeyCode::Up if *detail_tab == DetailTab::Logs => {
            Some(Action::ScrollEvalLogs(-1))
        }
        KeyCode::PageDown if *detail_tab == DetailTab::Logs => Some(Action::ScrollEvalLogs(5)),
        KeyCode::PageUp if *detail_tab == DetailTab::Logs => Some(Action::ScrollEvalLogs(-5)),

        _ => None,
    }
}

fn handle_filter_editing_keys(
    key_event: KeyEvent,
    eval_logs_store: &EvalLogsStore,
) -> Option<Action> {
    match key_event.code {
        KeyCode::Esc | KeyCode::Enter => Some(Action::SetLogFilterEditing(false)),

        KeyCode::Backspace => {
            let mut filter = eval_logs_store.get_state().filter_input;
            filter.pop();
            Some(Action::UpdateLogFilter(filter))
        }

        KeyCode::Char(c) if !c.is_control() => {
            let mut filter = eval_logs_store.get_state().filter_input;
            filter.push(c);
            Some(Action::UpdateLogFilter(filter))
        }

        _ => None,
    }
}

fn handle_admin_keys(key_event: KeyEvent) -> Option<Action> {
    match key_event.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollAppLogs(-1)),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollAppLogs(1)),
        KeyCode::PageDown => Some(Action::ScrollAppLogs(-5)),
        KeyCode::PageUp => Some(Action::ScrollAppLogs(5)),
        _ => None,
    }
}
