/// UIStore manages UI-specific state (active view, tabs, help visibility,
/// the deactivation confirmation popover)
use crate::actions::{Action, DetailTab, ViewId};
use std::sync::{Arc, RwLock};

/// Internal state for UI
#[derive(Debug, Clone)]
pub struct UIState {
    /// Currently active top-level view
    pub active_view: ViewId,

    /// Currently active inner tab of the detail view
    pub detail_tab: DetailTab,

    /// Whether expanded help is shown in the footer
    pub show_help: bool,

    /// Error message to display (if any)
    pub error_message: Option<String>,

    /// Whether the application should exit
    pub should_exit: bool,

    /// Deactivation confirmation popover: Closed (false) or ConfirmOpen
    /// (true)
    pub popover_open: bool,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            active_view: ViewId::Messages,
            detail_tab: DetailTab::Logs,
            show_help: false,
            error_message: None,
            should_exit: false,
            popover_open: false,
        }
    }
}

/// Store that holds UI-related state
#[derive(Clone)]
pub struct UIStore {
    state: Arc<RwLock<UIState>>,
}

impl UIStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(UIState::default())),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> UIState {
        self.state.read().unwrap().clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::SwitchView(view_id) => {
                state.active_view = *view_id;
            }

            Action::SwitchDetailTab(tab) => {
                state.detail_tab = *tab;
            }

            Action::ToggleHelp => {
                state.show_help = !state.show_help;
            }

            Action::OpenDeactivatePopover => {
                state.popover_open = true;
            }

            // Confirm closes the popover synchronously, before the mutation
            // resolves; dismiss closes it with no side effects.
            Action::CloseDeactivatePopover | Action::ConfirmDeactivate => {
                state.popover_open = false;
            }

            Action::ShowError(message) => {
                state.error_message = Some(message.clone());
            }

            Action::ClearError => {
                state.error_message = None;
            }

            Action::Quit => {
                state.should_exit = true;
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }

    /// Check if the application should exit
    pub fn should_exit(&self) -> bool {
        self.state.read().unwrap().should_exit
    }
}
