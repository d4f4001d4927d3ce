/// Core Action types for the flux architecture.
/// All state mutations flow through Actions dispatched to the Dispatcher.
use evaldeck_core::models::{ChatMessage, EvalConfig, EvalLogRecord, EvalTemplate, MessageRole};

/// Represents all possible user intents and system events in the application
#[derive(Debug, Clone)]
pub enum Action {
    // ===== UI Actions (user-initiated) =====
    /// User switched to a different top-level view
    SwitchView(ViewId),

    /// User switched the inner tab of the eval config detail view
    SwitchDetailTab(DetailTab),

    /// User toggled the help text in the footer
    ToggleHelp,

    /// User appended a message with the given role to the transcript
    AddMessage(MessageRole),

    /// Scroll the transcript; positive moves away from the bottom
    ScrollMessages(i32),

    /// Scroll the execution log table
    ScrollEvalLogs(i32),

    /// Scroll the application log view on the admin tab
    ScrollAppLogs(i32),

    /// Replace the filter text applied to the execution log table
    UpdateLogFilter(String),

    /// Enter or leave filter-editing mode on the Logs tab
    SetLogFilterEditing(bool),

    /// User activated the deactivation control (only dispatched when the
    /// control is enabled)
    OpenDeactivatePopover,

    /// User dismissed the confirmation popover; no side effects
    CloseDeactivatePopover,

    /// User confirmed deactivation inside the popover
    ConfirmDeactivate,

    /// User requested a manual refetch of the detail view's data
    RefreshConfig,

    // ===== System/Effect Actions (emitted by Effects) =====
    /// The externally owned transcript was replaced wholesale
    MessagesReplaced(Vec<ChatMessage>),

    /// Primary config fetch settled successfully (None = unknown id)
    ConfigLoaded(Option<EvalConfig>),

    /// Primary config fetch failed
    ConfigLoadFailed(String),

    /// Dependent template-list fetch settled successfully
    TemplatesLoaded(Vec<EvalTemplate>),

    /// Dependent template-list fetch failed
    TemplatesLoadFailed(String),

    /// Execution log fetch settled successfully
    EvalLogsLoaded(Vec<EvalLogRecord>),

    /// Execution log fetch failed
    EvalLogsLoadFailed(String),

    /// Permission check for the eval job CUD scope resolved
    AccessResolved(bool),

    /// The deactivation mutation resolved successfully
    DeactivateSucceeded,

    /// The deactivation mutation failed; surfaced on the ambient error line
    DeactivateFailed(String),

    /// Cache invalidation signal scoped to the evals namespace. Every
    /// evals-backed query refetches in response.
    InvalidateEvals,

    /// Generic error to display to the user
    ShowError(String),

    /// Clear any displayed errors
    ClearError,

    /// Application should exit
    Quit,
}

/// Identifies the top-level views of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    Messages,
    EvalConfig,
    Admin,
}

/// Identifies the inner tabs of the eval config detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Logs,
    Configuration,
}
