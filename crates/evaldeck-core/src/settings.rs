/// This file lists out the default values for the main EVALDECK env configs.
/// All can be overridden by an ENV var of the same name. These should only be
/// primitive types.

/// interval between background refreshes of the eval execution log table
pub static EVALDECK_LOG_REFRESH_INTERVAL_MS: usize = 5000;

/// project the TUI is scoped to
pub static EVALDECK_PROJECT_ID: &'static str = "demo-project";

/// eval job configuration opened in the detail view
pub static EVALDECK_CONFIG_ID: &'static str = "demo-eval-config";
