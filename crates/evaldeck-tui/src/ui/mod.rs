/// UI module - panels and rendering components
pub mod admin_panel;
pub mod config_panel;
pub mod confirm_popover;
pub mod eval_log_table;
pub mod layout;
pub mod message_list;

pub use admin_panel::AdminPanel;
pub use config_panel::ConfigPanel;
pub use confirm_popover::ConfirmPopover;
pub use eval_log_table::EvalLogTable;
pub use layout::render_layout;
pub use message_list::MessageListPanel;
