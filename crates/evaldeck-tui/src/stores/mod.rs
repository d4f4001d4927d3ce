/// Store modules that hold application state.
/// Each store owns one slice of the state and reduces actions into it.
pub mod app_logs_store;
pub mod config_store;
pub mod eval_logs_store;
pub mod messages_store;
pub mod ui_store;

pub use app_logs_store::AppLogsStore;
pub use config_store::ConfigStore;
pub use eval_logs_store::EvalLogsStore;
pub use messages_store::MessagesStore;
pub use ui_store::UIStore;
