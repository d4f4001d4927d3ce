mod analytics;
mod memory;
pub mod models;
mod traits;

pub use analytics::{AnalyticsSink, LogAnalytics, EVAL_CONFIG_DELETE_EVENT};
pub use memory::{InMemoryEvalsBackend, RecordedUpdate};
pub use traits::{EvalsApi, EVAL_JOB_CUD_SCOPE};
