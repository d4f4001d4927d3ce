/// Event emitted when a user confirms deactivation of an eval job.
pub static EVAL_CONFIG_DELETE_EVENT: &'static str = "eval_config:delete";

/// Fire-and-forget product analytics capture. The sink is an opaque
/// collaborator: a capture that cannot be delivered is dropped silently and
/// never blocks or fails the calling action.
pub trait AnalyticsSink: Send + Sync {
    fn capture(&self, event: &str);
}

/// Default sink that records events through the log facade.
pub struct LogAnalytics;

impl AnalyticsSink for LogAnalytics {
    fn capture(&self, event: &str) {
        log::info!("analytics capture: {}", event);
    }
}
