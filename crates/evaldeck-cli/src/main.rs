use std::io;
use std::sync::Arc;

use chrono::{Duration, Utc};
use dotenv::dotenv;
use evaldeck_api::{InMemoryEvalsBackend, LogAnalytics, EVAL_JOB_CUD_SCOPE};
use evaldeck_core::get_evaldeck_setting;
use evaldeck_core::models::{
    ChatMessage, EvalConfig, EvalLogRecord, EvalTemplate, ExecutionStatus, JobStatus, MessageRole,
};

#[tokio::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    let project_id = get_evaldeck_setting!(EVALDECK_PROJECT_ID);
    let config_id = get_evaldeck_setting!(EVALDECK_CONFIG_ID);

    let backend = demo_backend(&project_id, &config_id);

    evaldeck_tui::tui_main(
        Arc::new(backend),
        Arc::new(LogAnalytics),
        project_id,
        config_id,
        demo_messages(),
    )
    .await
}

/// Seed an in-process backend so the TUI has data to drive. A deployment
/// against a live service swaps this for a transport-backed `EvalsApi`.
fn demo_backend(project_id: &str, config_id: &str) -> InMemoryEvalsBackend {
    let backend = InMemoryEvalsBackend::new(project_id);
    backend.grant_scope(EVAL_JOB_CUD_SCOPE);

    let template = EvalTemplate::new("tpl-toxicity-3".to_string(), "toxicity".to_string(), 3);
    backend.seed_config(EvalConfig::new(
        config_id.to_string(),
        JobStatus::Active,
        template.id.clone(),
        Some(template),
    ));
    backend.seed_templates(vec![
        EvalTemplate::new("tpl-toxicity-1".to_string(), "toxicity".to_string(), 1),
        EvalTemplate::new("tpl-toxicity-2".to_string(), "toxicity".to_string(), 2),
        EvalTemplate::new("tpl-toxicity-3".to_string(), "toxicity".to_string(), 3),
        EvalTemplate::new("tpl-toxicity-4".to_string(), "toxicity".to_string(), 4),
        EvalTemplate::new("tpl-help-1".to_string(), "helpfulness".to_string(), 1),
    ]);

    let now = Utc::now();
    backend.seed_logs(
        config_id,
        vec![
            EvalLogRecord::new(
                "log-1".to_string(),
                "trace-8d1f".to_string(),
                ExecutionStatus::Completed,
                now - Duration::minutes(42),
                Some(now - Duration::minutes(41)),
                None,
            ),
            EvalLogRecord::new(
                "log-2".to_string(),
                "trace-a2c9".to_string(),
                ExecutionStatus::Error,
                now - Duration::minutes(17),
                Some(now - Duration::minutes(17)),
                Some("model timed out".to_string()),
            ),
            EvalLogRecord::new(
                "log-3".to_string(),
                "trace-50be".to_string(),
                ExecutionStatus::Pending,
                now - Duration::seconds(30),
                None,
                None,
            ),
        ],
    );

    backend
}

fn demo_messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::new(
            "msg-1".to_string(),
            MessageRole::User,
            "Summarise the eval results for last week".to_string(),
        ),
        ChatMessage::new(
            "msg-2".to_string(),
            MessageRole::Assistant,
            "Toxicity scores held steady; two traces regressed on helpfulness.".to_string(),
        ),
    ]
}
