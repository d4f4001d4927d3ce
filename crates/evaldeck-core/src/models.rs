use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exceptions::GenericError;

/// Role carried by a chat message. Roles are mutually exclusive and strictly
/// alternate when a transcript is extended through the add-message control.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn opposite(&self) -> Self {
        match self {
            Self::User => Self::Assistant,
            Self::Assistant => Self::User,
        }
    }

    pub fn to_string(&self) -> String {
        match self {
            Self::User => String::from("User"),
            Self::Assistant => String::from("Assistant"),
        }
    }
}

/// The role the next appended message should carry: the opposite of the last
/// message's role. An empty transcript starts with a User message.
pub fn next_role(messages: &[ChatMessage]) -> MessageRole {
    match messages.last() {
        Some(last) if last.role == MessageRole::User => MessageRole::Assistant,
        _ => MessageRole::User,
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(id: String, role: MessageRole, content: String) -> Self {
        Self { id, role, content }
    }
}

/// Status of an eval job configuration. The only transition driven from the
/// UI is Active -> Inactive via the deactivation control.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum JobStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "INACTIVE")]
    Inactive,
}

impl TryFrom<String> for JobStatus {
    type Error = GenericError;
    fn try_from(value: String) -> Result<Self, GenericError> {
        match value.as_str() {
            "ACTIVE" => Ok(JobStatus::Active),
            "INACTIVE" => Ok(JobStatus::Inactive),
            _ => Err(GenericError::ParseError(format!(
                "Unrecognised job status: {}",
                value
            ))),
        }
    }
}

impl JobStatus {
    pub fn to_string(&self) -> String {
        match self {
            JobStatus::Active => String::from("ACTIVE"),
            JobStatus::Inactive => String::from("INACTIVE"),
        }
    }
}

/// A single version of an evaluator template. Immutable from the UI's
/// perspective; versions sharing a name are listed together.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct EvalTemplate {
    pub id: String,
    pub name: String,
    pub version: u32,
}

impl EvalTemplate {
    pub fn new(id: String, name: String, version: u32) -> Self {
        Self { id, name, version }
    }
}

/// An eval job configuration. `eval_template` is the resolved reference and
/// may be absent when the referenced template no longer exists.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct EvalConfig {
    pub id: String,
    pub status: JobStatus,
    pub eval_template_id: String,
    pub eval_template: Option<EvalTemplate>,
}

impl EvalConfig {
    pub fn new(
        id: String,
        status: JobStatus,
        eval_template_id: String,
        eval_template: Option<EvalTemplate>,
    ) -> Self {
        Self {
            id,
            status,
            eval_template_id,
            eval_template,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == JobStatus::Active
    }
}

/// Outcome of a single eval job execution shown in the log table.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ExecutionStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "COMPLETED")]
    Completed,
    #[serde(rename = "ERROR")]
    Error,
}

impl ExecutionStatus {
    pub fn to_string(&self) -> String {
        match self {
            ExecutionStatus::Pending => String::from("PENDING"),
            ExecutionStatus::Completed => String::from("COMPLETED"),
            ExecutionStatus::Error => String::from("ERROR"),
        }
    }
}

/// One row of the execution log for a job configuration.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct EvalLogRecord {
    pub id: String,
    pub trace_id: String,
    pub status: ExecutionStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl EvalLogRecord {
    pub fn new(
        id: String,
        trace_id: String,
        status: ExecutionStatus,
        started_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
        error: Option<String>,
    ) -> Self {
        Self {
            id,
            trace_id,
            status,
            started_at,
            completed_at,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: &str, role: MessageRole) -> ChatMessage {
        ChatMessage::new(id.to_string(), role, String::new())
    }

    #[test]
    fn test_next_role_alternates() {
        let messages = vec![msg("m1", MessageRole::User)];
        assert_eq!(next_role(&messages), MessageRole::Assistant);

        let messages = vec![msg("m1", MessageRole::User), msg("m2", MessageRole::Assistant)];
        assert_eq!(next_role(&messages), MessageRole::User);
    }

    #[test]
    fn test_next_role_empty_defaults_to_user() {
        assert_eq!(next_role(&[]), MessageRole::User);
    }

    #[test]
    fn test_job_status_wire_format() {
        let json = serde_json::to_string(&JobStatus::Active).unwrap();
        assert_eq!(json, "\"ACTIVE\"");

        let parsed: JobStatus = serde_json::from_str("\"INACTIVE\"").unwrap();
        assert_eq!(parsed, JobStatus::Inactive);
    }

    #[test]
    fn test_job_status_try_from() {
        assert_eq!(
            JobStatus::try_from("ACTIVE".to_string()).unwrap(),
            JobStatus::Active
        );
        assert!(JobStatus::try_from("PAUSED".to_string()).is_err());
    }

    #[test]
    fn test_eval_config_serialization() {
        let template = EvalTemplate::new("tpl-1".to_string(), "toxicity".to_string(), 3);
        let config = EvalConfig::new(
            "cfg-1".to_string(),
            JobStatus::Active,
            "tpl-1".to_string(),
            Some(template),
        );

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EvalConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, config);
        assert!(deserialized.is_active());
        assert_eq!(deserialized.eval_template.unwrap().version, 3);
    }

    #[test]
    fn test_eval_config_null_template() {
        let json = r#"{"id":"cfg-2","status":"INACTIVE","eval_template_id":"tpl-9","eval_template":null}"#;
        let config: EvalConfig = serde_json::from_str(json).unwrap();
        assert!(config.eval_template.is_none());
        assert!(!config.is_active());
    }
}
