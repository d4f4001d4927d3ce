use async_trait::async_trait;

use crate::models::ApiError;
use evaldeck_core::models::{EvalConfig, EvalLogRecord, EvalTemplate, JobStatus};

/// Permission scope required for create/update/delete operations on eval
/// jobs.
pub static EVAL_JOB_CUD_SCOPE: &'static str = "evalJob:CUD";

/// The EvalsApi trait defines the interface to the evaluation backend that
/// front-end components fetch from and mutate through. All calls are
/// asynchronous and non-blocking; the transport behind an implementation is
/// owned by the implementation.
#[async_trait]
pub trait EvalsApi: Send + Sync {
    /// Fetch a single eval job configuration by id, scoped to a project.
    /// Resolves to None when the id is unknown within the project.
    async fn config_by_id(
        &self,
        project_id: &str,
        config_id: &str,
    ) -> Result<Option<EvalConfig>, ApiError>;

    /// List every version of the template with the given name, ordered by
    /// version.
    async fn all_templates_for_name(
        &self,
        project_id: &str,
        name: &str,
    ) -> Result<Vec<EvalTemplate>, ApiError>;

    /// Set the status of an eval job. The only transition issued from the
    /// UI is Active -> Inactive.
    async fn update_eval_job(
        &self,
        project_id: &str,
        eval_config_id: &str,
        updated_status: JobStatus,
    ) -> Result<(), ApiError>;

    /// Execution log records for a job configuration, newest first.
    async fn eval_logs(
        &self,
        project_id: &str,
        job_configuration_id: &str,
    ) -> Result<Vec<EvalLogRecord>, ApiError>;

    /// Whether the caller holds the given permission scope on the project.
    async fn has_access(&self, project_id: &str, scope: &str) -> bool;
}
