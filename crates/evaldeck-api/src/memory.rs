/// In-process `EvalsApi` backend holding seeded fixture data. Serves the
/// demo binary and the async tests; the production transport is an external
/// collaborator and plugs in behind the same trait.
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use itertools::Itertools;

use crate::models::ApiError;
use crate::traits::EvalsApi;
use evaldeck_core::models::{EvalConfig, EvalLogRecord, EvalTemplate, JobStatus};

/// One recorded `update_eval_job` call, kept for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedUpdate {
    pub project_id: String,
    pub eval_config_id: String,
    pub updated_status: JobStatus,
}

#[derive(Debug, Clone, Default)]
struct BackendState {
    project_id: String,
    configs: HashMap<String, EvalConfig>,
    templates: Vec<EvalTemplate>,
    logs: HashMap<String, Vec<EvalLogRecord>>,
    granted_scopes: Vec<String>,
    update_calls: Vec<RecordedUpdate>,
    update_failure: Option<String>,
}

#[derive(Clone)]
pub struct InMemoryEvalsBackend {
    state: Arc<RwLock<BackendState>>,
}

impl InMemoryEvalsBackend {
    pub fn new(project_id: &str) -> Self {
        Self {
            state: Arc::new(RwLock::new(BackendState {
                project_id: project_id.to_string(),
                ..BackendState::default()
            })),
        }
    }

    pub fn seed_config(&self, config: EvalConfig) {
        let mut state = self.state.write().unwrap();
        state.configs.insert(config.id.clone(), config);
    }

    pub fn seed_templates(&self, templates: Vec<EvalTemplate>) {
        let mut state = self.state.write().unwrap();
        state.templates.extend(templates);
    }

    pub fn seed_logs(&self, config_id: &str, records: Vec<EvalLogRecord>) {
        let mut state = self.state.write().unwrap();
        state
            .logs
            .entry(config_id.to_string())
            .or_insert_with(Vec::new)
            .extend(records);
    }

    pub fn grant_scope(&self, scope: &str) {
        let mut state = self.state.write().unwrap();
        state.granted_scopes.push(scope.to_string());
    }

    /// Make every subsequent `update_eval_job` call fail with the given
    /// message. Calls are still recorded.
    pub fn fail_updates(&self, message: &str) {
        let mut state = self.state.write().unwrap();
        state.update_failure = Some(message.to_string());
    }

    pub fn recorded_updates(&self) -> Vec<RecordedUpdate> {
        self.state.read().unwrap().update_calls.clone()
    }

    fn owns_project(&self, project_id: &str) -> bool {
        self.state.read().unwrap().project_id == project_id
    }
}

#[async_trait]
impl EvalsApi for InMemoryEvalsBackend {
    async fn config_by_id(
        &self,
        project_id: &str,
        config_id: &str,
    ) -> Result<Option<EvalConfig>, ApiError> {
        if !self.owns_project(project_id) {
            return Ok(None);
        }
        let state = self.state.read().unwrap();
        Ok(state.configs.get(config_id).cloned())
    }

    async fn all_templates_for_name(
        &self,
        project_id: &str,
        name: &str,
    ) -> Result<Vec<EvalTemplate>, ApiError> {
        if !self.owns_project(project_id) {
            return Ok(Vec::new());
        }
        let state = self.state.read().unwrap();
        Ok(state
            .templates
            .iter()
            .filter(|template| template.name == name)
            .cloned()
            .sorted_by_key(|template| template.version)
            .collect())
    }

    async fn update_eval_job(
        &self,
        project_id: &str,
        eval_config_id: &str,
        updated_status: JobStatus,
    ) -> Result<(), ApiError> {
        let mut state = self.state.write().unwrap();
        state.update_calls.push(RecordedUpdate {
            project_id: project_id.to_string(),
            eval_config_id: eval_config_id.to_string(),
            updated_status,
        });

        if let Some(message) = &state.update_failure {
            return Err(ApiError::ServerError(message.clone()));
        }
        if state.project_id != project_id {
            return Err(ApiError::NotFound(format!(
                "unknown project: {}",
                project_id
            )));
        }
        match state.configs.get_mut(eval_config_id) {
            Some(config) => {
                config.status = updated_status;
                Ok(())
            }
            None => Err(ApiError::NotFound(format!(
                "unknown eval config: {}",
                eval_config_id
            ))),
        }
    }

    async fn eval_logs(
        &self,
        project_id: &str,
        job_configuration_id: &str,
    ) -> Result<Vec<EvalLogRecord>, ApiError> {
        if !self.owns_project(project_id) {
            return Ok(Vec::new());
        }
        let state = self.state.read().unwrap();
        let mut records = state
            .logs
            .get(job_configuration_id)
            .cloned()
            .unwrap_or_default();
        records.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(records)
    }

    async fn has_access(&self, project_id: &str, scope: &str) -> bool {
        let state = self.state.read().unwrap();
        state.project_id == project_id && state.granted_scopes.iter().any(|s| s == scope)
    }
}
