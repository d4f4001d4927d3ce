/// Effects module handles side effects (remote calls) triggered by Actions,
/// dispatching new Actions with the results.
use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use evaldeck_api::{AnalyticsSink, EvalsApi, EVAL_CONFIG_DELETE_EVENT, EVAL_JOB_CUD_SCOPE};
use evaldeck_core::get_evaldeck_setting;
use evaldeck_core::models::JobStatus;
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

/// Effects handler that executes side effects based on actions
pub struct Effects {
    dispatcher: Dispatcher,
    api: Arc<dyn EvalsApi>,
    analytics: Arc<dyn AnalyticsSink>,
    project_id: String,
    config_id: String,
}

impl Effects {
    pub fn new(
        dispatcher: Dispatcher,
        api: Arc<dyn EvalsApi>,
        analytics: Arc<dyn AnalyticsSink>,
        project_id: String,
        config_id: String,
    ) -> Self {
        Self {
            dispatcher,
            api,
            analytics,
            project_id,
            config_id,
        }
    }

    /// Spawn the periodic execution-log refresh task
    pub fn spawn_background_tasks(&self) {
        let dispatcher = self.dispatcher.clone();
        let api = self.api.clone();
        let project_id = self.project_id.clone();
        let config_id = self.config_id.clone();
        let interval_ms = get_evaldeck_setting!(EVALDECK_LOG_REFRESH_INTERVAL_MS, usize) as u64;

        task::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;

                match api.eval_logs(&project_id, &config_id).await {
                    Ok(records) => {
                        dispatcher.dispatch(Action::EvalLogsLoaded(records));
                    }
                    Err(e) => {
                        // background refresh failures stay quiet to avoid
                        // disrupting the user; the next tick retries
                        log::debug!("background log refresh failed: {}", e.to_string());
                    }
                }
            }
        });
    }

    /// Resolve the eval job CUD permission for the project
    pub fn resolve_access(&self) {
        let dispatcher = self.dispatcher.clone();
        let api = self.api.clone();
        let project_id = self.project_id.clone();

        task::spawn(async move {
            let has_access = api.has_access(&project_id, EVAL_JOB_CUD_SCOPE).await;
            dispatcher.dispatch(Action::AccessResolved(has_access));
        });
    }

    /// Handle an action and execute any necessary side effects
    pub fn handle(&self, action: &Action) {
        match action {
            Action::RefreshConfig | Action::InvalidateEvals => {
                self.fetch_config();
            }

            Action::ConfigLoaded(config) => {
                // Dependent fetches only fire once the primary fetch has
                // settled successfully.
                if let Some(config) = config {
                    if let Some(template) = &config.eval_template {
                        self.fetch_templates(template.name.clone());
                    }
                    self.fetch_eval_logs(config.id.clone());
                }
            }

            Action::ConfirmDeactivate => {
                self.deactivate();
            }

            Action::DeactivateSucceeded => {
                // exactly one invalidation per successful mutation
                self.dispatcher.dispatch(Action::InvalidateEvals);
            }

            Action::DeactivateFailed(error) => {
                // the popover has already closed; surface the failure on the
                // ambient error line. No retry, no rollback.
                self.dispatcher
                    .dispatch(Action::ShowError(format!("Deactivation failed: {}", error)));
            }

            _ => {
                // Most actions don't require side effects
            }
        }
    }

    /// Fetch the eval config by id
    fn fetch_config(&self) {
        let dispatcher = self.dispatcher.clone();
        let api = self.api.clone();
        let project_id = self.project_id.clone();
        let config_id = self.config_id.clone();

        task::spawn(async move {
            log::info!("fetching eval config {}", config_id);
            match api.config_by_id(&project_id, &config_id).await {
                Ok(config) => {
                    dispatcher.dispatch(Action::ConfigLoaded(config));
                }
                Err(e) => {
                    log::error!("failed to load eval config: {}", e.to_string());
                    dispatcher.dispatch(Action::ConfigLoadFailed(e.to_string()));
                }
            }
        });
    }

    /// Fetch all versions of the named template
    fn fetch_templates(&self, name: String) {
        let dispatcher = self.dispatcher.clone();
        let api = self.api.clone();
        let project_id = self.project_id.clone();

        task::spawn(async move {
            match api.all_templates_for_name(&project_id, &name).await {
                Ok(templates) => {
                    dispatcher.dispatch(Action::TemplatesLoaded(templates));
                }
                Err(e) => {
                    log::error!("failed to load templates for {}: {}", name, e.to_string());
                    dispatcher.dispatch(Action::TemplatesLoadFailed(e.to_string()));
                }
            }
        });
    }

    /// Fetch execution log records for the loaded config
    fn fetch_eval_logs(&self, config_id: String) {
        let dispatcher = self.dispatcher.clone();
        let api = self.api.clone();
        let project_id = self.project_id.clone();

        task::spawn(async move {
            match api.eval_logs(&project_id, &config_id).await {
                Ok(records) => {
                    dispatcher.dispatch(Action::EvalLogsLoaded(records));
                }
                Err(e) => {
                    log::error!("failed to load eval logs: {}", e.to_string());
                    dispatcher.dispatch(Action::EvalLogsLoadFailed(e.to_string()));
                }
            }
        });
    }

    /// Issue the deactivation mutation. The popover has already been closed
    /// by the reducer; this only runs the remote half of the confirm path.
    fn deactivate(&self) {
        if self.project_id.is_empty() {
            log::error!("project id is missing, aborting deactivation");
            return;
        }

        let dispatcher = self.dispatcher.clone();
        let api = self.api.clone();
        let project_id = self.project_id.clone();
        let config_id = self.config_id.clone();

        task::spawn(async move {
            match api
                .update_eval_job(&project_id, &config_id, JobStatus::Inactive)
                .await
            {
                Ok(()) => {
                    log::info!("eval config {} deactivated", config_id);
                    dispatcher.dispatch(Action::DeactivateSucceeded);
                }
                Err(e) => {
                    log::error!("deactivation failed: {}", e.to_string());
                    dispatcher.dispatch(Action::DeactivateFailed(e.to_string()));
                }
            }
        });

        self.analytics.capture(EVAL_CONFIG_DELETE_EVENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::ActionReceiver;
    use evaldeck_api::InMemoryEvalsBackend;
    use evaldeck_core::models::{EvalConfig, EvalTemplate};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAnalytics {
        captures: AtomicUsize,
    }

    impl CountingAnalytics {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                captures: AtomicUsize::new(0),
            })
        }
    }

    impl AnalyticsSink for CountingAnalytics {
        fn capture(&self, _event: &str) {
            self.captures.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn seeded_backend(project_id: &str) -> InMemoryEvalsBackend {
        let backend = InMemoryEvalsBackend::new(project_id);
        let template = EvalTemplate::new("tpl-1".to_string(), "toxicity".to_string(), 1);
        backend.seed_config(EvalConfig::new(
            "cfg-1".to_string(),
            JobStatus::Active,
            "tpl-1".to_string(),
            Some(template),
        ));
        backend
    }

    fn effects_with(
        backend: &InMemoryEvalsBackend,
        analytics: Arc<CountingAnalytics>,
        project_id: &str,
    ) -> (Effects, ActionReceiver) {
        let (dispatcher, receiver) = Dispatcher::new();
        let effects = Effects::new(
            dispatcher,
            Arc::new(backend.clone()),
            analytics,
            project_id.to_string(),
            "cfg-1".to_string(),
        );
        (effects, receiver)
    }

    async fn recv_or_panic(receiver: &mut ActionReceiver) -> Action {
        tokio::time::timeout(Duration::from_secs(1), receiver.recv())
            .await
            .expect("timed out waiting for action")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn test_confirm_issues_one_mutation_and_one_capture() {
        let backend = seeded_backend("proj-1");
        let analytics = CountingAnalytics::new();
        let (effects, mut receiver) = effects_with(&backend, analytics.clone(), "proj-1");

        effects.handle(&Action::ConfirmDeactivate);

        match recv_or_panic(&mut receiver).await {
            Action::DeactivateSucceeded => {}
            other => panic!("expected DeactivateSucceeded, got {:?}", other),
        }

        let calls = backend.recorded_updates();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].eval_config_id, "cfg-1");
        assert_eq!(calls[0].updated_status, JobStatus::Inactive);
        assert_eq!(analytics.captures.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_confirm_with_empty_project_id_never_calls_backend() {
        let backend = seeded_backend("proj-1");
        let analytics = CountingAnalytics::new();
        let (effects, mut receiver) = effects_with(&backend, analytics.clone(), "");

        effects.handle(&Action::ConfirmDeactivate);

        let result = tokio::time::timeout(Duration::from_millis(200), receiver.recv()).await;
        assert!(result.is_err(), "no action should be dispatched");
        assert!(backend.recorded_updates().is_empty());
        assert_eq!(analytics.captures.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_success_triggers_exactly_one_invalidation() {
        let backend = seeded_backend("proj-1");
        let (effects, mut receiver) = effects_with(&backend, CountingAnalytics::new(), "proj-1");

        effects.handle(&Action::DeactivateSucceeded);

        match recv_or_panic(&mut receiver).await {
            Action::InvalidateEvals => {}
            other => panic!("expected InvalidateEvals, got {:?}", other),
        }
        let extra = tokio::time::timeout(Duration::from_millis(200), receiver.recv()).await;
        assert!(extra.is_err(), "only one invalidation per success");
    }

    #[tokio::test]
    async fn test_failed_mutation_dispatches_failure_not_invalidation() {
        let backend = seeded_backend("proj-1");
        backend.fail_updates("job store unavailable");
        let (effects, mut receiver) = effects_with(&backend, CountingAnalytics::new(), "proj-1");

        effects.handle(&Action::ConfirmDeactivate);

        match recv_or_panic(&mut receiver).await {
            Action::DeactivateFailed(message) => {
                assert!(message.contains("job store unavailable"));
            }
            other => panic!("expected DeactivateFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failure_routes_to_ambient_error_surface() {
        let backend = seeded_backend("proj-1");
        let (effects, mut receiver) = effects_with(&backend, CountingAnalytics::new(), "proj-1");

        effects.handle(&Action::DeactivateFailed("SERVER ERROR: down".to_string()));

        match recv_or_panic(&mut receiver).await {
            Action::ShowError(message) => {
                assert!(message.contains("SERVER ERROR: down"));
            }
            other => panic!("expected ShowError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_config_load_chains_dependent_fetches() {
        let backend = seeded_backend("proj-1");
        backend.seed_templates(vec![EvalTemplate::new(
            "tpl-1".to_string(),
            "toxicity".to_string(),
            1,
        )]);
        let (effects, mut receiver) = effects_with(&backend, CountingAnalytics::new(), "proj-1");

        effects.handle(&Action::RefreshConfig);

        match recv_or_panic(&mut receiver).await {
            Action::ConfigLoaded(Some(config)) => {
                assert_eq!(config.id, "cfg-1");
                // the main loop routes the result back into effects, which
                // then fires the gated dependent fetches
                effects.handle(&Action::ConfigLoaded(Some(config)));
            }
            other => panic!("expected ConfigLoaded, got {:?}", other),
        }

        let mut saw_templates = false;
        let mut saw_logs = false;
        for _ in 0..2 {
            match recv_or_panic(&mut receiver).await {
                Action::TemplatesLoaded(templates) => {
                    assert_eq!(templates.len(), 1);
                    saw_templates = true;
                }
                Action::EvalLogsLoaded(_) => {
                    saw_logs = true;
                }
                other => panic!("unexpected action {:?}", other),
            }
        }
        assert!(saw_templates && saw_logs);
    }

    #[tokio::test]
    async fn test_null_template_reference_skips_template_fetch() {
        let backend = seeded_backend("proj-1");
        let (effects, mut receiver) = effects_with(&backend, CountingAnalytics::new(), "proj-1");

        let config = EvalConfig::new(
            "cfg-1".to_string(),
            JobStatus::Active,
            "tpl-gone".to_string(),
            None,
        );
        effects.handle(&Action::ConfigLoaded(Some(config)));

        // the log fetch still runs, but the gated template fetch never fires
        match recv_or_panic(&mut receiver).await {
            Action::EvalLogsLoaded(_) => {}
            other => panic!("expected EvalLogsLoaded, got {:?}", other),
        }
        let extra = tokio::time::timeout(Duration::from_millis(200), receiver.recv()).await;
        assert!(extra.is_err());
    }

    #[tokio::test]
    async fn test_missing_config_fires_no_dependent_fetch() {
        let backend = InMemoryEvalsBackend::new("proj-1");
        let (effects, mut receiver) = effects_with(&backend, CountingAnalytics::new(), "proj-1");

        effects.handle(&Action::ConfigLoaded(None));

        let result = tokio::time::timeout(Duration::from_millis(200), receiver.recv()).await;
        assert!(result.is_err(), "no dependent fetch for a missing config");
    }
}
