/// ConfigStore manages the eval config detail queries: the primary config
/// fetch, the dependent template-list fetch and the permission check.
use crate::actions::Action;
use evaldeck_core::models::{EvalConfig, EvalTemplate};
use evaldeck_core::query::RemoteQuery;
use std::sync::{Arc, RwLock};

/// Internal state for the detail view's data
#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    /// Primary fetch: the config itself (None = unknown id)
    pub config: RemoteQuery<Option<EvalConfig>>,

    /// Dependent fetch: all versions of the config's template. Gated: never
    /// leaves Idle until the primary fetch settled successfully with a
    /// present template reference.
    pub templates: RemoteQuery<Vec<EvalTemplate>>,

    /// Whether the caller holds the eval job CUD scope
    pub has_access: bool,
}

/// How the detail view should present the current query state
#[derive(Debug, Clone, PartialEq)]
pub enum DetailViewState {
    Loading,
    NotFound,
    Failed(String),
    Ready {
        config: EvalConfig,
        templates: Vec<EvalTemplate>,
    },
}

/// Store that holds the detail view's remote data
#[derive(Clone)]
pub struct ConfigStore {
    state: Arc<RwLock<ConfigState>>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(ConfigState::default())),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> ConfigState {
        self.state.read().unwrap().clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::RefreshConfig | Action::InvalidateEvals => {
                state.config = RemoteQuery::Pending;
                state.templates = RemoteQuery::Idle;
            }

            Action::ConfigLoaded(config) => {
                // The dependent query only becomes pending when the primary
                // fetch settled successfully and carries a template reference.
                let template_present = config
                    .as_ref()
                    .map(|c| c.eval_template.is_some())
                    .unwrap_or(false);
                state.config = RemoteQuery::Success(config.clone());
                if template_present {
                    state.templates = RemoteQuery::Pending;
                }
            }

            Action::ConfigLoadFailed(error) => {
                state.config = RemoteQuery::Error(error.clone());
                state.templates = RemoteQuery::Idle;
            }

            Action::TemplatesLoaded(templates) => {
                state.templates = RemoteQuery::Success(templates.clone());
            }

            Action::TemplatesLoadFailed(error) => {
                state.templates = RemoteQuery::Error(error.clone());
            }

            Action::AccessResolved(has_access) => {
                state.has_access = *has_access;
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }

    /// The deactivation control is enabled iff the caller holds the scope
    /// AND the loaded config is currently active.
    pub fn deactivate_enabled(&self) -> bool {
        let state = self.state.read().unwrap();
        let active = matches!(
            &state.config,
            RemoteQuery::Success(Some(config)) if config.is_active()
        );
        state.has_access && active
    }

    /// Project the two queries into what the detail view renders: no
    /// partial UI while anything is in flight, a distinct not-found state
    /// for a missing config or null template reference, and an explicit
    /// error state instead of an endless loading screen.
    pub fn view_state(&self) -> DetailViewState {
        let state = self.state.read().unwrap();
        match &state.config {
            RemoteQuery::Idle | RemoteQuery::Pending => DetailViewState::Loading,
            RemoteQuery::Error(error) => DetailViewState::Failed(error.clone()),
            RemoteQuery::Success(None) => DetailViewState::NotFound,
            RemoteQuery::Success(Some(config)) => {
                if config.eval_template.is_none() {
                    return DetailViewState::NotFound;
                }
                match &state.templates {
                    RemoteQuery::Success(templates) => DetailViewState::Ready {
                        config: config.clone(),
                        templates: templates.clone(),
                    },
                    RemoteQuery::Error(error) => DetailViewState::Failed(error.clone()),
                    RemoteQuery::Idle | RemoteQuery::Pending => DetailViewState::Loading,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evaldeck_core::models::JobStatus;

    fn config(status: JobStatus, with_template: bool) -> EvalConfig {
        let template = with_template
            .then(|| EvalTemplate::new("tpl-1".to_string(), "toxicity".to_string(), 2));
        EvalConfig::new("cfg-1".to_string(), status, "tpl-1".to_string(), template)
    }

    #[test]
    fn test_initial_state() {
        let store = ConfigStore::new();
        let state = store.get_state();
        assert!(state.config.is_idle());
        assert!(state.templates.is_idle());
        assert!(!state.has_access);
        assert_eq!(store.view_state(), DetailViewState::Loading);
    }

    #[test]
    fn test_templates_gated_on_primary_fetch() {
        let store = ConfigStore::new();
        store.reduce(&Action::RefreshConfig);
        // primary pending: dependent query must not leave Idle
        assert!(store.get_state().templates.is_idle());

        store.reduce(&Action::ConfigLoadFailed("timeout".to_string()));
        // primary errored: still gated
        assert!(store.get_state().templates.is_idle());

        store.reduce(&Action::RefreshConfig);
        store.reduce(&Action::ConfigLoaded(Some(config(JobStatus::Active, true))));
        assert!(store.get_state().templates.is_pending());
    }

    #[test]
    fn test_null_template_never_enables_dependent_fetch() {
        let store = ConfigStore::new();
        store.reduce(&Action::RefreshConfig);
        store.reduce(&Action::ConfigLoaded(Some(config(JobStatus::Active, false))));

        assert!(store.get_state().templates.is_idle());
        assert_eq!(store.view_state(), DetailViewState::NotFound);
    }

    #[test]
    fn test_unknown_config_renders_not_found() {
        let store = ConfigStore::new();
        store.reduce(&Action::ConfigLoaded(None));
        assert_eq!(store.view_state(), DetailViewState::NotFound);
    }

    #[test]
    fn test_view_ready_once_both_queries_settle() {
        let store = ConfigStore::new();
        store.reduce(&Action::ConfigLoaded(Some(config(JobStatus::Active, true))));
        assert_eq!(store.view_state(), DetailViewState::Loading);

        let templates = vec![
            EvalTemplate::new("tpl-1".to_string(), "toxicity".to_string(), 2),
            EvalTemplate::new("tpl-2".to_string(), "toxicity".to_string(), 3),
        ];
        store.reduce(&Action::TemplatesLoaded(templates.clone()));

        match store.view_state() {
            DetailViewState::Ready {
                config,
                templates: loaded,
            } => {
                assert_eq!(config.id, "cfg-1");
                assert_eq!(loaded, templates);
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_errors_render_distinct_failed_state() {
        let store = ConfigStore::new();
        store.reduce(&Action::ConfigLoadFailed("boom".to_string()));
        assert_eq!(store.view_state(), DetailViewState::Failed("boom".to_string()));

        let store = ConfigStore::new();
        store.reduce(&Action::ConfigLoaded(Some(config(JobStatus::Active, true))));
        store.reduce(&Action::TemplatesLoadFailed("tpl boom".to_string()));
        assert_eq!(
            store.view_state(),
            DetailViewState::Failed("tpl boom".to_string())
        );
    }

    #[test]
    fn test_deactivate_enabled_truth_table() {
        let store = ConfigStore::new();
        // nothing loaded, no access
        assert!(!store.deactivate_enabled());

        // active config but no access
        store.reduce(&Action::ConfigLoaded(Some(config(JobStatus::Active, true))));
        assert!(!store.deactivate_enabled());

        // access and active
        store.reduce(&Action::AccessResolved(true));
        assert!(store.deactivate_enabled());

        // inactive config is disabled regardless of access
        store.reduce(&Action::ConfigLoaded(Some(config(JobStatus::Inactive, true))));
        assert!(!store.deactivate_enabled());
    }

    #[test]
    fn test_invalidation_resets_both_queries() {
        let store = ConfigStore::new();
        store.reduce(&Action::ConfigLoaded(Some(config(JobStatus::Active, true))));
        store.reduce(&Action::TemplatesLoaded(Vec::new()));

        store.reduce(&Action::InvalidateEvals);

        let state = store.get_state();
        assert!(state.config.is_pending());
        assert!(state.templates.is_idle());
        assert_eq!(store.view_state(), DetailViewState::Loading);
    }
}
