/// Main application struct and event loop
use crate::actions::Action;
use crate::dispatcher::{ActionReceiver, Dispatcher};
use crate::effects::Effects;
use crate::keyboard;
use crate::logger;
use crate::stores::{AppLogsStore, ConfigStore, EvalLogsStore, MessagesStore, UIStore};
use crate::ui::render_layout;
use crossterm::event::{self, Event, KeyEventKind};
use evaldeck_api::{AnalyticsSink, EvalsApi};
use evaldeck_core::models::ChatMessage;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// The main application structure following flux architecture
pub struct App {
    /// Dispatcher for sending actions
    dispatcher: Dispatcher,

    /// Store for the chat transcript
    messages_store: MessagesStore,

    /// Store for the eval config detail queries
    config_store: ConfigStore,

    /// Store for the execution log table
    eval_logs_store: EvalLogsStore,

    /// Store for UI state
    ui_store: UIStore,

    /// Store for application logs
    app_logs_store: AppLogsStore,

    /// Effects handler for side effects
    effects: Effects,
}

impl App {
    pub fn new(
        api: Arc<dyn EvalsApi>,
        analytics: Arc<dyn AnalyticsSink>,
        project_id: String,
        config_id: String,
        initial_messages: Vec<ChatMessage>,
    ) -> Result<(Self, ActionReceiver), Box<dyn std::error::Error>> {
        let (dispatcher, action_receiver) = Dispatcher::new();

        let log_buffer = logger::init_memory_logger()?;

        let messages_store = MessagesStore::new();
        let config_store = ConfigStore::new();
        let eval_logs_store = EvalLogsStore::new();
        let ui_store = UIStore::new();
        let app_logs_store = AppLogsStore::new(log_buffer);

        let effects = Effects::new(
            dispatcher.clone(),
            api,
            analytics,
            project_id,
            config_id,
        );
        effects.spawn_background_tasks();

        // Seed the externally owned transcript
        dispatcher.dispatch(Action::MessagesReplaced(initial_messages));

        Ok((
            Self {
                dispatcher,
                messages_store,
                config_store,
                eval_logs_store,
                ui_store,
                app_logs_store,
                effects,
            },
            action_receiver,
        ))
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut crate::tui::Tui,
        mut action_receiver: ActionReceiver,
    ) -> io::Result<()> {
        log::info!("evaldeck TUI started");

        // Resolve permissions and load the detail view's data
        self.effects.resolve_access();
        self.dispatcher.dispatch(Action::RefreshConfig);

        loop {
            // Render the UI
            terminal.draw(|frame| {
                render_layout(
                    frame,
                    &self.messages_store,
                    &self.config_store,
                    &self.eval_logs_store,
                    &self.ui_store,
                    &self.app_logs_store,
                );
            })?;

            // Check if we should exit
            if self.ui_store.should_exit() {
                break;
            }

            // Handle both UI events and actions from the dispatcher
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(16)) => {
                    if event::poll(Duration::from_millis(0))? {
                        if let Event::Key(key_event) = event::read()? {
                            // Only process key press events (not release)
                            if key_event.kind == KeyEventKind::Press {
                                if let Some(action) = keyboard::handle_key_event(
                                    key_event,
                                    &self.ui_store,
                                    &self.messages_store,
                                    &self.config_store,
                                    &self.eval_logs_store,
                                ) {
                                    self.dispatcher.dispatch(action);
                                }
                            }
                        }
                    }
                }

                Some(action) = action_receiver.recv() => {
                    self.handle_action(&action);
                }
            }
        }

        Ok(())
    }

    /// Handle an action by routing it to stores and effects
    fn handle_action(&mut self, action: &Action) {
        log::debug!("handling action: {:?}", action);

        // Route to stores (reducers)
        self.messages_store.reduce(action);
        self.config_store.reduce(action);
        self.eval_logs_store.reduce(action);
        self.ui_store.reduce(action);
        self.app_logs_store.reduce(action);

        // Trigger side effects
        self.effects.handle(action);
    }
}
