use std::io;
use std::sync::Arc;

use evaldeck_api::{AnalyticsSink, EvalsApi};
use evaldeck_core::models::ChatMessage;

// Flux architecture modules
mod actions;
mod app;
mod dispatcher;
mod effects;
mod keyboard;
mod logger;
mod stores;
mod ui;

mod tui;

// Re-export the main entry point
pub use app::App;

/// Main entry point for the TUI application
pub async fn tui_main(
    api: Arc<dyn EvalsApi>,
    analytics: Arc<dyn AnalyticsSink>,
    project_id: String,
    config_id: String,
    initial_messages: Vec<ChatMessage>,
) -> io::Result<()> {
    // Install color-eyre for better error messages BEFORE terminal init
    if let Err(e) = color_eyre::install() {
        eprintln!("Warning: Failed to install color-eyre: {}", e);
    }

    // Initialize terminal
    let mut terminal = tui::init()?;

    // Create the application and action receiver (this initializes the logger)
    let app_result = App::new(api, analytics, project_id, config_id, initial_messages);

    let (mut app, action_receiver) = match app_result {
        Ok(app) => app,
        Err(e) => {
            // Make sure to restore terminal before showing error
            let _ = tui::restore();
            eprintln!("Failed to initialize application: {}", e);
            return Err(io::Error::new(io::ErrorKind::Other, format!("{}", e)));
        }
    };

    // Run the application
    let result = app.run(&mut terminal, action_receiver).await;

    // Always restore terminal
    let _ = tui::restore();

    if let Err(e) = result {
        eprintln!("Application error: {:?}", e);
        return Err(e);
    }

    Ok(())
}
