/// Central dispatcher for the flux architecture. Actions enter here and are
/// drained by the main loop, which routes them to stores and effects.
use crate::actions::Action;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Action>,
}

impl Dispatcher {
    /// Create a dispatcher together with the receiving half the main loop
    /// drains.
    pub fn new() -> (Self, ActionReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, ActionReceiver { rx })
    }

    /// Dispatch an action through the system. This is the only entry point
    /// for state changes.
    pub fn dispatch(&self, action: Action) {
        if self.tx.send(action).is_err() {
            // receiver dropped during shutdown; nothing left to update
            log::debug!("action channel closed, dropping action");
        }
    }
}

pub struct ActionReceiver {
    rx: mpsc::UnboundedReceiver<Action>,
}

impl ActionReceiver {
    /// Receive the next action, waiting until one is available.
    pub async fn recv(&mut self) -> Option<Action> {
        self.rx.recv().await
    }
}
