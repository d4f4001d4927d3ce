/// MessagesStore owns the ordered chat transcript shown in the editor view
use crate::actions::Action;
use evaldeck_core::models::{next_role, ChatMessage, MessageRole};
use std::sync::{Arc, RwLock};

/// Internal state for the transcript
#[derive(Debug, Clone, Default)]
pub struct MessagesState {
    /// Messages in insertion order; insertion order is display order
    pub messages: Vec<ChatMessage>,

    /// Length observed after the previous reduce, driving the auto-scroll
    /// rule
    pub prev_len: usize,

    /// Scroll offset in rows measured from the bottom of the transcript.
    /// 0 means the viewport sits at the maximum scroll offset.
    pub scroll_from_bottom: usize,

    /// Monotonic counter for ids of locally appended messages
    pub next_local_id: u64,
}

/// Store that holds the message transcript
#[derive(Clone)]
pub struct MessagesStore {
    state: Arc<RwLock<MessagesState>>,
}

impl MessagesStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MessagesState::default())),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> MessagesState {
        self.state.read().unwrap().clone()
    }

    /// The role the add-message control will append next
    pub fn next_role(&self) -> MessageRole {
        let state = self.state.read().unwrap();
        next_role(&state.messages)
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::AddMessage(role) => {
                let id = format!("local-{}", state.next_local_id);
                state.next_local_id += 1;
                state
                    .messages
                    .push(ChatMessage::new(id, *role, String::new()));
                Self::observe_length(&mut state);
            }

            Action::MessagesReplaced(messages) => {
                state.messages = messages.clone();
                Self::observe_length(&mut state);
            }

            Action::ScrollMessages(delta) => {
                if *delta >= 0 {
                    let max = state.messages.len();
                    state.scroll_from_bottom =
                        state.scroll_from_bottom.saturating_add(*delta as usize).min(max);
                } else {
                    state.scroll_from_bottom =
                        state.scroll_from_bottom.saturating_sub(delta.unsigned_abs() as usize);
                }
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }

    /// Auto-scroll rule: pin the viewport to the bottom only when the
    /// transcript grew versus the previously observed length. Any other
    /// change leaves the scroll offset untouched.
    fn observe_length(state: &mut MessagesState) {
        let len = state.messages.len();
        if len > state.prev_len {
            state.scroll_from_bottom = 0;
        }
        state.prev_len = len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: &str, role: MessageRole, content: &str) -> ChatMessage {
        ChatMessage::new(id.to_string(), role, content.to_string())
    }

    #[test]
    fn test_initial_state() {
        let store = MessagesStore::new();
        let state = store.get_state();
        assert!(state.messages.is_empty());
        assert_eq!(state.scroll_from_bottom, 0);
        assert_eq!(store.next_role(), MessageRole::User);
    }

    #[test]
    fn test_add_message_appends_and_pins_to_bottom() {
        let store = MessagesStore::new();
        store.reduce(&Action::MessagesReplaced(vec![
            msg("m1", MessageRole::User, "hi"),
            msg("m2", MessageRole::Assistant, "hello"),
        ]));
        store.reduce(&Action::ScrollMessages(2));
        assert_eq!(store.get_state().scroll_from_bottom, 2);

        store.reduce(&Action::AddMessage(MessageRole::User));

        let state = store.get_state();
        assert_eq!(state.messages.len(), 3);
        assert_eq!(state.messages[2].role, MessageRole::User);
        assert_eq!(state.messages[2].content, "");
        // growth pins the viewport back to the maximum scroll offset
        assert_eq!(state.scroll_from_bottom, 0);
    }

    #[test]
    fn test_non_growth_replacement_leaves_scroll_untouched() {
        let store = MessagesStore::new();
        store.reduce(&Action::MessagesReplaced(vec![
            msg("m1", MessageRole::User, "hi"),
            msg("m2", MessageRole::Assistant, "hello"),
        ]));
        store.reduce(&Action::ScrollMessages(1));

        // same length, edited content and flipped role: not growth
        store.reduce(&Action::MessagesReplaced(vec![
            msg("m1", MessageRole::Assistant, "edited"),
            msg("m2", MessageRole::User, "hello"),
        ]));
        assert_eq!(store.get_state().scroll_from_bottom, 1);

        // shrink is not growth either
        store.reduce(&Action::MessagesReplaced(vec![msg(
            "m1",
            MessageRole::User,
            "hi",
        )]));
        assert_eq!(store.get_state().scroll_from_bottom, 1);
    }

    #[test]
    fn test_growth_after_shrink_pins_again() {
        let store = MessagesStore::new();
        store.reduce(&Action::MessagesReplaced(vec![
            msg("m1", MessageRole::User, "hi"),
            msg("m2", MessageRole::Assistant, "hello"),
        ]));
        store.reduce(&Action::MessagesReplaced(vec![msg(
            "m1",
            MessageRole::User,
            "hi",
        )]));
        store.reduce(&Action::ScrollMessages(1));

        store.reduce(&Action::MessagesReplaced(vec![
            msg("m1", MessageRole::User, "hi"),
            msg("m2", MessageRole::Assistant, "hello"),
        ]));
        assert_eq!(store.get_state().scroll_from_bottom, 0);
    }

    #[test]
    fn test_next_role_follows_alternation() {
        let store = MessagesStore::new();
        assert_eq!(store.next_role(), MessageRole::User);

        store.reduce(&Action::AddMessage(store.next_role()));
        assert_eq!(store.next_role(), MessageRole::Assistant);

        store.reduce(&Action::AddMessage(store.next_role()));
        assert_eq!(store.next_role(), MessageRole::User);
    }

    #[test]
    fn test_scroll_clamped_to_transcript_length() {
        let store = MessagesStore::new();
        store.reduce(&Action::MessagesReplaced(vec![
            msg("m1", MessageRole::User, "hi"),
            msg("m2", MessageRole::Assistant, "hello"),
        ]));

        store.reduce(&Action::ScrollMessages(10));
        assert_eq!(store.get_state().scroll_from_bottom, 2);

        store.reduce(&Action::ScrollMessages(-10));
        assert_eq!(store.get_state().scroll_from_bottom, 0);
    }
}
