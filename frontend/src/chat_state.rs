use crate::models::{ChatRequest, Message, Sender};

pub const GREETING: &str = "Hur kan jag hjälpa dig med dina mötesanteckningar idag?";
pub const ERROR_TEXT: &str = "Ett fel uppstod. Försök igen senare.";

/// Pause between two rendered chunk updates.
pub const PACING_DELAY_MS: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Request dispatched, nothing received yet.
    Sending,
    /// At least one chunk arrived.
    Streaming,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatAction {
    Submit { input: String, session_id: Option<String> },
    /// `text` is everything decoded so far, not the latest delta.
    ChunkReceived { text: String },
    /// Final decoded text after the decoder has been flushed.
    StreamComplete { text: String },
    Error,
}

/// A send cycle accepted by [`ChatState::reduce`]; the caller dispatches
/// `request` and feeds the outcome back as actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatCycle {
    pub assistant_id: u64,
    pub request: ChatRequest,
}

/// Chat view state: the message list plus the one send cycle that may be
/// in flight.
///
/// Message ids come from a counter that only grows, so an id reserved for
/// an assistant reply is never handed out again even if the reply is never
/// created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatState {
    messages: Vec<Message>,
    phase: Phase,
    next_id: u64,
    in_flight: Option<u64>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            messages: vec![Message { id: 1, text: GREETING.to_string(), sender: Sender::Ai }],
            phase: Phase::Idle,
            next_id: 2,
            in_flight: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Loading indicator: shown until the first chunk arrives.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Sending
    }

    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn reduce(&mut self, action: ChatAction) -> Option<ChatCycle> {
        match action {
            ChatAction::Submit { input, session_id } => self.submit(input, session_id),
            ChatAction::ChunkReceived { text } => {
                if self.set_assistant_text(text) {
                    self.phase = Phase::Streaming;
                }
                None
            }
            ChatAction::StreamComplete { text } => {
                if self.in_flight.is_some() {
                    if !text.is_empty() || self.assistant_exists() {
                        self.set_assistant_text(text);
                    }
                    self.finish();
                }
                None
            }
            ChatAction::Error => {
                if self.set_assistant_text(ERROR_TEXT.to_string()) {
                    self.finish();
                }
                None
            }
        }
    }

    fn submit(&mut self, input: String, session_id: Option<String>) -> Option<ChatCycle> {
        if self.is_busy() || input.trim().is_empty() {
            return None;
        }
        let session_id = session_id.filter(|id| !id.trim().is_empty())?;

        let user_id = self.take_id();
        self.messages.push(Message { id: user_id, text: input.clone(), sender: Sender::User });

        let assistant_id = self.take_id();
        self.in_flight = Some(assistant_id);
        self.phase = Phase::Sending;

        Some(ChatCycle {
            assistant_id,
            request: ChatRequest { message: input, session_id },
        })
    }

    /// Replaces the in-flight assistant text, creating the message on first
    /// use. Returns false when no cycle is in flight.
    fn set_assistant_text(&mut self, text: String) -> bool {
        let Some(id) = self.in_flight else {
            return false;
        };
        match self.messages.iter_mut().find(|m| m.id == id) {
            Some(message) => message.text = text,
            None => self.messages.push(Message { id, text, sender: Sender::Ai }),
        }
        true
    }

    fn assistant_exists(&self) -> bool {
        self.in_flight
            .is_some_and(|id| self.messages.iter().any(|m| m.id == id))
    }

    fn finish(&mut self) {
        self.in_flight = None;
        self.phase = Phase::Idle;
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(state: &mut ChatState, input: &str) -> Option<ChatCycle> {
        state.reduce(ChatAction::Submit {
            input: input.to_string(),
            session_id: Some("sess-1".to_string()),
        })
    }

    fn chunk(state: &mut ChatState, text: &str) {
        state.reduce(ChatAction::ChunkReceived { text: text.to_string() });
    }

    fn last_text(state: &ChatState) -> &str {
        &state.messages().last().unwrap().text
    }

    #[test]
    fn starts_with_greeting() {
        let state = ChatState::new();
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].text, GREETING);
        assert_eq!(state.messages()[0].sender, Sender::Ai);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut state = ChatState::new();
        assert!(submit(&mut state, "").is_none());
        assert!(submit(&mut state, "   \n\t").is_none());
        assert_eq!(state, ChatState::new());
    }

    #[test]
    fn missing_session_is_ignored() {
        let mut state = ChatState::new();
        let cycle = state.reduce(ChatAction::Submit { input: "Hej".to_string(), session_id: None });
        assert!(cycle.is_none());

        let cycle = state.reduce(ChatAction::Submit {
            input: "Hej".to_string(),
            session_id: Some(" ".to_string()),
        });
        assert!(cycle.is_none());
        assert_eq!(state, ChatState::new());
    }

    #[test]
    fn submit_appends_user_message_and_reserves_assistant_id() {
        let mut state = ChatState::new();
        let cycle = submit(&mut state, " Vad beslutades? ").unwrap();

        assert_eq!(
            cycle.request,
            ChatRequest { message: " Vad beslutades? ".to_string(), session_id: "sess-1".to_string() }
        );
        let user = state.messages().last().unwrap();
        assert_eq!(user.sender, Sender::User);
        assert_eq!(user.text, " Vad beslutades? ");
        assert!(cycle.assistant_id > user.id);
        assert!(state.is_loading());
        assert_eq!(state.phase(), Phase::Sending);
        // Placeholder appears only with the first chunk.
        assert_eq!(state.messages().len(), 2);
    }

    #[test]
    fn second_submit_is_blocked_while_in_flight() {
        let mut state = ChatState::new();
        submit(&mut state, "Första").unwrap();
        assert!(submit(&mut state, "Andra").is_none());

        chunk(&mut state, "Svar");
        assert!(submit(&mut state, "Andra").is_none());
        assert_eq!(state.messages().len(), 3);
    }

    #[test]
    fn chunks_replace_text_cumulatively() {
        let mut state = ChatState::new();
        let cycle = submit(&mut state, "Hej").unwrap();

        chunk(&mut state, "Hel");
        assert_eq!(state.phase(), Phase::Streaming);
        assert!(!state.is_loading());
        let reply = state.messages().last().unwrap();
        assert_eq!(reply.id, cycle.assistant_id);
        assert_eq!(reply.sender, Sender::Ai);
        assert_eq!(reply.text, "Hel");

        chunk(&mut state, "Hello");
        assert_eq!(last_text(&state), "Hello");
        assert_eq!(state.messages().len(), 3);

        state.reduce(ChatAction::StreamComplete { text: "Hello".to_string() });
        assert_eq!(last_text(&state), "Hello");
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.messages().len(), 3);
    }

    #[test]
    fn completion_applies_flushed_tail() {
        let mut state = ChatState::new();
        submit(&mut state, "Hej").unwrap();
        chunk(&mut state, "Mötet slutade kl ");
        state.reduce(ChatAction::StreamComplete { text: "Mötet slutade kl 15".to_string() });
        assert_eq!(last_text(&state), "Mötet slutade kl 15");
        assert!(!state.is_busy());
    }

    #[test]
    fn empty_stream_adds_no_reply() {
        let mut state = ChatState::new();
        submit(&mut state, "Hej").unwrap();
        state.reduce(ChatAction::StreamComplete { text: String::new() });
        assert_eq!(state.messages().len(), 2);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn error_before_first_chunk_adds_error_reply() {
        let mut state = ChatState::new();
        let cycle = submit(&mut state, "Hej").unwrap();
        state.reduce(ChatAction::Error);

        let reply = state.messages().last().unwrap();
        assert_eq!(reply.id, cycle.assistant_id);
        assert_eq!(reply.text, ERROR_TEXT);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn error_mid_stream_replaces_partial_reply() {
        let mut state = ChatState::new();
        submit(&mut state, "Hej").unwrap();
        chunk(&mut state, "Del");
        state.reduce(ChatAction::Error);

        assert_eq!(state.messages().len(), 3);
        assert_eq!(last_text(&state), ERROR_TEXT);
        assert!(submit(&mut state, "Igen").is_some());
    }

    #[test]
    fn late_actions_are_ignored_when_idle() {
        let mut state = ChatState::new();
        chunk(&mut state, "spöke");
        state.reduce(ChatAction::Error);
        state.reduce(ChatAction::StreamComplete { text: "spöke".to_string() });
        assert_eq!(state, ChatState::new());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut state = ChatState::new();
        let first = submit(&mut state, "Ett").unwrap();
        state.reduce(ChatAction::StreamComplete { text: String::new() });
        let second = submit(&mut state, "Två").unwrap();
        state.reduce(ChatAction::Error);

        assert_ne!(first.assistant_id, second.assistant_id);
        let mut ids: Vec<u64> = state.messages().iter().map(|m| m.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), state.messages().len());
        assert!(state.messages().iter().all(|m| m.id != first.assistant_id));
    }
}
