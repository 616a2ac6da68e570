//! Append-only conversation log and the slice of it sent upstream.

use dogechat_core::models::message::{Message, Role};
use uuid::Uuid;

/// Log length at or below which the session counts as "early": only the
/// greeting and the first user message so far.
const EARLY_SESSION_LEN: usize = 2;

/// The authoritative, in-memory message log for one session.
#[derive(Debug, Clone)]
pub struct Conversation {
    id: Uuid,
    messages: Vec<Message>,
    history_limit: usize,
}

impl Conversation {
    /// Start a session whose log opens with the assistant's greeting.
    pub fn with_greeting(greeting: impl Into<String>, history_limit: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: vec![Message::assistant(greeting)],
            history_limit,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_early(&self) -> bool {
        self.messages.len() <= EARLY_SESSION_LEN
    }

    /// Messages to send upstream for the next completion.
    ///
    /// The system prompt leads the snapshot only while the session is early.
    /// Snapshots longer than `history_limit + 1` keep the most recent
    /// `history_limit` messages; an early session gets its system prompt put
    /// back in front if the cut removed it. The log itself is never touched.
    pub fn snapshot_for_upstream(&self, system_prompt: &str) -> Vec<Message> {
        let early = self.is_early();

        let mut snapshot = Vec::with_capacity(self.messages.len() + 1);
        if early {
            snapshot.push(Message::system(system_prompt));
        }
        snapshot.extend(self.messages.iter().cloned());

        if snapshot.len() > self.history_limit + 1 {
            let cut = snapshot.len() - self.history_limit;
            snapshot.drain(..cut);
            if early && snapshot.first().map(|m| m.role) != Some(Role::System) {
                snapshot.insert(0, Message::system(system_prompt));
            }
        }

        snapshot
    }
}
