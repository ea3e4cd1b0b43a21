// file: src/session.rs
// description: append-only chat transcript scoped to one interactive session
// reference: internal data structures

use crate::models::{ChatRole, ChatTurn};
use uuid::Uuid;

/// Transcript for one run of the shell. Created when the shell starts and
/// dropped when it exits; nothing is written to disk.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    transcript: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            transcript: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn append(&mut self, turn: ChatTurn) {
        self.transcript.push(turn);
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    /// Number of user turns recorded so far.
    pub fn turn_count(&self) -> usize {
        self.transcript
            .iter()
            .filter(|turn| turn.role() == ChatRole::User)
            .count()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
