//! Single-threaded conversation log
//!
//! Plain append-only storage with no synchronization of its own.
//! [`ConversationStore`](super::ConversationStore) wraps it for shared use.

use std::collections::HashMap;

use super::ConversationTurn;

#[derive(Debug)]
struct Conversation {
    /// First-seen order, used for stable listing
    seq: u64,
    turns: Vec<ConversationTurn>,
}

/// Keyed append-only log of conversation turns
#[derive(Debug, Default)]
pub struct ConversationLog {
    conversations: HashMap<String, Conversation>,
    next_seq: u64,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, creating the conversation on first use
    pub fn append(&mut self, conversation_id: &str, turn: ConversationTurn) {
        let next_seq = &mut self.next_seq;
        self.conversations
            .entry(conversation_id.to_string())
            .or_insert_with(|| {
                let seq = *next_seq;
                *next_seq += 1;
                Conversation {
                    seq,
                    turns: Vec::new(),
                }
            })
            .turns
            .push(turn);
    }

    /// Every turn of a conversation, oldest first (empty if unknown)
    pub fn history(&self, conversation_id: &str) -> &[ConversationTurn] {
        self.conversations
            .get(conversation_id)
            .map(|c| c.turns.as_slice())
            .unwrap_or(&[])
    }

    /// The trailing `size` turns of a conversation
    pub fn window(&self, conversation_id: &str, size: usize) -> &[ConversationTurn] {
        let turns = self.history(conversation_id);
        &turns[turns.len().saturating_sub(size)..]
    }

    /// Remove a conversation; returns false if it was unknown
    pub fn clear(&mut self, conversation_id: &str) -> bool {
        self.conversations.remove(conversation_id).is_some()
    }

    /// Known conversation ids in first-seen order
    pub fn list_ids(&self) -> Vec<&str> {
        let mut entries: Vec<(&String, u64)> = self
            .conversations
            .iter()
            .map(|(id, c)| (id, c.seq))
            .collect();
        entries.sort_by_key(|(_, seq)| *seq);
        entries.into_iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
