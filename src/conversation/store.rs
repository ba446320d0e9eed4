//! Shared conversation store
//!
//! Owns the synchronization for [`ConversationLog`]. Reads and writes go
//! through an `RwLock`; a per-conversation async mutex lets the chat service
//! hold a conversation exclusively across the window read, the upstream call
//! and the final append, so each conversation's turns follow the order in
//! which requests complete. A sequencer only lives while some request holds
//! or waits on it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::sync::OwnedMutexGuard;
use tracing::debug;

use super::{ConversationLog, ConversationTurn};

type Sequencers = Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>;

/// Thread-safe handle over the conversation log
#[derive(Debug, Default)]
pub struct ConversationStore {
    log: RwLock<ConversationLog>,
    sequencers: Sequencers,
}

/// Exclusive hold on one conversation
///
/// Dropping the lease releases the conversation and forgets its sequencer
/// once no other request is queued on it.
#[derive(Debug)]
pub struct ConversationLease {
    conversation_id: String,
    guard: Option<OwnedMutexGuard<()>>,
    sequencers: Sequencers,
}

impl Drop for ConversationLease {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut sequencers = self
            .sequencers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if sequencers
            .get(&self.conversation_id)
            .is_some_and(|s| Arc::strong_count(s) == 1)
        {
            sequencers.remove(&self.conversation_id);
        }
    }
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire exclusive use of a conversation for a read-call-append sequence
    ///
    /// Requests for the same id queue up; other ids are unaffected.
    pub async fn acquire(&self, conversation_id: &str) -> ConversationLease {
        let sequencer = {
            let mut sequencers = self
                .sequencers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            sequencers
                .entry(conversation_id.to_string())
                .or_default()
                .clone()
        };
        let guard = sequencer.lock_owned().await;

        ConversationLease {
            conversation_id: conversation_id.to_string(),
            guard: Some(guard),
            sequencers: self.sequencers.clone(),
        }
    }

    /// Number of conversations currently held or waited on
    pub fn active_sequencers(&self) -> usize {
        self.sequencers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn append(&self, conversation_id: &str, turn: ConversationTurn) {
        self.write().append(conversation_id, turn);
    }

    /// Append a user turn and its reply under a single write lock
    pub fn append_exchange(
        &self,
        conversation_id: &str,
        user: ConversationTurn,
        assistant: ConversationTurn,
    ) {
        let mut log = self.write();
        log.append(conversation_id, user);
        log.append(conversation_id, assistant);
        debug!(
            conversation_id = %conversation_id,
            turns = log.history(conversation_id).len(),
            "Conversation updated"
        );
    }

    /// Full history of a conversation (empty if unknown)
    pub fn history(&self, conversation_id: &str) -> Vec<ConversationTurn> {
        self.read().history(conversation_id).to_vec()
    }

    /// Trailing `size` turns of a conversation
    pub fn window(&self, conversation_id: &str, size: usize) -> Vec<ConversationTurn> {
        self.read().window(conversation_id, size).to_vec()
    }

    /// Delete a conversation; returns false if it was unknown
    pub fn clear(&self, conversation_id: &str) -> bool {
        self.write().clear(conversation_id)
    }

    /// Known conversation ids in first-seen order
    pub fn list_ids(&self) -> Vec<String> {
        self.read()
            .list_ids()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, ConversationLog> {
        self.log.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, ConversationLog> {
        self.log.write().unwrap_or_else(PoisonError::into_inner)
    }
}
