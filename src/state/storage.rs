//! State storage implementation
//!
//! In-memory conversation state keyed by user id, with expiration and a
//! periodic cleanup task. State is lost on restart; users simply start over.

use std::sync::Arc;
use std::time::Duration;
use dashmap::DashMap;
use tracing::{debug, info};
use crate::config::SubmissionConfig;
use super::context::{ConversationContext, ConversationState};

/// In-memory state storage
#[derive(Debug, Default)]
pub struct StateStorage {
    contexts: DashMap<i64, ConversationContext>,
    /// Lifetime of a context; `None` never expires
    ttl: Option<chrono::Duration>,
}

impl StateStorage {
    pub fn new(ttl: Option<chrono::Duration>) -> Self {
        Self {
            contexts: DashMap::new(),
            ttl,
        }
    }

    pub fn from_config(config: &SubmissionConfig) -> Self {
        let ttl = match config.state_ttl_seconds {
            0 => None,
            seconds => Some(chrono::Duration::seconds(seconds as i64)),
        };
        Self::new(ttl)
    }

    /// Current state of the user; expired contexts are dropped and read as idle
    pub fn get(&self, user_id: i64) -> Option<ConversationState> {
        let expired = match self.contexts.get(&user_id) {
            Some(context) if !context.is_expired() => return Some(context.state.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.contexts.remove_if(&user_id, |_, context| context.is_expired());
            debug!(user_id = user_id, "Conversation state expired");
        }
        None
    }

    /// Enter a state, replacing any previous one and restarting the TTL
    pub fn set(&self, user_id: i64, state: ConversationState) {
        debug!(user_id = user_id, state = state.name(), "Conversation state set");
        self.contexts.insert(user_id, ConversationContext::new(user_id, state, self.ttl));
    }

    /// Return to idle; returns whether there was anything to clear
    pub fn clear(&self, user_id: i64) -> bool {
        let removed = self.contexts.remove(&user_id).is_some();
        if removed {
            debug!(user_id = user_id, "Conversation state cleared");
        }
        removed
    }

    /// Number of stored contexts, expired ones included
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Drop every expired context
    pub fn purge_expired(&self) -> usize {
        let before = self.contexts.len();
        self.contexts.retain(|_, context| !context.is_expired());
        before.saturating_sub(self.contexts.len())
    }

    /// Start the periodic cleanup task
    pub fn spawn_cleanup(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let storage = Arc::clone(self);

        info!("Started state cleanup task with interval {:?}", interval);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let purged = storage.purge_expired();
                if purged > 0 {
                    info!("Cleanup task removed {} expired contexts", purged);
                }
            }
        })
    }
}
