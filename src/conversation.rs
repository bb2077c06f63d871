// 💬 Conversation Store - Dialogue history keyed by conversation id
// Callers own the conversation identifier; the store keeps an ordered turn
// list per id. Created on first recorded turn, removed by explicit clear,
// gone at process exit - nothing persists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
        }
    }
}

/// One dialogue turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// In-memory dialogue history, shared across request handlers.
pub struct ConversationStore {
    conversations: RwLock<HashMap<String, Vec<ConversationTurn>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        ConversationStore {
            conversations: RwLock::new(HashMap::new()),
        }
    }

    /// Mint a fresh conversation id. The id itself does not create an
    /// entry; the first recorded turn does.
    pub fn begin(&self) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "conv_{}_{}",
            Utc::now().format("%Y%m%d_%H%M%S"),
            &suffix[..8]
        )
    }

    /// Append a turn, creating the conversation on first use.
    pub fn record(&self, conversation_id: &str, role: Role, message: &str) {
        let mut conversations = self.conversations.write().unwrap();
        conversations
            .entry(conversation_id.to_string())
            .or_default()
            .push(ConversationTurn {
                role,
                message: message.to_string(),
                timestamp: Utc::now(),
            });
    }

    /// Ordered history for a conversation; empty for unknown ids.
    pub fn history(&self, conversation_id: &str) -> Vec<ConversationTurn> {
        self.conversations
            .read()
            .unwrap()
            .get(conversation_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Drop a conversation. Returns whether it existed.
    pub fn clear(&self, conversation_id: &str) -> bool {
        self.conversations
            .write()
            .unwrap()
            .remove(conversation_id)
            .is_some()
    }

    /// Ids of every active conversation.
    pub fn ids(&self) -> Vec<String> {
        self.conversations.read().unwrap().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.conversations.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
