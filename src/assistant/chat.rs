//! Chat session with the assistant
//!
//! User messages land immediately; the assistant's answer lands after a
//! fixed delay, and only if the session is still open by then.

use super::backend::{AssistantBackend, GREETING};
use crate::error::{GuardianError, GuardianResult};
use crate::timer::ViewScope;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One bubble in the conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
}

/// Handle to an assistant reply that has not landed yet
#[derive(Debug)]
pub struct PendingReply {
    handle: JoinHandle<bool>,
}

impl PendingReply {
    /// Wait for the reply. `false` if the session closed first.
    pub async fn wait(self) -> bool {
        match self.handle.await {
            Ok(delivered) => delivered,
            Err(e) => {
                tracing::warn!(error = %e, "Assistant reply task failed");
                false
            }
        }
    }
}

/// The AI Guardian conversation
pub struct ChatSession {
    messages: Arc<RwLock<Vec<ChatMessage>>>,
    next_id: Arc<AtomicU64>,
    backend: Arc<dyn AssistantBackend>,
    reply_delay: Duration,
    scope: ViewScope,
}

impl ChatSession {
    /// Open a session that starts with the assistant's greeting
    pub fn new(backend: Arc<dyn AssistantBackend>, reply_delay: Duration) -> Self {
        let greeting = ChatMessage {
            id: 1,
            sender: Sender::Assistant,
            text: GREETING.to_string(),
        };

        Self {
            messages: Arc::new(RwLock::new(vec![greeting])),
            next_id: Arc::new(AtomicU64::new(2)),
            backend,
            reply_delay,
            scope: ViewScope::new("assistant-chat"),
        }
    }

    /// Conversation so far, oldest first
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.read().await.clone()
    }

    /// Post a user message and schedule the assistant's answer
    pub async fn submit(&self, text: &str) -> GuardianResult<(ChatMessage, PendingReply)> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GuardianError::Validation(
                "Message cannot be empty".to_string(),
            ));
        }
        if self.scope.is_closed() {
            return Err(GuardianError::Validation(
                "Chat session is closed".to_string(),
            ));
        }

        let message = ChatMessage {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            sender: Sender::User,
            text: text.to_string(),
        };
        self.messages.write().await.push(message.clone());

        tracing::debug!(id = message.id, backend = self.backend.name(), "Chat message submitted");

        let messages = Arc::clone(&self.messages);
        let next_id = Arc::clone(&self.next_id);
        let backend = Arc::clone(&self.backend);
        let token = self.scope.token();
        let prompt = message.text.clone();

        let handle = self.scope.schedule_after(self.reply_delay, async move {
            let text = backend.reply(&prompt).await;
            if token.is_cancelled() {
                return;
            }

            let reply = ChatMessage {
                id: next_id.fetch_add(1, Ordering::SeqCst),
                sender: Sender::Assistant,
                text,
            };
            tracing::debug!(id = reply.id, "Assistant replied");
            messages.write().await.push(reply);
        })?;

        Ok((message, PendingReply { handle }))
    }

    /// Tear the chat view down; replies still in flight are dropped
    pub fn close(&self) {
        self.scope.close();
    }

    pub fn is_closed(&self) -> bool {
        self.scope.is_closed()
    }
}
