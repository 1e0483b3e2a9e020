//! AI Guardian Page
//!
//! A chat with a stand-in assistant plus a feed of recent interventions.
//!
//! ```text
//! submit(text) → user message appended now
//!              → ViewScope::schedule_after(delay)
//!                    → backend.reply(text) → assistant message appended
//!              (close() before the delay drops the reply)
//! ```

pub mod backend;
pub mod chat;
pub mod interventions;

pub use backend::{AssistantBackend, CannedAssistant, CANNED_REPLIES, FALLBACK_REPLY, GREETING};
pub use chat::{ChatMessage, ChatSession, PendingReply, Sender};
pub use interventions::{recent_interventions, Intervention, InterventionKind, Severity};
