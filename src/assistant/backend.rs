//! Assistant backends
//!
//! The chat page only needs "submit text, eventually receive reply text".
//! [`CannedAssistant`] answers from a fixed table and stands in for a real
//! model.

use async_trait::async_trait;
use std::collections::HashMap;

/// Something that answers a chat prompt
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Produce the reply text for a prompt
    async fn reply(&self, prompt: &str) -> String;
}

/// Opening message of every chat session
pub const GREETING: &str =
    "Hello! I noticed Leo has been playing Roblox for 90 minutes. Shall I suggest a break?";

/// Reply used when no canned prompt matches
pub const FALLBACK_REPLY: &str =
    "I can certainly help with that. I'll keep an eye on it and let you know if anything changes.";

/// Prompts offered as suggestion chips, with their replies
pub const CANNED_REPLIES: &[(&str, &str)] = &[
    (
        "Set a 30-minute gaming limit",
        "Done. Gaming apps will soft-lock after 30 minutes today, with a 5-minute warning first.",
    ),
    (
        "Suggest an outdoor activity",
        "The weather looks great this afternoon. How about soccer in the park? Central Park Fields has open time after 4 PM.",
    ),
    (
        "How is the medication routine going?",
        "Morning doses were on time all week. The 4 PM dose ran late twice; a reminder alarm at 3:50 PM could help.",
    ),
    (
        "Why was a video blocked?",
        "A YouTube video matched flagged keywords at 10:23 AM, so the content filter blocked it. You can review it under Recent Interventions.",
    ),
];

/// Exact-match prompt table with a generic fallback
#[derive(Debug, Clone)]
pub struct CannedAssistant {
    replies: HashMap<String, String>,
    fallback: String,
}

impl CannedAssistant {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            replies: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Builder method: add a prompt and its reply
    pub fn with_reply(mut self, prompt: impl Into<String>, reply: impl Into<String>) -> Self {
        self.replies.insert(prompt.into(), reply.into());
        self
    }

    /// Prompts this assistant has a specific answer for
    pub fn prompts(&self) -> Vec<&str> {
        let mut prompts: Vec<&str> = self.replies.keys().map(String::as_str).collect();
        prompts.sort_unstable();
        prompts
    }

    /// Pick the reply for a prompt, matching the trimmed text exactly
    pub fn lookup(&self, prompt: &str) -> &str {
        self.replies
            .get(prompt.trim())
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

impl Default for CannedAssistant {
    fn default() -> Self {
        CANNED_REPLIES
            .iter()
            .fold(CannedAssistant::new(FALLBACK_REPLY), |assistant, (prompt, reply)| {
                assistant.with_reply(*prompt, *reply)
            })
    }
}

#[async_trait]
impl AssistantBackend for CannedAssistant {
    fn name(&self) -> &str {
        "canned"
    }

    async fn reply(&self, prompt: &str) -> String {
        self.lookup(prompt).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exact_prompt_gets_mapped_reply() {
        let assistant = CannedAssistant::default();
        let reply = assistant.reply("Set a 30-minute gaming limit").await;
        assert_eq!(reply, CANNED_REPLIES[0].1);
    }

    #[tokio::test]
    async fn test_surrounding_whitespace_ignored() {
        let assistant = CannedAssistant::default();
        let reply = assistant.reply("  Suggest an outdoor activity\n").await;
        assert_eq!(reply, CANNED_REPLIES[1].1);
    }

    #[tokio::test]
    async fn test_near_miss_gets_fallback() {
        let assistant = CannedAssistant::default();
        assert_eq!(assistant.reply("set a 30-minute gaming limit").await, FALLBACK_REPLY);
        assert_eq!(assistant.reply("What's for dinner?").await, FALLBACK_REPLY);
    }

    #[test]
    fn test_prompts_listed() {
        let assistant = CannedAssistant::new("fallback").with_reply("b", "2").with_reply("a", "1");
        assert_eq!(assistant.prompts(), vec!["a", "b"]);
    }
}
