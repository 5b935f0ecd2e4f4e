//! Chat history between a user and the assistant

use crate::responder::{KeywordResponder, GREETING};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Message history, opened with the assistant's greeting
#[derive(Debug, Clone)]
pub struct Conversation {
    responder: KeywordResponder,
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(responder: KeywordResponder) -> Self {
        let mut conversation = Self {
            responder,
            messages: Vec::new(),
        };
        conversation.push(Role::Assistant, GREETING.to_string());
        conversation
    }

    /// Record the user's message and the reply; returns the reply.
    ///
    /// An empty message is rejected and leaves the history untouched.
    pub fn send(&mut self, content: &str) -> Result<&Message> {
        let reply = self.responder.respond(content)?.to_string();
        self.push(Role::User, content.to_string());
        Ok(self.push(Role::Assistant, reply))
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn push(&mut self, role: Role, content: String) -> &Message {
        let id = self.messages.len() as u64 + 1;
        self.messages.push(Message {
            id,
            role,
            content,
            timestamp: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(KeywordResponder::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_starts_with_greeting() {
        let conversation = Conversation::default();
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].role, Role::Assistant);
        assert_eq!(conversation.messages()[0].content, GREETING);
    }

    #[test]
    fn test_send_appends_pair() {
        let mut conversation = Conversation::default();
        let reply = conversation.send("any trend worth watching?").unwrap().clone();

        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.contains("Current trends"));

        let roles: Vec<_> = conversation.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        let ids: Vec<_> = conversation.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_send_leaves_history() {
        let mut conversation = Conversation::default();
        assert_eq!(conversation.send("").unwrap_err(), Error::EmptyMessage);
        assert_eq!(conversation.messages().len(), 1);
    }

    #[test]
    fn test_message_json() {
        let conversation = Conversation::default();
        let value = serde_json::to_value(&conversation.messages()[0]).unwrap();
        assert_eq!(value["role"], "assistant");
        assert!(value["timestamp"].is_string());
    }
}
