//! Message list rows.

use crate::session::{Message, MessageRole};

/// One message as rendered in the conversation column.
#[derive(Debug, Clone)]
pub struct MessageView {
    pub role: &'static str,
    pub author: &'static str,
    pub content: String,
    pub timestamp: String,
    pub is_user: bool,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.as_str(),
            author: match message.role {
                MessageRole::User => "You",
                MessageRole::Assistant => "Assistant",
            },
            content: message.content.clone(),
            timestamp: message.created_at.to_rfc3339(),
            is_user: message.role == MessageRole::User,
        }
    }
}

/// Rows in insertion order.
#[must_use]
pub fn message_views(messages: &[Message]) -> Vec<MessageView> {
    messages.iter().map(MessageView::from).collect()
}
