//! Message composer.

use crate::session::ChatId;

/// The message form at the bottom of an editable chat.
#[derive(Debug, Clone)]
pub struct Composer {
    pub action: String,
    pub max_chars: usize,
    pub placeholder: &'static str,
}

impl Composer {
    /// Read-only viewers cannot post, so they get no composer.
    #[must_use]
    pub fn for_viewer(chat_id: ChatId, is_readonly: bool, max_chars: usize) -> Option<Self> {
        (!is_readonly).then(|| Self {
            action: format!("/chat/{chat_id}/messages"),
            max_chars,
            placeholder: "Send a message...",
        })
    }
}
