//! Empty-state greeting.

/// Whether the greeting is shown for a conversation of `message_count` messages.
#[must_use]
pub fn shows_greeting(message_count: usize) -> bool {
    message_count == 0
}

/// Fixed welcome copy for an empty conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    pub headline: String,
    pub prompt: String,
    pub note: String,
}

impl Greeting {
    #[must_use]
    pub fn for_owner(first_name: &str) -> Self {
        Self {
            headline: format!("I'm {first_name}'s Portfolio Assistant"),
            prompt: format!(
                "Ask me anything about {first_name}'s work, skills, experience, and case studies."
            ),
            note: format!(
                "For personal questions or deeper conversations, please book a call with {first_name} directly."
            ),
        }
    }

    /// The greeting when the conversation is still empty, otherwise nothing.
    #[must_use]
    pub fn when_empty(message_count: usize, first_name: &str) -> Option<Self> {
        shows_greeting(message_count).then(|| Self::for_owner(first_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_empty_conversations_greet() {
        assert!(shows_greeting(0));
        for count in [1, 2, 50] {
            assert!(!shows_greeting(count));
            assert!(Greeting::when_empty(count, "Tirth").is_none());
        }
    }

    #[test]
    fn test_copy_uses_owner_name() {
        let greeting = Greeting::when_empty(0, "Tirth").unwrap();
        assert_eq!(greeting.headline, "I'm Tirth's Portfolio Assistant");
        assert!(greeting.prompt.contains("Tirth's work"));
        assert!(greeting.note.ends_with("with Tirth directly."));
    }
}
