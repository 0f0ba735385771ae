//! Chat shell: the full chat view for one resolved session.

use super::{ChatHeader, ChatSidebar, Composer, Greeting, MessageView, message_views};
use crate::session::{ChatId, ResolvedChat, SessionStore, Visibility};
use crate::ui::layout::LayoutState;
use crate::viewer::ViewerId;

/// Request-scoped inputs the shell needs besides the session itself.
#[derive(Debug, Clone, Copy)]
pub struct ShellContext<'a> {
    pub store: &'a SessionStore,
    pub viewer: ViewerId,
    pub layout: LayoutState,
    pub owner_first_name: &'a str,
    pub max_message_chars: usize,
}

/// Provides the complete chat layout:
/// - Header with session actions
/// - Greeting while the conversation is empty
/// - Message list
/// - Composer for the owner
/// - History sidebar while it is open
#[derive(Debug, Clone)]
pub struct ChatShell {
    pub chat_id: ChatId,
    pub visibility: Visibility,
    pub is_readonly: bool,
    pub header: ChatHeader,
    pub greeting: Option<Greeting>,
    pub messages: Vec<MessageView>,
    pub composer: Option<Composer>,
    pub sidebar: Option<ChatSidebar>,
}

impl ChatShell {
    #[must_use]
    pub fn build(chat: &ResolvedChat, ctx: &ShellContext<'_>) -> Self {
        Self {
            chat_id: chat.chat_id,
            visibility: chat.visibility,
            is_readonly: chat.is_readonly,
            header: ChatHeader::new(chat.chat_id, chat.visibility, chat.is_readonly, ctx.layout),
            greeting: Greeting::when_empty(chat.messages.len(), ctx.owner_first_name),
            messages: message_views(&chat.messages),
            composer: Composer::for_viewer(chat.chat_id, chat.is_readonly, ctx.max_message_chars),
            sidebar: ctx
                .layout
                .sidebar_open
                .then(|| ChatSidebar::for_viewer(ctx.store, ctx.viewer, chat.chat_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Message;

    fn ctx<'a>(store: &'a SessionStore, viewer: ViewerId, sidebar_open: bool) -> ShellContext<'a> {
        ShellContext {
            store,
            viewer,
            layout: LayoutState {
                sidebar_open,
                viewport_width: Some(1280),
            },
            owner_first_name: "Tirth",
            max_message_chars: 4000,
        }
    }

    #[test]
    fn test_fresh_session_for_owner() {
        let store = SessionStore::new();
        let owner = ViewerId::new();
        let session = store.allocate(owner);
        let chat = store.resolve(session.id(), owner).unwrap();

        let shell = ChatShell::build(&chat, &ctx(&store, owner, true));
        assert!(!shell.is_readonly);
        assert!(shell.greeting.is_some());
        assert!(shell.composer.is_some());
        assert!(shell.sidebar.is_some());
        let control = shell.header.visibility_control.unwrap();
        assert_eq!(control.selected, Visibility::Private);
    }

    #[test]
    fn test_shared_session_for_reader() {
        let store = SessionStore::new();
        let owner = ViewerId::new();
        let reader = ViewerId::new();
        let session = store.allocate(owner);
        store
            .append_message(session.id(), owner, Message::user("hello"))
            .unwrap();
        store
            .set_visibility(session.id(), owner, Visibility::Public)
            .unwrap();
        let chat = store.resolve(session.id(), reader).unwrap();

        let shell = ChatShell::build(&chat, &ctx(&store, reader, false));
        assert!(shell.is_readonly);
        assert!(shell.header.visibility_control.is_none());
        assert!(shell.composer.is_none());
        assert!(shell.greeting.is_none());
        assert!(shell.sidebar.is_none());
        assert_eq!(shell.messages.len(), 1);
    }
}
