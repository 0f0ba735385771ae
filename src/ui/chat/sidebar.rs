//! Conversation history sidebar.

use crate::session::{ChatId, SessionStore};
use crate::viewer::ViewerId;

#[derive(Debug, Clone)]
pub struct SidebarItem {
    pub title: String,
    pub href: String,
    pub active: bool,
    pub updated: String,
}

/// The viewer's own conversations, newest first.
#[derive(Debug, Clone)]
pub struct ChatSidebar {
    pub items: Vec<SidebarItem>,
}

impl ChatSidebar {
    #[must_use]
    pub fn for_viewer(store: &SessionStore, viewer: ViewerId, current: ChatId) -> Self {
        let items = store
            .history_for(viewer)
            .into_iter()
            .map(|session| SidebarItem {
                title: session.title(),
                href: format!("/chat/{}", session.id()),
                active: session.id() == current,
                updated: session.last_activity().format("%b %d, %H:%M").to_string(),
            })
            .collect();
        Self { items }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Message;

    #[test]
    fn test_marks_current_chat() {
        let store = SessionStore::new();
        let viewer = ViewerId::new();
        let older = store.allocate(viewer);
        store
            .append_message(older.id(), viewer, Message::user("older"))
            .unwrap();
        let current = store.allocate(viewer);
        store
            .append_message(current.id(), viewer, Message::user("current"))
            .unwrap();

        let sidebar = ChatSidebar::for_viewer(&store, viewer, current.id());
        assert_eq!(sidebar.items.len(), 2);
        let active: Vec<_> = sidebar.items.iter().filter(|i| i.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "current");
        assert_eq!(active[0].href, format!("/chat/{}", current.id()));
    }
}
