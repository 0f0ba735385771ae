//! Conversation thread and session storage.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::{ChatId, Message, MessageRole, Visibility};
use crate::viewer::ViewerId;

/// Maximum characters of the first user message used as a title.
const TITLE_MAX_CHARS: usize = 40;

/// Access failures when a viewer touches a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// Unknown id, or a private session the viewer does not own.
    #[error("chat {0} not found")]
    NotFound(ChatId),
    /// The viewer can see the session but does not own it.
    #[error("chat {0} is read-only for this viewer")]
    ReadOnly(ChatId),
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// A single conversation session.
///
/// Cloning is cheap; clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    id: ChatId,
    owner: ViewerId,
    visibility: RwLock<Visibility>,
    messages: RwLock<Vec<Message>>,
    created_at: DateTime<Utc>,
    last_activity: RwLock<DateTime<Utc>>,
}

impl Session {
    fn new(id: ChatId, owner: ViewerId) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(SessionInner {
                id,
                owner,
                visibility: RwLock::new(Visibility::default()),
                messages: RwLock::new(Vec::new()),
                created_at: now,
                last_activity: RwLock::new(now),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> ChatId {
        self.inner.id
    }

    #[must_use]
    pub fn owner(&self) -> ViewerId {
        self.inner.owner
    }

    #[must_use]
    pub fn is_owned_by(&self, viewer: ViewerId) -> bool {
        self.inner.owner == viewer
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        *read(&self.inner.visibility)
    }

    fn set_visibility(&self, visibility: Visibility) {
        *write(&self.inner.visibility) = visibility;
        self.touch();
    }

    /// Append a message and return the new message count.
    fn push_message(&self, message: Message) -> usize {
        let mut guard = write(&self.inner.messages);
        guard.push(message);
        let count = guard.len();
        drop(guard);
        self.touch();
        count
    }

    /// Get all messages in insertion order.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        read(&self.inner.messages).clone()
    }

    #[must_use]
    pub fn message_count(&self) -> usize {
        read(&self.inner.messages).len()
    }

    /// Short label derived from the first user message.
    #[must_use]
    pub fn title(&self) -> String {
        let guard = read(&self.inner.messages);
        let Some(first) = guard.iter().find(|m| m.role == MessageRole::User) else {
            return "New chat".to_string();
        };
        let text = first.content.trim();
        if text.chars().count() > TITLE_MAX_CHARS {
            let head: String = text.chars().take(TITLE_MAX_CHARS).collect();
            format!("{}…", head.trim_end())
        } else {
            text.to_string()
        }
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    #[must_use]
    pub fn last_activity(&self) -> DateTime<Utc> {
        *read(&self.inner.last_activity)
    }

    fn touch(&self) {
        *write(&self.inner.last_activity) = Utc::now();
    }

    /// Check if the session has been idle longer than `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        // A negative span means clock skew; never expire on that.
        (Utc::now() - self.last_activity())
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }
}

/// A session resolved for one viewer: the inputs the chat page renders from.
#[derive(Debug, Clone)]
pub struct ResolvedChat {
    pub chat_id: ChatId,
    pub visibility: Visibility,
    /// True when the viewer is not the owner. Computed per request, never stored.
    pub is_readonly: bool,
    pub messages: Vec<Message>,
}

/// Thread-safe store for sessions.
///
/// Also tracks the single active session of every viewer.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug, Default)]
struct SessionStoreInner {
    sessions: RwLock<HashMap<ChatId, Session>>,
    active: RwLock<HashMap<ViewerId, ChatId>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh session for `owner` and make it their active one.
    ///
    /// The previous active session is dropped if it never received a
    /// message, so a viewer holds at most one empty session.
    pub fn allocate(&self, owner: ViewerId) -> Session {
        let mut sessions = write(&self.inner.sessions);
        let mut active = write(&self.inner.active);

        let mut id = ChatId::new();
        while sessions.contains_key(&id) {
            id = ChatId::new();
        }
        let session = Session::new(id, owner);
        sessions.insert(id, session.clone());

        let previous = active.insert(owner, id);
        let discarded = previous
            .filter(|prev| sessions.get(prev).is_some_and(|s| s.message_count() == 0))
            .and_then(|prev| sessions.remove(&prev));
        drop(active);
        drop(sessions);

        tracing::debug!(
            chat_id = %id,
            viewer_id = %owner,
            previous = ?previous,
            discarded_empty = discarded.is_some(),
            "Allocated chat session"
        );
        session
    }

    #[must_use]
    pub fn get(&self, id: ChatId) -> Option<Session> {
        read(&self.inner.sessions).get(&id).cloned()
    }

    /// Look a session up on behalf of `viewer`.
    fn visible_to(&self, id: ChatId, viewer: ViewerId) -> Result<Session, AccessError> {
        let session = self.get(id).ok_or(AccessError::NotFound(id))?;
        if !session.is_owned_by(viewer) && session.visibility() == Visibility::Private {
            return Err(AccessError::NotFound(id));
        }
        Ok(session)
    }

    fn owned_by(&self, id: ChatId, viewer: ViewerId) -> Result<Session, AccessError> {
        let session = self.visible_to(id, viewer)?;
        if session.is_owned_by(viewer) {
            Ok(session)
        } else {
            Err(AccessError::ReadOnly(id))
        }
    }

    /// Resolve `{ visibility, is_readonly, messages }` for a viewer.
    ///
    /// Owners resolving their own session make it their active one.
    pub fn resolve(&self, id: ChatId, viewer: ViewerId) -> Result<ResolvedChat, AccessError> {
        let session = self.visible_to(id, viewer)?;
        let is_readonly = !session.is_owned_by(viewer);
        if !is_readonly {
            write(&self.inner.active).insert(viewer, id);
        }
        Ok(ResolvedChat {
            chat_id: id,
            visibility: session.visibility(),
            is_readonly,
            messages: session.messages(),
        })
    }

    /// Change visibility. Only the owner may do this.
    pub fn set_visibility(
        &self,
        id: ChatId,
        viewer: ViewerId,
        visibility: Visibility,
    ) -> Result<Visibility, AccessError> {
        let session = self.owned_by(id, viewer)?;
        session.set_visibility(visibility);
        tracing::info!(
            chat_id = %id,
            viewer_id = %viewer,
            visibility = %visibility,
            "Chat visibility changed"
        );
        Ok(visibility)
    }

    /// Append a message to an owned session and return the new count.
    pub fn append_message(
        &self,
        id: ChatId,
        viewer: ViewerId,
        message: Message,
    ) -> Result<usize, AccessError> {
        let session = self.owned_by(id, viewer)?;
        let role = message.role;
        let count = session.push_message(message);
        tracing::debug!(
            chat_id = %id,
            role = role.as_str(),
            message_count = count,
            "Appended message"
        );
        Ok(count)
    }

    /// The viewer's active session, if it still exists.
    #[must_use]
    pub fn active_for(&self, viewer: ViewerId) -> Option<ChatId> {
        read(&self.inner.active).get(&viewer).copied()
    }

    /// Sessions owned by `viewer` that hold at least one message, newest activity first.
    #[must_use]
    pub fn history_for(&self, viewer: ViewerId) -> Vec<Session> {
        let mut sessions: Vec<Session> = read(&self.inner.sessions)
            .values()
            .filter(|s| s.is_owned_by(viewer) && s.message_count() > 0)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| std::cmp::Reverse(s.last_activity()));
        sessions
    }

    pub fn remove(&self, id: ChatId) -> Option<Session> {
        let removed = write(&self.inner.sessions).remove(&id);
        if removed.is_some() {
            write(&self.inner.active).retain(|_, active| *active != id);
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        read(&self.inner.sessions).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evict idle sessions.
    ///
    /// Sessions without messages use the shorter `empty_ttl`.
    /// Returns the number of sessions removed.
    pub fn cleanup_expired(&self, idle_timeout: Duration, empty_ttl: Duration) -> usize {
        let mut guard = write(&self.inner.sessions);
        let before = guard.len();
        guard.retain(|_, session| {
            let ttl = if session.message_count() == 0 {
                empty_ttl.min(idle_timeout)
            } else {
                idle_timeout
            };
            !session.is_expired_with_timeout(ttl)
        });
        let removed = before - guard.len();
        if removed > 0 {
            write(&self.inner.active).retain(|_, id| guard.contains_key(id));
        }
        removed
    }
}
