//! Chat session identity, visibility and storage.
//!
//! This module owns the data layer behind the chat shell: it allocates
//! session identifiers, records who owns each session, and decides what a
//! given viewer may see or change.
//!
//! # Architecture
//!
//! - [`ChatId`]: Opaque identifier of a conversation
//! - [`Visibility`]: Private/public flag, mutable only by the owner
//! - [`Session`]: A single conversation and its message history
//! - [`SessionStore`]: Thread-safe store for all sessions plus each viewer's active session
//!
//! # Example
//!
//! ```rust
//! use portfolio_chat::session::{Message, SessionStore};
//! use portfolio_chat::viewer::ViewerId;
//!
//! let store = SessionStore::new();
//! let owner = ViewerId::new();
//! let session = store.allocate(owner);
//! store.append_message(session.id(), owner, Message::user("Hello!")).unwrap();
//!
//! let resolved = store.resolve(session.id(), owner).unwrap();
//! assert!(!resolved.is_readonly);
//! assert_eq!(resolved.messages.len(), 1);
//! ```

mod id;
mod message;
mod thread;
mod visibility;

pub use id::ChatId;
pub use message::{Message, MessageRole};
pub use thread::{AccessError, ResolvedChat, Session, SessionStore};
pub use visibility::{ParseVisibilityError, Visibility};
