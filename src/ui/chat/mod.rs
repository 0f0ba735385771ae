//! Chat-specific view models.
//!
//! These describe what the chat page shows for one request. Templates in
//! `templates/chat` turn them into HTML.

mod greeting;
mod header;
mod input_area;
mod message_list;
mod shell;
mod sidebar;

pub use greeting::{Greeting, shows_greeting};
pub use header::{
    ActionLink, ChatHeader, HeaderAction, MD_BREAKPOINT, VisibilityControl, VisibilityOption,
    shows_new_chat,
};
pub use input_area::Composer;
pub use message_list::{MessageView, message_views};
pub use shell::{ChatShell, ShellContext};
pub use sidebar::{ChatSidebar, SidebarItem};
