//! Chat header: session-scoped actions and the visibility control.

use crate::session::{ChatId, Visibility};
use crate::ui::components::{ButtonSize, ButtonVariant, button_classes};
use crate::ui::layout::LayoutState;

/// Tailwind `md` breakpoint in CSS pixels.
pub const MD_BREAKPOINT: u32 = 768;

/// Whether the "New Chat" shortcut belongs in the header.
///
/// Shown when the sidebar is collapsed or the viewport is narrower than
/// [`MD_BREAKPOINT`]. An unknown width counts as narrow.
#[must_use]
pub fn shows_new_chat(sidebar_open: bool, viewport_width: Option<u32>) -> bool {
    !sidebar_open || viewport_width.is_none_or(|width| width < MD_BREAKPOINT)
}

/// Navigation the header can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    NewChat,
    GoHome,
    GoToWork,
    HireMe,
}

impl HeaderAction {
    /// Entries of the slide-out menu, in order.
    pub const MENU: [Self; 3] = [Self::GoHome, Self::GoToWork, Self::HireMe];

    /// Route the action navigates to.
    ///
    /// `NewChat` always targets the bare chat route, whatever session is open.
    #[must_use]
    pub fn target(self) -> &'static str {
        match self {
            Self::NewChat => "/chat",
            Self::GoHome => "/",
            Self::GoToWork => "/work",
            Self::HireMe => "/#contact",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NewChat => "New Chat",
            Self::GoHome => "Home",
            Self::GoToWork => "Work",
            Self::HireMe => "Hire me",
        }
    }

    /// Actions that must bypass client-side (boosted) navigation so the
    /// server renders fresh data.
    #[must_use]
    pub fn full_reload(self) -> bool {
        matches!(self, Self::NewChat | Self::HireMe)
    }

    fn classes(self) -> String {
        match self {
            Self::NewChat => button_classes(
                ButtonVariant::Outline,
                ButtonSize::Toolbar,
                "order-2 ml-auto md:order-1 md:ml-0",
            ),
            Self::HireMe => button_classes(ButtonVariant::Accent, ButtonSize::Block, ""),
            Self::GoHome | Self::GoToWork => {
                button_classes(ButtonVariant::Outline, ButtonSize::Block, "")
            }
        }
    }
}

/// A rendered link for a [`HeaderAction`].
#[derive(Debug, Clone)]
pub struct ActionLink {
    pub action: HeaderAction,
    pub label: &'static str,
    pub href: &'static str,
    pub class: String,
    pub full_reload: bool,
    pub is_home: bool,
}

impl From<HeaderAction> for ActionLink {
    fn from(action: HeaderAction) -> Self {
        Self {
            action,
            label: action.label(),
            href: action.target(),
            class: action.classes(),
            full_reload: action.full_reload(),
            is_home: action == HeaderAction::GoHome,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VisibilityOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub selected: bool,
}

/// The mutable visibility selector.
#[derive(Debug, Clone)]
pub struct VisibilityControl {
    pub chat_id: ChatId,
    pub selected: Visibility,
    pub options: Vec<VisibilityOption>,
}

impl VisibilityControl {
    #[must_use]
    pub fn new(chat_id: ChatId, selected: Visibility) -> Self {
        let options = Visibility::ALL
            .into_iter()
            .map(|v| VisibilityOption {
                value: v.as_str(),
                label: v.label(),
                description: v.description(),
                selected: v == selected,
            })
            .collect();
        Self {
            chat_id,
            selected,
            options,
        }
    }

    /// The control for this viewer, or nothing at all when read-only.
    ///
    /// Read-only viewers get no control, not a disabled one.
    #[must_use]
    pub fn for_viewer(chat_id: ChatId, selected: Visibility, is_readonly: bool) -> Option<Self> {
        (!is_readonly).then(|| Self::new(chat_id, selected))
    }

    #[must_use]
    pub fn action(&self) -> String {
        format!("/chat/{}/visibility", self.chat_id)
    }
}

/// Everything the header renders for one request.
#[derive(Debug, Clone)]
pub struct ChatHeader {
    pub chat_id: ChatId,
    pub sidebar_open: bool,
    pub new_chat: Option<ActionLink>,
    pub visibility_control: Option<VisibilityControl>,
    pub menu: Vec<ActionLink>,
    pub toolbar_class: String,
    /// Width unknown: the fragment re-fetches itself on load to report it.
    pub measure_width: bool,
}

impl ChatHeader {
    #[must_use]
    pub fn new(
        chat_id: ChatId,
        selected_visibility: Visibility,
        is_readonly: bool,
        layout: LayoutState,
    ) -> Self {
        Self {
            chat_id,
            sidebar_open: layout.sidebar_open,
            new_chat: shows_new_chat(layout.sidebar_open, layout.viewport_width)
                .then(|| HeaderAction::NewChat.into()),
            visibility_control: VisibilityControl::for_viewer(
                chat_id,
                selected_visibility,
                is_readonly,
            ),
            menu: HeaderAction::MENU.into_iter().map(ActionLink::from).collect(),
            toolbar_class: button_classes(ButtonVariant::Outline, ButtonSize::Toolbar, ""),
            measure_width: layout.viewport_width.is_none(),
        }
    }

    /// URL the header re-fetches itself from on resize.
    #[must_use]
    pub fn refresh_url(&self) -> String {
        format!("/chat/{}/header", self.chat_id)
    }
}
