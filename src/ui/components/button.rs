//! Button styling shared by the header, navigation and menus.

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Primary action button.
    #[default]
    Primary,
    /// Outline button.
    Outline,
    /// Call-to-action accent ("Hire me").
    Accent,
    /// Plain text link inside a bar.
    NavLink,
}

impl ButtonVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "bg-primary text-white hover:bg-primaryMuted",
            Self::Outline => "bg-transparent border border-panelBorder text-textPrimary hover:bg-panel",
            Self::Accent => "bg-cyan-500 text-white hover:bg-cyan-600",
            Self::NavLink => "text-muted-foreground hover:text-foreground transition-colors",
        }
    }
}

/// Button size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSize {
    /// Small button.
    Sm,
    /// Header toolbar button: compact on mobile, natural height from `md` up.
    Toolbar,
    /// Full-width menu entry.
    Block,
    /// Bare text, no padding.
    Text,
}

impl ButtonSize {
    /// Get CSS classes for this size.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Sm => "h-8 px-3 text-xs",
            Self::Toolbar => "h-8 px-2 md:h-fit md:px-2",
            Self::Block => "w-full justify-start h-10 px-4 text-sm",
            Self::Text => "text-sm",
        }
    }
}

const BASE_CLASSES: &str = "inline-flex items-center gap-2 rounded-lg font-medium \
                            transition-colors focus-visible:outline-none focus-visible:ring-2 \
                            focus-visible:ring-primary focus-visible:ring-offset-2";

/// Full class list for a button-like element.
#[must_use]
pub fn button_classes(variant: ButtonVariant, size: ButtonSize, extra: &str) -> String {
    let mut classes = format!("{BASE_CLASSES} {} {}", variant.classes(), size.classes());
    if !extra.is_empty() {
        classes.push(' ');
        classes.push_str(extra);
    }
    classes
}
