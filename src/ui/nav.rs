//! Site navigation bar and in-page section scrolling.

use crate::ui::components::{ButtonSize, ButtonVariant, button_classes};

/// Answers whether the current page contains a named section.
pub trait SectionLocator {
    fn contains(&self, id: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
}

/// Sections rendered by one page, keyed by anchor id.
#[derive(Debug, Clone, Default)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    /// A page without anchor sections.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The sections of the home page.
    #[must_use]
    pub fn home() -> Self {
        let mut registry = Self::empty();
        registry.register("approach", "Approach");
        registry.register("about", "About");
        registry.register("contact", "Contact");
        registry
    }

    pub fn register(&mut self, id: &'static str, title: &'static str) {
        if !self.contains(id) {
            self.sections.push(Section { id, title });
        }
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

impl SectionLocator for SectionRegistry {
    fn contains(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s.id == id)
    }
}

/// Where a section link takes the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Scroll within the current document.
    InPage(String),
    /// Load the home page and let the browser jump to the anchor.
    Navigate(String),
}

impl ScrollTarget {
    #[must_use]
    pub fn href(&self) -> &str {
        match self {
            Self::InPage(href) | Self::Navigate(href) => href,
        }
    }

    #[must_use]
    pub fn is_in_page(&self) -> bool {
        matches!(self, Self::InPage(_))
    }
}

/// Resolve a section link against the sections of the current page.
#[must_use]
pub fn scroll_to_section(locator: &impl SectionLocator, id: &str) -> ScrollTarget {
    if locator.contains(id) {
        ScrollTarget::InPage(format!("#{id}"))
    } else {
        ScrollTarget::Navigate(format!("/#{id}"))
    }
}

#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: &'static str,
    pub href: String,
    pub class: String,
    /// Smooth-scrolls within the page instead of navigating.
    pub in_page: bool,
    pub current: bool,
}

impl NavLink {
    fn route(label: &'static str, href: &str, path: &str) -> Self {
        Self {
            label,
            href: href.to_string(),
            class: button_classes(ButtonVariant::NavLink, ButtonSize::Text, ""),
            in_page: false,
            current: path == href || (href != "/" && path.starts_with(&format!("{href}/"))),
        }
    }

    fn section(label: &'static str, target: &ScrollTarget, variant: ButtonVariant) -> Self {
        let size = if variant == ButtonVariant::Accent {
            ButtonSize::Sm
        } else {
            ButtonSize::Text
        };
        Self {
            label,
            href: target.href().to_string(),
            class: button_classes(variant, size, ""),
            in_page: target.is_in_page(),
            current: false,
        }
    }
}

/// Primary navigation for every page.
#[derive(Debug, Clone)]
pub struct NavBar {
    pub brand: String,
    pub links: Vec<NavLink>,
    pub hire_me: NavLink,
}

impl NavBar {
    #[must_use]
    pub fn for_route(brand: &str, path: &str, locator: &impl SectionLocator) -> Self {
        let links = vec![
            NavLink::route("Work", "/work", path),
            NavLink::section(
                "Approach",
                &scroll_to_section(locator, "approach"),
                ButtonVariant::NavLink,
            ),
            NavLink::section(
                "About",
                &scroll_to_section(locator, "about"),
                ButtonVariant::NavLink,
            ),
            NavLink::route("AI Chat", "/chat", path),
        ];
        Self {
            brand: brand.to_string(),
            links,
            hire_me: NavLink::section(
                "Hire me",
                &scroll_to_section(locator, "contact"),
                ButtonVariant::Accent,
            ),
        }
    }
}
