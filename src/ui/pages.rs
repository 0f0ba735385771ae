//! Askama templates for full pages and HTMX fragments.
//!
//! Fragments implement `Display` through askama, so pages embed them as
//! fields rendered with `|safe`.

use askama::Template;

use super::chat::{ChatHeader, ChatShell, VisibilityControl};
use super::nav::{NavBar, Section, SectionRegistry};

#[derive(Template, Debug)]
#[template(path = "partials/navbar.html")]
pub struct NavBarTemplate {
    pub nav: NavBar,
}

#[derive(Template, Debug)]
#[template(path = "chat/visibility_selector.html")]
pub struct VisibilitySelectorTemplate {
    pub control: VisibilityControl,
}

#[derive(Template, Debug)]
#[template(path = "chat/header.html")]
pub struct ChatHeaderTemplate {
    pub header: ChatHeader,
    /// Rendered selector, or an empty string for read-only viewers.
    pub visibility: String,
}

impl ChatHeaderTemplate {
    pub fn new(header: ChatHeader) -> Result<Self, askama::Error> {
        let visibility = match &header.visibility_control {
            Some(control) => VisibilitySelectorTemplate {
                control: control.clone(),
            }
            .render()?,
            None => String::new(),
        };
        Ok(Self { header, visibility })
    }
}

#[derive(Template, Debug)]
#[template(path = "chat/page.html")]
pub struct ChatPage {
    pub title: String,
    pub owner_first_name: String,
    pub header: ChatHeaderTemplate,
    pub shell: ChatShell,
}

impl ChatPage {
    pub fn new(shell: ChatShell, owner_first_name: &str) -> Result<Self, askama::Error> {
        Ok(Self {
            title: format!("Ask AI about {owner_first_name}"),
            owner_first_name: owner_first_name.to_string(),
            header: ChatHeaderTemplate::new(shell.header.clone())?,
            shell,
        })
    }
}

#[derive(Template, Debug)]
#[template(path = "home.html")]
pub struct HomePage {
    pub title: String,
    pub owner_name: String,
    pub nav: NavBarTemplate,
    pub sections: Vec<Section>,
}

impl HomePage {
    #[must_use]
    pub fn new(owner_name: &str) -> Self {
        let sections = SectionRegistry::home();
        Self {
            title: owner_name.to_string(),
            owner_name: owner_name.to_string(),
            nav: NavBarTemplate {
                nav: NavBar::for_route(owner_name, "/", &sections),
            },
            sections: sections.sections().to_vec(),
        }
    }
}

#[derive(Template, Debug)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub title: String,
    pub nav: NavBarTemplate,
    pub path: String,
}

impl NotFoundPage {
    #[must_use]
    pub fn new(owner_name: &str, path: &str) -> Self {
        Self {
            title: format!("Not found - {owner_name}"),
            nav: NavBarTemplate {
                nav: NavBar::for_route(owner_name, path, &SectionRegistry::empty()),
            },
            path: path.to_string(),
        }
    }
}
