//! Server-rendered UI.
//!
//! View models are plain structs computed per request; askama templates
//! under `templates/` render them.
//!
//! # Structure
//!
//! - [`chat`]: Chat header, greeting, message list, composer and sidebar
//! - [`nav`]: Site navigation and in-page section scrolling
//! - [`layout`]: Sidebar flag and viewport width for the current request
//! - [`components`]: Shared button styling
//! - [`pages`]: Askama page and fragment templates

pub mod chat;
pub mod components;
pub mod layout;
pub mod nav;
pub mod pages;
