//! Shared styling for server-rendered components.
//!
//! - [`ButtonVariant`], [`ButtonSize`]: class mappings in the shadcn/ui manner

mod button;

pub use button::{ButtonSize, ButtonVariant, button_classes};
