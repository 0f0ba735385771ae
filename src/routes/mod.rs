//! HTTP handlers.
//!
//! - [`home`]: home page, health check, static files and 404
//! - [`chat`]: server-rendered chat pages and their HTMX form endpoints
//! - [`api`]: JSON access to the same sessions

pub mod api;
pub mod chat;
pub mod home;

use crate::error::AppError;
use crate::session::ChatId;

/// Parse a path segment as a chat id. Malformed ids are indistinguishable
/// from unknown ones.
fn parse_chat_id(raw: &str) -> Result<ChatId, AppError> {
    raw.parse::<ChatId>().ok().ok_or(AppError::UnknownChat)
}

/// Trim a submitted message and enforce the length limit.
fn validate_content(raw: &str, max_chars: usize) -> Result<&str, AppError> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("message is empty".to_string()));
    }
    let chars = content.chars().count();
    if chars > max_chars {
        return Err(AppError::BadRequest(format!(
            "message is {chars} characters, limit is {max_chars}"
        )));
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_id() {
        let id = ChatId::new();
        assert_eq!(parse_chat_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_chat_id("not-a-chat"),
            Err(AppError::UnknownChat)
        ));
    }

    #[test]
    fn test_validate_content() {
        assert_eq!(validate_content("  hello \n", 10).unwrap(), "hello");
        assert!(matches!(
            validate_content("   ", 10),
            Err(AppError::BadRequest(_))
        ));
        assert!(validate_content("ééééé", 5).is_ok());
        assert!(validate_content("ééééé!", 5).is_err());
    }
}
