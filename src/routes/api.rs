//! JSON API over the session store.
//!
//! Applies the same ownership rules as the HTML routes: private sessions
//! are 404 to non-owners and every mutation is owner-only.

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_chat_id, validate_content};
use crate::AppState;
use crate::error::AppError;
use crate::session::{ChatId, Message, MessageRole, ResolvedChat, Session, Visibility};
use crate::viewer::Viewer;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chats", get(list_chats).post(create_chat))
        .route("/chats/{id}", get(get_chat))
        .route("/chats/{id}/visibility", put(update_visibility))
        .route("/chats/{id}/messages", get(get_messages).post(post_message))
}

/// A session as seen by the requesting viewer.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatDto {
    pub id: ChatId,
    pub visibility: Visibility,
    pub is_readonly: bool,
    pub messages: Vec<Message>,
}

impl From<ResolvedChat> for ChatDto {
    fn from(chat: ResolvedChat) -> Self {
        Self {
            id: chat.chat_id,
            visibility: chat.visibility,
            is_readonly: chat.is_readonly,
            messages: chat.messages,
        }
    }
}

/// History entry for the sidebar and `GET /api/chats`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: ChatId,
    pub title: String,
    pub message_count: usize,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Session> for ChatSummary {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id(),
            title: session.title(),
            message_count: session.message_count(),
            visibility: session.visibility(),
            created_at: session.created_at(),
            updated_at: session.last_activity(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub visibility: Visibility,
}

#[derive(Debug, Deserialize)]
pub struct NewMessage {
    pub content: String,
    #[serde(default)]
    pub role: MessageRole,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageAppended {
    pub message_count: usize,
}

/// POST /api/chats
async fn create_chat(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<(StatusCode, Json<ChatDto>), AppError> {
    let session = state.sessions.allocate(viewer.id);
    let chat = state.sessions.resolve(session.id(), viewer.id)?;
    Ok((StatusCode::CREATED, Json(chat.into())))
}

/// GET /api/chats - The viewer's own non-empty sessions.
async fn list_chats(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Json<Vec<ChatSummary>> {
    Json(
        state
            .sessions
            .history_for(viewer.id)
            .iter()
            .map(ChatSummary::from)
            .collect(),
    )
}

/// GET /api/chats/{id}
async fn get_chat(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<String>,
) -> Result<Json<ChatDto>, AppError> {
    let chat = state.sessions.resolve(parse_chat_id(&id)?, viewer.id)?;
    Ok(Json(chat.into()))
}

/// PUT /api/chats/{id}/visibility
async fn update_visibility(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<String>,
    Json(body): Json<VisibilityRequest>,
) -> Result<Json<ChatDto>, AppError> {
    let chat_id = parse_chat_id(&id)?;
    state
        .sessions
        .set_visibility(chat_id, viewer.id, body.visibility)?;
    let chat = state.sessions.resolve(chat_id, viewer.id)?;
    Ok(Json(chat.into()))
}

/// GET /api/chats/{id}/messages
async fn get_messages(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Message>>, AppError> {
    let chat = state.sessions.resolve(parse_chat_id(&id)?, viewer.id)?;
    Ok(Json(chat.messages))
}

/// POST /api/chats/{id}/messages
async fn post_message(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<String>,
    Json(body): Json<NewMessage>,
) -> Result<(StatusCode, Json<MessageAppended>), AppError> {
    let chat_id = parse_chat_id(&id)?;
    let content = validate_content(&body.content, state.config.session.max_message_chars)?;
    let message_count =
        state
            .sessions
            .append_message(chat_id, viewer.id, Message::new(body.role, content))?;
    Ok((StatusCode::CREATED, Json(MessageAppended { message_count })))
}
