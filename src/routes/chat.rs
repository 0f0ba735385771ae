//! Chat pages and the form endpoints behind the header and composer.

use askama::Template;
use axum::{
    Extension, Form,
    extract::{Path, State},
    http::{HeaderMap, HeaderName, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::{parse_chat_id, validate_content};
use crate::AppState;
use crate::error::AppError;
use crate::session::{Message, ResolvedChat, Visibility};
use crate::ui::chat::{ChatHeader, ChatShell, ShellContext, VisibilityControl};
use crate::ui::layout::{self, LayoutState};
use crate::ui::pages::{ChatHeaderTemplate, ChatPage, VisibilitySelectorTemplate};
use crate::viewer::Viewer;

const ACCEPT_CH: HeaderName = HeaderName::from_static("accept-ch");

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("hx-request")
}

fn render_chat(
    state: &AppState,
    viewer: Viewer,
    layout: LayoutState,
    chat: &ResolvedChat,
) -> Result<Response, AppError> {
    let ctx = ShellContext {
        store: &state.sessions,
        viewer: viewer.id,
        layout,
        owner_first_name: state.config.site.owner_first_name(),
        max_message_chars: state.config.session.max_message_chars,
    };
    let page = ChatPage::new(ChatShell::build(chat, &ctx), ctx.owner_first_name)?;
    let html = page.render()?;

    Ok((
        [
            (ACCEPT_CH, "Sec-CH-Viewport-Width"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        Html(html),
    )
        .into_response())
}

/// GET /chat - Allocate a fresh session and render it.
///
/// The URL stays `/chat`; every visit yields a new id.
pub async fn new_chat(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    layout: LayoutState,
) -> Result<Response, AppError> {
    let session = state.sessions.allocate(viewer.id);
    tracing::info!(
        chat_id = %session.id(),
        viewer_id = %viewer.id,
        new_viewer = viewer.is_new,
        "New chat session"
    );

    let chat = state.sessions.resolve(session.id(), viewer.id)?;
    render_chat(&state, viewer, layout, &chat)
}

/// GET /chat/{id} - Resume or view a session.
pub async fn show_chat(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<String>,
    layout: LayoutState,
) -> Result<Response, AppError> {
    let chat_id = parse_chat_id(&id)?;
    let chat = state.sessions.resolve(chat_id, viewer.id)?;
    tracing::debug!(
        chat_id = %chat_id,
        viewer_id = %viewer.id,
        is_readonly = chat.is_readonly,
        message_count = chat.messages.len(),
        "Rendering chat"
    );
    render_chat(&state, viewer, layout, &chat)
}

/// GET /chat/{id}/header - Header fragment, re-requested on resize.
pub async fn header_fragment(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<String>,
    layout: LayoutState,
) -> Result<Html<String>, AppError> {
    let chat_id = parse_chat_id(&id)?;
    let chat = state.sessions.resolve(chat_id, viewer.id)?;
    let header = ChatHeader::new(chat.chat_id, chat.visibility, chat.is_readonly, layout);
    Ok(Html(ChatHeaderTemplate::new(header)?.render()?))
}

#[derive(Debug, Deserialize)]
pub struct VisibilityForm {
    visibility: Visibility,
}

/// POST /chat/{id}/visibility - Owner-only visibility change.
pub async fn update_visibility(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<VisibilityForm>,
) -> Result<Response, AppError> {
    let chat_id = parse_chat_id(&id)?;
    let visibility = state
        .sessions
        .set_visibility(chat_id, viewer.id, form.visibility)?;

    if is_htmx(&headers) {
        let fragment = VisibilitySelectorTemplate {
            control: VisibilityControl::new(chat_id, visibility),
        };
        return Ok(Html(fragment.render()?).into_response());
    }
    Ok(Redirect::to(&format!("/chat/{chat_id}")).into_response())
}

#[derive(Debug, Deserialize)]
pub struct MessageForm {
    message: String,
}

/// POST /chat/{id}/messages - Append the owner's message.
pub async fn post_message(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<String>,
    Form(form): Form<MessageForm>,
) -> Result<Redirect, AppError> {
    let chat_id = parse_chat_id(&id)?;
    let content = validate_content(&form.message, state.config.session.max_message_chars)?;
    state
        .sessions
        .append_message(chat_id, viewer.id, Message::user(content))?;
    Ok(Redirect::to(&format!("/chat/{chat_id}")))
}

#[derive(Debug, Deserialize)]
pub struct SidebarForm {
    #[serde(default)]
    return_to: Option<String>,
}

/// POST /ui/sidebar - Flip the sidebar cookie and go back.
pub async fn toggle_sidebar(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SidebarForm>,
) -> (CookieJar, Redirect) {
    let open = !layout::sidebar_open(&jar, state.config.ui.sidebar_default_open);
    let target = layout::safe_return_path(form.return_to.as_deref());
    tracing::debug!(sidebar_open = open, return_to = %target, "Sidebar toggled");
    (
        jar.add(layout::sidebar_cookie(open)),
        Redirect::to(target),
    )
}
