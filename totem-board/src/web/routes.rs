//! HTTP route handlers.

use std::path::Path;

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{debug, error, warn};

use crate::board::{Board, BoardError};
use crate::catalog::Catalog;
use crate::domain::InvalidDirection;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<C: Catalog>(
    state: AppState<C>,
    static_dir: impl AsRef<Path>,
) -> Router {
    Router::new()
        .route("/", get(index_page::<C>))
        .route("/health", get(health))
        .route("/api/board", get(board_json::<C>))
        .route("/select/line", post(select_line::<C>))
        .route("/select/direction", post(select_direction::<C>))
        .route("/select/stop", post(select_stop::<C>))
        .route("/favorites/toggle", post(toggle_favorite::<C>))
        .route("/favorites/remove", post(remove_favorite::<C>))
        .route("/favorites/open", post(open_favorite::<C>))
        .route("/catalog/retry", post(retry_catalog::<C>))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The board page, rendered through the askama/axum integration.
async fn index_page<C: Catalog>(State(state): State<AppState<C>>) -> IndexTemplate {
    let view = state.board.lock().await.snapshot();
    IndexTemplate::from_view(&view, state.refresh.as_secs())
}

/// The board as JSON.
async fn board_json<C: Catalog>(State(state): State<AppState<C>>) -> Json<BoardResponse> {
    let board = state.board.lock().await.snapshot();
    Json(BoardResponse {
        board,
        poll_interval_secs: state.refresh.as_secs(),
    })
}

async fn select_line<C: Catalog>(
    State(state): State<AppState<C>>,
    Form(form): Form<SelectLineForm>,
) -> Result<Redirect, AppError> {
    state.board.lock().await.select_line(&form.line).await?;
    Ok(back_to_board())
}

async fn select_direction<C: Catalog>(
    State(state): State<AppState<C>>,
    Form(form): Form<SelectDirectionForm>,
) -> Result<Redirect, AppError> {
    let direction = form.direction()?;
    state.board.lock().await.select_direction(direction).await?;
    Ok(back_to_board())
}

async fn select_stop<C: Catalog>(
    State(state): State<AppState<C>>,
    Form(form): Form<SelectStopForm>,
) -> Result<Redirect, AppError> {
    state.board.lock().await.select_stop(form.stop_id()).await?;
    Ok(back_to_board())
}

async fn toggle_favorite<C: Catalog>(
    State(state): State<AppState<C>>,
) -> Result<Redirect, AppError> {
    let starred = state.board.lock().await.toggle_favorite().await?;
    debug!(starred, "favorite toggled");
    Ok(back_to_board())
}

async fn remove_favorite<C: Catalog>(
    State(state): State<AppState<C>>,
    Form(form): Form<FavoriteForm>,
) -> Result<Redirect, AppError> {
    let entry = form.entry()?;
    state.board.lock().await.remove_favorite(&entry).await?;
    Ok(back_to_board())
}

async fn open_favorite<C: Catalog>(
    State(state): State<AppState<C>>,
    Form(form): Form<FavoriteForm>,
) -> Result<Redirect, AppError> {
    let entry = form.entry()?;
    state.board.lock().await.open_favorite(&entry).await?;
    Ok(back_to_board())
}

/// Reload the catalog. A failure is shown on the page, not returned.
///
/// The board stays readable, in the loading state, during the fetch.
async fn retry_catalog<C: Catalog>(State(state): State<AppState<C>>) -> Redirect {
    let _ = Board::retry(&state.board).await;
    back_to_board()
}

async fn not_found() -> impl IntoResponse {
    let page = ErrorTemplate {
        title: "Page introuvable".to_string(),
        message: "Cette page n'existe pas.".to_string(),
    };
    (StatusCode::NOT_FOUND, page)
}

/// Post/redirect/get: every action lands back on the page.
fn back_to_board() -> Redirect {
    Redirect::to("/")
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<BoardError> for AppError {
    fn from(e: BoardError) -> Self {
        match e {
            BoardError::CatalogNotReady => AppError::Unavailable {
                message: e.to_string(),
            },
            BoardError::Storage(_) => AppError::Internal {
                message: e.to_string(),
            },
            BoardError::UnknownLine(_)
            | BoardError::UnknownDirection { .. }
            | BoardError::UnavailableFavorite { .. }
            | BoardError::NoStopSelected => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl From<InvalidDirection> for AppError {
    fn from(e: InvalidDirection) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
