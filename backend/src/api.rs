use crate::error::ApiResult;
use crate::store::{NewPiece, Piece, PieceStore};
use axum::{
    extract::{rejection::JsonRejection, Json, Path, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use chess_rules::Square;
use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub pieces: PieceStore,
}

#[derive(Debug, Default, Deserialize)]
pub struct MovesQuery {
    pub coordinate: Option<String>,
}

/// Build the API router over an already initialized database pool
pub fn router(db: Pool<Sqlite>) -> Router {
    let state = AppState {
        pieces: PieceStore::new(db),
    };

    Router::new()
        .route("/health", get(health))
        .route("/pieces", get(list_pieces).post(create_piece))
        .route("/pieces/{id}", get(get_piece))
        .route("/pieces/{id}/moves", get(piece_moves))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn create_piece(
    State(state): State<AppState>,
    payload: Result<Json<NewPiece>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Piece>)> {
    let Json(request) = payload?;
    let piece = state.pieces.create(&request).await?;
    Ok((StatusCode::CREATED, Json(piece)))
}

async fn list_pieces(State(state): State<AppState>) -> ApiResult<Json<Vec<Piece>>> {
    Ok(Json(state.pieces.list().await?))
}

async fn get_piece(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Piece>> {
    Ok(Json(state.pieces.get(id).await?))
}

/// Destinations for the piece standing on `?coordinate=`
///
/// The piece is looked up first, so an unknown id is a 404 even when the
/// coordinate is also bad.
async fn piece_moves(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<MovesQuery>,
) -> ApiResult<Json<Vec<Square>>> {
    let piece = state.pieces.get(id).await?;
    let moves = chess_rules::legal_moves(piece.kind, query.coordinate.as_deref())?;

    tracing::debug!(
        id,
        kind = %piece.kind,
        coordinate = ?query.coordinate,
        count = moves.len(),
        "computed moves"
    );
    Ok(Json(moves))
}
