//! The `/api/points` marker resource.
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use starmap_shared::models::{DeleteResponse, ErrorBody, Marker, MarkerRef, MarkerUpdate, NewMarker};
use thiserror::Error;

use crate::storage::{Storage, StoreError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Point not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(e) => {
                tracing::error!(error = %e, "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(storage: Arc<Storage>) -> Router {
    Router::new()
        .route(
            "/api/points",
            get(list_points)
                .post(create_point)
                .put(update_point)
                .delete(delete_point),
        )
        .with_state(storage)
}

async fn list_points(State(storage): State<Arc<Storage>>) -> Result<Json<Vec<Marker>>, ApiError> {
    Ok(Json(storage.list_markers()?))
}

async fn create_point(
    State(storage): State<Arc<Storage>>,
    Json(input): Json<NewMarker>,
) -> Result<(StatusCode, Json<Marker>), ApiError> {
    let marker = storage.create_marker(input)?;
    tracing::info!(id = marker.id, x = marker.x, y = marker.y, "marker created");
    Ok((StatusCode::CREATED, Json(marker)))
}

async fn update_point(
    State(storage): State<Arc<Storage>>,
    Json(input): Json<MarkerUpdate>,
) -> Result<Json<Marker>, ApiError> {
    let id = input.id;
    let marker = storage.update_marker(input)?.ok_or(ApiError::NotFound)?;
    tracing::info!(id, "marker updated");
    Ok(Json(marker))
}

async fn delete_point(
    State(storage): State<Arc<Storage>>,
    Json(input): Json<MarkerRef>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !storage.delete_marker(input.id)? {
        return Err(ApiError::NotFound);
    }
    tracing::info!(id = input.id, "marker deleted");
    Ok(Json(DeleteResponse { success: true }))
}
