use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{error, info};

use crate::domain::{Executor, Run, Runset, RunsetTemplate};
use crate::errors::{CoreError, CoreErrorKind};
use crate::ml::ModelInfo;
use crate::server::app::AppState;

/// `CoreError` rendered as a status code and `{"error": message}` body.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

pub fn status_for(kind: CoreErrorKind) -> StatusCode {
    match kind {
        CoreErrorKind::NotFound => StatusCode::NOT_FOUND,
        CoreErrorKind::Validation => StatusCode::BAD_REQUEST,
        CoreErrorKind::Conflict => StatusCode::CONFLICT,
        CoreErrorKind::Forbidden => StatusCode::FORBIDDEN,
        CoreErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        CoreErrorKind::Unavailable => StatusCode::BAD_GATEWAY,
        CoreErrorKind::Internal | CoreErrorKind::UnresolvedType => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind());
        if status.is_server_error() {
            error!("ML request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.message() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn list_models(State(state): State<AppState>) -> ApiResult<Vec<ModelInfo>> {
    Ok(Json(state.services.ml.list_models().await?))
}

pub async fn get_model(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> ApiResult<ModelInfo> {
    Ok(Json(state.services.ml.get_model(&model_id).await?))
}

pub async fn get_model_runs(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> ApiResult<Vec<Run>> {
    info!("Listing runs of model {}", model_id);
    Ok(Json(state.services.ml.get_model_runs(&model_id).await?))
}

pub async fn list_runsets(State(state): State<AppState>) -> ApiResult<Vec<Runset>> {
    Ok(Json(state.services.ml.list_runsets().await?))
}

pub async fn get_runset(
    State(state): State<AppState>,
    Path(runset_id): Path<String>,
) -> ApiResult<Runset> {
    Ok(Json(state.services.ml.get_runset(&runset_id).await?))
}

pub async fn get_runset_template(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> ApiResult<RunsetTemplate> {
    Ok(Json(state.services.ml.get_runset_template(&template_id).await?))
}

pub async fn list_executors(State(state): State<AppState>) -> ApiResult<Vec<Executor>> {
    Ok(Json(state.services.ml.list_executors().await?))
}
