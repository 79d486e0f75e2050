use axum::{
    Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::{
    api::SharedService,
    errors::ApiError,
    management::Storage,
    types::{ConfigCandidate, MegaapiConfig, ValidationResult},
};

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

pub async fn get_config<S: Storage + 'static>(
    Extension(service): Extension<SharedService<S>>,
) -> Json<Option<MegaapiConfig>> {
    Json(service.lock().await.get_config().cloned())
}

pub async fn save_config<S: Storage + 'static>(
    Extension(service): Extension<SharedService<S>>,
    Json(candidate): Json<ConfigCandidate>,
) -> Result<Json<ValidationResult>, ApiError> {
    let mut service = service.lock().await;
    let result = service.validate_and_save_config(candidate.into()).await?;
    Ok(Json(result))
}

pub async fn status<S: Storage + 'static>(
    Extension(service): Extension<SharedService<S>>,
) -> Result<Json<ValidationResult>, ApiError> {
    let result = service.lock().await.check_instance_status().await?;
    Ok(Json(result))
}

pub async fn clear_config<S: Storage + 'static>(
    Extension(service): Extension<SharedService<S>>,
) -> StatusCode {
    service.lock().await.clear_config().await;
    StatusCode::NO_CONTENT
}
