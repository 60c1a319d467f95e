use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::models::{ErrorResponse, NetworthOptions, NetworthRequest};
use crate::services::networth::{NetworthError, ProfileNetworthCalculator};
use crate::state::AppState;

/// Every failure, from an unparseable body to an engine error, leaves the
/// service as a 400 carrying only a message string. The one exception is the
/// body-size cap, which stays observable as the framework's 413.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                message: self.message,
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            StatusCode::PAYLOAD_TOO_LARGE
        } else {
            StatusCode::BAD_REQUEST
        };
        Self {
            status,
            message: rejection.body_text(),
        }
    }
}

impl From<NetworthError> for ApiError {
    fn from(err: NetworthError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

/// `POST /networth` — forward the payload to the valuation engine and pass
/// its result back verbatim.
pub async fn compute_networth(
    State(state): State<AppState>,
    payload: Result<Json<NetworthRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(NetworthRequest {
        profile,
        bank,
        museum_data,
    }) = payload?;

    // The calculator lives and dies with this one request.
    let calc = ProfileNetworthCalculator::new(state.engine.clone(), profile, museum_data, bank);

    match calc.get_networth(&NetworthOptions::default()).await {
        Ok(networth) => Ok(Json(networth)),
        Err(e) => {
            tracing::error!("Error computing networth: {}", e);
            Err(e.into())
        }
    }
}
