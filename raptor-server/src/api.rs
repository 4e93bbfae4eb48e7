//! The `GET /search` handler and its error-to-status mapping.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use raptor_core::cancellation::CancellationToken;
use raptor_core::error::QueryError;
use raptor_core::query::{LatLon, search_cancellable};

use crate::dto::{ErrorResponse, JourneyDto, SearchQuery, SearchResponse};
use crate::state::AppState;

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let model = state.current().await.ok_or(ApiError::ModelNotLoaded)?;

    let origin = LatLon { lat: query.from_lat, lon: query.from_lon };
    let destination = LatLon { lat: query.to_lat, lon: query.to_lon };

    let result = search_cancellable(
        &model,
        origin,
        destination,
        query.departure,
        state.default_search_options,
        &CancellationToken::none(),
    )
    .map_err(ApiError::Query)?;

    let journeys = result
        .journeys
        .iter()
        .map(|journey| JourneyDto::from_journey(journey, &result.meta))
        .collect();

    Ok(Json(SearchResponse {
        journeys,
        access_stop_count: result.meta.access_stop_count,
        egress_stop_count: result.meta.egress_stop_count,
        rounds_run: result.meta.rounds_run,
    }))
}

pub async fn health(State(state): State<AppState>) -> StatusCode {
    if state.current().await.is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Wraps every error the `/search` handler can produce, mapped to an HTTP
/// status per the query error's cause: 4xx for anything the caller could
/// fix by changing the request, 503/504 for the server running out of time
/// or capacity, 500 for an invariant the engine should never actually break.
pub enum ApiError {
    ModelNotLoaded,
    Query(QueryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::ModelNotLoaded => (
                StatusCode::SERVICE_UNAVAILABLE,
                "no timetable snapshot has loaded yet".to_string(),
            ),
            ApiError::Query(err) => {
                let status = match &err {
                    QueryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                    QueryError::NoAccessStops
                    | QueryError::NoEgressStops
                    | QueryError::NoJourneyFound => StatusCode::NOT_FOUND,
                    QueryError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
                    QueryError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                    QueryError::InternalInvariant(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
