use std::sync::Arc;

use axum::{
    extract::Query,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    dtos::locationdtos::{
        AutocompleteQueryDto, DistanceQueryDto, GeocodeQueryDto, PlaceDetailsQueryDto,
    },
    error::HttpError,
    AppState,
};

pub fn location_handler() -> Router {
    Router::new()
        .route("/autocomplete", get(autocomplete))
        .route("/details", get(place_details))
        .route("/geocode", get(geocode))
        .route("/distance", get(distance))
}

pub async fn autocomplete(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<AutocompleteQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .places_service
        .autocomplete(&query.input, query.sessiontoken.as_deref())
        .await;

    Ok(Json(result))
}

pub async fn place_details(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<PlaceDetailsQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .places_service
        .place_details(&query.place_id, query.sessiontoken.as_deref())
        .await;

    Ok(Json(result))
}

pub async fn geocode(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<GeocodeQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state.places_service.geocode(&query.address).await;

    Ok(Json(result))
}

pub async fn distance(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<DistanceQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let result = app_state.places_service.distance(
        (query.origin_lat, query.origin_lng),
        (query.dest_lat, query.dest_lng),
    );

    Ok(Json(result))
}
