use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{
    db::{bookingdb::BookingExt, profiledb::ProfileExt, testimonialdb::TestimonialExt},
    error::HttpError,
    models::bookingmodel::BookingStatus,
    AppState,
};

pub fn public_handler() -> Router {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/testimonials", get(get_testimonials))
}

pub async fn get_stats(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let caregivers = app_state
        .db_client
        .count_caregivers()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let care_seekers = app_state
        .db_client
        .count_care_seekers()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let completed_bookings = app_state
        .db_client
        .count_bookings_by_status(BookingStatus::Completed)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "caregivers": caregivers,
            "careSeekers": care_seekers,
            "completedBookings": completed_bookings,
        }
    })))
}

pub async fn get_testimonials(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let testimonials = app_state
        .db_client
        .get_featured_testimonials(10)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "testimonials": testimonials }
    })))
}
