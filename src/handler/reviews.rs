use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{bookingdb::BookingExt, reviewdb::ReviewExt, userdb::UserExt},
    dtos::reviewdtos::CreateReviewDto,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::bookingmodel::BookingStatus,
    AppState,
};

pub fn reviews_handler() -> Router {
    Router::new()
        .route("/", post(create_review))
        .route("/user/:user_id", get(get_user_reviews))
}

pub async fn create_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.reviewed_user_id == auth.user.id {
        return Err(HttpError::bad_request("You cannot review yourself"));
    }

    let reviewed_user = app_state
        .db_client
        .get_user(Some(body.reviewed_user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Reviewed user not found"))?;

    if let Some(booking_id) = body.booking_id {
        let booking = app_state
            .db_client
            .get_booking_by_id(booking_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or_else(|| HttpError::not_found("Booking not found"))?;

        if !booking.is_participant(auth.user.id) {
            return Err(HttpError::forbidden(
                "Only booking participants can review this booking",
            ));
        }

        if !booking.is_participant(reviewed_user.id) {
            return Err(HttpError::bad_request(
                "Reviewed user is not part of this booking",
            ));
        }

        if booking.status != BookingStatus::Completed {
            return Err(HttpError::bad_request(
                "Only completed bookings can be reviewed",
            ));
        }

        let existing = app_state
            .db_client
            .get_review_for_booking(auth.user.id, booking_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        if existing.is_some() {
            return Err(HttpError::unique_constraint_violation(
                "You have already reviewed this booking",
            ));
        }
    }

    // Insert and rating recompute run in one transaction; any failure rolls
    // the whole creation back.
    let review = app_state
        .db_client
        .create_review(
            auth.user.id,
            body.reviewed_user_id,
            body.booking_id,
            body.rating,
            body.comment,
        )
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                HttpError::unique_constraint_violation("You have already reviewed this booking")
            }
            _ => HttpError::server_error("Failed to create review"),
        })?;

    app_state
        .notification_service
        .notify_new_review(&review)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Review created successfully",
            "data": { "review": review }
        })),
    ))
}

pub async fn get_user_reviews(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(_auth): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .get_user_reviews(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "reviews": reviews }
    })))
}
