use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::bookingdb::BookingExt,
    dtos::bookingdtos::{
        BookingListQueryDto, CancelBookingDto, CreateBookingDto, ProcessPaymentDto,
        UpdateBookingStatusDto,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::usermodel::UserType,
    AppState,
};

pub fn bookings_handler() -> Router {
    Router::new()
        .route("/", get(get_user_bookings).post(create_booking))
        .route("/payment", post(process_payment))
        .route("/:booking_id", get(get_booking))
        .route("/:booking_id/status", put(update_booking_status))
        .route("/:booking_id/cancel", post(cancel_booking))
}

pub async fn create_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if auth.user.user_type != UserType::CareSeeker {
        return Err(HttpError::forbidden("Only care seekers can create bookings"));
    }

    let booking = app_state
        .booking_service
        .create_booking(&auth.user, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Booking created successfully",
            "data": { "booking": booking }
        })),
    ))
}

pub async fn get_user_bookings(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(query): Query<BookingListQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let as_caregiver = query.role.as_deref() == Some("caregiver");
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(20) as i64;
    let offset = ((page - 1) as i64) * limit;

    let bookings = app_state
        .db_client
        .get_user_bookings(auth.user.id, as_caregiver, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "bookings": bookings }
    })))
}

pub async fn get_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .db_client
        .get_booking_by_id(booking_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Booking not found"))?;

    if !booking.can_be_accessed_by(&auth.user) {
        return Err(HttpError::forbidden("Not authorized to view this booking"));
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "booking": booking }
    })))
}

pub async fn update_booking_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<UpdateBookingStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .booking_service
        .update_status(&auth.user, booking_id, body.status)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Booking updated successfully",
        "data": { "booking": booking }
    })))
}

pub async fn cancel_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<CancelBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let booking = app_state
        .booking_service
        .cancel_booking(&auth.user, booking_id, body.reason)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Booking cancelled",
        "data": { "booking": booking }
    })))
}

pub async fn process_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<ProcessPaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (payment, booking) = app_state
        .booking_service
        .process_payment(&auth.user, body)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Payment processed successfully",
        "data": {
            "payment": payment,
            "booking": booking,
        }
    })))
}
