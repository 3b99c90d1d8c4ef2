use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use num_traits::ToPrimitive;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        bookingdb::BookingExt, profiledb::ProfileExt, testimonialdb::TestimonialExt,
        userdb::UserExt,
    },
    dtos::{
        admindtos::{
            AdminBookingQueryDto, AdminUpdateUserDto, AdminUserQueryDto, CreateTestimonialDto,
            UpdateTestimonialDto,
        },
        bookingdtos::UpdateBookingStatusDto,
        userdtos::{FilterUserDto, Response},
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::{bookingmodel::BookingStatus, profilemodels::VerificationStatus},
    AppState,
};

pub fn admin_handler() -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/users", get(get_users))
        .route(
            "/users/:user_id",
            get(get_user_details).put(update_user).delete(delete_user),
        )
        .route("/users/:user_id/suspend", post(suspend_user))
        .route("/users/:user_id/activate", post(activate_user))
        .route("/caregivers/:profile_id/approve", put(approve_caregiver))
        .route("/caregivers/:profile_id/reject", put(reject_caregiver))
        .route("/bookings", get(get_bookings))
        .route("/bookings/:booking_id/status", put(update_booking_status))
        .route("/testimonials", get(get_testimonials).post(create_testimonial))
        .route(
            "/testimonials/:testimonial_id",
            put(update_testimonial).delete(delete_testimonial),
        )
}

pub async fn dashboard(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let db = &app_state.db_client;

    let total_users = db
        .get_user_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let total_caregivers = db
        .count_caregivers()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let total_care_seekers = db
        .count_care_seekers()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let pending_caregiver_approvals = db
        .count_pending_caregivers()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let total_bookings = db
        .count_bookings()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let active_bookings = db
        .count_bookings_by_status(BookingStatus::Confirmed)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let total_revenue = db
        .total_revenue()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let recent_registrations = db
        .count_recent_users(7)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let recent_users = db
        .get_recent_users(5)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let recent_bookings = db
        .get_recent_bookings(5)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let pending_approvals = db
        .get_pending_caregiver_profiles(5)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "stats": {
                "totalUsers": total_users,
                "totalCaregivers": total_caregivers,
                "totalCareSeekers": total_care_seekers,
                "pendingCaregiverApprovals": pending_caregiver_approvals,
                "totalBookings": total_bookings,
                "activeBookings": active_bookings,
                "totalRevenue": total_revenue.to_f64().unwrap_or(0.0),
                "recentRegistrations": recent_registrations,
            },
            "activities": {
                "recentUsers": FilterUserDto::filter_users(&recent_users),
                "recentBookings": recent_bookings,
                "pendingApprovals": pending_approvals,
            }
        }
    })))
}

pub async fn get_users(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<AdminUserQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(15) as i64;
    let offset = ((page - 1) as i64) * limit;

    let (users, total) = app_state
        .db_client
        .search_users(&query, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "users": FilterUserDto::filter_users(&users),
            "total": total,
            "page": page,
            "perPage": limit,
        }
    })))
}

pub async fn get_user_details(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(Some(user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let caregiver_profile = app_state
        .db_client
        .get_caregiver_profile_by_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let care_seeker_profile = app_state
        .db_client
        .get_care_seeker_profile_by_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let as_caregiver = caregiver_profile.is_some();
    let bookings = app_state
        .db_client
        .get_user_bookings(user_id, as_caregiver, 50, 0)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "user": FilterUserDto::filter_user(&user),
            "caregiverProfile": caregiver_profile,
            "careSeekerProfile": care_seeker_profile,
            "bookings": bookings,
        }
    })))
}

pub async fn update_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<AdminUpdateUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_user(Some(user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_none() {
        return Err(HttpError::not_found("User not found"));
    }

    let user = app_state
        .db_client
        .admin_update_user(user_id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "User updated successfully",
        "data": { "user": FilterUserDto::filter_user(&user) }
    })))
}

pub async fn delete_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    if auth.user.id == user_id {
        return Err(HttpError::bad_request("You cannot delete your own account"));
    }

    let deleted = app_state
        .db_client
        .delete_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("User not found"));
    }

    Ok(Json(Response {
        success: true,
        message: "User deleted successfully".to_string(),
    }))
}

pub async fn suspend_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    if auth.user.id == user_id {
        return Err(HttpError::bad_request("You cannot suspend your own account"));
    }

    set_active(&app_state, user_id, false).await
}

pub async fn activate_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    set_active(&app_state, user_id, true).await
}

async fn set_active(
    app_state: &AppState,
    user_id: Uuid,
    active: bool,
) -> Result<Json<serde_json::Value>, HttpError> {
    let existing = app_state
        .db_client
        .get_user(Some(user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_none() {
        return Err(HttpError::not_found("User not found"));
    }

    let user = app_state
        .db_client
        .set_user_active(user_id, active)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": if active { "User activated" } else { "User suspended" },
        "data": { "user": FilterUserDto::filter_user(&user) }
    })))
}

pub async fn approve_caregiver(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(profile_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    set_verification(&app_state, profile_id, VerificationStatus::Approved).await
}

pub async fn reject_caregiver(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(profile_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    set_verification(&app_state, profile_id, VerificationStatus::Rejected).await
}

async fn set_verification(
    app_state: &AppState,
    profile_id: Uuid,
    status: VerificationStatus,
) -> Result<Json<serde_json::Value>, HttpError> {
    let existing = app_state
        .db_client
        .get_caregiver_profile_by_id(profile_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_none() {
        return Err(HttpError::not_found("Caregiver profile not found"));
    }

    let profile = app_state
        .db_client
        .set_verification_status(profile_id, status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": format!("Caregiver profile {}", status.to_str()),
        "data": { "profile": profile }
    })))
}

pub async fn get_bookings(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<AdminBookingQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(15) as i64;
    let offset = ((page - 1) as i64) * limit;

    let (bookings, total) = app_state
        .db_client
        .get_bookings(query.status, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "bookings": bookings,
            "total": total,
            "page": page,
            "perPage": limit,
        }
    })))
}

pub async fn update_booking_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<UpdateBookingStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    // Admins go through the same transition rules as participants.
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

pub async fn get_testimonials(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let testimonials = app_state
        .db_client
        .get_testimonials()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "testimonials": testimonials }
    })))
}

pub async fn create_testimonial(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateTestimonialDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let testimonial = app_state
        .db_client
        .create_testimonial(body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Testimonial created successfully",
            "data": { "testimonial": testimonial }
        })),
    ))
}

pub async fn update_testimonial(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(testimonial_id): Path<Uuid>,
    Json(body): Json<UpdateTestimonialDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let testimonial = app_state
        .db_client
        .update_testimonial(testimonial_id, body)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Testimonial not found"),
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Testimonial updated successfully",
        "data": { "testimonial": testimonial }
    })))
}

pub async fn delete_testimonial(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(testimonial_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_testimonial(testimonial_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Testimonial not found"));
    }

    Ok(Json(Response {
        success: true,
        message: "Testimonial deleted successfully".to_string(),
    }))
}
