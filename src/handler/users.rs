use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use bigdecimal::{BigDecimal, Zero};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{profiledb::ProfileExt, userdb::UserExt},
    dtos::{
        profiledtos::{CreateCareSeekerProfileDto, CreateCaregiverProfileDto},
        userdtos::{FilterUserDto, UpdateUserDto, UserData, UserResponseDto},
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::usermodel::UserType,
    utils::password,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/me", get(get_me).put(update_me))
        .route("/me/caregiver-profile", post(create_caregiver_profile))
        .route("/me/care-seeker-profile", post(create_care_seeker_profile))
        .route("/:user_id", get(get_user))
}

pub async fn get_me(
    Extension(_app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(UserResponseDto {
        success: true,
        data: UserData {
            user: FilterUserDto::filter_user(&auth.user),
        },
    }))
}

pub async fn update_me(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    body.validate_phone_number()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .update_user(auth.user.id, body.first_name, body.last_name, body.phone)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = if let Some(new_password) = body.password {
        let hashed_password =
            password::hash(&new_password).map_err(|e| HttpError::server_error(e.to_string()))?;

        app_state
            .db_client
            .update_user_password(user.id, hashed_password)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
    } else {
        user
    };

    Ok(Json(UserResponseDto {
        success: true,
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    }))
}

pub async fn create_caregiver_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateCaregiverProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if auth.user.user_type != UserType::Caregiver {
        return Err(HttpError::forbidden(
            "Only caregiver accounts can create a caregiver profile",
        ));
    }

    if body.hourly_rate <= BigDecimal::zero() {
        return Err(HttpError::bad_request("Hourly rate must be greater than zero"));
    }

    let existing = app_state
        .db_client
        .get_caregiver_profile_by_user(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(HttpError::bad_request("Caregiver profile already exists"));
    }

    let profile = app_state
        .db_client
        .create_caregiver_profile(auth.user.id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Caregiver profile created successfully",
            "data": { "profile": profile }
        })),
    ))
}

pub async fn create_care_seeker_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateCareSeekerProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if auth.user.user_type != UserType::CareSeeker {
        return Err(HttpError::forbidden(
            "Only care seeker accounts can create a care seeker profile",
        ));
    }

    let existing = app_state
        .db_client
        .get_care_seeker_profile_by_user(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(HttpError::bad_request("Care seeker profile already exists"));
    }

    let profile = app_state
        .db_client
        .create_care_seeker_profile(auth.user.id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Care seeker profile created successfully",
            "data": { "profile": profile }
        })),
    ))
}

pub async fn get_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(_auth): Extension<JWTAuthMiddeware>,
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

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "user": FilterUserDto::filter_user(&user),
            "caregiverProfile": caregiver_profile,
            "careSeekerProfile": care_seeker_profile,
        }
    })))
}
