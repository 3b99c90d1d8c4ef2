use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        profiledb::{CaregiverSearchFilters, ProfileExt},
        reviewdb::ReviewExt,
        userdb::UserExt,
    },
    dtos::profiledtos::{CaregiverCardDto, CaregiverSearchQueryDto},
    error::HttpError,
    models::profilemodels::VerificationStatus,
    AppState,
};

pub fn caregivers_handler() -> Router {
    Router::new()
        .route("/", get(search_caregivers))
        .route("/:profile_id", get(get_caregiver))
}

pub async fn search_caregivers(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<CaregiverSearchQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10).min(50) as i64;
    let offset = ((page - 1) as i64) * limit;

    // Only approved, active profiles are listed publicly.
    let filters = CaregiverSearchFilters {
        location: query.location,
        care_type: query.care_type,
        min_rate: query.min_rate,
        max_rate: query.max_rate,
        min_rating: query.min_rating,
        verified_only: true,
        sort_by: query.sort_by,
        sort_order: query.sort_order,
    };

    let (profiles, total) = app_state
        .db_client
        .search_caregivers(filters, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut caregivers = Vec::new();
    for profile in &profiles {
        let user = app_state
            .db_client
            .get_user(Some(profile.user_id), None)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or_else(|| HttpError::not_found("User not found"))?;

        caregivers.push(CaregiverCardDto::from_profile(profile, user.full_name()));
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "caregivers": caregivers,
            "total": total,
            "page": page,
            "perPage": limit,
        }
    })))
}

pub async fn get_caregiver(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(profile_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state
        .db_client
        .get_caregiver_profile_by_id(profile_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Caregiver not found"))?;

    if !profile.active || profile.verification_status != VerificationStatus::Approved {
        return Err(HttpError::not_found("Caregiver not found"));
    }

    let user = app_state
        .db_client
        .get_user(Some(profile.user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let reviews = app_state
        .db_client
        .get_user_reviews(profile.user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let card = CaregiverCardDto::from_profile(&profile, user.full_name());

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "caregiver": card,
            "reviews": reviews,
        }
    })))
}
