use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::profilemodels::{CaregiverProfile, VerificationStatus};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCaregiverProfileDto {
    #[serde(rename = "hourlyRate")]
    pub hourly_rate: BigDecimal,

    #[validate(length(min = 1, max = 2000, message = "Experience is required"))]
    pub experience: String,

    #[validate(length(min = 1, message = "At least one specialty is required"))]
    pub specialties: Vec<String>,

    #[validate(length(min = 1, max = 500, message = "Availability is required"))]
    pub availability: String,

    #[validate(length(min = 2, max = 255, message = "Location is required"))]
    pub location: String,

    #[validate(length(max = 2000, message = "Bio must be at most 2000 characters"))]
    pub bio: Option<String>,

    #[serde(rename = "placeId")]
    pub place_id: Option<String>,
    pub latitude: Option<BigDecimal>,
    pub longitude: Option<BigDecimal>,
    #[serde(rename = "formattedAddress")]
    pub formatted_address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCareSeekerProfileDto {
    #[validate(length(min = 1, message = "At least one care need is required"))]
    #[serde(rename = "careNeeds")]
    pub care_needs: Vec<String>,

    #[validate(length(min = 2, max = 255, message = "Location is required"))]
    pub location: String,

    pub budget: Option<BigDecimal>,
    pub preferences: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CaregiverSearchQueryDto {
    pub location: Option<String>,

    #[serde(rename = "careType")]
    pub care_type: Option<String>,

    #[serde(rename = "minRate")]
    pub min_rate: Option<BigDecimal>,

    #[serde(rename = "maxRate")]
    pub max_rate: Option<BigDecimal>,

    #[serde(rename = "minRating")]
    pub min_rating: Option<BigDecimal>,

    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,

    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,

    #[validate(range(min = 1))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 50))]
    pub limit: Option<u32>,
}

/// Public listing card; strips verification internals and coordinates.
#[derive(Debug, Serialize, Clone)]
pub struct CaregiverCardDto {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "hourlyRate")]
    pub hourly_rate: BigDecimal,
    pub experience: String,
    pub specialties: Vec<String>,
    pub availability: String,
    pub location: String,
    pub bio: Option<String>,
    pub verified: bool,
    pub rating: BigDecimal,
    #[serde(rename = "reviewCount")]
    pub review_count: i32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl CaregiverCardDto {
    pub fn from_profile(profile: &CaregiverProfile, name: String) -> Self {
        CaregiverCardDto {
            id: profile.id,
            user_id: profile.user_id,
            name,
            hourly_rate: profile.hourly_rate.clone(),
            experience: profile.experience.clone(),
            specialties: profile.specialties.0.clone(),
            availability: profile.availability.clone(),
            location: profile.location.clone(),
            bio: profile.bio.clone(),
            verified: profile.verification_status == VerificationStatus::Approved,
            rating: profile.rating.clone(),
            review_count: profile.review_count,
            created_at: profile.created_at,
        }
    }
}
