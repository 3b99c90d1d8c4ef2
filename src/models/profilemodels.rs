use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "verification_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub fn to_str(&self) -> &str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

/// One-to-one with a caregiver user. `rating` and `review_count` are derived
/// columns kept in sync by the review aggregator; they must always equal the
/// aggregate of the reviews addressed to `user_id`.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct CaregiverProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hourly_rate: BigDecimal,
    pub experience: String,
    pub specialties: Json<Vec<String>>,
    pub availability: String,
    pub bio: Option<String>,
    pub location: String,
    pub place_id: Option<String>,
    pub latitude: Option<BigDecimal>,
    pub longitude: Option<BigDecimal>,
    pub formatted_address: Option<String>,
    pub verification_status: VerificationStatus,
    pub background_check: bool,
    pub rating: BigDecimal,
    pub review_count: i32,
    pub active: bool,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct CareSeekerProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub care_needs: Json<Vec<String>>,
    pub location: String,
    pub budget: Option<BigDecimal>,
    pub preferences: Json<serde_json::Value>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
