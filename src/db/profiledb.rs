use async_trait::async_trait;
use bigdecimal::BigDecimal;
use sqlx::types::Json;
use uuid::Uuid;

use super::db::DBClient;
use crate::dtos::profiledtos::{CreateCareSeekerProfileDto, CreateCaregiverProfileDto};
use crate::models::profilemodels::{CareSeekerProfile, CaregiverProfile, VerificationStatus};

#[derive(Debug, Default)]
pub struct CaregiverSearchFilters {
    pub location: Option<String>,
    pub care_type: Option<String>,
    pub min_rate: Option<BigDecimal>,
    pub max_rate: Option<BigDecimal>,
    pub min_rating: Option<BigDecimal>,
    pub verified_only: bool,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[async_trait]
pub trait ProfileExt {
    async fn create_caregiver_profile(
        &self,
        user_id: Uuid,
        profile_data: CreateCaregiverProfileDto,
    ) -> Result<CaregiverProfile, sqlx::Error>;

    async fn get_caregiver_profile_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<CaregiverProfile>, sqlx::Error>;

    async fn get_caregiver_profile_by_id(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<CaregiverProfile>, sqlx::Error>;

    async fn search_caregivers(
        &self,
        filters: CaregiverSearchFilters,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<CaregiverProfile>, i64), sqlx::Error>;

    async fn set_verification_status(
        &self,
        profile_id: Uuid,
        status: VerificationStatus,
    ) -> Result<CaregiverProfile, sqlx::Error>;

    async fn get_pending_caregiver_profiles(
        &self,
        limit: i64,
    ) -> Result<Vec<CaregiverProfile>, sqlx::Error>;

    async fn count_caregivers(&self) -> Result<i64, sqlx::Error>;

    async fn count_pending_caregivers(&self) -> Result<i64, sqlx::Error>;

    async fn create_care_seeker_profile(
        &self,
        user_id: Uuid,
        profile_data: CreateCareSeekerProfileDto,
    ) -> Result<CareSeekerProfile, sqlx::Error>;

    async fn get_care_seeker_profile_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<CareSeekerProfile>, sqlx::Error>;

    async fn count_care_seekers(&self) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl ProfileExt for DBClient {
    async fn create_caregiver_profile(
        &self,
        user_id: Uuid,
        profile_data: CreateCaregiverProfileDto,
    ) -> Result<CaregiverProfile, sqlx::Error> {
        sqlx::query_as::<_, CaregiverProfile>(
            r#"
            INSERT INTO caregiver_profiles
                (user_id, hourly_rate, experience, specialties, availability, bio,
                 location, place_id, latitude, longitude, formatted_address)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, user_id, hourly_rate, experience, specialties, availability, bio,
                      location, place_id, latitude, longitude, formatted_address,
                      verification_status, background_check, rating, review_count, active,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(profile_data.hourly_rate)
        .bind(profile_data.experience)
        .bind(Json(profile_data.specialties))
        .bind(profile_data.availability)
        .bind(profile_data.bio)
        .bind(profile_data.location)
        .bind(profile_data.place_id)
        .bind(profile_data.latitude)
        .bind(profile_data.longitude)
        .bind(profile_data.formatted_address)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_caregiver_profile_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<CaregiverProfile>, sqlx::Error> {
        sqlx::query_as::<_, CaregiverProfile>(
            r#"
            SELECT id, user_id, hourly_rate, experience, specialties, availability, bio,
                   location, place_id, latitude, longitude, formatted_address,
                   verification_status, background_check, rating, review_count, active,
                   created_at, updated_at
            FROM caregiver_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_caregiver_profile_by_id(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<CaregiverProfile>, sqlx::Error> {
        sqlx::query_as::<_, CaregiverProfile>(
            r#"
            SELECT id, user_id, hourly_rate, experience, specialties, availability, bio,
                   location, place_id, latitude, longitude, formatted_address,
                   verification_status, background_check, rating, review_count, active,
                   created_at, updated_at
            FROM caregiver_profiles
            WHERE id = $1
            "#,
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn search_caregivers(
        &self,
        filters: CaregiverSearchFilters,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<CaregiverProfile>, i64), sqlx::Error> {
        // Sort column comes from a fixed whitelist, never from raw input.
        let sort_by = match filters.sort_by.as_deref() {
            Some("hourly_rate") => "p.hourly_rate",
            Some("review_count") => "p.review_count",
            Some("created_at") => "p.created_at",
            _ => "p.rating",
        };
        let sort_order = match filters.sort_order.as_deref() {
            Some("asc") => "ASC",
            _ => "DESC",
        };

        let location = filters.location.as_ref().map(|l| format!("%{}%", l));
        let care_type = filters.care_type.as_ref().map(|c| format!("%{}%", c));

        let sql = format!(
            r#"
            SELECT p.id, p.user_id, p.hourly_rate, p.experience, p.specialties,
                   p.availability, p.bio, p.location, p.place_id, p.latitude,
                   p.longitude, p.formatted_address, p.verification_status,
                   p.background_check, p.rating, p.review_count, p.active,
                   p.created_at, p.updated_at
            FROM caregiver_profiles p
            INNER JOIN users u ON u.id = p.user_id
            WHERE p.active = TRUE
              AND u.is_active = TRUE
              AND ($1::text IS NULL OR p.location ILIKE $1)
              AND ($2::text IS NULL OR p.specialties::text ILIKE $2)
              AND ($3::numeric IS NULL OR p.hourly_rate >= $3)
              AND ($4::numeric IS NULL OR p.hourly_rate <= $4)
              AND ($5::numeric IS NULL OR p.rating >= $5)
              AND ($6::bool = FALSE OR p.verification_status = 'approved'::verification_status)
            ORDER BY {} {}
            LIMIT $7 OFFSET $8
            "#,
            sort_by, sort_order
        );

        let profiles = sqlx::query_as::<_, CaregiverProfile>(&sql)
            .bind(location.clone())
            .bind(care_type.clone())
            .bind(filters.min_rate.clone())
            .bind(filters.max_rate.clone())
            .bind(filters.min_rating.clone())
            .bind(filters.verified_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM caregiver_profiles p
            INNER JOIN users u ON u.id = p.user_id
            WHERE p.active = TRUE
              AND u.is_active = TRUE
              AND ($1::text IS NULL OR p.location ILIKE $1)
              AND ($2::text IS NULL OR p.specialties::text ILIKE $2)
              AND ($3::numeric IS NULL OR p.hourly_rate >= $3)
              AND ($4::numeric IS NULL OR p.hourly_rate <= $4)
              AND ($5::numeric IS NULL OR p.rating >= $5)
              AND ($6::bool = FALSE OR p.verification_status = 'approved'::verification_status)
            "#,
        )
        .bind(location)
        .bind(care_type)
        .bind(filters.min_rate)
        .bind(filters.max_rate)
        .bind(filters.min_rating)
        .bind(filters.verified_only)
        .fetch_one(&self.pool)
        .await?;

        Ok((profiles, total))
    }

    async fn set_verification_status(
        &self,
        profile_id: Uuid,
        status: VerificationStatus,
    ) -> Result<CaregiverProfile, sqlx::Error> {
        sqlx::query_as::<_, CaregiverProfile>(
            r#"
            UPDATE caregiver_profiles
            SET verification_status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, hourly_rate, experience, specialties, availability, bio,
                      location, place_id, latitude, longitude, formatted_address,
                      verification_status, background_check, rating, review_count, active,
                      created_at, updated_at
            "#,
        )
        .bind(profile_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_pending_caregiver_profiles(
        &self,
        limit: i64,
    ) -> Result<Vec<CaregiverProfile>, sqlx::Error> {
        sqlx::query_as::<_, CaregiverProfile>(
            r#"
            SELECT id, user_id, hourly_rate, experience, specialties, availability, bio,
                   location, place_id, latitude, longitude, formatted_address,
                   verification_status, background_check, rating, review_count, active,
                   created_at, updated_at
            FROM caregiver_profiles
            WHERE verification_status = 'pending'::verification_status
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_caregivers(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM caregiver_profiles")
            .fetch_one(&self.pool)
            .await
    }

    async fn count_pending_caregivers(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM caregiver_profiles WHERE verification_status = 'pending'::verification_status",
        )
        .fetch_one(&self.pool)
        .await
    }

    async fn create_care_seeker_profile(
        &self,
        user_id: Uuid,
        profile_data: CreateCareSeekerProfileDto,
    ) -> Result<CareSeekerProfile, sqlx::Error> {
        let preferences = profile_data
            .preferences
            .unwrap_or_else(|| serde_json::json!({}));

        sqlx::query_as::<_, CareSeekerProfile>(
            r#"
            INSERT INTO care_seeker_profiles (user_id, care_needs, location, budget, preferences)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, care_needs, location, budget, preferences,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(Json(profile_data.care_needs))
        .bind(profile_data.location)
        .bind(profile_data.budget)
        .bind(Json(preferences))
        .fetch_one(&self.pool)
        .await
    }

    async fn get_care_seeker_profile_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<CareSeekerProfile>, sqlx::Error> {
        sqlx::query_as::<_, CareSeekerProfile>(
            r#"
            SELECT id, user_id, care_needs, location, budget, preferences,
                   created_at, updated_at
            FROM care_seeker_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn count_care_seekers(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM care_seeker_profiles")
            .fetch_one(&self.pool)
            .await
    }
}
