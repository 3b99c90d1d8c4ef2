use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::reviewmodel::{Review, ReviewWithReviewer};

#[async_trait]
pub trait ReviewExt {
    /// Inserts the review and, when the reviewed user owns a caregiver
    /// profile, recomputes that profile's rating and review_count from the
    /// full review history. Both writes share one transaction; a failure in
    /// either rolls the whole operation back.
    async fn create_review(
        &self,
        reviewer_id: Uuid,
        reviewed_user_id: Uuid,
        booking_id: Option<Uuid>,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review, sqlx::Error>;

    async fn get_review_for_booking(
        &self,
        reviewer_id: Uuid,
        booking_id: Uuid,
    ) -> Result<Option<Review>, sqlx::Error>;

    async fn get_user_reviews(
        &self,
        reviewed_user_id: Uuid,
    ) -> Result<Vec<ReviewWithReviewer>, sqlx::Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn create_review(
        &self,
        reviewer_id: Uuid,
        reviewed_user_id: Uuid,
        booking_id: Option<Uuid>,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (reviewer_id, reviewed_user_id, booking_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, reviewer_id, reviewed_user_id, booking_id, rating, comment,
                      created_at, updated_at
            "#,
        )
        .bind(reviewer_id)
        .bind(reviewed_user_id)
        .bind(booking_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&mut *tx)
        .await?;

        // Full recompute over the review history keeps the derived columns
        // correct by construction; cost is O(review_count) per new review.
        sqlx::query(
            r#"
            UPDATE caregiver_profiles
            SET rating = sub.avg_rating,
                review_count = sub.review_count,
                updated_at = NOW()
            FROM (
                SELECT ROUND(AVG(rating)::numeric, 2) AS avg_rating,
                       COUNT(*)::int AS review_count
                FROM reviews
                WHERE reviewed_user_id = $1
            ) AS sub
            WHERE caregiver_profiles.user_id = $1
            "#,
        )
        .bind(reviewed_user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(review)
    }

    async fn get_review_for_booking(
        &self,
        reviewer_id: Uuid,
        booking_id: Uuid,
    ) -> Result<Option<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, reviewer_id, reviewed_user_id, booking_id, rating, comment,
                   created_at, updated_at
            FROM reviews
            WHERE reviewer_id = $1 AND booking_id = $2
            "#,
        )
        .bind(reviewer_id)
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_user_reviews(
        &self,
        reviewed_user_id: Uuid,
    ) -> Result<Vec<ReviewWithReviewer>, sqlx::Error> {
        sqlx::query_as::<_, ReviewWithReviewer>(
            r#"
            SELECT r.id, r.reviewer_id, r.reviewed_user_id, r.booking_id, r.rating,
                   r.comment, u.first_name AS reviewer_first_name,
                   u.last_name AS reviewer_last_name, r.created_at
            FROM reviews r
            INNER JOIN users u ON u.id = r.reviewer_id
            WHERE r.reviewed_user_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(reviewed_user_id)
        .fetch_all(&self.pool)
        .await
    }
}
