use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::dtos::admindtos::{CreateTestimonialDto, UpdateTestimonialDto};
use crate::models::testimonialmodel::Testimonial;

#[async_trait]
pub trait TestimonialExt {
    async fn create_testimonial(
        &self,
        testimonial: CreateTestimonialDto,
    ) -> Result<Testimonial, sqlx::Error>;

    async fn get_testimonials(&self) -> Result<Vec<Testimonial>, sqlx::Error>;

    async fn get_featured_testimonials(&self, limit: i64) -> Result<Vec<Testimonial>, sqlx::Error>;

    async fn update_testimonial(
        &self,
        testimonial_id: Uuid,
        update: UpdateTestimonialDto,
    ) -> Result<Testimonial, sqlx::Error>;

    async fn delete_testimonial(&self, testimonial_id: Uuid) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl TestimonialExt for DBClient {
    async fn create_testimonial(
        &self,
        testimonial: CreateTestimonialDto,
    ) -> Result<Testimonial, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            INSERT INTO testimonials (name, content, rating, is_featured)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, content, rating, is_featured, created_at, updated_at
            "#,
        )
        .bind(testimonial.name)
        .bind(testimonial.content)
        .bind(testimonial.rating)
        .bind(testimonial.is_featured.unwrap_or(false))
        .fetch_one(&self.pool)
        .await
    }

    async fn get_testimonials(&self) -> Result<Vec<Testimonial>, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT id, name, content, rating, is_featured, created_at, updated_at
            FROM testimonials
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_featured_testimonials(&self, limit: i64) -> Result<Vec<Testimonial>, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT id, name, content, rating, is_featured, created_at, updated_at
            FROM testimonials
            WHERE is_featured = TRUE
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_testimonial(
        &self,
        testimonial_id: Uuid,
        update: UpdateTestimonialDto,
    ) -> Result<Testimonial, sqlx::Error> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            UPDATE testimonials
            SET name = COALESCE($2, name),
                content = COALESCE($3, content),
                rating = COALESCE($4, rating),
                is_featured = COALESCE($5, is_featured),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, content, rating, is_featured, created_at, updated_at
            "#,
        )
        .bind(testimonial_id)
        .bind(update.name)
        .bind(update.content)
        .bind(update.rating)
        .bind(update.is_featured)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_testimonial(&self, testimonial_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(testimonial_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
