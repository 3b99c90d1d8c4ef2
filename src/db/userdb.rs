use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::dtos::admindtos::{AdminUpdateUserDto, AdminUserQueryDto};
use crate::models::usermodel::{User, UserType};

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn save_user<T: Into<String> + Send>(
        &self,
        first_name: T,
        last_name: T,
        email: T,
        phone: T,
        password: T,
        user_type: UserType,
    ) -> Result<User, sqlx::Error>;

    async fn update_user(
        &self,
        user_id: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password: String,
    ) -> Result<User, sqlx::Error>;

    async fn update_last_login(&self, user_id: Uuid) -> Result<(), sqlx::Error>;

    async fn set_user_active(&self, user_id: Uuid, active: bool) -> Result<User, sqlx::Error>;

    async fn admin_update_user(
        &self,
        user_id: Uuid,
        update: AdminUpdateUserDto,
    ) -> Result<User, sqlx::Error>;

    async fn delete_user(&self, user_id: Uuid) -> Result<u64, sqlx::Error>;

    async fn search_users(
        &self,
        query: &AdminUserQueryDto,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<User>, i64), sqlx::Error>;

    async fn get_user_count(&self) -> Result<i64, sqlx::Error>;

    async fn count_recent_users(&self, days: i32) -> Result<i64, sqlx::Error>;

    async fn get_recent_users(&self, limit: i64) -> Result<Vec<User>, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, first_name, last_name, email, phone, password,
                       user_type, role, is_active, last_login_at,
                       created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, first_name, last_name, email, phone, password,
                       user_type, role, is_active, last_login_at,
                       created_at, updated_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        first_name: T,
        last_name: T,
        email: T,
        phone: T,
        password: T,
        user_type: UserType,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, phone, password, user_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, first_name, last_name, email, phone, password,
                      user_type, role, is_active, last_login_at,
                      created_at, updated_at
            "#,
        )
        .bind(first_name.into())
        .bind(last_name.into())
        .bind(email.into())
        .bind(phone.into())
        .bind(password.into())
        .bind(user_type)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user(
        &self,
        user_id: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone = COALESCE($4, phone),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, first_name, last_name, email, phone, password,
                      user_type, role, is_active, last_login_at,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password: String,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET password = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, first_name, last_name, email, phone, password,
                      user_type, role, is_active, last_login_at,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(password)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_last_login(&self, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_user_active(&self, user_id: Uuid, active: bool) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, first_name, last_name, email, phone, password,
                      user_type, role, is_active, last_login_at,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(active)
        .fetch_one(&self.pool)
        .await
    }

    async fn admin_update_user(
        &self,
        user_id: Uuid,
        update: AdminUpdateUserDto,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone = COALESCE($4, phone),
                role = COALESCE($5, role),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, first_name, last_name, email, phone, password,
                      user_type, role, is_active, last_login_at,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(update.first_name)
        .bind(update.last_name)
        .bind(update.phone)
        .bind(update.role)
        .bind(update.is_active)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn search_users(
        &self,
        query: &AdminUserQueryDto,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<User>, i64), sqlx::Error> {
        // Sort column comes from a fixed whitelist, never from raw input.
        let sort_by = match query.sort_by.as_deref() {
            Some("email") => "email",
            Some("first_name") => "first_name",
            Some("last_login_at") => "last_login_at",
            _ => "created_at",
        };
        let sort_order = match query.sort_order.as_deref() {
            Some("asc") => "ASC",
            _ => "DESC",
        };

        let search = query.search.as_ref().map(|s| format!("%{}%", s));

        let sql = format!(
            r#"
            SELECT id, first_name, last_name, email, phone, password,
                   user_type, role, is_active, last_login_at,
                   created_at, updated_at
            FROM users
            WHERE ($1::text IS NULL
                   OR first_name ILIKE $1 OR last_name ILIKE $1
                   OR email ILIKE $1 OR phone ILIKE $1)
              AND ($2::user_type IS NULL OR user_type = $2)
              AND ($3::bool IS NULL OR is_active = $3)
            ORDER BY {} {}
            LIMIT $4 OFFSET $5
            "#,
            sort_by, sort_order
        );

        let users = sqlx::query_as::<_, User>(&sql)
            .bind(search.clone())
            .bind(query.user_type)
            .bind(query.is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM users
            WHERE ($1::text IS NULL
                   OR first_name ILIKE $1 OR last_name ILIKE $1
                   OR email ILIKE $1 OR phone ILIKE $1)
              AND ($2::user_type IS NULL OR user_type = $2)
              AND ($3::bool IS NULL OR is_active = $3)
            "#,
        )
        .bind(search)
        .bind(query.user_type)
        .bind(query.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok((users, total))
    }

    async fn get_user_count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
    }

    async fn count_recent_users(&self, days: i32) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE created_at >= NOW() - make_interval(days => $1)",
        )
        .bind(days)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_recent_users(&self, limit: i64) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, phone, password,
                   user_type, role, is_active, last_login_at,
                   created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}
