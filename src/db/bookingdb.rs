use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::bookingmodel::{Booking, BookingStatus, Payment};

pub struct NewBooking {
    pub care_seeker_id: Uuid,
    pub caregiver_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub hourly_rate: BigDecimal,
    pub duration_hours: BigDecimal,
    pub total_amount: BigDecimal,
    pub special_instructions: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
}

#[async_trait]
pub trait BookingExt {
    async fn create_booking(&self, new_booking: NewBooking) -> Result<Booking, sqlx::Error>;

    async fn get_booking_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, sqlx::Error>;

    async fn get_user_bookings(
        &self,
        user_id: Uuid,
        as_caregiver: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, sqlx::Error>;

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, sqlx::Error>;

    async fn cancel_booking(
        &self,
        booking_id: Uuid,
        reason: Option<String>,
    ) -> Result<Booking, sqlx::Error>;

    /// Records the simulated payment and confirms the booking in a single
    /// transaction; either both writes land or neither does.
    async fn process_payment(
        &self,
        booking_id: Uuid,
        payment_method: String,
        amount: BigDecimal,
        transaction_id: String,
    ) -> Result<(Payment, Booking), sqlx::Error>;

    async fn get_bookings(
        &self,
        status: Option<BookingStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Booking>, i64), sqlx::Error>;

    async fn get_recent_bookings(&self, limit: i64) -> Result<Vec<Booking>, sqlx::Error>;

    async fn count_bookings(&self) -> Result<i64, sqlx::Error>;

    async fn count_bookings_by_status(&self, status: BookingStatus) -> Result<i64, sqlx::Error>;

    async fn total_revenue(&self) -> Result<BigDecimal, sqlx::Error>;
}

#[async_trait]
impl BookingExt for DBClient {
    async fn create_booking(&self, new_booking: NewBooking) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
                (care_seeker_id, caregiver_id, date, start_time, end_time,
                 hourly_rate, duration_hours, total_amount,
                 special_instructions, emergency_contact, emergency_phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, care_seeker_id, caregiver_id, date, start_time, end_time,
                      hourly_rate, duration_hours, total_amount,
                      special_instructions, emergency_contact, emergency_phone,
                      status, payment_status, payment_method, payment_transaction_id,
                      confirmed_at, completed_at, cancelled_at, cancellation_reason,
                      created_at, updated_at
            "#,
        )
        .bind(new_booking.care_seeker_id)
        .bind(new_booking.caregiver_id)
        .bind(new_booking.date)
        .bind(new_booking.start_time)
        .bind(new_booking.end_time)
        .bind(new_booking.hourly_rate)
        .bind(new_booking.duration_hours)
        .bind(new_booking.total_amount)
        .bind(new_booking.special_instructions)
        .bind(new_booking.emergency_contact)
        .bind(new_booking.emergency_phone)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_booking_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, care_seeker_id, caregiver_id, date, start_time, end_time,
                   hourly_rate, duration_hours, total_amount,
                   special_instructions, emergency_contact, emergency_phone,
                   status, payment_status, payment_method, payment_transaction_id,
                   confirmed_at, completed_at, cancelled_at, cancellation_reason,
                   created_at, updated_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_user_bookings(
        &self,
        user_id: Uuid,
        as_caregiver: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, care_seeker_id, caregiver_id, date, start_time, end_time,
                   hourly_rate, duration_hours, total_amount,
                   special_instructions, emergency_contact, emergency_phone,
                   status, payment_status, payment_method, payment_transaction_id,
                   confirmed_at, completed_at, cancelled_at, cancellation_reason,
                   created_at, updated_at
            FROM bookings
            WHERE ($2 = FALSE AND care_seeker_id = $1)
               OR ($2 = TRUE AND caregiver_id = $1)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(as_caregiver)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $2,
                confirmed_at = CASE WHEN $2 = 'confirmed'::booking_status
                                    THEN NOW() ELSE confirmed_at END,
                completed_at = CASE WHEN $2 = 'completed'::booking_status
                                    THEN NOW() ELSE completed_at END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, care_seeker_id, caregiver_id, date, start_time, end_time,
                      hourly_rate, duration_hours, total_amount,
                      special_instructions, emergency_contact, emergency_phone,
                      status, payment_status, payment_method, payment_transaction_id,
                      confirmed_at, completed_at, cancelled_at, cancellation_reason,
                      created_at, updated_at
            "#,
        )
        .bind(booking_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn cancel_booking(
        &self,
        booking_id: Uuid,
        reason: Option<String>,
    ) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'cancelled'::booking_status,
                cancelled_at = NOW(),
                cancellation_reason = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, care_seeker_id, caregiver_id, date, start_time, end_time,
                      hourly_rate, duration_hours, total_amount,
                      special_instructions, emergency_contact, emergency_phone,
                      status, payment_status, payment_method, payment_transaction_id,
                      confirmed_at, completed_at, cancelled_at, cancellation_reason,
                      created_at, updated_at
            "#,
        )
        .bind(booking_id)
        .bind(reason)
        .fetch_one(&self.pool)
        .await
    }

    async fn process_payment(
        &self,
        booking_id: Uuid,
        payment_method: String,
        amount: BigDecimal,
        transaction_id: String,
    ) -> Result<(Payment, Booking), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (booking_id, amount, payment_method, transaction_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, booking_id, amount, payment_method, status, transaction_id,
                      processed_at
            "#,
        )
        .bind(booking_id)
        .bind(amount)
        .bind(&payment_method)
        .bind(&transaction_id)
        .fetch_one(&mut *tx)
        .await?;

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'confirmed'::booking_status,
                payment_status = 'completed'::payment_status,
                payment_method = $2,
                payment_transaction_id = $3,
                confirmed_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, care_seeker_id, caregiver_id, date, start_time, end_time,
                      hourly_rate, duration_hours, total_amount,
                      special_instructions, emergency_contact, emergency_phone,
                      status, payment_status, payment_method, payment_transaction_id,
                      confirmed_at, completed_at, cancelled_at, cancellation_reason,
                      created_at, updated_at
            "#,
        )
        .bind(booking_id)
        .bind(&payment_method)
        .bind(&transaction_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((payment, booking))
    }

    async fn get_bookings(
        &self,
        status: Option<BookingStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Booking>, i64), sqlx::Error> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, care_seeker_id, caregiver_id, date, start_time, end_time,
                   hourly_rate, duration_hours, total_amount,
                   special_instructions, emergency_contact, emergency_phone,
                   status, payment_status, payment_method, payment_transaction_id,
                   confirmed_at, completed_at, cancelled_at, cancellation_reason,
                   created_at, updated_at
            FROM bookings
            WHERE ($1::booking_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings WHERE ($1::booking_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok((bookings, total))
    }

    async fn get_recent_bookings(&self, limit: i64) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, care_seeker_id, caregiver_id, date, start_time, end_time,
                   hourly_rate, duration_hours, total_amount,
                   special_instructions, emergency_contact, emergency_phone,
                   status, payment_status, payment_method, payment_transaction_id,
                   confirmed_at, completed_at, cancelled_at, cancellation_reason,
                   created_at, updated_at
            FROM bookings
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_bookings(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await
    }

    async fn count_bookings_by_status(&self, status: BookingStatus) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await
    }

    async fn total_revenue(&self) -> Result<BigDecimal, sqlx::Error> {
        sqlx::query_scalar::<_, BigDecimal>(
            r#"
            SELECT COALESCE(SUM(total_amount), 0)
            FROM bookings
            WHERE payment_status = 'completed'::payment_status
            "#,
        )
        .fetch_one(&self.pool)
        .await
    }
}
