use std::sync::Arc;

use bigdecimal::{rounding::RoundingMode, BigDecimal, Zero};
use chrono::NaiveTime;
use rand::distr::Alphanumeric;
use rand::Rng;
use uuid::Uuid;

use crate::{
    db::{
        bookingdb::{BookingExt, NewBooking},
        db::DBClient,
        profiledb::ProfileExt,
        userdb::UserExt,
    },
    dtos::bookingdtos::{CreateBookingDto, ProcessPaymentDto},
    models::bookingmodel::{Booking, BookingStatus, Payment, PaymentStatus},
    models::usermodel::User,
    service::{error::ServiceError, notification_service::NotificationService},
};

/// Fractional hours between two times, rounded to two decimal places.
/// Returns None unless `end` is strictly after `start`.
pub fn duration_hours(start: NaiveTime, end: NaiveTime) -> Option<BigDecimal> {
    if end <= start {
        return None;
    }

    let minutes = (end - start).num_minutes();
    Some((BigDecimal::from(minutes) / BigDecimal::from(60)).with_scale_round(2, RoundingMode::HalfUp))
}

pub fn compute_total_amount(duration: &BigDecimal, hourly_rate: &BigDecimal) -> BigDecimal {
    (duration * hourly_rate).with_scale_round(2, RoundingMode::HalfUp)
}

/// The enforced booking state machine: pending → confirmed → in_progress →
/// completed, with cancellation permitted from any non-terminal state.
pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    match (from, to) {
        (BookingStatus::Pending, BookingStatus::Confirmed) => true,
        (BookingStatus::Confirmed, BookingStatus::InProgress) => true,
        (BookingStatus::InProgress, BookingStatus::Completed) => true,
        (from, BookingStatus::Cancelled) => !from.is_terminal(),
        _ => false,
    }
}

fn generate_transaction_reference() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..12)
        .map(|_| rng.sample(Alphanumeric) as char)
        .collect();
    format!("txn_{}", suffix.to_lowercase())
}

#[derive(Debug, Clone)]
pub struct BookingService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

impl BookingService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    /// Prices the booking from the caregiver's current hourly rate and
    /// snapshots rate, duration and total onto the row; later rate changes
    /// never touch existing bookings.
    pub async fn create_booking(
        &self,
        care_seeker: &User,
        data: CreateBookingDto,
    ) -> Result<Booking, ServiceError> {
        let caregiver = self
            .db_client
            .get_user(Some(data.caregiver_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound(data.caregiver_id))?;

        let profile = self
            .db_client
            .get_caregiver_profile_by_user(caregiver.id)
            .await?
            .ok_or(ServiceError::CaregiverProfileNotFound(caregiver.id))?;

        // A missing or zero rate would silently price a free booking;
        // reject at creation time instead.
        if profile.hourly_rate <= BigDecimal::zero() {
            return Err(ServiceError::CaregiverRateNotSet(caregiver.id));
        }

        let duration = duration_hours(data.start_time, data.end_time)
            .ok_or(ServiceError::InvalidTimeRange)?;
        let total_amount = compute_total_amount(&duration, &profile.hourly_rate);

        let booking = self
            .db_client
            .create_booking(NewBooking {
                care_seeker_id: care_seeker.id,
                caregiver_id: caregiver.id,
                date: data.date,
                start_time: data.start_time,
                end_time: data.end_time,
                hourly_rate: profile.hourly_rate,
                duration_hours: duration,
                total_amount,
                special_instructions: data.special_instructions,
                emergency_contact: data.emergency_contact,
                emergency_phone: data.emergency_phone,
            })
            .await?;

        self.notification_service
            .notify_booking_created(&caregiver, &booking)
            .await;

        Ok(booking)
    }

    pub async fn update_status(
        &self,
        actor: &User,
        booking_id: Uuid,
        new_status: BookingStatus,
    ) -> Result<Booking, ServiceError> {
        let booking = self
            .db_client
            .get_booking_by_id(booking_id)
            .await?
            .ok_or(ServiceError::BookingNotFound(booking_id))?;

        if !booking.can_be_accessed_by(actor) {
            return Err(ServiceError::UnauthorizedBookingAccess(actor.id, booking_id));
        }

        if !can_transition(booking.status, new_status) {
            return Err(ServiceError::InvalidStatusTransition(
                booking.status,
                new_status,
            ));
        }

        let updated = if new_status == BookingStatus::Cancelled {
            self.db_client.cancel_booking(booking_id, None).await?
        } else {
            self.db_client
                .update_booking_status(booking_id, new_status)
                .await?
        };

        self.notification_service
            .notify_booking_status_changed(&updated)
            .await;

        Ok(updated)
    }

    pub async fn cancel_booking(
        &self,
        actor: &User,
        booking_id: Uuid,
        reason: Option<String>,
    ) -> Result<Booking, ServiceError> {
        let booking = self
            .db_client
            .get_booking_by_id(booking_id)
            .await?
            .ok_or(ServiceError::BookingNotFound(booking_id))?;

        if !booking.can_be_accessed_by(actor) {
            return Err(ServiceError::UnauthorizedBookingAccess(actor.id, booking_id));
        }

        if !can_transition(booking.status, BookingStatus::Cancelled) {
            return Err(ServiceError::InvalidStatusTransition(
                booking.status,
                BookingStatus::Cancelled,
            ));
        }

        let cancelled = self.db_client.cancel_booking(booking_id, reason).await?;

        self.notification_service
            .notify_booking_status_changed(&cancelled)
            .await;

        Ok(cancelled)
    }

    /// Simulated payment capture: no gateway is called. The payment row and
    /// the booking confirmation are written in one transaction by the db
    /// layer, so a failure leaves the booking untouched.
    pub async fn process_payment(
        &self,
        actor: &User,
        data: ProcessPaymentDto,
    ) -> Result<(Payment, Booking), ServiceError> {
        let booking = self
            .db_client
            .get_booking_by_id(data.booking_id)
            .await?
            .ok_or(ServiceError::BookingNotFound(data.booking_id))?;

        if !booking.can_be_accessed_by(actor) {
            return Err(ServiceError::UnauthorizedBookingAccess(
                actor.id,
                data.booking_id,
            ));
        }

        if booking.payment_status == PaymentStatus::Completed {
            return Err(ServiceError::BookingAlreadyPaid(booking.id));
        }

        if !can_transition(booking.status, BookingStatus::Confirmed) {
            return Err(ServiceError::InvalidStatusTransition(
                booking.status,
                BookingStatus::Confirmed,
            ));
        }

        // Compare at cents precision; JSON numbers arrive with binary-float
        // noise (87.35 deserializes as 87.34999…).
        let amount = data.amount.with_scale_round(2, RoundingMode::HalfUp);
        if amount != booking.total_amount {
            return Err(ServiceError::PaymentAmountMismatch {
                amount,
                expected: booking.total_amount,
            });
        }

        let reference = generate_transaction_reference();
        let (payment, booking) = self
            .db_client
            .process_payment(data.booking_id, data.payment_method, amount, reference)
            .await?;

        self.notification_service
            .notify_payment_received(&payment, &booking)
            .await;

        Ok((payment, booking))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;
    use std::str::FromStr;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn four_hour_booking_at_25_costs_100() {
        let duration = duration_hours(time(9, 0), time(13, 0)).unwrap();
        assert_eq!(duration, BigDecimal::from_str("4.00").unwrap());

        let total = compute_total_amount(&duration, &BigDecimal::from_str("25.00").unwrap());
        assert_eq!(total, BigDecimal::from_str("100.00").unwrap());
    }

    #[test]
    fn fractional_hours_are_priced() {
        let duration = duration_hours(time(9, 0), time(10, 30)).unwrap();
        assert_eq!(duration, BigDecimal::from_str("1.50").unwrap());

        let total = compute_total_amount(&duration, &BigDecimal::from_str("30.00").unwrap());
        assert_eq!(total, BigDecimal::from_str("45.00").unwrap());
    }

    #[test]
    fn zero_or_negative_duration_is_rejected() {
        assert!(duration_hours(time(9, 0), time(9, 0)).is_none());
        assert!(duration_hours(time(13, 0), time(9, 0)).is_none());
    }

    #[test]
    fn forward_transitions_follow_the_table() {
        assert!(can_transition(
            BookingStatus::Pending,
            BookingStatus::Confirmed
        ));
        assert!(can_transition(
            BookingStatus::Confirmed,
            BookingStatus::InProgress
        ));
        assert!(can_transition(
            BookingStatus::InProgress,
            BookingStatus::Completed
        ));

        assert!(!can_transition(
            BookingStatus::Pending,
            BookingStatus::InProgress
        ));
        assert!(!can_transition(
            BookingStatus::Pending,
            BookingStatus::Completed
        ));
        assert!(!can_transition(
            BookingStatus::Completed,
            BookingStatus::InProgress
        ));
        assert!(!can_transition(
            BookingStatus::Confirmed,
            BookingStatus::Pending
        ));
    }

    #[test]
    fn cancellation_is_allowed_from_non_terminal_states_only() {
        assert!(can_transition(
            BookingStatus::Pending,
            BookingStatus::Cancelled
        ));
        assert!(can_transition(
            BookingStatus::Confirmed,
            BookingStatus::Cancelled
        ));
        assert!(can_transition(
            BookingStatus::InProgress,
            BookingStatus::Cancelled
        ));

        assert!(!can_transition(
            BookingStatus::Completed,
            BookingStatus::Cancelled
        ));
        assert!(!can_transition(
            BookingStatus::Cancelled,
            BookingStatus::Cancelled
        ));
    }

    #[test]
    fn transaction_references_are_prefixed_and_unique() {
        let a = generate_transaction_reference();
        let b = generate_transaction_reference();

        assert!(a.starts_with("txn_"));
        assert_eq!(a.len(), "txn_".len() + 12);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn booking_service_constructs() {
        let pool = PgPool::connect_lazy("postgres://localhost/carelink").unwrap();
        let db_client = Arc::new(DBClient::new(pool));
        let svc = BookingService::new(db_client, Arc::new(NotificationService::new()));

        assert!(format!("{:?}", svc).contains("BookingService"));
    }
}
