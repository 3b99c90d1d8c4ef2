use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::usermodel::User;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn to_str(&self) -> &str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Refunded,
}

impl PaymentStatus {
    pub fn to_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// A scheduled, priced engagement between one care-seeker and one caregiver.
/// `hourly_rate` is snapshotted from the caregiver profile at creation time;
/// later rate changes never affect `total_amount`.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Booking {
    pub id: Uuid,
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
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub payment_transaction_id: Option<String>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.care_seeker_id == user_id || self.caregiver_id == user_id
    }

    /// A booking may only be read or mutated by its care-seeker, its
    /// caregiver, or an admin.
    pub fn can_be_accessed_by(&self, user: &User) -> bool {
        self.is_participant(user.id) || user.is_admin()
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub amount: BigDecimal,
    pub payment_method: String,
    pub status: String,
    pub transaction_id: String,
    pub processed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usermodel::{UserRole, UserType};
    use std::str::FromStr;

    fn booking_between(care_seeker_id: Uuid, caregiver_id: Uuid) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            care_seeker_id,
            caregiver_id,
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            hourly_rate: BigDecimal::from_str("25.00").unwrap(),
            duration_hours: BigDecimal::from_str("4.00").unwrap(),
            total_amount: BigDecimal::from_str("100.00").unwrap(),
            special_instructions: None,
            emergency_contact: None,
            emergency_phone: None,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            payment_transaction_id: None,
            confirmed_at: None,
            completed_at: None,
            cancelled_at: None,
            cancellation_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn user(id: Uuid, user_type: UserType, role: UserRole) -> User {
        User {
            id,
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: format!("{}@example.com", id),
            phone: "+15550001111".to_string(),
            password: "hash".to_string(),
            user_type,
            role,
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn access_is_limited_to_participants_and_admins() {
        let seeker_id = Uuid::new_v4();
        let caregiver_id = Uuid::new_v4();
        let booking = booking_between(seeker_id, caregiver_id);

        let seeker = user(seeker_id, UserType::CareSeeker, UserRole::User);
        let caregiver = user(caregiver_id, UserType::Caregiver, UserRole::User);
        let admin = user(Uuid::new_v4(), UserType::Admin, UserRole::Admin);
        let stranger = user(Uuid::new_v4(), UserType::CareSeeker, UserRole::User);

        assert!(booking.can_be_accessed_by(&seeker));
        assert!(booking.can_be_accessed_by(&caregiver));
        assert!(booking.can_be_accessed_by(&admin));
        assert!(!booking.can_be_accessed_by(&stranger));
    }

    #[test]
    fn terminal_states() {
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
        assert!(!BookingStatus::InProgress.is_terminal());
    }
}
