use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateBookingDto {
    #[serde(rename = "caregiverId")]
    pub caregiver_id: Uuid,

    pub date: NaiveDate,

    #[serde(rename = "startTime")]
    pub start_time: NaiveTime,

    #[serde(rename = "endTime")]
    pub end_time: NaiveTime,

    #[validate(length(max = 2000, message = "Special instructions must be at most 2000 characters"))]
    #[serde(rename = "specialInstructions")]
    pub special_instructions: Option<String>,

    #[validate(length(max = 255))]
    #[serde(rename = "emergencyContact")]
    pub emergency_contact: Option<String>,

    #[validate(length(max = 50))]
    #[serde(rename = "emergencyPhone")]
    pub emergency_phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookingStatusDto {
    pub status: crate::models::bookingmodel::BookingStatus,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CancelBookingDto {
    #[validate(length(max = 2000, message = "Reason must be at most 2000 characters"))]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProcessPaymentDto {
    #[serde(rename = "bookingId")]
    pub booking_id: Uuid,

    #[validate(length(min = 1, max = 50, message = "Payment method is required"))]
    #[serde(rename = "paymentMethod")]
    pub payment_method: String,

    pub amount: BigDecimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BookingListQueryDto {
    /// Which side of the booking to list: "care_seeker" (default) or
    /// "caregiver".
    pub role: Option<String>,

    #[validate(range(min = 1))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 50))]
    pub limit: Option<u32>,
}
