use bigdecimal::BigDecimal;
use thiserror::Error;
use uuid::Uuid;

use crate::{error::HttpError, models::bookingmodel::BookingStatus};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Booking {0} not found")]
    BookingNotFound(Uuid),

    #[error("Caregiver profile not found for user {0}")]
    CaregiverProfileNotFound(Uuid),

    #[error("Caregiver {0} has no hourly rate configured")]
    CaregiverRateNotSet(Uuid),

    #[error("Booking end time must be after start time")]
    InvalidTimeRange,

    #[error("Invalid booking status transition from {0:?} to {1:?}")]
    InvalidStatusTransition(BookingStatus, BookingStatus),

    #[error("User {0} is not authorized to perform this action on booking {1}")]
    UnauthorizedBookingAccess(Uuid, Uuid),

    #[error("Booking {0} has already been paid")]
    BookingAlreadyPaid(Uuid),

    #[error("Payment amount {amount} does not match booking total {expected}")]
    PaymentAmountMismatch {
        amount: BigDecimal,
        expected: BigDecimal,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::UserNotFound(_)
            | ServiceError::BookingNotFound(_)
            | ServiceError::CaregiverProfileNotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::CaregiverRateNotSet(_)
            | ServiceError::InvalidTimeRange
            | ServiceError::InvalidStatusTransition(_, _)
            | ServiceError::BookingAlreadyPaid(_)
            | ServiceError::PaymentAmountMismatch { .. }
            | ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::UnauthorizedBookingAccess(_, _) => HttpError::forbidden(error.to_string()),

            ServiceError::Database(_) => HttpError::server_error("A database error occurred"),
        }
    }
}
