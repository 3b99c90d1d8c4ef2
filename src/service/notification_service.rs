use crate::models::{
    bookingmodel::{Booking, Payment},
    messagemodels::Message,
    reviewmodel::Review,
    usermodel::User,
};

/// Delivery (email, push) is out of scope; notifications are recorded in the
/// logs so the surrounding flows still have a seam to hook into.
#[derive(Debug, Clone, Default)]
pub struct NotificationService;

impl NotificationService {
    pub fn new() -> Self {
        Self
    }

    pub async fn notify_booking_created(&self, caregiver: &User, booking: &Booking) {
        tracing::info!(
            "booking {} created for caregiver {} on {} ({} - {})",
            booking.id,
            caregiver.id,
            booking.date,
            booking.start_time,
            booking.end_time
        );
    }

    pub async fn notify_booking_status_changed(&self, booking: &Booking) {
        tracing::info!(
            "booking {} moved to status {}",
            booking.id,
            booking.status.to_str()
        );
    }

    pub async fn notify_payment_received(&self, payment: &Payment, booking: &Booking) {
        tracing::info!(
            "payment {} of {} recorded for booking {}",
            payment.transaction_id,
            payment.amount,
            booking.id
        );
    }

    pub async fn notify_new_message(&self, receiver_id: uuid::Uuid, message: &Message) {
        tracing::info!(
            "message {} delivered to user {} in conversation {}",
            message.id,
            receiver_id,
            message.conversation_id
        );
    }

    pub async fn notify_new_review(&self, review: &Review) {
        tracing::info!(
            "review {} ({} stars) recorded for user {}",
            review.id,
            review.rating,
            review.reviewed_user_id
        );
    }
}
