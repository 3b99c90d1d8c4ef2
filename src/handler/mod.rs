pub mod admin;
pub mod auth;
pub mod bookings;
pub mod caregivers;
pub mod location;
pub mod messaging;
pub mod public;
pub mod reviews;
pub mod users;
