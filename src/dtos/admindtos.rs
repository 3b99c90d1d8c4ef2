use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::{UserRole, UserType};

#[derive(Debug, Deserialize, Validate)]
pub struct AdminUserQueryDto {
    /// Matches against name, email and phone.
    pub search: Option<String>,

    #[serde(rename = "userType")]
    pub user_type: Option<UserType>,

    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,

    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,

    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,

    #[validate(range(min = 1))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdminUpdateUserDto {
    #[validate(length(min = 1, max = 255))]
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,

    #[validate(length(min = 7, max = 50))]
    pub phone: Option<String>,

    pub role: Option<UserRole>,

    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdminBookingQueryDto {
    pub status: Option<crate::models::bookingmodel::BookingStatus>,

    #[validate(range(min = 1))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTestimonialDto {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 2000, message = "Content is required"))]
    pub content: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[serde(rename = "isFeatured")]
    pub is_featured: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateTestimonialDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 2000))]
    pub content: Option<String>,

    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,

    #[serde(rename = "isFeatured")]
    pub is_featured: Option<bool>,
}
