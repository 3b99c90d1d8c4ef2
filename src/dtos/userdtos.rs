use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::usermodel::{User, UserType};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    #[serde(rename = "firstName")]
    pub first_name: String,

    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    #[serde(rename = "lastName")]
    pub last_name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 7, max = 50, message = "Phone number is required"))]
    pub phone: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    #[validate(
        length(min = 1, message = "Confirm Password is required"),
        must_match(other = "password", message = "passwords do not match")
    )]
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,

    #[serde(rename = "userType")]
    pub user_type: UserType,
}

impl RegisterUserDto {
    /// Admin accounts are provisioned out of band, never via self-service
    /// registration.
    pub fn validate_user_type(&self) -> Result<(), ValidationError> {
        if self.user_type == UserType::Admin {
            let mut error = ValidationError::new("invalid_user_type");
            error.message = Some(Cow::from("userType must be care_seeker or caregiver"));
            return Err(error);
        }
        Ok(())
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 255, message = "First name cannot be empty"))]
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Last name cannot be empty"))]
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,

    #[validate(length(min = 7, max = 50, message = "Phone number must be between 7-50 characters"))]
    pub phone: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

impl UpdateUserDto {
    pub fn validate_phone_number(&self) -> Result<(), ValidationError> {
        if let Some(phone) = &self.phone {
            let phone_regex =
                regex::Regex::new(r"^(\+?[0-9]{1,3}[- ]?)?[0-9]{3}[- ]?[0-9]{3}[- ]?[0-9]{4}$")
                    .map_err(|_| ValidationError::new("invalid_phone_regex"))?;

            if !phone_regex.is_match(phone) {
                let mut error = ValidationError::new("invalid_phone");
                error.message = Some(Cow::from(
                    "Phone number must be in a valid format (e.g., +1234567890 or 123-456-7890)",
                ));
                return Err(error);
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Validate)]
pub struct RequestQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "userType")]
    pub user_type: String,
    pub role: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            first_name: user.first_name.to_owned(),
            last_name: user.last_name.to_owned(),
            email: user.email.to_owned(),
            phone: user.phone.to_owned(),
            user_type: user.user_type.to_str().to_string(),
            role: user.role.to_str().to_string(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }

    pub fn filter_users(users: &[User]) -> Vec<FilterUserDto> {
        users.iter().map(FilterUserDto::filter_user).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub success: bool,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub success: bool,
    pub token: String,
    pub user: FilterUserDto,
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_admin_user_type() {
        let dto = RegisterUserDto {
            first_name: "Eve".to_string(),
            last_name: "Ng".to_string(),
            email: "eve@example.com".to_string(),
            phone: "+15550001111".to_string(),
            password: "secret123".to_string(),
            password_confirm: "secret123".to_string(),
            user_type: UserType::Admin,
        };

        assert!(dto.validate().is_ok());
        assert!(dto.validate_user_type().is_err());
    }

    #[test]
    fn register_rejects_password_mismatch() {
        let dto = RegisterUserDto {
            first_name: "Eve".to_string(),
            last_name: "Ng".to_string(),
            email: "eve@example.com".to_string(),
            phone: "+15550001111".to_string(),
            password: "secret123".to_string(),
            password_confirm: "different".to_string(),
            user_type: UserType::CareSeeker,
        };

        assert!(dto.validate().is_err());
    }

    #[test]
    fn phone_format_is_checked_on_update() {
        let valid = UpdateUserDto {
            phone: Some("+1 555-000-1111".to_string()),
            ..Default::default()
        };
        let invalid = UpdateUserDto {
            phone: Some("not-a-phone".to_string()),
            ..Default::default()
        };

        assert!(valid.validate_phone_number().is_ok());
        assert!(invalid.validate_phone_number().is_err());
    }
}
