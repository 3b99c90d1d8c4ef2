use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    CareSeeker,
    Caregiver,
    Admin,
}

impl UserType {
    pub fn to_str(&self) -> &str {
        match self {
            UserType::CareSeeker => "care_seeker",
            UserType::Caregiver => "caregiver",
            UserType::Admin => "admin",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub user_type: UserType,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Admins hold either the admin account type or the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin || self.user_type == UserType::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(user_type: UserType, role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Okafor".to_string(),
            email: "ada@example.com".to_string(),
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
    fn admin_detection_covers_type_and_role() {
        assert!(user_with(UserType::Admin, UserRole::User).is_admin());
        assert!(user_with(UserType::CareSeeker, UserRole::Admin).is_admin());
        assert!(!user_with(UserType::Caregiver, UserRole::User).is_admin());
    }

    #[test]
    fn full_name_joins_first_and_last() {
        let user = user_with(UserType::CareSeeker, UserRole::User);
        assert_eq!(user.full_name(), "Ada Okafor");
    }
}
