use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::messagemodels::{Conversation, Message};
use crate::models::usermodel::User;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateConversationDto {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageDto {
    #[validate(length(min = 1, max = 5000, message = "Message must be between 1 and 5000 characters"))]
    pub message: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct ConversationParticipant {
    pub id: Uuid,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "userType")]
    pub user_type: String,
}

impl ConversationParticipant {
    pub fn from_user(user: &User) -> Self {
        ConversationParticipant {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            user_type: user.user_type.to_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct ConversationWithDetails {
    pub conversation: Conversation,
    #[serde(rename = "otherUser")]
    pub other_user: ConversationParticipant,
    #[serde(rename = "lastMessage")]
    pub last_message: Option<Message>,
    #[serde(rename = "unreadCount")]
    pub unread_count: i64,
}
