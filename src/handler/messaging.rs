use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{messagedb::MessagingExt, userdb::UserExt},
    dtos::{
        messagedtos::{
            ConversationParticipant, ConversationWithDetails, CreateConversationDto, SendMessageDto,
        },
        userdtos::RequestQueryDto,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn messaging_handler() -> Router {
    Router::new()
        .route(
            "/conversations",
            get(get_conversations).post(create_conversation),
        )
        .route(
            "/conversations/:conversation_id",
            get(get_messages).post(send_message),
        )
        .route("/unread-count", get(get_unread_count))
}

pub async fn create_conversation(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateConversationDto>,
) -> Result<impl IntoResponse, HttpError> {
    if body.user_id == auth.user.id {
        return Err(HttpError::bad_request(
            "Cannot start a conversation with yourself",
        ));
    }

    let other_user = app_state
        .db_client
        .get_user(Some(body.user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let conversation = app_state
        .db_client
        .find_or_create_conversation(auth.user.id, body.user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let last_message = app_state
        .db_client
        .get_last_message(conversation.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let unread_count = app_state
        .db_client
        .get_unread_count(conversation.id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = ConversationWithDetails {
        conversation,
        other_user: ConversationParticipant::from_user(&other_user),
        last_message,
        unread_count,
    };

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "conversation": response }
    })))
}

pub async fn get_conversations(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(pagination): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    pagination
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = pagination.page.unwrap_or(1);
    let limit = pagination.limit.unwrap_or(20) as i64;
    let offset = ((page - 1) as i64) * limit;

    let conversations = app_state
        .db_client
        .get_user_conversations(auth.user.id, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut conversation_details = Vec::new();

    for conversation in conversations {
        let other_user_id = conversation.other_participant(auth.user.id);

        let other_user = app_state
            .db_client
            .get_user(Some(other_user_id), None)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or_else(|| HttpError::not_found("User not found"))?;

        let last_message = app_state
            .db_client
            .get_last_message(conversation.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        let unread_count = app_state
            .db_client
            .get_unread_count(conversation.id, auth.user.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        conversation_details.push(ConversationWithDetails {
            conversation,
            other_user: ConversationParticipant::from_user(&other_user),
            last_message,
            unread_count,
        });
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "conversations": conversation_details }
    })))
}

pub async fn get_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(conversation_id): Path<Uuid>,
    Query(pagination): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    pagination
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let conversation = app_state
        .db_client
        .get_conversation_by_id(conversation_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Conversation not found"))?;

    if !conversation.is_participant(auth.user.id) {
        return Err(HttpError::forbidden(
            "Not authorized to view this conversation",
        ));
    }

    let page = pagination.page.unwrap_or(1);
    let limit = pagination.limit.unwrap_or(50) as i64;
    let offset = ((page - 1) as i64) * limit;

    let messages = app_state
        .db_client
        .get_conversation_messages(conversation_id, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Reading the thread marks this user's unread messages as read; the
    // other participant's flags are untouched.
    app_state
        .db_client
        .mark_messages_as_read(conversation_id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "messages": messages }
    })))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(conversation_id): Path<Uuid>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let conversation = app_state
        .db_client
        .get_conversation_by_id(conversation_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Conversation not found"))?;

    if !conversation.is_participant(auth.user.id) {
        return Err(HttpError::forbidden(
            "Not authorized to send messages in this conversation",
        ));
    }

    let receiver_id = conversation.other_participant(auth.user.id);

    let message = app_state
        .db_client
        .send_message(conversation_id, auth.user.id, receiver_id, body.message)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .notification_service
        .notify_new_message(receiver_id, &message)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Message sent successfully",
            "data": { "message": message }
        })),
    ))
}

pub async fn get_unread_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let count = app_state
        .db_client
        .get_total_unread_count(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "unreadCount": count }
    })))
}
