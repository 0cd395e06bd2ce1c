use chrono::{DateTime, Utc};
use entity::message::Model as MessageModel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Both fields are optional so a missing one is a 400 we word ourselves,
/// not a deserializer rejection.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RChatSend {
    pub team_id: Option<i32>,
    pub content: Option<String>,
}

/// A message together with its author's display name.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthoredMessage {
    pub message: MessageModel,
    pub author: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageView {
    pub id: i32,
    pub author: String,
    pub content: String,
    pub created_at: String,
    pub is_own: bool,
}

impl MessageView {
    pub fn new(authored: &AuthoredMessage, viewer: Uuid) -> Self {
        MessageView {
            id: authored.message.id,
            author: authored.author.clone(),
            content: authored.message.content.clone(),
            created_at: clock_time(&authored.message.created_at),
            is_own: authored.message.author_id == viewer,
        }
    }
}

pub fn clock_time(at: &DateTime<Utc>) -> String {
    at.format("%H:%M").to_string()
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SendMessageRes {
    pub success: bool,
    pub message: MessageView,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessagesRes {
    pub messages: Vec<MessageView>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatRoomView {
    pub team_id: i32,
    pub team_name: String,
    pub last_message: Option<MessageView>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatRoomsRes {
    pub rooms: Vec<ChatRoomView>,
}
