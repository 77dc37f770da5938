//! Direct messages.

use chrono::{DateTime, Utc};
use serde::Serialize;
use walky_core::Route;

use crate::api_client::Call;
use crate::models::{ChatMessage, Conversation, MessageEnvelope};
use crate::{HttpClient, Result, WalkyApi};

/// `GET /api/chat/conversations`
pub const CONVERSATIONS: Route = Route::get("chatConversations", "/api/chat/conversations").secure();
/// `POST /api/chat/conversations`
pub const START: Route = Route::post("chatStart", "/api/chat/conversations").secure();
/// `GET /api/chat/conversations/{conversation_id}/messages`
pub const MESSAGES: Route =
    Route::get("chatMessages", "/api/chat/conversations/{conversation_id}/messages").secure();
/// `POST /api/chat/conversations/{conversation_id}/messages`
pub const SEND: Route =
    Route::post("chatSend", "/api/chat/conversations/{conversation_id}/messages").secure();
/// `POST /api/chat/conversations/{conversation_id}/read`
pub const MARK_READ: Route =
    Route::post("chatMarkRead", "/api/chat/conversations/{conversation_id}/read").secure();
/// `DELETE /api/chat/messages/{message_id}`
pub const DELETE_MESSAGE: Route =
    Route::delete("chatDeleteMessage", "/api/chat/messages/{message_id}").secure();

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[CONVERSATIONS, START, MESSAGES, SEND, MARK_READ, DELETE_MESSAGE];

/// Cursor paging for message history, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessagesQuery {
    /// Only messages older than this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<DateTime<Utc>>,
    /// Maximum number of rows returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Opens a conversation with one peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartConversation {
    /// Peer user id.
    pub with: String,
}

/// A message to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMessage {
    /// Message text.
    pub body: String,
}

impl<C: HttpClient> WalkyApi<C> {
    /// `GET /api/chat/conversations`
    pub async fn chat_conversations(&self) -> Result<Vec<Conversation>> {
        self.execute(Call::new(CONVERSATIONS)).await
    }

    /// `POST /api/chat/conversations`; returns the existing conversation when there is one.
    pub async fn chat_start(&self, peer_id: &str) -> Result<Conversation> {
        let body = StartConversation {
            with: peer_id.to_string(),
        };
        self.execute(Call::new(START).json(&body)?).await
    }

    /// `GET /api/chat/conversations/{conversation_id}/messages`
    pub async fn chat_messages(
        &self,
        conversation_id: &str,
        query: &MessagesQuery,
    ) -> Result<Vec<ChatMessage>> {
        self.execute(
            Call::new(MESSAGES)
                .path("conversation_id", conversation_id)
                .query(query)?,
        )
        .await
    }

    /// `POST /api/chat/conversations/{conversation_id}/messages`
    pub async fn chat_send(&self, conversation_id: &str, body: impl Into<String>) -> Result<ChatMessage> {
        let message = NewMessage { body: body.into() };
        self.execute(
            Call::new(SEND)
                .path("conversation_id", conversation_id)
                .json(&message)?,
        )
        .await
    }

    /// `POST /api/chat/conversations/{conversation_id}/read`
    pub async fn chat_mark_read(&self, conversation_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(MARK_READ).path("conversation_id", conversation_id))
            .await
    }

    /// `DELETE /api/chat/messages/{message_id}`
    pub async fn chat_delete_message(&self, message_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(DELETE_MESSAGE).path("message_id", message_id))
            .await
    }
}
