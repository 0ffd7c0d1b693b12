//! Telegram Bot API transport (`getUpdates` long polling + `sendMessage`).

use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Default Bot API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

const HTTP_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

pub type TransportResult<T> = Result<T, TransportError>;

/// Chat transport failures.
#[derive(Debug)]
pub enum TransportError {
    /// Transport-level failure; the request URL is stripped because it
    /// embeds the bot token.
    Http(reqwest::Error),
    /// API answered with `ok = false`.
    Api(String),
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "chat request failed: {err}"),
            Self::Api(description) => write!(f, "chat api error: {description}"),
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Api(_) => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.without_url())
    }
}

/// One polled update. `message` is `None` for non-text updates, which still
/// advance the polling offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingUpdate {
    pub update_id: i64,
    pub message: Option<IncomingMessage>,
}

/// Text message with the id the reply is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub reply_to: i64,
    pub text: String,
}

/// Receives inbound messages and sends replies.
pub trait ChatTransport {
    /// Returns updates with `update_id >= offset` (all pending when `None`).
    fn poll(&self, offset: Option<i64>) -> TransportResult<Vec<IncomingUpdate>>;
    /// Sends one text message to `chat_id`.
    fn send(&self, chat_id: i64, text: &str) -> TransportResult<()>;
}

impl<T: ChatTransport + ?Sized> ChatTransport for &T {
    fn poll(&self, offset: Option<i64>) -> TransportResult<Vec<IncomingUpdate>> {
        (**self).poll(offset)
    }

    fn send(&self, chat_id: i64, text: &str) -> TransportResult<()> {
        (**self).send(chat_id, text)
    }
}

/// Bot API adapter using blocking long polling.
pub struct TelegramTransport {
    http: Client,
    endpoint: String,
    poll_timeout: Duration,
}

impl TelegramTransport {
    /// Creates a transport for one bot token.
    ///
    /// The HTTP timeout is the long-poll timeout plus a fixed margin so an
    /// idle poll is answered by the server before the client gives up.
    pub fn new(api_base: &str, token: &str, poll_timeout: Duration) -> TransportResult<Self> {
        let http = Client::builder()
            .timeout(poll_timeout + HTTP_TIMEOUT_MARGIN)
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/bot{}", api_base.trim_end_matches('/'), token),
            poll_timeout,
        })
    }
}

impl ChatTransport for TelegramTransport {
    fn poll(&self, offset: Option<i64>) -> TransportResult<Vec<IncomingUpdate>> {
        let mut query = vec![("timeout", self.poll_timeout.as_secs().to_string())];
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }
        let response: ApiResponse<Vec<Update>> = self
            .http
            .get(format!("{}/getUpdates", self.endpoint))
            .query(&query)
            .send()?
            .json()?;
        let updates = response.into_result()?;
        debug!(
            "event=updates_polled module=transport status=ok count={}",
            updates.len()
        );
        Ok(updates.into_iter().map(Update::into_incoming).collect())
    }

    fn send(&self, chat_id: i64, text: &str) -> TransportResult<()> {
        let response: ApiResponse<serde_json::Value> = self
            .http
            .post(format!("{}/sendMessage", self.endpoint))
            .json(&SendMessage { chat_id, text })
            .send()?
            .json()?;
        response.into_result()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> TransportResult<T> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(TransportError::Api(
                self.description
                    .unwrap_or_else(|| "response without result".to_string()),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    chat: Chat,
    from: Option<User>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct User {
    id: i64,
}

impl Update {
    fn into_incoming(self) -> IncomingUpdate {
        let message = self.message.and_then(|message| {
            let reply_to = message.from.map_or(message.chat.id, |user| user.id);
            message
                .text
                .map(|text| IncomingMessage { reply_to, text })
        });
        IncomingUpdate {
            update_id: self.update_id,
            message,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::{ApiResponse, IncomingMessage, TransportError, Update};

    #[test]
    fn decodes_text_and_non_text_updates() {
        let body = r#"{
            "ok": true,
            "result": [
                {
                    "update_id": 41,
                    "message": {
                        "message_id": 1,
                        "from": { "id": 500, "is_bot": false, "first_name": "A" },
                        "chat": { "id": 900, "type": "private" },
                        "text": "7707083893"
                    }
                },
                {
                    "update_id": 42,
                    "message": {
                        "message_id": 2,
                        "chat": { "id": 901, "type": "private" },
                        "sticker": { "file_id": "x" }
                    }
                },
                { "update_id": 43, "edited_message": { "message_id": 1 } }
            ]
        }"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(body).unwrap();
        let updates: Vec<_> = response
            .into_result()
            .unwrap()
            .into_iter()
            .map(Update::into_incoming)
            .collect();

        assert_eq!(updates.len(), 3);
        assert_eq!(updates[0].update_id, 41);
        assert_eq!(
            updates[0].message,
            Some(IncomingMessage {
                reply_to: 500,
                text: "7707083893".to_string(),
            })
        );
        assert_eq!(updates[1].message, None);
        assert_eq!(updates[2].update_id, 43);
        assert_eq!(updates[2].message, None);
    }

    #[test]
    fn reply_falls_back_to_chat_id_without_sender() {
        let update: Update = serde_json::from_str(
            r#"{ "update_id": 7, "message": { "chat": { "id": -100 }, "text": "Привет" } }"#,
        )
        .unwrap();
        let incoming = update.into_incoming();
        assert_eq!(incoming.message.unwrap().reply_to, -100);
    }

    #[test]
    fn api_error_keeps_description() {
        let response: ApiResponse<Vec<Update>> =
            serde_json::from_str(r#"{ "ok": false, "error_code": 401, "description": "Unauthorized" }"#)
                .unwrap();
        match response.into_result() {
            Err(TransportError::Api(description)) => assert_eq!(description, "Unauthorized"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
