use crate::channel::ChatChannel;
use async_trait::async_trait;
use helpline_core::{
    ChatKind, Command, EventPayload, HelplineError, HelplineResult, InboundEvent, MenuOption,
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Telegram Bot API channel adapter.
///
/// Uses the Telegram Bot HTTP API for sending messages and long-polling
/// (`getUpdates`) for receiving them. Incoming messages and callback
/// queries are forwarded through a `tokio::sync::mpsc` channel as
/// [`InboundEvent`]s.
pub struct TelegramChannel {
    bot_token: String,
    api_base: String,
    client: reqwest::Client,
    event_tx: mpsc::Sender<InboundEvent>,
    event_rx: Option<mpsc::Receiver<InboundEvent>>,
}

// ── Telegram API wire types ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TelegramResponse<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct TelegramUpdate {
    update_id: i64,
    message: Option<TelegramMessagePayload>,
    callback_query: Option<TelegramCallbackQuery>,
}

#[derive(Debug, Deserialize)]
struct TelegramMessagePayload {
    #[allow(dead_code)]
    message_id: i64,
    from: Option<TelegramUser>,
    chat: TelegramChat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramUser {
    id: i64,
    #[serde(default)]
    is_bot: bool,
}

#[derive(Debug, Deserialize)]
struct TelegramChat {
    id: i64,
    #[serde(rename = "type")]
    chat_type: String,
}

#[derive(Debug, Deserialize)]
struct TelegramCallbackQuery {
    id: String,
    from: TelegramUser,
    message: Option<TelegramMessagePayload>,
    data: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardMarkup {
    inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardButton {
    text: String,
    callback_data: String,
}

#[derive(Debug, Serialize)]
struct EditMessageTextRequest<'a> {
    chat_id: &'a str,
    message_id: i64,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct AnswerCallbackQueryRequest<'a> {
    callback_query_id: &'a str,
}

// ── Implementation ──────────────────────────────────────────────────────────

impl TelegramChannel {
    /// Creates a new `TelegramChannel`.
    ///
    /// * `bot_token` – The bot token obtained from @BotFather.
    /// * `event_buffer` – Capacity of the internal mpsc event buffer.
    pub fn new(bot_token: impl Into<String>, event_buffer: usize) -> Self {
        Self::with_api_base("https://api.telegram.org", bot_token, event_buffer)
    }

    /// Creates a channel pointed at a custom API base URL (tests).
    pub fn with_api_base(
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        event_buffer: usize,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(event_buffer);
        Self {
            bot_token: bot_token.into(),
            api_base: api_base.into(),
            client: reqwest::Client::new(),
            event_tx,
            event_rx: Some(event_rx),
        }
    }

    /// Takes the receiving half of the event channel.
    ///
    /// This can only be called once; subsequent calls return `None`.
    pub fn take_event_receiver(&mut self) -> Option<mpsc::Receiver<InboundEvent>> {
        self.event_rx.take()
    }

    /// Starts long-polling the Telegram `getUpdates` endpoint.
    ///
    /// Runs indefinitely, forwarding every incoming text message, command
    /// and callback selection as an [`InboundEvent`] through the mpsc
    /// channel. Should be spawned onto a Tokio task.
    pub async fn poll_updates(&self) -> HelplineResult<()> {
        let mut offset: Option<i64> = None;

        loop {
            let url = self.api_url("getUpdates");

            let mut params: Vec<(&str, String)> = vec![("timeout", "30".to_string())];
            if let Some(off) = offset {
                params.push(("offset", off.to_string()));
            }

            let response = self
                .client
                .get(&url)
                .query(&params)
                .send()
                .await
                .map_err(|e| HelplineError::Channel(format!("Telegram poll error: {e}")))?;

            let body: TelegramResponse<Vec<TelegramUpdate>> = response
                .json()
                .await
                .map_err(|e| HelplineError::Channel(format!("Telegram parse error: {e}")))?;

            if !body.ok {
                return Err(HelplineError::Channel(format!(
                    "Telegram API error: {}",
                    body.description.unwrap_or_default()
                )));
            }

            for update in body.result.unwrap_or_default() {
                // Advance the offset so we do not receive this update again.
                offset = Some(update.update_id + 1);

                if let Some(callback) = &update.callback_query {
                    // Ack the press so the client stops its spinner; a
                    // failed ack is not worth more than a log line.
                    if let Err(e) = self.answer_callback_query(&callback.id).await {
                        warn!(error = %e, "answerCallbackQuery failed");
                    }
                }

                let Some(event) = map_update(update) else {
                    continue;
                };
                debug!(sender_id = %event.sender_id, chat_id = %event.chat_id, "inbound event");

                // Best-effort send; if the receiver is dropped we stop.
                if self.event_tx.send(event).await.is_err() {
                    return Ok(());
                }
            }
        }
    }

    async fn answer_callback_query(&self, callback_query_id: &str) -> HelplineResult<()> {
        self.call("answerCallbackQuery", &AnswerCallbackQueryRequest { callback_query_id })
            .await
    }

    async fn call<B: Serialize>(&self, method: &str, body: &B) -> HelplineResult<()> {
        let response = self
            .client
            .post(self.api_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| HelplineError::Channel(format!("Telegram {method} error: {e}")))?;

        let parsed: TelegramResponse<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| HelplineError::Channel(format!("Telegram parse error: {e}")))?;

        if !parsed.ok {
            return Err(HelplineError::Delivery(format!(
                "Telegram {method} failed: {}",
                parsed.description.unwrap_or_default()
            )));
        }
        Ok(())
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.bot_token)
    }
}

/// Maps one Telegram update into an [`InboundEvent`], if it carries anything
/// the orchestrator handles.
fn map_update(update: TelegramUpdate) -> Option<InboundEvent> {
    if let Some(callback) = update.callback_query {
        let chat = callback.message.as_ref().map(|m| &m.chat);
        return Some(InboundEvent {
            sender_id: callback.from.id.to_string(),
            chat_id: chat
                .map(|c| c.id.to_string())
                .unwrap_or_else(|| callback.from.id.to_string()),
            chat_kind: chat.map_or(ChatKind::Private, chat_kind),
            sender_is_bot: callback.from.is_bot,
            payload: EventPayload::Callback(callback.data.unwrap_or_default()),
        });
    }

    let msg = update.message?;
    let text = msg.text?;
    let from = msg.from?;

    let payload = match Command::parse(&text) {
        Some(cmd) => EventPayload::Command(cmd),
        None => EventPayload::Text(text),
    };

    Some(InboundEvent {
        sender_id: from.id.to_string(),
        chat_id: msg.chat.id.to_string(),
        chat_kind: chat_kind(&msg.chat),
        sender_is_bot: from.is_bot,
        payload,
    })
}

fn chat_kind(chat: &TelegramChat) -> ChatKind {
    match chat.chat_type.as_str() {
        "group" | "supergroup" | "channel" => ChatKind::Group,
        _ => ChatKind::Private,
    }
}

#[async_trait]
impl ChatChannel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send_text(&self, chat_id: &str, text: &str) -> HelplineResult<()> {
        self.call(
            "sendMessage",
            &SendMessageRequest {
                chat_id,
                text,
                reply_markup: None,
            },
        )
        .await
    }

    async fn send_menu(
        &self,
        chat_id: &str,
        text: &str,
        options: &[MenuOption],
    ) -> HelplineResult<()> {
        // Two buttons per row, the way the dialogue menu reads best.
        let inline_keyboard = options
            .chunks(2)
            .map(|row| {
                row.iter()
                    .map(|o| InlineKeyboardButton {
                        text: o.label.clone(),
                        callback_data: o.data.clone(),
                    })
                    .collect()
            })
            .collect();

        self.call(
            "sendMessage",
            &SendMessageRequest {
                chat_id,
                text,
                reply_markup: Some(InlineKeyboardMarkup { inline_keyboard }),
            },
        )
        .await
    }

    async fn edit_message_text(
        &self,
        chat_id: &str,
        message_id: i64,
        text: &str,
    ) -> HelplineResult<()> {
        self.call(
            "editMessageText",
            &EditMessageTextRequest {
                chat_id,
                message_id,
                text,
            },
        )
        .await
    }
}
