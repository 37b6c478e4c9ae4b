use serde::{Deserialize, Serialize};

/// Whether an event originated in a private chat or a multi-party group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    /// One-on-one chat between a user and the bot.
    Private,
    /// Multi-party chat (group or supergroup).
    Group,
}

/// A single inbound event received from the messaging platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Opaque stable identifier of the sending user.
    pub sender_id: String,
    /// Identifier of the chat the event arrived in.
    pub chat_id: String,
    /// Private or group chat.
    pub chat_kind: ChatKind,
    /// True when the platform marks the sender as an automated participant.
    pub sender_is_bot: bool,
    /// The event payload.
    pub payload: EventPayload,
}

/// The payload carried by an [`InboundEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum EventPayload {
    /// Plain text message.
    Text(String),
    /// A button/callback selection, carrying the callback data.
    Callback(String),
    /// A message-prefixed command.
    Command(Command),
}

/// A selectable option attached to an outbound menu message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
    /// Text shown on the button.
    pub label: String,
    /// Callback data returned when the button is pressed.
    pub data: String,
}

impl MenuOption {
    /// Creates a menu option.
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// A parsed message-prefixed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "name")]
pub enum Command {
    /// `/start` — static welcome text.
    Start,
    /// `/help` — the configured help resource link.
    Help,
    /// `/cancel` — force the caller's session to its terminal stage.
    Cancel,
    /// `/authorize <code>` — unlock privileged commands with the passcode.
    Authorize {
        /// The passcode supplied by the caller.
        code: String,
    },
    /// `/balance <address>` — public balance lookup (authorized callers only).
    Balance {
        /// The public address to look up.
        address: String,
    },
    /// `/reply <user_id> <text>` — operator relay reply.
    Reply {
        /// Target user of the relayed reply.
        user_id: String,
        /// Text to relay.
        text: String,
    },
    /// `/endmanual <user_id>` — operator command ending manual mode.
    EndManual {
        /// User whose manual-mode relay is ended.
        user_id: String,
    },
    /// Any command the orchestrator does not recognize.
    Unknown(String),
}

impl Command {
    /// Parses a command out of a raw message text.
    ///
    /// Returns `None` when the text is not a command (does not start with
    /// `/`). A `@botname` suffix on the command word is stripped, so
    /// `/start@HelplineBot` parses the same as `/start`. Commands missing a
    /// required argument parse as [`Command::Unknown`] so the caller can
    /// answer with usage help instead of dropping the message.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let rest = text.strip_prefix('/')?;
        if rest.is_empty() {
            return None;
        }

        let mut parts = rest.splitn(2, char::is_whitespace);
        let word = parts.next().unwrap_or_default();
        let args = parts.next().unwrap_or("").trim();
        let name = word.split('@').next().unwrap_or(word).to_ascii_lowercase();

        let cmd = match name.as_str() {
            "start" => Self::Start,
            "help" => Self::Help,
            "cancel" => Self::Cancel,
            "authorize" if !args.is_empty() => Self::Authorize {
                code: args.to_string(),
            },
            "balance" if !args.is_empty() => Self::Balance {
                address: args.to_string(),
            },
            "reply" => {
                let mut rest = args.splitn(2, char::is_whitespace);
                match (rest.next(), rest.next()) {
                    (Some(user_id), Some(text)) if !user_id.is_empty() && !text.trim().is_empty() => {
                        Self::Reply {
                            user_id: user_id.to_string(),
                            text: text.trim().to_string(),
                        }
                    }
                    _ => Self::Unknown(name),
                }
            }
            "endmanual" if !args.is_empty() => Self::EndManual {
                user_id: args.to_string(),
            },
            _ => Self::Unknown(name),
        };
        Some(cmd)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse("/cancel"), Some(Command::Cancel));
    }

    #[test]
    fn test_parse_strips_bot_suffix() {
        assert_eq!(Command::parse("/start@HelplineBot"), Some(Command::Start));
        assert_eq!(Command::parse("/CANCEL@HelplineBot"), Some(Command::Cancel));
    }

    #[test]
    fn test_parse_non_command_is_none() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("/"), None);
    }

    #[test]
    fn test_parse_authorize() {
        assert_eq!(
            Command::parse("/authorize s3cret"),
            Some(Command::Authorize {
                code: "s3cret".to_string()
            })
        );
        // Missing code is unknown, not a panic or a silent drop.
        assert_eq!(
            Command::parse("/authorize"),
            Some(Command::Unknown("authorize".to_string()))
        );
    }

    #[test]
    fn test_parse_balance() {
        assert_eq!(
            Command::parse("/balance 0xabc"),
            Some(Command::Balance {
                address: "0xabc".to_string()
            })
        );
    }

    #[test]
    fn test_parse_reply_keeps_remainder_as_text() {
        assert_eq!(
            Command::parse("/reply 12345 try again with higher slippage"),
            Some(Command::Reply {
                user_id: "12345".to_string(),
                text: "try again with higher slippage".to_string()
            })
        );
    }

    #[test]
    fn test_parse_reply_missing_text() {
        assert_eq!(
            Command::parse("/reply 12345"),
            Some(Command::Unknown("reply".to_string()))
        );
    }

    #[test]
    fn test_parse_endmanual() {
        assert_eq!(
            Command::parse("/endmanual 12345"),
            Some(Command::EndManual {
                user_id: "12345".to_string()
            })
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            Command::parse("/frobnicate now"),
            Some(Command::Unknown("frobnicate".to_string()))
        );
    }
}
