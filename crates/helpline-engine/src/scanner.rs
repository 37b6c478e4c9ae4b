use helpline_core::{ChatKind, EventPayload, InboundEvent};

/// An escalation produced when a group message matches a trigger keyword.
///
/// Ephemeral: consumed once by the dispatcher's outreach logic, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    /// The group chat the message arrived in.
    pub source_chat_id: String,
    /// The user who sent the matching message.
    pub user_id: String,
    /// The configured keyword that matched.
    pub matched_keyword: String,
    /// The full original message text.
    pub raw_text: String,
}

/// Scans group messages for configured trigger keywords.
#[derive(Debug, Clone)]
pub struct TriggerScanner {
    keywords: Vec<String>,
}

impl TriggerScanner {
    /// Creates a scanner. Keywords are lowercased and empty entries dropped;
    /// list order decides which keyword wins when several match.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// The configured keywords, normalized.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Returns a [`TriggerEvent`] when `event` is a group text message from
    /// a non-bot sender containing one of the keywords (case-insensitive
    /// substring match, first configured keyword wins). Anything else — bot
    /// senders, private chats, non-text payloads, no match — yields `None`.
    pub fn scan(&self, event: &InboundEvent) -> Option<TriggerEvent> {
        if event.chat_kind != ChatKind::Group || event.sender_is_bot {
            return None;
        }
        let EventPayload::Text(text) = &event.payload else {
            return None;
        };
        let lowered = text.to_lowercase();
        let matched = self.keywords.iter().find(|k| lowered.contains(k.as_str()))?;
        Some(TriggerEvent {
            source_chat_id: event.chat_id.clone(),
            user_id: event.sender_id.clone(),
            matched_keyword: matched.clone(),
            raw_text: text.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use helpline_core::Command;

    fn group_text(text: &str) -> InboundEvent {
        InboundEvent {
            sender_id: "42".to_string(),
            chat_id: "-100".to_string(),
            chat_kind: ChatKind::Group,
            sender_is_bot: false,
            payload: EventPayload::Text(text.to_string()),
        }
    }

    fn scanner() -> TriggerScanner {
        TriggerScanner::new(["wallet", "usdt", "swap"])
    }

    #[test]
    fn test_case_insensitive_substring_match() {
        let event = group_text("I need help with my WALLET");
        let trigger = scanner().scan(&event).unwrap();
        assert_eq!(trigger.matched_keyword, "wallet");
        assert_eq!(trigger.user_id, "42");
        assert_eq!(trigger.source_chat_id, "-100");
        assert_eq!(trigger.raw_text, "I need help with my WALLET");
    }

    #[test]
    fn test_first_configured_keyword_wins() {
        let event = group_text("my usdt swap failed");
        let trigger = scanner().scan(&event).unwrap();
        assert_eq!(trigger.matched_keyword, "usdt");
    }

    #[test]
    fn test_no_match_no_event() {
        assert!(scanner().scan(&group_text("good morning")).is_none());
    }

    #[test]
    fn test_bot_sender_ignored() {
        let mut event = group_text("wallet problem");
        event.sender_is_bot = true;
        assert!(scanner().scan(&event).is_none());
    }

    #[test]
    fn test_private_chat_ignored() {
        let mut event = group_text("wallet problem");
        event.chat_kind = ChatKind::Private;
        assert!(scanner().scan(&event).is_none());
    }

    #[test]
    fn test_non_text_payload_ignored() {
        let mut event = group_text("");
        event.payload = EventPayload::Command(Command::Help);
        assert!(scanner().scan(&event).is_none());
    }

    #[test]
    fn test_keyword_normalization() {
        let scanner = TriggerScanner::new([" Wallet ", "", "SWAP"]);
        assert_eq!(scanner.keywords(), ["wallet", "swap"]);
    }
}
