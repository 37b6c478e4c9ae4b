use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The stage of the guided support dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// No dialogue started yet; the next text message begins one.
    Entry,
    /// Waiting for the user's language preference.
    LanguageSelect,
    /// Waiting for an issue selection from the menu.
    IssueSelect,
    /// Waiting for a public wallet address.
    AwaitAddress,
    /// Dialogue finished for this cycle; the next non-command text restarts it.
    Terminal,
}

/// The issue category chosen during the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Issue {
    /// Token swap problems.
    Swapping,
    /// Staking problems.
    Staking,
    /// Site malfunction.
    Site,
    /// Anything else.
    Other,
}

impl Issue {
    /// Parses an issue from callback data or a typed menu label.
    pub fn parse(data: &str) -> Option<Self> {
        match data.trim().to_ascii_lowercase().as_str() {
            "swapping" => Some(Self::Swapping),
            "staking" => Some(Self::Staking),
            "site" | "site malfunction" => Some(Self::Site),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Per-user conversation state.
///
/// There is exactly one `Session` per user id at any time. The stage is
/// advanced only by the conversation engine (or forced to [`Stage::Terminal`]
/// by an explicit cancel); `manual_mode` is flipped only by the relay bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque stable user identifier from the messaging platform.
    pub user_id: String,
    /// Current dialogue stage.
    pub stage: Stage,
    /// Detected or user-stated language code; sticky once set.
    pub language: Option<String>,
    /// Issue chosen during the dialogue.
    pub issue: Option<Issue>,
    /// True once the conversation has been handed off to the operator relay.
    pub manual_mode: bool,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the last inbound event for this user was handled.
    pub last_activity_at: DateTime<Utc>,
}

impl Session {
    /// Creates a fresh session at [`Stage::Entry`].
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            stage: Stage::Entry,
            language: None,
            issue: None,
            manual_mode: false,
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Marks activity now.
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Forces the session to [`Stage::Terminal`]. The caller also bumps the
    /// entry's generation so in-flight replies for the previous interaction
    /// are discarded.
    pub fn cancel(&mut self) {
        self.stage = Stage::Terminal;
        self.touch();
    }

    /// Seconds since the last handled event.
    pub fn idle_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_activity_at).num_seconds()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_entry() {
        let s = Session::new("42");
        assert_eq!(s.stage, Stage::Entry);
        assert!(s.language.is_none());
        assert!(s.issue.is_none());
        assert!(!s.manual_mode);
    }

    #[test]
    fn test_cancel_forces_terminal() {
        let mut s = Session::new("42");
        s.stage = Stage::AwaitAddress;
        s.cancel();
        assert_eq!(s.stage, Stage::Terminal);
    }

    #[test]
    fn test_issue_parse() {
        assert_eq!(Issue::parse("swapping"), Some(Issue::Swapping));
        assert_eq!(Issue::parse("Staking"), Some(Issue::Staking));
        assert_eq!(Issue::parse("Site malfunction"), Some(Issue::Site));
        assert_eq!(Issue::parse("site"), Some(Issue::Site));
        assert_eq!(Issue::parse("other"), Some(Issue::Other));
        assert_eq!(Issue::parse("manual"), None);
    }
}
