use crate::texts;
use helpline_core::MenuOption;
use helpline_session::{Issue, Session, Stage};

/// Callback data of the manual-support menu entry, which hands the
/// conversation to the relay instead of advancing the state machine.
pub const MANUAL_SUPPORT_DATA: &str = "manual";

/// Affirmations accepted as "yes, English is fine".
const ENGLISH_AFFIRMATIONS: [&str; 4] = ["yes", "y", "en", "english"];

/// One input to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsmInput {
    /// Free text from the user.
    Text(String),
    /// A menu selection: callback data or a typed menu label.
    Menu(String),
    /// The explicit cancel command.
    Cancel,
}

/// A reply the dispatcher should send to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text.
    Text(String),
    /// Text with a selectable menu attached.
    Menu {
        /// Message text above the options.
        text: String,
        /// The selectable options.
        options: Vec<MenuOption>,
    },
}

/// The outcome of one state-machine step.
///
/// The dispatcher applies the session mutations (`stage`, `set_language`,
/// `set_issue`) and sends the replies as a single unit under the session
/// lock. `handoff` requests relay activation instead of further FSM routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Next dialogue stage.
    pub stage: Stage,
    /// New language hint to store, if any.
    pub set_language: Option<String>,
    /// Issue to record, if any.
    pub set_issue: Option<Issue>,
    /// Replies to send, in order.
    pub replies: Vec<Reply>,
    /// True when the conversation should be handed to the operator relay.
    pub handoff: bool,
}

impl Transition {
    fn to(stage: Stage) -> Self {
        Self {
            stage,
            set_language: None,
            set_issue: None,
            replies: Vec::new(),
            handoff: false,
        }
    }

    fn reply(mut self, text: impl Into<String>) -> Self {
        self.replies.push(Reply::Text(text.into()));
        self
    }

    fn menu(mut self, text: impl Into<String>, options: Vec<MenuOption>) -> Self {
        self.replies.push(Reply::Menu {
            text: text.into(),
            options,
        });
        self
    }
}

/// Syntactic sanity check for a public address: hex prefix `0x` and a total
/// length of at least 40. No checksum and no on-chain existence check.
pub fn is_valid_address(text: &str) -> bool {
    let text = text.trim();
    text.starts_with("0x") && text.len() >= 40
}

/// The issue menu shown after language selection.
pub fn issue_menu() -> Vec<MenuOption> {
    vec![
        MenuOption::new("Swapping", "swapping"),
        MenuOption::new("Staking", "staking"),
        MenuOption::new("Site malfunction", "site"),
        MenuOption::new("Other", "other"),
        MenuOption::new("Manual support", MANUAL_SUPPORT_DATA),
    ]
}

/// Advances the dialogue by one input.
///
/// Pure: reads the session snapshot, never mutates it. Invalid input at any
/// stage reprompts the same stage — no input is silently dropped and no
/// input aborts the session.
pub fn step(session: &Session, input: &FsmInput, help_link: &str) -> Transition {
    // Cancel wins from any stage, overriding any pending prompt.
    if matches!(input, FsmInput::Cancel) {
        return Transition::to(Stage::Terminal).reply(texts::CANCELLED);
    }

    match session.stage {
        // Terminal restarts fresh on the next input: same behaviour as Entry.
        Stage::Entry | Stage::Terminal => {
            Transition::to(Stage::LanguageSelect).reply(texts::LANGUAGE_QUESTION)
        }

        Stage::LanguageSelect => {
            let text = match input {
                FsmInput::Text(t) | FsmInput::Menu(t) => t.trim(),
                FsmInput::Cancel => unreachable!(),
            };
            let lowered = text.to_ascii_lowercase();
            let transition = Transition::to(Stage::IssueSelect);
            let transition = if ENGLISH_AFFIRMATIONS.contains(&lowered.as_str()) {
                Transition {
                    set_language: Some("en".to_string()),
                    ..transition
                }
                .reply(texts::ENGLISH_CONFIRMED)
            } else {
                Transition {
                    set_language: Some(lowered.clone()),
                    ..transition
                }
                .reply(texts::language_noted(&lowered))
            };
            transition.menu(texts::ISSUE_PROMPT, issue_menu())
        }

        Stage::IssueSelect => {
            let data = match input {
                FsmInput::Text(t) | FsmInput::Menu(t) => t.trim(),
                FsmInput::Cancel => unreachable!(),
            };
            if data.eq_ignore_ascii_case(MANUAL_SUPPORT_DATA)
                || data.eq_ignore_ascii_case("manual support")
            {
                return Transition {
                    handoff: true,
                    ..Transition::to(Stage::IssueSelect)
                };
            }
            match Issue::parse(data) {
                Some(issue @ (Issue::Swapping | Issue::Staking)) => Transition {
                    set_issue: Some(issue),
                    ..Transition::to(Stage::AwaitAddress)
                }
                .reply(texts::ADDRESS_PROMPT),
                Some(issue) => Transition {
                    set_issue: Some(issue),
                    ..Transition::to(Stage::Terminal)
                }
                .reply(texts::troubleshooting(data, help_link)),
                // Unrecognized selection: reprompt the menu, stay put.
                None => Transition::to(Stage::IssueSelect)
                    .menu(texts::MENU_UNRECOGNIZED, issue_menu()),
            }
        }

        Stage::AwaitAddress => {
            let text = match input {
                FsmInput::Text(t) | FsmInput::Menu(t) => t.trim(),
                FsmInput::Cancel => unreachable!(),
            };
            if !is_valid_address(text) {
                return Transition::to(Stage::AwaitAddress).reply(texts::ADDRESS_INVALID);
            }
            let advice = match session.issue {
                Some(Issue::Swapping) => texts::SWAPPING_ADVICE,
                Some(Issue::Staking) => texts::STAKING_ADVICE,
                _ => texts::GENERIC_ADVICE,
            };
            Transition::to(Stage::Terminal)
                .reply(texts::explorer_link(text))
                .reply(texts::next_steps(advice, help_link))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const HELP: &str = "https://help.example.org/";

    fn session_at(stage: Stage) -> Session {
        let mut s = Session::new("42");
        s.stage = stage;
        s
    }

    fn text(t: &str) -> FsmInput {
        FsmInput::Text(t.to_string())
    }

    #[test]
    fn test_entry_asks_for_language() {
        let t = step(&session_at(Stage::Entry), &text("hello"), HELP);
        assert_eq!(t.stage, Stage::LanguageSelect);
        assert_eq!(t.replies, vec![Reply::Text(texts::LANGUAGE_QUESTION.to_string())]);
        assert!(!t.handoff);
    }

    #[test]
    fn test_terminal_restarts_like_entry() {
        let t = step(&session_at(Stage::Terminal), &text("hi again"), HELP);
        assert_eq!(t.stage, Stage::LanguageSelect);
        assert_eq!(t.replies, vec![Reply::Text(texts::LANGUAGE_QUESTION.to_string())]);
    }

    #[test]
    fn test_language_affirmation_is_case_insensitive() {
        for affirmation in ["yes", "YES", " y ", "English", "EN"] {
            let t = step(&session_at(Stage::LanguageSelect), &text(affirmation), HELP);
            assert_eq!(t.stage, Stage::IssueSelect, "input {affirmation:?}");
            assert_eq!(t.set_language.as_deref(), Some("en"));
            assert!(matches!(&t.replies[1], Reply::Menu { options, .. } if options.len() == 5));
        }
    }

    #[test]
    fn test_language_literal_reply_becomes_hint() {
        let t = step(&session_at(Stage::LanguageSelect), &text("Español"), HELP);
        assert_eq!(t.stage, Stage::IssueSelect);
        assert_eq!(t.set_language.as_deref(), Some("español"));
        assert!(matches!(&t.replies[0], Reply::Text(msg) if msg.contains("español")));
    }

    #[test]
    fn test_issue_swapping_asks_for_address_with_warning() {
        let t = step(
            &session_at(Stage::IssueSelect),
            &FsmInput::Menu("swapping".to_string()),
            HELP,
        );
        assert_eq!(t.stage, Stage::AwaitAddress);
        assert_eq!(t.set_issue, Some(Issue::Swapping));
        assert!(matches!(&t.replies[0], Reply::Text(msg) if msg.contains("private keys")));
    }

    #[test]
    fn test_issue_typed_label_matches_menu() {
        let t = step(&session_at(Stage::IssueSelect), &text("Staking"), HELP);
        assert_eq!(t.stage, Stage::AwaitAddress);
        assert_eq!(t.set_issue, Some(Issue::Staking));
    }

    #[test]
    fn test_issue_site_goes_terminal_with_troubleshooting() {
        let t = step(
            &session_at(Stage::IssueSelect),
            &FsmInput::Menu("site".to_string()),
            HELP,
        );
        assert_eq!(t.stage, Stage::Terminal);
        assert_eq!(t.set_issue, Some(Issue::Site));
        assert!(matches!(&t.replies[0], Reply::Text(msg) if msg.contains(HELP)));
    }

    #[test]
    fn test_issue_manual_support_requests_handoff() {
        let t = step(
            &session_at(Stage::IssueSelect),
            &FsmInput::Menu("manual".to_string()),
            HELP,
        );
        assert!(t.handoff);
        assert!(t.replies.is_empty());
        assert_eq!(t.stage, Stage::IssueSelect);
    }

    #[test]
    fn test_issue_unrecognized_reprompts_menu() {
        let t = step(&session_at(Stage::IssueSelect), &text("???"), HELP);
        assert_eq!(t.stage, Stage::IssueSelect);
        assert!(matches!(&t.replies[0], Reply::Menu { .. }));
    }

    #[test]
    fn test_address_validation_boundaries() {
        assert!(is_valid_address(&format!("0x{}", "a".repeat(38))));
        assert!(is_valid_address(&format!("0x{}", "a".repeat(40))));
        assert!(!is_valid_address(&format!("0x{}", "a".repeat(37))));
        assert!(!is_valid_address(&format!("1x{}", "a".repeat(40))));
        assert!(!is_valid_address("notanaddress"));
        assert!(!is_valid_address(""));
    }

    #[test]
    fn test_invalid_address_reprompts_same_stage() {
        let t = step(&session_at(Stage::AwaitAddress), &text("notanaddress"), HELP);
        assert_eq!(t.stage, Stage::AwaitAddress);
        assert_eq!(t.replies, vec![Reply::Text(texts::ADDRESS_INVALID.to_string())]);
    }

    #[test]
    fn test_valid_address_gives_link_and_issue_advice() {
        let address = format!("0x{}", "ab".repeat(20));
        let mut session = session_at(Stage::AwaitAddress);
        session.issue = Some(Issue::Staking);

        let t = step(&session, &text(&address), HELP);
        assert_eq!(t.stage, Stage::Terminal);
        assert_eq!(t.replies.len(), 2);
        assert!(matches!(&t.replies[0], Reply::Text(msg) if msg.contains(&address)));
        assert!(
            matches!(&t.replies[1], Reply::Text(msg) if msg.contains("staking contract address"))
        );
    }

    #[test]
    fn test_cancel_overrides_every_stage() {
        for stage in [
            Stage::Entry,
            Stage::LanguageSelect,
            Stage::IssueSelect,
            Stage::AwaitAddress,
            Stage::Terminal,
        ] {
            let t = step(&session_at(stage), &FsmInput::Cancel, HELP);
            assert_eq!(t.stage, Stage::Terminal);
            assert_eq!(t.replies, vec![Reply::Text(texts::CANCELLED.to_string())]);
        }
    }
}
