use helpline_channels::ChatChannel;
use helpline_core::{ChatKind, EventPayload, HelplineResult, InboundEvent};
use helpline_engine::fsm::{self, FsmInput, Reply};
use helpline_engine::{texts, TriggerScanner};
use helpline_relay::{AccessControl, RelayBridge};
use helpline_session::{SessionStore, Stage};
use helpline_translate::{Translator, DEFAULT_LANGUAGE};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::explorer::ExplorerClient;

/// Routes each inbound event to the relay (manual mode), the conversation
/// engine, the trigger scanner or a command handler.
///
/// One `handle_event` call is one unit of work: it acquires the sender's
/// session mutex for the state mutation, so same-user events are processed
/// in arrival order while different users run concurrently. All errors are
/// absorbed here — nothing that happens for one user can take down the
/// dispatch loop or another user's session.
pub struct Dispatcher {
    pub(crate) store: Arc<SessionStore>,
    pub(crate) scanner: TriggerScanner,
    pub(crate) translator: Arc<dyn Translator>,
    pub(crate) channel: Arc<dyn ChatChannel>,
    pub(crate) bridge: RelayBridge,
    pub(crate) access: Arc<AccessControl>,
    pub(crate) explorer: ExplorerClient,
    pub(crate) help_link: String,
}

impl Dispatcher {
    /// Creates a dispatcher.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Arc<SessionStore>,
        scanner: TriggerScanner,
        translator: Arc<dyn Translator>,
        channel: Arc<dyn ChatChannel>,
        bridge: RelayBridge,
        access: Arc<AccessControl>,
        explorer: ExplorerClient,
        help_link: impl Into<String>,
    ) -> Self {
        Self {
            store,
            scanner,
            translator,
            channel,
            bridge,
            access,
            explorer,
            help_link: help_link.into(),
        }
    }

    /// Handles one inbound event, absorbing every per-event error.
    pub async fn handle_event(&self, event: InboundEvent) {
        if let Err(e) = self.route(&event).await {
            warn!(
                user_id = %event.sender_id,
                chat_id = %event.chat_id,
                error = %e,
                "event handling failed"
            );
        }
    }

    async fn route(&self, event: &InboundEvent) -> HelplineResult<()> {
        match &event.payload {
            EventPayload::Command(cmd) => self.handle_command(event, cmd).await,
            EventPayload::Text(_) if event.chat_kind == ChatKind::Group => {
                self.handle_group_text(event).await
            }
            EventPayload::Text(text) => {
                self.handle_private_input(event, FsmInput::Text(text.clone()))
                    .await
            }
            EventPayload::Callback(_) if event.chat_kind == ChatKind::Group => Ok(()),
            EventPayload::Callback(data) => {
                self.handle_private_input(event, FsmInput::Menu(data.clone()))
                    .await
            }
        }
    }

    /// Scans a group message for trigger keywords and, on a match, attempts
    /// a best-effort private outreach message. Delivery failure (user never
    /// opened a private chat, or blocked the bot) is logged and dropped.
    async fn handle_group_text(&self, event: &InboundEvent) -> HelplineResult<()> {
        let Some(trigger) = self.scanner.scan(event) else {
            return Ok(());
        };
        info!(
            user_id = %trigger.user_id,
            chat_id = %trigger.source_chat_id,
            keyword = %trigger.matched_keyword,
            "trigger keyword matched"
        );

        let dm = format!("{}\n\nResource: {}", texts::TRIGGER_OUTREACH, self.help_link);
        if let Err(e) = self.channel.send_text(&trigger.user_id, &dm).await {
            info!(user_id = %trigger.user_id, error = %e, "could not DM triggered user");
        }
        Ok(())
    }

    /// Drives one private input through the relay or the state machine.
    async fn handle_private_input(
        &self,
        event: &InboundEvent,
        input: FsmInput,
    ) -> HelplineResult<()> {
        let entry = self.store.entry(&event.sender_id);
        let mut session = entry.lock().await;
        session.touch();
        // Captured before any transition work: a cancel arriving while this
        // handler is still computing (or translating) bumps the entry's
        // generation and the replies below are discarded.
        let generation = entry.generation();

        // Manual mode bypasses the state machine entirely.
        if session.manual_mode {
            let (FsmInput::Text(text) | FsmInput::Menu(text)) = &input else {
                return Ok(());
            };
            let text = text.clone();
            let snapshot = session.clone();
            drop(session);
            return self.bridge.relay_from_user(&snapshot, &text).await;
        }

        // A fresh dialogue cycle re-detects the language from the opening
        // message; mid-dialogue the stored language stays sticky.
        if matches!(session.stage, Stage::Entry | Stage::Terminal) {
            if let FsmInput::Text(text) = &input {
                let lang = self.translator.detect_or_default(text).await;
                session.language = Some(lang);
            }
        }

        let transition = fsm::step(&session, &input, &self.help_link);
        session.stage = transition.stage;
        if let Some(lang) = &transition.set_language {
            session.language = Some(lang.clone());
        }
        if let Some(issue) = transition.set_issue {
            session.issue = Some(issue);
        }

        if transition.handoff {
            return self.bridge.activate(&entry, &mut session).await;
        }

        let language = session.language.clone();
        drop(session);

        self.send_replies(
            event,
            language.as_deref(),
            generation,
            transition.replies,
        )
        .await;
        Ok(())
    }

    /// Translates and sends the replies of one transition.
    ///
    /// Each send is guarded by the entry generation captured when the event
    /// was picked up: a cancel that lands while a translation is still in
    /// flight bumps the generation without touching the session lock, and
    /// the stale replies are discarded instead of being delivered to a
    /// now-terminal session.
    pub(crate) async fn send_replies(
        &self,
        event: &InboundEvent,
        language: Option<&str>,
        generation: u64,
        replies: Vec<Reply>,
    ) {
        let entry = self.store.entry(&event.sender_id);
        for reply in replies {
            let (text, options) = match reply {
                Reply::Text(text) => (text, None),
                Reply::Menu { text, options } => (text, Some(options)),
            };
            let text = match language {
                Some(lang) if lang != DEFAULT_LANGUAGE => {
                    self.translator.translate_or_original(&text, lang).await
                }
                _ => text,
            };

            if entry.generation() != generation {
                debug!(user_id = %event.sender_id, "discarding stale replies");
                return;
            }

            let result = match &options {
                None => self.channel.send_text(&event.chat_id, &text).await,
                Some(options) => self.channel.send_menu(&event.chat_id, &text, options).await,
            };
            if let Err(e) = result {
                warn!(user_id = %event.sender_id, error = %e, "reply delivery failed");
            }
        }
    }
}
