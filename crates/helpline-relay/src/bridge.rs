use crate::auth::AccessControl;
use helpline_channels::ChatChannel;
use helpline_core::{HelplineError, HelplineResult};
use helpline_session::{Session, SessionEntry, SessionStore};
use helpline_translate::{Translator, DEFAULT_LANGUAGE};
use std::sync::Arc;
use tracing::{info, warn};

/// Texts the bridge sends on its own behalf.
mod notices {
    pub const MANUAL_STARTED: &str = "You are now connected to a human operator. \
Anything you type here will be forwarded. The operator will close this conversation \
when it is resolved.";
    pub const MANUAL_ENDED: &str =
        "The operator has closed this conversation. Type anything to start a new support session.";
    pub const UNAUTHORIZED: &str = "You are not authorized to use this command.";
    pub const NO_SUCH_RELAY: &str = "No active manual session for that user.";
}

/// Forwards translated messages between a user and the configured operator
/// while the user's session is in manual mode.
pub struct RelayBridge {
    store: Arc<SessionStore>,
    translator: Arc<dyn Translator>,
    channel: Arc<dyn ChatChannel>,
    access: Arc<AccessControl>,
    /// Chat the operator receives escalations and relayed messages in.
    operator_chat_id: String,
    /// Fixed language operator-facing messages are translated into.
    operator_lang: String,
}

impl RelayBridge {
    /// Creates a bridge.
    pub fn new(
        store: Arc<SessionStore>,
        translator: Arc<dyn Translator>,
        channel: Arc<dyn ChatChannel>,
        access: Arc<AccessControl>,
        operator_chat_id: impl Into<String>,
    ) -> Self {
        Self {
            store,
            translator,
            channel,
            access,
            operator_chat_id: operator_chat_id.into(),
            operator_lang: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// True when the user's session is in manual mode.
    pub async fn is_active(&self, user_id: &str) -> bool {
        self.store
            .peek(user_id)
            .await
            .is_some_and(|s| s.manual_mode)
    }

    /// Hands the session to the operator relay.
    ///
    /// The caller holds the session lock (this runs as part of handling the
    /// user's own event). Sets manual mode, invalidates in-flight dialogue
    /// effects via the generation counter, notifies the operator and
    /// confirms to the user in their language.
    pub async fn activate(
        &self,
        entry: &SessionEntry,
        session: &mut Session,
    ) -> HelplineResult<()> {
        session.manual_mode = true;
        session.touch();
        entry.bump_generation();
        info!(user_id = %session.user_id, "manual mode activated");

        let notice = format!(
            "Manual support requested by user {id}. Use /reply {id} <text> to respond.",
            id = session.user_id
        );
        if let Err(e) = self.channel.send_text(&self.operator_chat_id, &notice).await {
            // The user still gets their confirmation; the operator chat
            // being unreachable is a deployment problem, not the user's.
            warn!(user_id = %session.user_id, error = %e, "operator handoff notification failed");
        }

        let lang = session.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
        let confirmation = self
            .translator
            .translate_or_original(notices::MANUAL_STARTED, lang)
            .await;
        self.channel.send_text(&session.user_id, &confirmation).await
    }

    /// Forwards a user's message to the operator chat, translated into the
    /// operator language and tagged with the user id for correlation.
    ///
    /// The caller holds the session lock. Translation failure falls back to
    /// the untranslated text; the message is never dropped.
    pub async fn relay_from_user(&self, session: &Session, text: &str) -> HelplineResult<()> {
        let translated = self
            .translator
            .translate_or_original(text, &self.operator_lang)
            .await;
        let tagged = format!("[user {}] {translated}", session.user_id);
        self.channel.send_text(&self.operator_chat_id, &tagged).await
    }

    /// Relays an operator reply to a user, translated into the user's
    /// stored language.
    ///
    /// Only the configured operator may call this; any other caller gets an
    /// explicit unauthorized reply in `caller_chat_id` and the attempt is
    /// logged — never a silent no-op. On success the operator receives a
    /// confirmation echo.
    pub async fn relay_from_operator(
        &self,
        caller_id: &str,
        caller_chat_id: &str,
        target_user_id: &str,
        text: &str,
    ) -> HelplineResult<()> {
        if !self.access.is_operator(caller_id) {
            warn!(caller_id = %caller_id, target_user_id = %target_user_id, "unauthorized relay reply attempt");
            self.channel
                .send_text(caller_chat_id, notices::UNAUTHORIZED)
                .await?;
            return Err(HelplineError::Authorization(format!(
                "caller {caller_id} is not the operator"
            )));
        }

        // Mistyped target ids must not leave phantom sessions behind.
        let Some(entry) = self.store.get(target_user_id) else {
            return self.report_no_relay(caller_chat_id, target_user_id).await;
        };
        let lang = {
            let session = entry.lock().await;
            if !session.manual_mode {
                return self.report_no_relay(caller_chat_id, target_user_id).await;
            }
            session
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
        };

        let translated = self.translator.translate_or_original(text, &lang).await;
        self.channel.send_text(target_user_id, &translated).await?;
        info!(target_user_id = %target_user_id, "operator reply relayed");

        self.channel
            .send_text(caller_chat_id, &format!("Sent to user {target_user_id}."))
            .await
    }

    /// Ends manual mode for a user.
    ///
    /// Operator-only, same rejection rule as replies. Clears the manual
    /// flag and the stored language so the next interaction restarts fresh
    /// detection; issue and stage history are left untouched.
    pub async fn deactivate(
        &self,
        caller_id: &str,
        caller_chat_id: &str,
        target_user_id: &str,
    ) -> HelplineResult<()> {
        if !self.access.is_operator(caller_id) {
            warn!(caller_id = %caller_id, target_user_id = %target_user_id, "unauthorized endmanual attempt");
            self.channel
                .send_text(caller_chat_id, notices::UNAUTHORIZED)
                .await?;
            return Err(HelplineError::Authorization(format!(
                "caller {caller_id} is not the operator"
            )));
        }

        let Some(entry) = self.store.get(target_user_id) else {
            return self.report_no_relay(caller_chat_id, target_user_id).await;
        };
        {
            let mut session = entry.lock().await;
            if !session.manual_mode {
                return self.report_no_relay(caller_chat_id, target_user_id).await;
            }
            session.manual_mode = false;
            session.language = None;
            session.touch();
        }
        entry.bump_generation();
        info!(target_user_id = %target_user_id, "manual mode deactivated");

        if let Err(e) = self.channel.send_text(target_user_id, notices::MANUAL_ENDED).await {
            warn!(target_user_id = %target_user_id, error = %e, "manual-end notice delivery failed");
        }
        self.channel
            .send_text(caller_chat_id, &format!("Manual session with user {target_user_id} closed."))
            .await
    }

    async fn report_no_relay(
        &self,
        caller_chat_id: &str,
        target_user_id: &str,
    ) -> HelplineResult<()> {
        self.channel
            .send_text(caller_chat_id, notices::NO_SUCH_RELAY)
            .await?;
        Err(HelplineError::Session(format!(
            "user {target_user_id} is not in manual mode"
        )))
    }
}
