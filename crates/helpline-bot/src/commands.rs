use crate::dispatcher::Dispatcher;
use helpline_core::{Command, HelplineError, HelplineResult, InboundEvent};
use helpline_engine::{fsm, texts};
use helpline_translate::DEFAULT_LANGUAGE;
use tracing::{debug, warn};

impl Dispatcher {
    /// Handles a message-prefixed command.
    ///
    /// Privileged commands consult access control before doing anything;
    /// denials are always answered explicitly and logged, and perform no
    /// state mutation.
    pub(crate) async fn handle_command(
        &self,
        event: &InboundEvent,
        cmd: &Command,
    ) -> HelplineResult<()> {
        let sender = &event.sender_id;
        let chat = &event.chat_id;

        match cmd {
            Command::Start => self.channel.send_text(chat, texts::WELCOME).await,

            Command::Help => {
                self.channel
                    .send_text(chat, &texts::help(&self.help_link))
                    .await
            }

            Command::Cancel => {
                let entry = self.store.entry(sender);
                let (language, manual) = {
                    let mut session = entry.lock().await;
                    if session.manual_mode {
                        // Only the operator closes a manual conversation.
                        session.touch();
                        (session.language.clone(), true)
                    } else {
                        session.cancel();
                        (session.language.clone(), false)
                    }
                };
                if !manual {
                    entry.bump_generation();
                }
                let text = if manual {
                    texts::CANCEL_IN_MANUAL
                } else {
                    texts::CANCELLED
                };
                let ack = match language.as_deref() {
                    Some(lang) if lang != DEFAULT_LANGUAGE => {
                        self.translator.translate_or_original(text, lang).await
                    }
                    _ => text.to_string(),
                };
                self.channel.send_text(chat, &ack).await
            }

            Command::Authorize { code } => {
                let reply = if self.access.authorize(sender, code) {
                    texts::AUTHORIZE_OK
                } else {
                    texts::AUTHORIZE_DENIED
                };
                self.channel.send_text(chat, reply).await
            }

            Command::Balance { address } => {
                if !self.access.is_authorized(sender) {
                    warn!(user_id = %sender, "unauthorized balance lookup attempt");
                    return self.channel.send_text(chat, texts::UNAUTHORIZED).await;
                }
                if !fsm::is_valid_address(address) {
                    return self.channel.send_text(chat, texts::ADDRESS_INVALID).await;
                }
                match self.explorer.balance(address).await {
                    Ok(balance) => {
                        self.channel
                            .send_text(chat, &format!("Balance for {address}: {balance}"))
                            .await
                    }
                    Err(e) => {
                        warn!(user_id = %sender, error = %e, "explorer lookup failed");
                        self.channel
                            .send_text(
                                chat,
                                "Balance lookup is unavailable right now. Please try again later.",
                            )
                            .await
                    }
                }
            }

            Command::Reply { user_id, text } => {
                match self
                    .bridge
                    .relay_from_operator(sender, chat, user_id, text)
                    .await
                {
                    Ok(()) => Ok(()),
                    // The bridge already answered the caller and logged.
                    Err(e @ (HelplineError::Authorization(_) | HelplineError::Session(_))) => {
                        debug!(error = %e, "relay reply rejected");
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }

            Command::EndManual { user_id } => {
                match self.bridge.deactivate(sender, chat, user_id).await {
                    Ok(()) => Ok(()),
                    Err(e @ (HelplineError::Authorization(_) | HelplineError::Session(_))) => {
                        debug!(error = %e, "endmanual rejected");
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }

            Command::Unknown(name) => {
                debug!(user_id = %sender, command = %name, "unknown command");
                self.channel.send_text(chat, texts::UNKNOWN_COMMAND).await
            }
        }
    }
}
