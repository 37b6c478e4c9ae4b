//! Translation capability for the Helpline orchestrator.
//!
//! Everything above this crate consumes translation through the narrow
//! [`Translator`] trait. Two implementations are provided:
//!
//! - [`LibreTranslator`] — HTTP client for a LibreTranslate-compatible API.
//! - [`Passthrough`] — no-op implementation for tests and for running
//!   without a provider.
//!
//! Provider failures never reach the end user: callers use
//! [`Translator::detect_or_default`] and [`Translator::translate_or_original`],
//! which log the failure and fall back to the default language or the
//! untranslated text.

use async_trait::async_trait;
use helpline_core::HelplineResult;
use tracing::warn;

/// LibreTranslate-compatible HTTP client.
pub mod libre;
/// No-op translator.
pub mod passthrough;

pub use libre::LibreTranslator;
pub use passthrough::Passthrough;

/// Language assumed when detection fails or no language is stored.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Two-operation translation capability.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Detects the language of `text`, returning an ISO-ish code.
    async fn detect(&self, text: &str) -> HelplineResult<String>;

    /// Translates `text` into `target_lang`.
    async fn translate(&self, text: &str, target_lang: &str) -> HelplineResult<String>;

    /// Detects the language of `text`, falling back to
    /// [`DEFAULT_LANGUAGE`] on empty input or provider failure.
    async fn detect_or_default(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return DEFAULT_LANGUAGE.to_string();
        }
        match self.detect(text).await {
            Ok(lang) if !lang.trim().is_empty() => lang,
            Ok(_) => DEFAULT_LANGUAGE.to_string(),
            Err(e) => {
                warn!(error = %e, "language detection failed, using default");
                DEFAULT_LANGUAGE.to_string()
            }
        }
    }

    /// Translates `text` into `target_lang`, falling back to the original
    /// text on provider failure. The output is always usable as-is.
    async fn translate_or_original(&self, text: &str, target_lang: &str) -> String {
        match self.translate(text, target_lang).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!(target_lang = %target_lang, error = %e, "translation failed, forwarding original text");
                text.to_string()
            }
        }
    }
}
