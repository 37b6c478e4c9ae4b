use crate::{Translator, DEFAULT_LANGUAGE};
use async_trait::async_trait;
use helpline_core::HelplineResult;

/// No-op translator: detection always yields the default language and
/// translation returns the input unchanged. Used in tests and when no
/// translation provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

#[async_trait]
impl Translator for Passthrough {
    async fn detect(&self, _text: &str) -> HelplineResult<String> {
        Ok(DEFAULT_LANGUAGE.to_string())
    }

    async fn translate(&self, text: &str, _target_lang: &str) -> HelplineResult<String> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passthrough_detect() {
        assert_eq!(Passthrough.detect("hola").await.unwrap(), DEFAULT_LANGUAGE);
    }

    #[tokio::test]
    async fn test_passthrough_translate() {
        assert_eq!(Passthrough.translate("hola", "de").await.unwrap(), "hola");
    }

    #[tokio::test]
    async fn test_detect_or_default_on_empty_input() {
        assert_eq!(Passthrough.detect_or_default("   ").await, DEFAULT_LANGUAGE);
    }
}
