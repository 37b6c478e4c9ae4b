use helpline_core::{HelplineError, HelplineResult};
use serde::Deserialize;
use std::path::Path;

/// Top-level bot configuration.
///
/// Loaded from a TOML file; secrets can be supplied or overridden through
/// environment variables so the file can be committed without them.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BotConfig {
    /// Telegram credentials and operator identity.
    #[serde(default)]
    pub telegram: TelegramConfig,
    /// Support-flow settings.
    #[serde(default)]
    pub support: SupportConfig,
    /// Translation provider; absent base URL means passthrough.
    #[serde(default)]
    pub translate: TranslateConfig,
    /// Chain-explorer balance lookup.
    #[serde(default)]
    pub explorer: ExplorerConfig,
    /// Session housekeeping.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Telegram credentials and operator identity.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TelegramConfig {
    /// Bot token from @BotFather. Mandatory.
    #[serde(default)]
    pub bot_token: String,
    /// Chat id the operator receives escalations in. Mandatory.
    #[serde(default)]
    pub operator_chat_id: String,
}

/// Support-flow settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SupportConfig {
    /// Help resource link spliced into prompts.
    #[serde(default = "default_help_link")]
    pub help_link: String,
    /// Keywords that trigger proactive outreach in group chats.
    #[serde(default = "default_trigger_words")]
    pub trigger_words: Vec<String>,
    /// Passcode for `/authorize`. Empty disables passcode unlock entirely.
    #[serde(default)]
    pub passcode: String,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            help_link: default_help_link(),
            trigger_words: default_trigger_words(),
            passcode: String::new(),
        }
    }
}

/// Translation provider settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TranslateConfig {
    /// Base URL of a LibreTranslate-compatible API. Absent: no translation.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Optional provider api key.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Chain-explorer lookup settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerConfig {
    /// Explorer API base URL.
    #[serde(default = "default_explorer_base_url")]
    pub base_url: String,
    /// Explorer api key. Absent: lookups report a dummy balance.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: default_explorer_base_url(),
            api_key: None,
        }
    }
}

/// Session housekeeping settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SessionConfig {
    /// Evict sessions idle for longer than this many seconds. Absent:
    /// sessions persist until the process stops.
    #[serde(default)]
    pub idle_ttl_secs: Option<u64>,
}

fn default_help_link() -> String {
    "https://alari12.github.io/MindCarePLC/".to_string()
}

fn default_trigger_words() -> Vec<String> {
    ["wallet", "usdt", "crypto", "sol", "help", "swap", "staking", "transfer"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_explorer_base_url() -> String {
    "https://api.bscscan.com".to_string()
}

impl BotConfig {
    /// Loads the config file if it exists (an absent file means
    /// all-defaults), applies environment overrides, and validates.
    pub fn load(path: &Path) -> HelplineResult<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            toml::from_str(&raw)
                .map_err(|e| HelplineError::Config(format!("failed to parse {}: {e}", path.display())))?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Applies `HELPLINE_*` environment overrides for the secret-bearing
    /// fields.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("HELPLINE_BOT_TOKEN") {
            self.telegram.bot_token = token;
        }
        if let Ok(chat_id) = std::env::var("HELPLINE_OPERATOR_CHAT_ID") {
            self.telegram.operator_chat_id = chat_id;
        }
        if let Ok(passcode) = std::env::var("HELPLINE_PASSCODE") {
            self.support.passcode = passcode;
        }
        if let Ok(key) = std::env::var("HELPLINE_EXPLORER_API_KEY") {
            self.explorer.api_key = Some(key);
        }
        if let Ok(triggers) = std::env::var("HELPLINE_TRIGGERS") {
            self.support.trigger_words = triggers.split(',').map(str::to_string).collect();
        }
    }

    /// Rejects configurations the process must not start with.
    pub fn validate(&self) -> HelplineResult<()> {
        if self.telegram.bot_token.trim().is_empty() {
            return Err(HelplineError::Config(
                "telegram.bot_token is required (or HELPLINE_BOT_TOKEN)".to_string(),
            ));
        }
        if self.telegram.operator_chat_id.trim().is_empty() {
            return Err(HelplineError::Config(
                "telegram.operator_chat_id is required (or HELPLINE_OPERATOR_CHAT_ID)".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_fatal() {
        let config = BotConfig::default();
        assert!(matches!(
            config.validate(),
            Err(HelplineError::Config(msg)) if msg.contains("bot_token")
        ));
    }

    #[test]
    fn test_missing_operator_is_fatal() {
        let mut config = BotConfig::default();
        config.telegram.bot_token = "tok".to_string();
        assert!(matches!(
            config.validate(),
            Err(HelplineError::Config(msg)) if msg.contains("operator_chat_id")
        ));
    }

    #[test]
    fn test_defaults_mirror_original_deployment() {
        let config = BotConfig::default();
        assert!(config.support.help_link.starts_with("https://"));
        assert!(config.support.trigger_words.contains(&"wallet".to_string()));
        assert_eq!(config.support.trigger_words.len(), 8);
        assert!(config.explorer.api_key.is_none());
        assert!(config.session.idle_ttl_secs.is_none());
    }

    #[test]
    fn test_parse_full_toml() {
        let raw = r#"
            [telegram]
            bot_token = "tok"
            operator_chat_id = "99"

            [support]
            help_link = "https://docs.example.org/"
            trigger_words = ["wallet", "swap"]
            passcode = "s3cret"

            [translate]
            base_url = "https://translate.example.org"

            [session]
            idle_ttl_secs = 3600
        "#;
        let config: BotConfig = toml::from_str(raw).unwrap();
        config.validate().unwrap();
        assert_eq!(config.support.trigger_words, ["wallet", "swap"]);
        assert_eq!(config.session.idle_ttl_secs, Some(3600));
        assert_eq!(
            config.translate.base_url.as_deref(),
            Some("https://translate.example.org")
        );
    }
}
