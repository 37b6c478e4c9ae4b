use helpline_core::{HelplineError, HelplineResult};
use serde::Deserialize;
use tracing::debug;

/// Balance reported when no explorer api key is configured. The lookup is a
/// convenience, not a guarantee, and the bot must stay usable without a key.
pub const DUMMY_BALANCE: &str = "0";

/// Thin client for a bscscan-style explorer balance endpoint.
pub struct ExplorerClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: String,
}

impl ExplorerClient {
    /// Creates a client.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            api_key,
            http: reqwest::Client::new(),
        }
    }

    /// Looks up the balance of a public address.
    ///
    /// Without an api key no network call is made and [`DUMMY_BALANCE`] is
    /// returned, matching a keyless deployment.
    pub async fn balance(&self, address: &str) -> HelplineResult<String> {
        let Some(api_key) = &self.api_key else {
            debug!(address = %address, "no explorer api key configured, reporting dummy balance");
            return Ok(DUMMY_BALANCE.to_string());
        };

        let resp = self
            .http
            .get(format!("{}/api", self.base_url))
            .query(&[
                ("module", "account"),
                ("action", "balance"),
                ("address", address),
                ("apikey", api_key),
            ])
            .send()
            .await
            .map_err(|e| HelplineError::Http(format!("explorer request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(HelplineError::Http(format!(
                "explorer returned status {}",
                resp.status()
            )));
        }

        let parsed: ExplorerResponse = resp
            .json()
            .await
            .map_err(|e| HelplineError::Http(format!("explorer parse error: {e}")))?;

        if parsed.status != "1" {
            return Err(HelplineError::Http(format!(
                "explorer lookup failed: {}",
                parsed.message
            )));
        }
        Ok(parsed.result)
    }
}
