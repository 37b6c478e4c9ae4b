use crate::Translator;
use async_trait::async_trait;
use helpline_core::{HelplineError, HelplineResult};
use serde::{Deserialize, Serialize};

/// HTTP client for a LibreTranslate-compatible API.
///
/// Uses `POST /detect` and `POST /translate`. The api key is optional; when
/// present it is sent in the request body as the API expects.
pub struct LibreTranslator {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct Detection {
    language: String,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl LibreTranslator {
    /// Creates a client for the given base URL (no trailing slash needed).
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

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    async fn detect(&self, text: &str) -> HelplineResult<String> {
        let body = DetectRequest {
            q: text,
            api_key: self.api_key.as_deref(),
        };

        let resp = self
            .http
            .post(self.api_url("detect"))
            .json(&body)
            .send()
            .await
            .map_err(|e| HelplineError::Translation(format!("detect request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(HelplineError::Translation(format!(
                "detect returned status {}",
                resp.status()
            )));
        }

        let detections: Vec<Detection> = resp
            .json()
            .await
            .map_err(|e| HelplineError::Translation(format!("detect parse error: {e}")))?;

        detections
            .into_iter()
            .next()
            .map(|d| d.language)
            .ok_or_else(|| HelplineError::Translation("detect returned no candidates".to_string()))
    }

    async fn translate(&self, text: &str, target_lang: &str) -> HelplineResult<String> {
        let body = TranslateRequest {
            q: text,
            source: "auto",
            target: target_lang,
            api_key: self.api_key.as_deref(),
        };

        let resp = self
            .http
            .post(self.api_url("translate"))
            .json(&body)
            .send()
            .await
            .map_err(|e| HelplineError::Translation(format!("translate request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(HelplineError::Translation(format!(
                "translate returned status {}",
                resp.status()
            )));
        }

        let parsed: TranslateResponse = resp
            .json()
            .await
            .map_err(|e| HelplineError::Translation(format!("translate parse error: {e}")))?;

        Ok(parsed.translated_text)
    }
}
