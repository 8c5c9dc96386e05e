// URLhaus (abuse.ch) — free malware URL database. No auth for lookups.
//
// API docs: https://urlhaus-api.abuse.ch/

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::traits::OsintSource;
use crate::scoring::Signal;

const URLHAUS_ENDPOINT: &str = "https://urlhaus-api.abuse.ch/v1/url/";

pub struct UrlhausSource {
    client: Client,
}

impl UrlhausSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OsintSource for UrlhausSource {
    fn name(&self) -> &'static str {
        "urlhaus"
    }

    async fn lookup(&self, url: &str) -> Result<Vec<Signal>> {
        let response = self
            .client
            .post(URLHAUS_ENDPOINT)
            .form(&[("url", url)])
            .send()
            .await
            .context("Failed to call URLhaus")?;

        if !response.status().is_success() {
            anyhow::bail!("URLhaus returned {}", response.status());
        }

        let body: UrlhausResponse = response
            .json()
            .await
            .context("Failed to parse URLhaus response")?;
        Ok(signals_from_response(&body))
    }
}

pub(crate) fn signals_from_response(body: &UrlhausResponse) -> Vec<Signal> {
    // query_status "no_results" means the URL is simply unknown
    if body.query_status != "ok" || body.id.is_none() {
        return vec![];
    }

    let mut signals = Vec::new();
    let status = body.url_status.as_deref().unwrap_or("unknown");
    if status == "online" {
        let threat = body.threat.as_deref().unwrap_or("malware distribution");
        signals.push(Signal::new(
            format!(
                "This URL is actively distributing malware according to the URLhaus \
                 threat intelligence database. The threat type is: {threat}."
            ),
            45.0,
        ));
    } else {
        signals.push(Signal::new(
            format!(
                "This URL was previously flagged for distributing malware \
                 (currently {status}). It may still be dangerous."
            ),
            25.0,
        ));
    }

    if !body.tags.is_empty() {
        signals.push(Signal::new(
            format!(
                "Security researchers have tagged this URL with: {}.",
                body.tags.join(", ")
            ),
            10.0,
        ));
    }

    signals
}

#[derive(Deserialize)]
pub(crate) struct UrlhausResponse {
    pub query_status: String,
    pub id: Option<String>,
    pub url_status: Option<String>,
    pub threat: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}
