// PhishTank — community phishing URL database.
//
// No key required for basic lookups; an app key improves rate limits, so we
// attach one when configured.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::traits::OsintSource;
use crate::scoring::Signal;

const PHISHTANK_ENDPOINT: &str = "https://checkurl.phishtank.com/checkurl/";

pub struct PhishTankSource {
    client: Client,
    api_key: Option<String>,
}

impl PhishTankSource {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl OsintSource for PhishTankSource {
    fn name(&self) -> &'static str {
        "phishtank"
    }

    async fn lookup(&self, url: &str) -> Result<Vec<Signal>> {
        let mut form = vec![("url", url), ("format", "json")];
        if let Some(key) = &self.api_key {
            form.push(("app_key", key));
        }

        let response = self
            .client
            .post(PHISHTANK_ENDPOINT)
            .form(&form)
            .send()
            .await
            .context("Failed to call PhishTank")?;

        if !response.status().is_success() {
            anyhow::bail!("PhishTank returned {}", response.status());
        }

        let body: PhishTankResponse = response
            .json()
            .await
            .context("Failed to parse PhishTank response")?;
        Ok(signals_from_response(&body))
    }
}

pub(crate) fn signals_from_response(body: &PhishTankResponse) -> Vec<Signal> {
    let Some(results) = &body.results else {
        return vec![];
    };
    if !results.in_database {
        return vec![];
    }

    if results.verified {
        vec![Signal::new(
            "This URL is in the PhishTank database as a verified phishing site. \
             It is designed to steal your personal information.",
            45.0,
        )]
    } else {
        vec![Signal::new(
            "This URL has been reported as a suspected phishing site in the \
             PhishTank community database.",
            30.0,
        )]
    }
}

#[derive(Deserialize)]
pub(crate) struct PhishTankResponse {
    pub results: Option<PhishTankResults>,
}

#[derive(Deserialize)]
pub(crate) struct PhishTankResults {
    #[serde(default)]
    pub in_database: bool,
    #[serde(default)]
    pub verified: bool,
}
