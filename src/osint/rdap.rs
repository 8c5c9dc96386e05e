// RDAP domain age lookup.
//
// RDAP is the structured successor to WHOIS — free, no API key, JSON out.
// rdap.org fronts every registry's RDAP server and redirects to the right
// one. We only care about the registration event date.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::traits::OsintSource;
use crate::scoring::Signal;

const RDAP_BASE: &str = "https://rdap.org/domain";

/// Under this age a domain is treated as brand new.
const BRAND_NEW_DAYS: i64 = 30;
/// Under this age a domain is still notably recent.
const RECENT_DAYS: i64 = 90;
/// Past this age the domain earns a trust signal.
const ESTABLISHED_DAYS: i64 = 365 * 3;

pub struct RdapSource {
    client: Client,
}

impl RdapSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OsintSource for RdapSource {
    fn name(&self) -> &'static str {
        "rdap"
    }

    async fn lookup(&self, url: &str) -> Result<Vec<Signal>> {
        let domain = crate::detect::url_features::extract_domain(url);
        if domain.is_empty() {
            return Ok(vec![]);
        }

        let response = self
            .client
            .get(format!("{RDAP_BASE}/{domain}"))
            .send()
            .await
            .context("Failed to call RDAP")?;

        if !response.status().is_success() {
            // Unregistered or unsupported TLD — nothing to report
            debug!(domain = %domain, status = %response.status(), "RDAP returned non-success");
            return Ok(vec![]);
        }

        let body: RdapResponse = response
            .json()
            .await
            .context("Failed to parse RDAP response")?;

        let registered = body
            .events
            .iter()
            .find(|e| e.event_action == "registration")
            .and_then(|e| e.event_date.as_deref())
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok());

        let signals = match registered {
            Some(date) => {
                let age_days = (Utc::now() - date.with_timezone(&Utc)).num_days();
                signals_for_age(age_days)
            }
            None => vec![],
        };
        Ok(signals)
    }
}

/// Map a domain's age in days onto risk/trust signals.
pub(crate) fn signals_for_age(age_days: i64) -> Vec<Signal> {
    if age_days < BRAND_NEW_DAYS {
        let plural = if age_days == 1 { "" } else { "s" };
        vec![Signal::new(
            format!(
                "This website was created only {age_days} day{plural} ago. \
                 Brand new websites are very commonly used in scams."
            ),
            30.0,
        )]
    } else if age_days < RECENT_DAYS {
        vec![Signal::new(
            "This website is less than 3 months old, which is relatively new. \
             Many scam sites are created recently.",
            15.0,
        )]
    } else if age_days > ESTABLISHED_DAYS {
        let years = age_days / 365;
        vec![Signal::new(
            format!(
                "This website has been registered for over {years} years, \
                 which is a positive sign."
            ),
            -10.0,
        )]
    } else {
        vec![]
    }
}

#[derive(Deserialize)]
struct RdapResponse {
    #[serde(default)]
    events: Vec<RdapEvent>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RdapEvent {
    event_action: String,
    event_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_new_domain_is_high_risk() {
        let signals = signals_for_age(3);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].weight, 30.0);
        assert!(signals[0].text.contains("3 days ago"));
    }

    #[test]
    fn test_one_day_old_is_singular() {
        let signals = signals_for_age(1);
        assert!(signals[0].text.contains("1 day ago"));
    }

    #[test]
    fn test_recent_domain_is_moderate_risk() {
        let signals = signals_for_age(60);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].weight, 15.0);
    }

    #[test]
    fn test_middle_aged_domain_is_silent() {
        assert!(signals_for_age(400).is_empty());
    }

    #[test]
    fn test_established_domain_earns_trust() {
        let signals = signals_for_age(365 * 5);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].weight, -10.0);
        assert!(signals[0].text.contains("5 years"));
    }

    #[test]
    fn test_rdap_event_parsing() {
        let json = r#"{
            "events": [
                {"eventAction": "registration", "eventDate": "2015-03-01T00:00:00Z"},
                {"eventAction": "expiration", "eventDate": "2027-03-01T00:00:00Z"}
            ]
        }"#;
        let parsed: RdapResponse = serde_json::from_str(json).unwrap();
        let reg = parsed
            .events
            .iter()
            .find(|e| e.event_action == "registration")
            .unwrap();
        assert_eq!(reg.event_date.as_deref(), Some("2015-03-01T00:00:00Z"));
    }
}
