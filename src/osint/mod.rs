// External reputation lookups — RDAP, URLhaus, PhishTank, Tranco.
//
// Each source implements OsintSource; the coordinator fans a URL out to all
// of them concurrently with per-source timeouts. Sources never fail a scan:
// an unavailable source is reported as such and the pipeline moves on.

pub mod phishtank;
pub mod rdap;
pub mod tranco;
pub mod traits;
pub mod urlhaus;

use anyhow::{Context, Result};

use crate::config::Config;

pub use phishtank::PhishTankSource;
pub use rdap::RdapSource;
pub use tranco::TrancoSource;
pub use traits::{OsintCoordinator, OsintSource, SourceOutcome};
pub use urlhaus::UrlhausSource;

/// Build the standard coordinator with all four sources registered.
pub fn default_coordinator(config: &Config) -> Result<OsintCoordinator> {
    // Client-level timeout sits above the per-lookup timeout so a stuck
    // connection can't outlive the coordinator's deadline by much.
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.osint_timeout * 2)
        .build()
        .context("Failed to build HTTP client")?;

    let sources: Vec<Box<dyn OsintSource>> = vec![
        Box::new(RdapSource::new(client.clone())),
        Box::new(UrlhausSource::new(client.clone())),
        Box::new(PhishTankSource::new(
            client.clone(),
            config.phishtank_api_key.clone(),
        )),
        Box::new(TrancoSource::new(client)),
    ];

    Ok(OsintCoordinator::new(sources, config.osint_timeout))
}
