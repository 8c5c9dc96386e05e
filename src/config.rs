use std::env;
use std::time::Duration;

use anyhow::Result;

/// Fallback timeout for each OSINT source lookup.
const DEFAULT_OSINT_TIMEOUT_MS: u64 = 3000;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    pub db_path: String,
    /// PhishTank app key — lookups work without one, but rate limits are
    /// tighter (PHISHTANK_API_KEY env var).
    pub phishtank_api_key: Option<String>,
    /// Per-source timeout for OSINT lookups.
    pub osint_timeout: Duration,
    /// User-Agent sent on every outbound request.
    pub user_agent: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default — scans work offline with no configuration
    /// at all, and OSINT sources that need no key work out of the box.
    pub fn load() -> Result<Self> {
        let osint_timeout_ms = match env::var("GRIFT_OSINT_TIMEOUT_MS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                anyhow::anyhow!("GRIFT_OSINT_TIMEOUT_MS must be an integer, got {raw:?}")
            })?,
            Err(_) => DEFAULT_OSINT_TIMEOUT_MS,
        };

        Ok(Self {
            db_path: env::var("GRIFT_DB_PATH").unwrap_or_else(|_| "./grift.db".to_string()),
            phishtank_api_key: env::var("PHISHTANK_API_KEY").ok().filter(|k| !k.is_empty()),
            osint_timeout: Duration::from_millis(osint_timeout_ms),
            user_agent: env::var("GRIFT_USER_AGENT")
                .unwrap_or_else(|_| format!("grift/{}", env!("CARGO_PKG_VERSION"))),
        })
    }
}
