//! HTTP retrieval with retry and linear backoff

use std::io::Read;
use std::time::Duration;

use d4builds::{Fetch, SyncError};

use crate::config::Config;

const USER_AGENT: &str = concat!("d4builds/", env!("CARGO_PKG_VERSION"));

pub struct HttpFetcher {
    agent: ureq::Agent,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, max_retries: u32, retry_delay: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();

        Self {
            agent,
            max_retries: max_retries.max(1),
            retry_delay,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Duration::from_secs(config.timeout_secs),
            config.max_retries,
            Duration::from_millis(config.retry_delay_ms),
        )
    }

    fn get_once(&self, url: &str) -> Result<String, String> {
        match self.agent.get(url).call() {
            // into_string caps bodies at 10 MB; the mapping table is larger
            Ok(resp) => {
                let mut body = String::new();
                resp.into_reader()
                    .read_to_string(&mut body)
                    .map_err(|e| e.to_string())?;
                Ok(body)
            }
            Err(ureq::Error::Status(code, resp)) => {
                Err(format!("HTTP {} {}", code, resp.status_text()))
            }
            Err(e) => Err(e.to_string()),
        }
    }
}

impl Fetch for HttpFetcher {
    fn fetch_text(&self, url: &str) -> d4builds::Result<String> {
        let mut attempt = 1;
        loop {
            match self.get_once(url) {
                Ok(body) => return Ok(body),
                Err(e) if attempt >= self.max_retries => return Err(SyncError::fetch(url, e)),
                Err(e) => {
                    tracing::warn!(
                        "Retry {}/{} for {}: {}",
                        attempt,
                        self.max_retries,
                        url,
                        e
                    );
                    std::thread::sleep(backoff(self.retry_delay, attempt));
                    attempt += 1;
                }
            }
        }
    }
}

/// Delay before retry number `attempt` (1-based): grows linearly
pub fn backoff(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(attempt)
}
