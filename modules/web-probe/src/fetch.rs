//! The single network operation behind an attempt.

use anyhow::Result;
use async_trait::async_trait;
use liveprobe_core::AttemptError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

use crate::WebProbeOptions;

/// Issue one request for `url`. `Ok` means the exchange completed at the transport level.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<(), AttemptError>;
}

/// reqwest-backed fetcher: GET, redirects followed, certificates not validated.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(opts: &WebProbeOptions) -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::limited(opts.redirects))
            .timeout(Duration::from_millis(opts.timeout_ms))
            .user_agent(opts.user_agent.clone())
            .danger_accept_invalid_certs(true)
            .no_proxy()
            .build()?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<(), AttemptError> {
        // Status is not inspected and the body is never read; dropping the response closes it.
        self.client.get(url).send().await.map_err(AttemptError::new)?;
        Ok(())
    }
}
