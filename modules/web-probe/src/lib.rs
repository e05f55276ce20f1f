//! Bounded-concurrency HTTP(S) liveness probing across hosts and ports.

use anyhow::Result;
use liveprobe_core::{AttemptError, ConcurrencyBudget, Target, SCHEME_ORDER};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, trace, warn};

pub mod fetch;

pub use fetch::{Fetch, HttpFetcher};

#[derive(Debug, Clone)]
pub struct WebProbeOptions {
    pub timeout_ms: u64,
    pub redirects: usize,
    pub user_agent: String,
    pub concurrency: usize,
    /// Upper bound on spawned probe tasks alive at once.
    pub max_pending_tasks: usize,
}

impl Default for WebProbeOptions {
    fn default() -> Self {
        WebProbeOptions {
            timeout_ms: liveprobe_core::DEFAULT_TIMEOUT_MS,
            redirects: 10,
            user_agent: format!("liveprobe/{}", liveprobe_core::version()),
            concurrency: liveprobe_core::DEFAULT_CONCURRENCY,
            max_pending_tasks: 10_000,
        }
    }
}

/// Fans out one task per (host, port) and collects the live base URLs.
#[derive(Clone)]
pub struct Prober {
    fetcher: Arc<dyn Fetch>,
    budget: ConcurrencyBudget,
    max_pending_tasks: usize,
}

impl Prober {
    pub fn new(opts: &WebProbeOptions) -> Result<Self> {
        let fetcher = HttpFetcher::new(opts)?;
        Ok(Prober::with_fetcher(
            Arc::new(fetcher),
            ConcurrencyBudget::new(opts.concurrency),
            opts.max_pending_tasks,
        ))
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn Fetch>,
        budget: ConcurrencyBudget,
        max_pending_tasks: usize,
    ) -> Self {
        Prober { fetcher, budget, max_pending_tasks: max_pending_tasks.max(1) }
    }

    pub fn budget(&self) -> &ConcurrencyBudget {
        &self.budget
    }

    /// Probe every host on every port. Returns live URLs, deduplicated and sorted ascending.
    pub async fn run(&self, hosts: &[String], ports: &[u16]) -> Vec<String> {
        let started = Instant::now();
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let mut tasks = JoinSet::new();
        let mut spawned = 0usize;

        for host in hosts {
            for &port in ports {
                let target = match Target::new(host, port) {
                    Ok(t) => t,
                    Err(e) => {
                        debug!(host = %host, port, error = %e, "skipping target");
                        continue;
                    }
                };
                while tasks.len() >= self.max_pending_tasks {
                    reap(tasks.join_next().await);
                }
                let tx = tx.clone();
                let fetcher = self.fetcher.clone();
                let budget = self.budget.clone();
                tasks.spawn(async move {
                    if let Some(url) = probe_target(fetcher.as_ref(), &budget, &target).await {
                        let _ = tx.send(url);
                    }
                });
                spawned += 1;
            }
        }
        drop(tx);
        while let Some(joined) = tasks.join_next().await {
            reap(Some(joined));
        }

        let mut live = BTreeSet::new();
        while let Some(url) = rx.recv().await {
            live.insert(url);
        }
        info!(
            hosts = hosts.len(),
            ports = ports.len(),
            tasks = spawned,
            live = live.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "probe complete"
        );
        live.into_iter().collect()
    }
}

fn reap(joined: Option<Result<(), tokio::task::JoinError>>) {
    if let Some(Err(e)) = joined {
        warn!(error = %e, "probe task did not complete");
    }
}

/// Try each scheme in order, stopping at the first that answers. Returns the live URL, if any.
pub async fn probe_target<F>(
    fetcher: &F,
    budget: &ConcurrencyBudget,
    target: &Target,
) -> Option<String>
where
    F: Fetch + ?Sized,
{
    for scheme in SCHEME_ORDER {
        let url = target.url(scheme);
        match attempt(fetcher, budget, &url).await {
            Ok(()) => {
                debug!(addr = %target, url = %url, "live");
                return Some(url);
            }
            Err(e) => trace!(addr = %target, %scheme, error = %e, "attempt failed"),
        }
    }
    None
}

async fn attempt<F>(fetcher: &F, budget: &ConcurrencyBudget, url: &str) -> Result<(), AttemptError>
where
    F: Fetch + ?Sized,
{
    let _permit = budget.acquire().await?;
    fetcher.fetch(url).await
}

/// Convenience wrapper: build a reqwest-backed prober from `opts` and run it.
pub async fn probe_many(
    hosts: &[String],
    ports: &[u16],
    opts: &WebProbeOptions,
) -> Result<Vec<String>> {
    let prober = Prober::new(opts)?;
    Ok(prober.run(hosts, ports).await)
}
