//! Crawl coordinator - frontier management and worker-pool dispatch
//!
//! The coordinator owns the frontier queue and the discovered set, seeds them
//! from the seed URL and the sitemap, feeds a fixed pool of worker tasks, and
//! detects completion. Workers never touch shared state; they report link
//! batches back over a channel and the coordinator's single logical thread of
//! control does every mutation, which is what makes the dedup invariant hold
//! without locking.

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{build_http_client, fetch_and_extract};
use crate::crawler::sitemap::seed_from_sitemap;
use crate::url::{normalize_url, Origin};
use crate::{CrawlError, FetchError};
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use tokio::sync::mpsc;
use tokio::time::{self, Duration, Instant};

/// Callback invoked once per newly accepted URL, in discovery order
pub type OnUrlFound = Box<dyn FnMut(&str) + Send>;

/// How a run ended
///
/// A timeout is a partial-result success, not a failure: whatever subset of
/// the discovered set accumulated before the deadline is the final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// Frontier drained with no worker busy
    Completed,
    /// The wall-clock timeout fired mid-drain
    TimedOut,
}

/// Final result of a crawl run
#[derive(Debug)]
pub struct CrawlReport {
    /// Discovered URLs, case-insensitively sorted
    pub urls: Vec<String>,
    pub outcome: CrawlOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Seeding,
    Draining,
    Completed,
    TimedOut,
}

/// One worker's result for one dispatched URL
struct WorkerReport {
    slot: usize,
    url: String,
    result: Result<Vec<String>, FetchError>,
}

/// Owns the frontier, the discovered set, and the worker pool for one run
pub struct Coordinator {
    origin: Origin,
    seed_url: String,
    config: CrawlConfig,
    /// FIFO queue of pending URLs; carries no uniqueness invariant
    frontier: VecDeque<String>,
    /// Normalized keys already accepted; monotonic for the life of the run
    discovered: HashSet<String>,
    /// Normalized keys already handed to a worker; the dispatch-time gate
    dispatched: HashSet<String>,
    /// Accepted URLs in their original spelling, in discovery order
    found: Vec<String>,
    on_url_found: Option<OnUrlFound>,
    phase: Phase,
}

impl Coordinator {
    /// Creates a coordinator for one seed URL
    ///
    /// Fails with `InvalidSeedUrl` if the seed cannot be parsed as an
    /// absolute HTTP(S) URL; this is the only fatal URL error.
    pub fn new(
        seed_url: &str,
        config: CrawlConfig,
        on_url_found: Option<OnUrlFound>,
    ) -> Result<Self, CrawlError> {
        let origin = Origin::parse(seed_url).map_err(|e| CrawlError::InvalidSeedUrl {
            url: seed_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            origin,
            seed_url: seed_url.to_string(),
            config,
            frontier: VecDeque::new(),
            discovered: HashSet::new(),
            dispatched: HashSet::new(),
            found: Vec::new(),
            on_url_found,
            phase: Phase::Idle,
        })
    }

    /// Runs the crawl to completion or timeout
    pub async fn run(mut self) -> Result<CrawlReport, CrawlError> {
        let client = build_http_client(&self.config)?;

        self.phase = Phase::Seeding;
        tracing::info!("seeding crawl of {}", self.origin.as_str());

        // The seed itself goes through the same acceptance path as everything
        // else, so the frontier starts non-empty even without a sitemap
        let seed = self.seed_url.clone();
        self.accept(&seed);

        for url in seed_from_sitemap(&client, &self.origin).await {
            self.accept(&url);
        }

        if self.config.sitemap_only {
            tracing::info!("sitemap-only run, skipping link-following");
            self.phase = Phase::Completed;
        } else {
            self.phase = Phase::Draining;
            self.phase = match self.drain(&client).await {
                CrawlOutcome::Completed => Phase::Completed,
                CrawlOutcome::TimedOut => Phase::TimedOut,
            };
        }

        let outcome = if self.phase == Phase::TimedOut {
            CrawlOutcome::TimedOut
        } else {
            CrawlOutcome::Completed
        };

        let mut urls = self.found;
        urls.sort_by_key(|u| u.to_lowercase());

        Ok(CrawlReport { urls, outcome })
    }

    /// The acceptance path for one candidate URL
    ///
    /// Normalize, scope-check, dedup against the discovered set; if new,
    /// invoke the callback and push to the frontier. The callback fires
    /// before the frontier push, so a consumer of the callback stream never
    /// observes a duplicate key.
    fn accept(&mut self, url: &str) -> bool {
        let key = match normalize_url(url) {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!("dropping unusable URL {}: {}", url, e);
                return false;
            }
        };

        if !self.origin.contains_key(&key) {
            tracing::trace!("outside origin, ignoring {}", url);
            return false;
        }

        if !self.discovered.insert(key) {
            return false;
        }

        if let Some(callback) = self.on_url_found.as_mut() {
            callback(url);
        }
        self.found.push(url.to_string());
        self.frontier.push_back(url.to_string());
        true
    }

    /// Pops frontier entries until one passes the dispatch-time dedup check
    ///
    /// The same URL can be queued from two different pages before either is
    /// processed, so membership is re-checked here, not only at report time.
    fn next_dispatchable(&mut self) -> Option<String> {
        while let Some(url) = self.frontier.pop_front() {
            if let Ok(key) = normalize_url(&url) {
                if self.dispatched.insert(key) {
                    return Some(url);
                }
            }
        }
        None
    }

    /// Returns a dispatched URL to the front of the frontier, clearing its
    /// dispatch-gate entry so another slot can pick it up
    fn requeue(&mut self, url: String) {
        if let Ok(key) = normalize_url(&url) {
            self.dispatched.remove(&key);
        }
        self.frontier.push_front(url);
    }

    /// The dispatch loop: runs while the frontier is non-empty or any slot
    /// is busy, whichever ends later, bounded by the wall-clock deadline
    async fn drain(&mut self, client: &Client) -> CrawlOutcome {
        let worker_count = self.config.workers.max(1);
        let pacing = Duration::from_millis(self.config.pacing_ms);
        let deadline = Instant::now() + Duration::from_secs(self.config.timeout_secs);

        let (report_tx, mut report_rx) = mpsc::channel::<WorkerReport>(worker_count * 2);
        let mut job_txs = Vec::with_capacity(worker_count);
        let mut handles = Vec::with_capacity(worker_count);

        for slot in 0..worker_count {
            let (job_tx, mut job_rx) = mpsc::channel::<String>(1);
            let client = client.clone();
            let origin = self.origin.clone();
            let report_tx = report_tx.clone();

            handles.push(tokio::spawn(async move {
                while let Some(url) = job_rx.recv().await {
                    let result = fetch_and_extract(&client, &url, &origin).await;
                    let report = WorkerReport { slot, url, result };
                    if report_tx.send(report).await.is_err() {
                        break;
                    }
                }
            }));
            job_txs.push(job_tx);
        }
        drop(report_tx);

        let mut busy = vec![false; worker_count];
        let mut pages_fetched: u64 = 0;
        let started = Instant::now();

        let outcome = loop {
            if self.frontier.is_empty() && !busy.iter().any(|b| *b) {
                break CrawlOutcome::Completed;
            }
            if Instant::now() >= deadline {
                break CrawlOutcome::TimedOut;
            }

            // Feed every idle slot while dispatchable work remains
            for slot in 0..worker_count {
                if busy[slot] || Instant::now() >= deadline {
                    continue;
                }
                let Some(url) = self.next_dispatchable() else {
                    break;
                };
                if job_txs[slot].send(url.clone()).await.is_ok() {
                    tracing::debug!("dispatched {} to worker {}", url, slot);
                    busy[slot] = true;
                    // Pacing between dispatches is politeness toward the
                    // target origin, not a correctness requirement
                    time::sleep(pacing).await;
                } else {
                    // The URL must stay reachable for the remaining slots
                    tracing::error!("worker {} is gone, requeueing {}", slot, url);
                    self.requeue(url);
                }
            }

            // The dispatch pass may have drained duplicate-only entries
            if self.frontier.is_empty() && !busy.iter().any(|b| *b) {
                break CrawlOutcome::Completed;
            }

            let wake = tokio::select! {
                _ = time::sleep_until(deadline) => None,
                report = report_rx.recv() => report,
            };

            match wake {
                Some(report) => {
                    busy[report.slot] = false;

                    match report.result {
                        Ok(links) => {
                            pages_fetched += 1;
                            tracing::debug!("{} yielded {} links", report.url, links.len());
                            for link in links {
                                self.accept(&link);
                            }

                            if pages_fetched % 10 == 0 {
                                let rate =
                                    pages_fetched as f64 / started.elapsed().as_secs_f64();
                                tracing::info!(
                                    "progress: {} pages fetched, {} queued, {:.2} pages/sec",
                                    pages_fetched,
                                    self.frontier.len(),
                                    rate
                                );
                            }
                        }
                        // No retry: a failed fetch yields zero links
                        Err(e) => tracing::warn!("fetch failed: {}", e),
                    }
                }
                None => {
                    if Instant::now() >= deadline {
                        break CrawlOutcome::TimedOut;
                    }
                    // Every report sender dropped: the pool has exited
                    tracing::warn!("worker pool stopped reporting");
                    break CrawlOutcome::Completed;
                }
            }
        };

        // Slot release is unconditional on every exit path. Abort interrupts
        // workers mid-fetch on timeout rather than merely starving them.
        drop(job_txs);
        for handle in &handles {
            handle.abort();
        }

        match outcome {
            CrawlOutcome::Completed => tracing::info!(
                "crawl completed: {} pages fetched in {:?}",
                pages_fetched,
                started.elapsed()
            ),
            CrawlOutcome::TimedOut => tracing::warn!(
                "crawl timed out after {:?}, returning partial results",
                started.elapsed()
            ),
        }

        outcome
    }
}
