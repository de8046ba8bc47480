//! Analyzer - orchestration of one analysis
//!
//! This module ties the pieces together for each request:
//! - Validating and normalizing the target URL
//! - Serving fresh results from the cache
//! - Fetching the page and parsing the body
//! - Building the envelope and running the enabled scorers
//! - Writing the result through to the cache

mod envelope;

pub use envelope::{build_result, parse_document};

use crate::analysis::{AnalysisRequest, AnalysisResult};
use crate::cache::{cache_key, spawn_sweeper, ResultCache};
use crate::config::Config;
use crate::fetch::{build_http_client, fetch_page};
use crate::state::AnalysisStage;
use crate::url::normalize_target_url;
use crate::AlyzeError;
use reqwest::Client;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Main analyzer structure
///
/// Cheap to share behind an `Arc`: concurrent `analyze` calls only meet at
/// the cache.
pub struct Analyzer {
    config: Arc<Config>,
    client: Client,
    cache: Arc<ResultCache>,
}

impl Analyzer {
    /// Creates an analyzer with its own empty cache
    ///
    /// # Arguments
    ///
    /// * `config` - The analyzer configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Analyzer)` - Ready to analyze
    /// * `Err(AlyzeError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, AlyzeError> {
        let cache = Arc::new(ResultCache::new(&config.cache));
        Self::with_cache(config, cache)
    }

    /// Creates an analyzer that shares an existing cache
    pub fn with_cache(config: Config, cache: Arc<ResultCache>) -> Result<Self, AlyzeError> {
        let client = build_http_client(&config.fetch)?;
        Ok(Self {
            config: Arc::new(config),
            client,
            cache,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the result cache
    pub fn cache(&self) -> Arc<ResultCache> {
        Arc::clone(&self.cache)
    }

    /// Analyzes one page
    ///
    /// A fresh cached result for the same URL and options is returned without
    /// any network access. Otherwise the page is fetched, scored and cached.
    ///
    /// # Arguments
    ///
    /// * `request` - The URL to analyze and the options to use
    ///
    /// # Returns
    ///
    /// * `Ok(AnalysisResult)` - The envelope with the enabled reports
    /// * `Err(AlyzeError)` - Invalid URL or fetch failure
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AlyzeError> {
        let mut run = StageTracker::new(&request.url);

        run.advance(AnalysisStage::Validating)?;
        let url = match normalize_target_url(&request.url) {
            Ok(url) => url,
            Err(e) => {
                run.advance(AnalysisStage::Errored)?;
                tracing::debug!("Rejected target '{}': {}", request.url, e);
                return Err(e.into());
            }
        };

        let options = request.options.clone().normalized();

        run.advance(AnalysisStage::CacheCheck)?;
        let key = cache_key(&url, &options);
        if let Some(cached) = self.cache.get(&key) {
            tracing::info!("Cache hit for {}", url);
            run.advance(AnalysisStage::Done)?;
            return Ok(cached);
        }
        tracing::info!("Cache miss for {}, fetching", url);

        run.advance(AnalysisStage::Fetching)?;
        let fetched = match fetch_page(&self.client, &url, &options, &self.config.fetch).await {
            Ok(fetched) => fetched,
            Err(e) => {
                run.advance(AnalysisStage::Errored)?;
                tracing::error!("Failed to fetch {}: {} ({})", url, e, e.code());
                return Err(e.into());
            }
        };
        tracing::debug!(
            "Fetched {} -> {} (status {}, {} bytes, {} ms, {} redirects)",
            url,
            fetched.final_url,
            fetched.status,
            fetched.body_bytes,
            fetched.elapsed_ms,
            fetched.redirect_count()
        );

        run.advance(AnalysisStage::Parsing)?;
        let result = {
            // The parsed tree is not Send, keep it inside this block
            let document = parse_document(&url, &fetched.body);
            run.advance(AnalysisStage::Scoring)?;
            build_result(&url, &options, &fetched, &document)
        };

        run.advance(AnalysisStage::Caching)?;
        self.cache.put(key, result.clone());

        run.advance(AnalysisStage::Done)?;
        tracing::info!(
            "Analyzed {} (status {}, {} ms)",
            url,
            result.status,
            result.response_time
        );
        Ok(result)
    }

    /// Removes every cached result
    pub fn clear_cache(&self) {
        self.cache.clear();
        tracing::info!("Cache cleared");
    }

    /// Number of cached results, fresh or not
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Starts the periodic cache sweep with the configured interval and age
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_cache_sweeper(&self) -> JoinHandle<()> {
        spawn_sweeper(
            self.cache(),
            self.config.cache.sweep_interval(),
            self.config.cache.max_age(),
        )
    }
}

/// Enforces the stage order of one analysis run
struct StageTracker<'a> {
    target: &'a str,
    stage: AnalysisStage,
}

impl<'a> StageTracker<'a> {
    fn new(target: &'a str) -> Self {
        Self {
            target,
            stage: AnalysisStage::Idle,
        }
    }

    fn advance(&mut self, next: AnalysisStage) -> Result<(), AlyzeError> {
        if !self.stage.can_transition_to(next) {
            return Err(AlyzeError::InvalidTransition {
                from: self.stage,
                to: next,
            });
        }
        tracing::trace!("{}: {} -> {}", self.target, self.stage, next);
        self.stage = next;
        if next.is_terminal() {
            tracing::debug!(
                "Analysis of {} {}",
                self.target,
                if next.is_success() { "finished" } else { "failed" }
            );
        }
        Ok(())
    }
}
