// file: src/pipeline/runner.rs
// description: runs one search-then-summarize turn and converts failures into replies
// reference: sequential two-phase pipeline

use crate::config::Config;
use crate::error::Result;
use crate::llm::{GeminiClient, Summarizer};
use crate::pipeline::progress::{Phase, ProgressObserver, SilentProgress, TurnStats};
use crate::search::{SerpApiClient, WebSearch};
use std::time::Instant;
use tracing::{debug, info};

pub const SEARCH_APOLOGY: &str = "Sorry, I encountered an error during the search.";
pub const SUMMARY_APOLOGY: &str =
    "Sorry, I encountered an error while summarizing the search results.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    Answered,
    SearchFailed,
    SummarizationFailed,
}

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub answer: String,
    pub status: TurnStatus,
    pub stats: TurnStats,
}

pub struct PipelineRunner {
    search: Box<dyn WebSearch>,
    summarizer: Box<dyn Summarizer>,
}

impl PipelineRunner {
    pub fn new(search: Box<dyn WebSearch>, summarizer: Box<dyn Summarizer>) -> Self {
        Self { search, summarizer }
    }

    /// Builds the SerpAPI and Gemini clients. Fails when either API key is
    /// missing, so no runner exists without both.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = config.credentials()?;

        let search = SerpApiClient::new(credentials.serpapi_api_key, config.search.clone())?;
        let summarizer = GeminiClient::new(credentials.google_api_key, config.llm.clone())?;

        info!(
            "Pipeline ready (engine: {}, model: {}, max results: {})",
            config.search.engine,
            summarizer.model(),
            config.search.max_results
        );

        Ok(Self::new(Box::new(search), Box::new(summarizer)))
    }

    /// Answers one query. Never fails: provider errors become a fixed apology.
    pub async fn run(&self, query: &str) -> String {
        self.run_turn(query, &SilentProgress).await.answer
    }

    pub async fn run_turn(&self, query: &str, progress: &dyn ProgressObserver) -> TurnOutcome {
        let mut stats = TurnStats::new();

        progress.phase_started(Phase::Searching);
        let started = Instant::now();
        let searched = self.search.search(query).await;
        stats.search_duration = started.elapsed();

        let results = match searched {
            Ok(results) => {
                progress.phase_finished(Phase::Searching);
                results
            }
            Err(e) => {
                debug!("Search phase failed: {}", e);
                progress.phase_failed(Phase::Searching, &e);
                return finish(SEARCH_APOLOGY, TurnStatus::SearchFailed, stats);
            }
        };

        stats.search_results = results.len();
        debug!("Search returned {} results", results.len());
        for (idx, item) in results.iter().enumerate() {
            debug!("  {}. {}", idx + 1, item.format_summary(120));
        }

        progress.phase_started(Phase::Summarizing);
        let started = Instant::now();
        let summarized = self.summarizer.summarize(query, &results).await;
        stats.summarize_duration = started.elapsed();

        match summarized {
            Ok(answer) => {
                progress.phase_finished(Phase::Summarizing);
                finish(answer, TurnStatus::Answered, stats)
            }
            Err(e) => {
                debug!("Summarization phase failed: {}", e);
                progress.phase_failed(Phase::Summarizing, &e);
                finish(SUMMARY_APOLOGY, TurnStatus::SummarizationFailed, stats)
            }
        }
    }
}

fn finish(answer: impl Into<String>, status: TurnStatus, stats: TurnStats) -> TurnOutcome {
    debug!(
        "Turn finished: {:?} ({} results, search {:.2}s, summarize {:.2}s)",
        status,
        stats.search_results,
        stats.search_duration.as_secs_f64(),
        stats.summarize_duration.as_secs_f64()
    );

    TurnOutcome {
        answer: answer.into(),
        status,
        stats,
    }
}

impl std::fmt::Debug for PipelineRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineRunner").finish_non_exhaustive()
    }
}
