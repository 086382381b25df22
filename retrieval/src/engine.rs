//! Related-post pipeline: load, rank, emit, write.

use std::path::PathBuf;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use related_embeddings::{Corpus, load_records};
use related_permalink::PostPermalink;

use crate::config::{OutputFormat, RelatedConfig};
use crate::error::Result;
use crate::ranking::{BruteForceRanker, NeighborRanker};
use crate::report::{RecommendationReport, emit};

/// Related-post generator.
///
/// Coordinates the whole batch run:
/// - reading embedding records from the data directory
/// - validating them into a [`Corpus`]
/// - ranking every post's nearest neighbors
/// - mapping the result to permalinks and writing the report
pub struct RelatedPosts {
    /// Configuration.
    config: RelatedConfig,

    /// Neighbor ranker.
    ranker: BruteForceRanker,
}

impl RelatedPosts {
    /// Create a new related-post generator builder.
    pub fn builder() -> RelatedPostsBuilder {
        RelatedPostsBuilder::new()
    }

    /// Create a generator from a validated configuration.
    pub fn new(config: RelatedConfig) -> Result<Self> {
        config.validate()?;
        let ranker = BruteForceRanker::new().with_parallel(config.parallel);
        Ok(Self { config, ranker })
    }

    /// The active configuration.
    pub fn config(&self) -> &RelatedConfig {
        &self.config
    }

    /// Load the corpus from the configured data directory.
    pub async fn load_corpus(&self) -> Result<Corpus> {
        let records = load_records(&self.config.data_dir).await?;
        Ok(Corpus::load(records)?)
    }

    /// Produce the report for an already loaded corpus.
    pub fn recommend(&self, corpus: &Corpus) -> Result<RecommendationReport> {
        let ranked = self.ranker.rank_neighbors(corpus, self.config.neighbors);
        emit(&ranked, corpus, &PostPermalink)
    }

    /// Run the full pipeline and return the report.
    pub async fn run(&self) -> Result<(RecommendationReport, RunStats)> {
        info!(
            "Generating related posts from {}",
            self.config.data_dir.display()
        );

        let corpus = self.load_corpus().await?;
        let report = self.recommend(&corpus)?;

        let stats = RunStats {
            documents: corpus.len(),
            dimension: corpus.dimension(),
            neighbors_per_document: self.config.neighbors.min(corpus.len() - 1),
        };
        info!(
            "Generated related posts for {} documents (dimension {}, {} each)",
            stats.documents, stats.dimension, stats.neighbors_per_document
        );

        Ok((report, stats))
    }

    /// Render `report` and write it to the configured output or stdout.
    pub async fn write_report(&self, report: &RecommendationReport) -> Result<()> {
        let rendered = report.render(self.config.format)?;

        match &self.config.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).await?;
                }
                fs::write(path, rendered).await?;
                debug!("Wrote report to {}", path.display());
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(rendered.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        Ok(())
    }
}

/// Builder for [`RelatedPosts`].
pub struct RelatedPostsBuilder {
    config: RelatedConfig,
}

impl RelatedPostsBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: RelatedConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn with_config(mut self, config: RelatedConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    /// Set the number of related posts per post.
    pub fn with_neighbors(mut self, neighbors: usize) -> Self {
        self.config.neighbors = neighbors;
        self
    }

    /// Enable or disable parallel ranking.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set the report format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Write the report to a file.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.config.output = Some(output.into());
        self
    }

    /// Build the generator.
    pub fn build(self) -> Result<RelatedPosts> {
        RelatedPosts::new(self.config)
    }
}

impl Default for RelatedPostsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Number of documents in the corpus.
    pub documents: usize,

    /// Embedding dimension.
    pub dimension: usize,

    /// Related posts listed per document.
    pub neighbors_per_document: usize,
}
