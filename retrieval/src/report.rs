//! Recommendation report: ranked neighbor ids joined with permalinks.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use related_embeddings::{Corpus, EmbeddingError};
use related_permalink::LocatorCodec;

use crate::config::OutputFormat;
use crate::error::{Result, RetrievalError};
use crate::ranking::RankedMap;

/// Related permalinks for a single post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Permalink of the post.
    pub subject: String,

    /// Permalinks of related posts, nearest first.
    pub related: Vec<String>,
}

/// One entry per post, in corpus load order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub entries: Vec<ReportEntry>,
}

impl RecommendationReport {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => self.to_json(),
            OutputFormat::Yaml => self.to_yaml(),
        }
    }

    /// Render as `permalink:` blocks followed by `  - related` lines.
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    /// Serialize the entries to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Serialize as a YAML mapping of permalink to related permalinks.
    pub fn to_yaml(&self) -> Result<String> {
        let mapping: IndexMap<&str, &[String]> = self
            .entries
            .iter()
            .map(|entry| (entry.subject.as_str(), entry.related.as_slice()))
            .collect();
        Ok(serde_yaml::to_string(&mapping)?)
    }
}

impl fmt::Display for RecommendationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}:", entry.subject)?;
            for related in &entry.related {
                writeln!(f, "  - {related}")?;
            }
        }
        Ok(())
    }
}

/// Join ranked neighbor lists with locators.
///
/// Subjects are visited in the corpus's load order, whatever order the
/// ranked map was filled in.
pub fn emit<C>(ranked: &RankedMap, corpus: &Corpus, codec: &C) -> Result<RecommendationReport>
where
    C: LocatorCodec + ?Sized,
{
    let entries = corpus
        .all()
        .iter()
        .map(|document| -> Result<ReportEntry> {
            let neighbors = ranked.get(&document.id).ok_or_else(|| {
                RetrievalError::from(EmbeddingError::UnknownIdentifier(document.id.clone()))
            })?;

            let related = neighbors
                .neighbor_ids()
                .map(|id| codec.to_locator(id))
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(ReportEntry {
                subject: codec.to_locator(&document.id)?,
                related,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RecommendationReport { entries })
}
