use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use related_retrieval::{OutputFormat, RelatedConfig, RelatedPosts};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Lists the closest posts to every post of a blog, by embedding distance.
#[derive(Parser, Debug)]
#[command(name = "related-posts", version, about)]
struct Cli {
    /// TOML configuration file; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory with one embedding record per post.
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Related posts to list per post.
    #[arg(short = 'k', long)]
    neighbors: Option<usize>,

    /// Report format.
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Write the report here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rank posts on all cores.
    #[arg(long)]
    parallel: bool,

    /// Log debug output to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;
    debug!("Resolved configuration: {config:?}");

    let engine = RelatedPosts::new(config).context("invalid configuration")?;
    let (report, _stats) = engine
        .run()
        .await
        .context("failed to generate related posts")?;
    engine
        .write_report(&report)
        .await
        .context("failed to write report")?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Defaults, then the config file, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<RelatedConfig> {
    let mut config = match &cli.config {
        Some(path) => RelatedConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RelatedConfig::default(),
    };

    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(neighbors) = cli.neighbors {
        config.neighbors = neighbors;
    }
    if let Some(format) = cli.format {
        config.format = format.into();
    }
    if let Some(output) = &cli.output {
        config.output = Some(output.clone());
    }
    if cli.parallel {
        config.parallel = true;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "related-posts",
            "--data-dir",
            "data",
            "-k",
            "3",
            "--format",
            "json",
            "--parallel",
        ]);
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.neighbors, 3);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.parallel);
        assert_eq!(config.output, None);
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("related.toml");
        std::fs::write(&path, "data_dir = \"from-file\"\nneighbors = 5\nformat = \"yaml\"\n")
            .unwrap();

        let cli = Cli::parse_from([
            "related-posts",
            "--config",
            path.to_str().unwrap(),
            "-k",
            "1",
        ]);
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("from-file"));
        assert_eq!(config.neighbors, 1);
        assert_eq!(config.format, OutputFormat::Yaml);
    }
}
