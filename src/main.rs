//! Alyze main entry point
//!
//! This is the command-line interface for the Alyze single-page analyzer.

use alyze::analysis::{AnalysisOverrides, AnalysisRequest, AnalysisResult};
use alyze::config::{load_config_with_hash, Config};
use alyze::fetch::{IdentityProfile, LocaleProfile};
use alyze::output::{format_markdown_error, format_markdown_report, render_json_batch, write_output};
use alyze::{AlyzeError, Analyzer, ErrorReport};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;

/// Alyze: a single-page website analyzer
///
/// Alyze fetches each page once and scores it for SEO, accessibility,
/// performance, security and suspicious-site indicators.
#[derive(Parser, Debug)]
#[command(name = "alyze")]
#[command(version = "1.0.0")]
#[command(about = "A single-page website analyzer", long_about = None)]
struct Cli {
    /// Pages to analyze (the scheme defaults to https)
    #[arg(value_name = "URL", required = true)]
    urls: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Client identity profile (e.g. chrome-windows, googlebot)
    #[arg(long, value_name = "PROFILE")]
    identity: Option<String>,

    /// Visitor locale profile (france-paris, france-nice, usa-washington)
    #[arg(long, value_name = "PROFILE")]
    locale: Option<String>,

    /// Language code, or "auto" to detect it from the page
    #[arg(long)]
    language: Option<String>,

    /// Only run these modules (comma separated)
    #[arg(long, value_enum, value_delimiter = ',')]
    modules: Option<Vec<Module>>,

    /// Analyze the first response instead of following redirects
    #[arg(long)]
    no_follow_redirects: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Markdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Module {
    Seo,
    Accessibility,
    Performance,
    Security,
    Suspicious,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let overrides = build_overrides(&cli)?;
    let options = overrides.merge_over(&config.defaults);

    let analyzer = Arc::new(Analyzer::new(config)?);
    let sweeper = analyzer.spawn_cache_sweeper();

    let outcomes = analyze_all(&analyzer, &cli.urls, options).await;
    sweeper.abort();

    let failures = outcomes.iter().filter(|outcome| outcome.is_err()).count();
    let rendered = render(&cli, &outcomes)?;

    match &cli.output {
        Some(path) => {
            write_output(&rendered, path).map_err(AlyzeError::from)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    if failures > 0 {
        tracing::warn!("{} of {} analyses failed", failures, outcomes.len());
        std::process::exit(1);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("alyze=info,warn"),
            1 => EnvFilter::new("alyze=debug,info"),
            2 => EnvFilter::new("alyze=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Reports go to stdout, keep the logs apart
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Turns the command-line flags into options merged over the configured defaults
fn build_overrides(cli: &Cli) -> Result<AnalysisOverrides, Box<dyn std::error::Error>> {
    let identity_profile = match &cli.identity {
        Some(key) => Some(
            IdentityProfile::from_key(key)
                .ok_or_else(|| format!("Unknown identity profile: {}", key))?,
        ),
        None => None,
    };
    let locale_profile = match &cli.locale {
        Some(key) => Some(
            LocaleProfile::from_key(key).ok_or_else(|| format!("Unknown locale profile: {}", key))?,
        ),
        None => None,
    };

    let mut overrides = AnalysisOverrides {
        language: cli.language.clone(),
        identity_profile,
        locale_profile,
        follow_redirects: cli.no_follow_redirects.then_some(false),
        ..AnalysisOverrides::default()
    };

    if let Some(modules) = &cli.modules {
        let enabled = |module: Module| Some(modules.contains(&module));
        overrides.seo_analysis = enabled(Module::Seo);
        overrides.accessibility_analysis = enabled(Module::Accessibility);
        overrides.performance_analysis = enabled(Module::Performance);
        overrides.security_analysis = enabled(Module::Security);
        overrides.detect_suspicious = enabled(Module::Suspicious);
    }

    Ok(overrides)
}

/// Runs every analysis concurrently on the shared analyzer
///
/// Outcomes are returned in the order of `urls`.
async fn analyze_all(
    analyzer: &Arc<Analyzer>,
    urls: &[String],
    options: alyze::AnalysisOptions,
) -> Vec<Result<AnalysisResult, ErrorReport>> {
    let mut tasks = JoinSet::new();
    for (index, url) in urls.iter().enumerate() {
        let analyzer = Arc::clone(analyzer);
        let request = AnalysisRequest::new(url.clone()).with_options(options.clone());
        tasks.spawn(async move {
            let outcome = analyzer.analyze(&request).await.map_err(|e| {
                tracing::error!("Analysis of {} failed: {}", request.url, e);
                e.to_report()
            });
            (index, outcome)
        });
    }

    let mut outcomes: Vec<Option<Result<AnalysisResult, ErrorReport>>> =
        urls.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => outcomes[index] = Some(outcome),
            Err(e) => tracing::error!("Analysis task failed: {}", e),
        }
    }

    outcomes
        .into_iter()
        .map(|outcome| {
            outcome.unwrap_or_else(|| {
                Err(ErrorReport {
                    error: "Error while analyzing the site".to_string(),
                    details: "analysis task did not complete".to_string(),
                    code: "INTERNAL".to_string(),
                })
            })
        })
        .collect()
}

fn render(
    cli: &Cli,
    outcomes: &[Result<AnalysisResult, ErrorReport>],
) -> Result<String, AlyzeError> {
    match cli.format {
        OutputFormat::Json => Ok(render_json_batch(outcomes)?),
        OutputFormat::Markdown => {
            let sections: Vec<String> = cli
                .urls
                .iter()
                .zip(outcomes)
                .map(|(target, outcome)| match outcome {
                    Ok(result) => format_markdown_report(result),
                    Err(report) => format_markdown_error(target, report),
                })
                .collect();
            Ok(sections.join("\n---\n\n"))
        }
    }
}
