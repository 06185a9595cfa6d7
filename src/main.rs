//! sentiment-backfill - Analyze sentiment for every submission that lacks it.
//!
//! ```text
//! sentiment-backfill [--limit=N] [--dry-run]
//! ```
//!
//! Exits 0 when the run completes (including when there is nothing to do)
//! and 1 on configuration errors, a missing AI provider or a database failure.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info};

use cx_sentiment::adapters::ai::{HttpSentimentAnalyzer, HttpSentimentConfig};
use cx_sentiment::adapters::postgres::{
    connect_pool, PostgresAiProviderReader, PostgresCtlAlertRepository,
    PostgresSubmissionRepository,
};
use cx_sentiment::application::{
    AnalyzeSubmissionHandler, BackfillError, BackfillOptions, BackfillStats, SentimentBackfill,
};
use cx_sentiment::config::{AppConfig, ConfigError, LogFormat, LoggingConfig};
use cx_sentiment::domain::foundation::DomainError;
use cx_sentiment::ports::AIError;

#[derive(Debug, Error)]
enum CliError {
    #[error("database unavailable: {0}")]
    Database(#[from] DomainError),

    #[error("failed to build AI client: {0}")]
    Client(#[from] AIError),

    #[error(transparent)]
    Backfill(#[from] BackfillError),
}

#[derive(Debug, Parser)]
#[command(
    name = "sentiment-backfill",
    about = "Compute AI sentiment for submissions that have none yet"
)]
struct Args {
    /// Process at most this many submissions
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    limit: Option<u64>,

    /// Call the AI service but write nothing to the database
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);

    match run(args, &config).await {
        Ok(stats) => {
            print_summary(&stats, config.backfill.delay());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Sentiment backfill aborted");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<AppConfig, ConfigError> {
    let config = AppConfig::load()?;
    config.validate()?;
    Ok(config)
}

fn init_tracing(config: &LoggingConfig) {
    let builder = tracing_subscriber::fmt().with_env_filter(config.env_filter());
    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    if let Err(e) = installed {
        eprintln!("Failed to install log subscriber, continuing without logs: {}", e);
    }
}

async fn run(args: Args, config: &AppConfig) -> Result<BackfillStats, CliError> {
    let pool = connect_pool(&config.database).await?;

    let analyzer = HttpSentimentAnalyzer::new(
        HttpSentimentConfig::new(config.ai.service_url.clone()).with_timeout(config.ai.timeout()),
    )?;

    let submissions = Arc::new(PostgresSubmissionRepository::new(pool.clone()));
    let handler = AnalyzeSubmissionHandler::new(
        Arc::new(analyzer),
        submissions.clone(),
        Arc::new(PostgresCtlAlertRepository::new(pool.clone())),
    );
    let backfill = SentimentBackfill::new(
        Arc::new(PostgresAiProviderReader::new(pool)),
        submissions,
        handler,
    );

    let options = BackfillOptions {
        limit: args.limit,
        dry_run: args.dry_run,
        batch_size: config.backfill.batch_size,
        delay: config.backfill.delay(),
        model: config.ai.model.clone(),
    };

    if options.dry_run {
        info!("Dry run: no analysis or alerts will be written");
    }

    Ok(backfill.run(&options).await?)
}

fn print_summary(stats: &BackfillStats, delay: Duration) {
    println!("Sentiment backfill complete");
    println!("{}", stats);
    println!(
        "Estimated full backfill: {:.1} minutes",
        stats.estimated_duration(delay).as_secs_f64() / 60.0
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_tracing_init_is_reported_not_fatal() {
        let config = LoggingConfig::default();
        init_tracing(&config);
        init_tracing(&config);
    }

    #[test]
    fn parses_limit_and_dry_run() {
        let args = Args::try_parse_from(["sentiment-backfill", "--limit=25", "--dry-run"]).unwrap();
        assert_eq!(args.limit, Some(25));
        assert!(args.dry_run);

        let args = Args::try_parse_from(["sentiment-backfill"]).unwrap();
        assert_eq!(args.limit, None);
        assert!(!args.dry_run);
    }

    #[test]
    fn rejects_zero_limit() {
        assert!(Args::try_parse_from(["sentiment-backfill", "--limit=0"]).is_err());
    }
}
