mod demo;

use assessment_engine::assessments::{
    recommendations, CulturalAdjustmentTable, ScoringEngine, ScoringOptions,
};
use assessment_engine::config::AppConfig;
use assessment_engine::error::AppError;
use assessment_engine::http::{self, AppState};
use assessment_engine::telemetry;
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Assessment Scoring Engine",
    about = "Score ministry assessment attempts from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a bundled sample attempt and print the insight report
    Score {
        #[command(subcommand)]
        command: ScoreCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum ScoreCommand {
    /// Run the sample APEST attempt through the full pipeline
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
struct DemoArgs {
    /// Declared cultural context for the sample respondent
    #[arg(long)]
    cultural_context: Option<String>,
    /// Optional adjustment table CSV (dimension,context,factor)
    #[arg(long)]
    adjustment_table: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Score {
            command: ScoreCommand::Demo(args),
        } => run_score_demo(args),
    }
}

fn build_engine(config: &AppConfig) -> Result<ScoringEngine, AppError> {
    let table = match &config.scoring.adjustment_table {
        Some(path) => CulturalAdjustmentTable::from_path(path)?,
        None => CulturalAdjustmentTable::identity(),
    };

    Ok(ScoringEngine::new(
        table,
        ScoringOptions {
            too_slow_ceiling_seconds: config.scoring.too_slow_ceiling_seconds,
        },
    ))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let engine = Arc::new(build_engine(&config)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
        engine,
    };

    let app = http::router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "assessment scoring engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_score_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        cultural_context,
        adjustment_table,
    } = args;

    let table = match adjustment_table {
        Some(path) => CulturalAdjustmentTable::from_path(path)?,
        None => CulturalAdjustmentTable::identity(),
    };
    let engine = ScoringEngine::new(table, ScoringOptions::default());

    let attempt = demo::sample_attempt();
    let questions = demo::sample_questions();
    let responses = demo::sample_responses();

    let result = engine.score(&attempt, &questions, &responses, cultural_context.as_deref())?;
    demo::render_result(&result);

    let adjusted = result
        .dimension_scores
        .iter()
        .map(|(dimension, score)| (*dimension, score.adjusted))
        .collect();
    println!();
    println!(
        "{}",
        recommendations::profile_summary(&adjusted, result.primary_gift, result.secondary_gift)
    );

    Ok(())
}
