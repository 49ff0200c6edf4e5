use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use cardflow::config::AppConfig;
use cardflow::error::AppError;
use cardflow::telemetry;
use cardflow::workflows::underwriting::applications::{
    application_router, CardApplicationDecision, CardApplicationEvaluator, CardApplicationService,
    CreditCardApplication, FlyerDirectory, FraudRiskCheck, InMemoryApplicationRepository,
    InMemoryReviewQueue, WatchlistFraudLookup,
};
use cardflow::workflows::underwriting::import::BatchApplicationImporter;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Card Underwriting Orchestrator",
    about = "Run the credit card application screening service from the command line",
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
    /// Screen applications without starting the service
    Screen {
        #[command(subcommand)]
        command: ScreenCommand,
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
enum ScreenCommand {
    /// Screen a partner CSV feed of applications and print the decisions
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Partner CSV feed of applications
    #[arg(long)]
    feed: PathBuf,
    /// Newline-separated file of enrolled frequent flyer numbers
    #[arg(long)]
    enrolled: Option<PathBuf>,
    /// License key reported by the frequent flyer directory
    #[arg(long, default_value = "OK")]
    license_key: String,
    /// Last names flagged by the fraud watchlist (repeatable)
    #[arg(long = "watch")]
    watchlist: Vec<String>,
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
        Command::Screen {
            command: ScreenCommand::Batch(args),
        } => run_screen_batch(args),
    }
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let review_queue = Arc::new(InMemoryReviewQueue::default());
    let directory = Arc::new(FlyerDirectory::new("OK"));
    let service = Arc::new(CardApplicationService::new(
        repository,
        review_queue,
        directory,
    ));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(application_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "card screening service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_screen_batch(args: BatchArgs) -> Result<(), AppError> {
    let applications = BatchApplicationImporter::from_path(&args.feed)?;

    let directory = Arc::new(FlyerDirectory::new(args.license_key));
    if let Some(path) = args.enrolled {
        for number in std::fs::read_to_string(path)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
        {
            directory.enroll(number);
        }
    }

    let fraud_lookup: Arc<dyn FraudRiskCheck> = Arc::new(WatchlistFraudLookup::new(args.watchlist));
    let evaluator = CardApplicationEvaluator::with_fraud_lookup(directory, fraud_lookup);

    let decisions: Vec<CardApplicationDecision> = applications
        .iter()
        .map(|application| evaluator.evaluate(application))
        .collect();

    render_screen_report(&applications, &decisions, evaluator.lookup_count());

    Ok(())
}

fn decision_counts(decisions: &[CardApplicationDecision]) -> [(&'static str, usize); 4] {
    let mut counts = [
        (CardApplicationDecision::AutoAccepted.label(), 0),
        (CardApplicationDecision::AutoDeclined.label(), 0),
        (CardApplicationDecision::ReferredToHuman.label(), 0),
        (CardApplicationDecision::ReferredToHumanFraudRisk.label(), 0),
    ];

    for decision in decisions {
        for entry in counts.iter_mut() {
            if entry.0 == decision.label() {
                entry.1 += 1;
            }
        }
    }

    counts
}

fn render_screen_report(
    applications: &[CreditCardApplication],
    decisions: &[CardApplicationDecision],
    lookup_count: u64,
) {
    println!("Batch screening report");
    println!("Applications screened: {}", applications.len());

    println!("\nDecisions");
    for (application, decision) in applications.iter().zip(decisions) {
        println!(
            "- {} | age {} | income {} | {}",
            application.last_name.as_deref().unwrap_or("(unknown)"),
            application.age,
            application.gross_annual_income,
            decision.label()
        );
    }

    println!("\nSummary");
    for (label, count) in decision_counts(decisions) {
        println!("- {label}: {count}");
    }

    println!("\nFrequent flyer lookups performed: {lookup_count}");
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
