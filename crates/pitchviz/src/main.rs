use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use pitchviz_core::{AnalysisResult, AppConfig, AppContext, Upload};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Pitching rotational velocity analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the upload page and analysis API
    Serve(ServeArgs),
    /// Analyze a local CSV file and print a summary
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Address to listen on (overrides PITCHVIZ_BIND_ADDR)
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// CSV export to analyze
    path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("invalid PITCHVIZ_* configuration")?;

    match cli.command {
        Command::Serve(args) => {
            if let Some(bind) = args.bind {
                config.bind_addr = bind;
            }
            serve(config).await
        }
        Command::Analyze(args) => analyze_file(config, &args.path),
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    let bind_addr = config.bind_addr;
    let router = pitchviz::router(AppContext::new(config));

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

fn analyze_file(config: AppConfig, path: &Path) -> Result<()> {
    let content =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let context = AppContext::new(config);
    let result = context.analyze_upload(Some(Upload {
        file_name,
        content: &content,
    }))?;

    match result {
        AnalysisResult::Success(analysis) => {
            println!("athlete:           {}", analysis.athlete_name);
            println!("handedness:        {}", analysis.handedness);
            println!("rows:              {}", analysis.series.len());
            println!("foot contact time: {}", format_event(analysis.foot_contact_time));
            println!("ball release time: {}", format_event(analysis.ball_release_time));
            Ok(())
        }
        AnalysisResult::SchemaError(err) => bail!("{}: {err}", path.display()),
        AnalysisResult::NoInputYet => bail!("{}: nothing to analyze", path.display()),
    }
}

fn format_event(time: Option<f64>) -> String {
    time.map_or_else(|| "absent".to_string(), |t| t.to_string())
}
