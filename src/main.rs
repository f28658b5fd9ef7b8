use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use voice_translator::{
    create_router, AppState, BlockingBackend, Config, LiveSession, ScriptedSource, SessionConfig,
    SessionDefaults, SuffixTranslator,
};

#[derive(Parser)]
#[command(name = "voice-translator", about = "Live line-by-line speech translation")]
struct Cli {
    /// Config file (without extension)
    #[arg(long, default_value = "config/voice-translator")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a JSON-lines recognition script and print the transcript
    Replay {
        script: PathBuf,

        /// Pace fragments by their timestamps
        #[arg(long)]
        realtime: bool,
    },
    /// Serve the HTTP API
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("Voice Translator v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!(
        "Translating {} -> {} (pause threshold {}ms)",
        cfg.translation.source_language,
        cfg.translation.target_language,
        cfg.segmentation.pause_threshold_ms
    );

    match cli.command {
        Command::Replay { script, realtime } => replay(&cfg, script, realtime).await,
        Command::Serve => serve(&cfg).await,
    }
}

async fn replay(cfg: &Config, script: PathBuf, realtime: bool) -> Result<()> {
    let source = ScriptedSource::open(&script)?.realtime(realtime);
    let translator = Arc::new(BlockingBackend::new(SuffixTranslator::new(
        cfg.translation.suffix.clone(),
    )));

    let config = SessionConfig {
        segmenter: cfg.segmentation,
        translation_timeout: cfg.translation.timeout(),
        ..SessionConfig::default()
    };

    let session = LiveSession::new(config, Box::new(source), translator);
    session.start().await?;

    // The script ends with an End event
    let stats = session.wait().await?;
    let snapshot = session.snapshot().await;

    for (source, translated) in snapshot.source_lines.iter().zip(&snapshot.translated_lines) {
        println!("{}\t{}", source, translated);
    }

    info!(
        "Replay complete: {} lines from {} fragments ({} revisions)",
        snapshot.len(),
        stats.fragments_received,
        stats.revisions_applied
    );
    if let Some(error) = stats.last_error {
        info!("Last recognition error: {}", error);
    }

    Ok(())
}

async fn serve(cfg: &Config) -> Result<()> {
    let state = AppState::new(SessionDefaults {
        segmenter: cfg.segmentation,
        translation_suffix: cfg.translation.suffix.clone(),
        translation_timeout: cfg.translation.timeout(),
    });

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, create_router(state))
        .await
        .context("HTTP server failed")?;

    Ok(())
}
