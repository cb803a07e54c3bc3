//! CLI entrypoint for roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use roundtable_application::{MeetingSession, TranscriptStore};
use roundtable_domain::{Meeting, MeetingId, OutputFormat, Severity};
use roundtable_infrastructure::{
    ConfigLoader, FileConfig, JsonTranscriptStore, JsonlConversationLogger, OpenAiGateway,
    generate_meeting_id,
};
use roundtable_presentation::{Cli, ConsoleFormatter, MeetingRepl, ReplConfig};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        println!();
        println!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let _log_guard = init_logging(cli.verbose, &config);
    info!("Starting roundtable");

    // CLI flags override file values
    if let Some(title) = &cli.title {
        config.meeting.title = title.clone();
    }
    if let Some(max_turns) = cli.max_turns {
        config.meeting.max_turns_per_round = max_turns;
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let Some(meetings_dir) = config.storage.meetings_dir() else {
        bail!("Could not determine a data directory; set [storage] dir");
    };
    let store = Arc::new(JsonTranscriptStore::new(meetings_dir)?);
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();

    // Saved meeting management
    if cli.list {
        let listings = store.list()?;
        match format {
            OutputFormat::Text => print!("{}", ConsoleFormatter::format_listing(&listings)),
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_listing_json(&listings)),
        }
        return Ok(());
    }

    if let Some(id) = &cli.show {
        let meeting = store.load(&MeetingId::new(id.as_str()))?;
        match format {
            OutputFormat::Text => print!("{}", ConsoleFormatter::format_transcript(&meeting)),
            OutputFormat::Json => {
                println!("{}", ConsoleFormatter::format_transcript_json(&meeting))
            }
        }
        return Ok(());
    }

    if let Some(id) = &cli.delete {
        let id = MeetingId::new(id.as_str());
        if !store.delete(&id)? {
            bail!("Meeting not found: {}", id);
        }
        println!("Deleted meeting {}", id);
        return Ok(());
    }

    // Validate before any round runs. A resumed meeting brings its own
    // roster and limits, so those sections are not checked.
    let issues = if cli.resume.is_some() {
        if cli.title.is_some() || cli.max_turns.is_some() {
            warn!("--title and --max-turns are ignored when resuming a meeting");
        }
        config.validate_for_resume()
    } else {
        config.validate()
    };
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("{}", issue),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration. Run with --show-config to inspect it.");
    }

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiGateway::from_config(&config.provider)?);
    info!("Using model endpoint {}", gateway.endpoint());

    let transcript_store: Arc<dyn TranscriptStore> = store.clone();
    let mut session = match &cli.resume {
        Some(id) => MeetingSession::resume(
            gateway,
            transcript_store,
            &MeetingId::new(id.as_str()),
            config.to_session_params(),
        )?,
        None => {
            let id = generate_meeting_id(Local::now(), |id| store.contains(id));
            let meeting = Meeting::new(
                id,
                config.meeting.title.clone(),
                config.to_meeting_config(),
                config.to_roster()?,
            )?;
            MeetingSession::start(gateway, transcript_store, meeting, config.to_session_params())?
        }
    };

    if config.logging.conversation_log
        && let Some(dir) = config.logging.log_dir()
        && let Some(logger) = JsonlConversationLogger::for_meeting(dir, session.meeting().id())
    {
        info!("Conversation log: {}", logger.path().display());
        session = session.with_logger(Arc::new(logger));
    }

    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.quiet,
        history_file: config.repl.history_path(),
    };

    MeetingRepl::new(session)
        .with_config(repl_config)
        .run()
        .await?;

    Ok(())
}

/// Install the stderr subscriber and, when `[logging] file = true`, a daily
/// rolling file layer. The returned guard must live until exit.
fn init_logging(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let (file_layer, guard) = match config.logging.file.then(|| config.logging.log_dir()) {
        Some(Some(dir)) => {
            let appender = tracing_appender::rolling::daily(dir, "roundtable.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    guard
}
