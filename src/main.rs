//! Heartwatch: heart-disease prediction client
//!
//! Main entry point for the terminal application and the one-shot
//! `predict` command.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use heartwatch::adapters::HttpPredictor;
use heartwatch::application::PredictionSession;
use heartwatch::config::{Cli, Command, LogMode, Settings};
use heartwatch::tui::App;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli);

    // IMPORTANT: writing logs to the terminal will corrupt the TUI (alternate screen).
    // In auto mode the TUI logs to a file; the one-shot command and
    // non-interactive runs log to stderr so stdout stays machine-readable.
    let interactive = cli.command.is_none() && std::io::stdout().is_terminal();
    let use_file = match settings.log_mode {
        LogMode::File => true,
        LogMode::Stderr => false,
        LogMode::Auto => interactive,
    };

    let (writer, _guard) = if use_file {
        if let Some(parent) = settings.log_file.parent() {
            // Best-effort: don't fail startup just because the directory is missing.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.log_file)
            .with_context(|| format!("Failed to open log file {:?}", settings.log_file))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(!use_file),
        )
        .init();

    match cli.command {
        Some(Command::Predict { assignments }) => predict_once(&settings, &assignments),
        None => {
            tracing::info!("Starting Heartwatch...");
            let mut app = App::new(&settings)?;
            app.run()?;
            tracing::info!("Heartwatch shutdown complete.");
            Ok(())
        }
    }
}

/// Apply field assignments, submit once and print the log entry as JSON.
fn predict_once(settings: &Settings, assignments: &[(String, String)]) -> Result<()> {
    let predictor = HttpPredictor::new(settings)?;
    tracing::info!(endpoint = %predictor.endpoint(), "Submitting single prediction");

    let mut session = PredictionSession::new(predictor);
    for (field, value) in assignments {
        session
            .form_mut()
            .update(field, value)
            .with_context(|| format!("Cannot set {field}"))?;
    }

    let entry = session.submit()?;
    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(())
}
