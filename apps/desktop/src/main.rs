use std::{io::Write, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    affordances::ResultDisplay, load_settings, load_settings_from, Affordances,
    HttpScreeningService, Notifier, SelectedFile, UiState, UploadController,
};
use tracing_subscriber::EnvFilter;

/// Submit an audio file to the Screening Service and print the assessment.
#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the Screening Service; overrides screening.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file to use instead of ./screening.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Audio file to analyze. Only the first one is submitted.
    files: Vec<PathBuf>,
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    }
    .with_server_url(args.server_url);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(server_url = %settings.server_url, "desktop: settings loaded");

    let service = HttpScreeningService::new(&settings.server_url)?;
    let selection = args
        .files
        .iter()
        .map(|path| {
            SelectedFile::from_path(path)
                .with_context(|| format!("failed to read '{}'", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut controller = UploadController::new(Affordances::default(), StderrNotifier);
    controller.on_file_changed(selection);
    if !controller.view().status.text.is_empty() {
        println!("{}", controller.view().status.text);
    }

    controller.on_analyze_clicked(&service).await;

    match controller.state() {
        UiState::Shown(_) => {
            print_result(&mut std::io::stdout().lock(), &controller.view().result)?;
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

fn print_result(out: &mut impl Write, result: &ResultDisplay) -> std::io::Result<()> {
    writeln!(out, "Risk level: {}", result.risk_label)?;
    writeln!(out, "Confidence: {}", result.confidence)?;
    for line in &result.probabilities {
        writeln!(out, "  {line}")?;
    }
    if !result.disclaimer.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", result.disclaimer)?;
    }
    Ok(())
}
