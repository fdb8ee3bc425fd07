use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pulse_classifier::{
    audio::{AudioData, AudioLoader},
    config::Config,
    detection::{AnalysisReport, PulseAnalyzer},
    PulseError,
};

#[derive(Parser)]
#[command(
    name = "pulse-classifier",
    version,
    about = "Classify recordings as No Sound, Pulsatile or Non-Pulsatile",
    long_about = "Pulse-Classifier looks for sound events in fixed-length WAV captures and reports whether they recur at a pulsatile (heartbeat-like) rate."
)]
struct Cli {
    /// WAV recordings to analyze
    #[arg(required_unless_present = "write_config")]
    files: Vec<PathBuf>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a JSON report per recording instead of one line
    #[arg(long)]
    json: bool,

    /// Write the default configuration to this path and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &cli.write_config {
        Config::default()
            .save_to_file(path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Default configuration written to {:?}", path);
        return Ok(());
    }

    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    let mut recordings = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        match AudioLoader::load(path) {
            Ok(audio) => {
                for issue in config.recording.mismatches(audio.sample_rate, audio.duration) {
                    warn!("{}: {}", path.display(), issue);
                }
                recordings.push(audio);
            }
            Err(err) => eprintln!("{}: {}", path.display(), err.user_message()),
        }
    }

    let analyzer = PulseAnalyzer::with_config(config.detector);
    let reports = analyzer.analyze_batch(&recordings);

    for (audio, report) in recordings.iter().zip(&reports) {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&JsonReport::new(audio, report))?);
        } else {
            println!("{}", summary_line(audio, report));
        }
    }

    let failures = cli.files.len() - recordings.len()
        + reports.iter().filter(|r| r.classification.is_error()).count();
    if failures > 0 {
        anyhow::bail!("{} of {} recording(s) could not be classified", failures, cli.files.len());
    }

    Ok(())
}

fn summary_line(audio: &AudioData, report: &AnalysisReport) -> String {
    let mut line = format!("{}: {}", audio.display_name(), report.classification.label());

    if let Some(bpm) = report.bpm {
        line.push_str(&format!(" ({:.1} bpm, {} events)", bpm, report.peaks.len()));
    }

    if let pulse_classifier::ClassificationResult::AnalysisError(err) = &report.classification {
        line.push_str(&format!(" - {}", PulseError::from(err.clone()).user_message()));
    }

    line
}

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    file: String,
    label: &'static str,
    #[serde(flatten)]
    report: &'a AnalysisReport,
}

impl<'a> JsonReport<'a> {
    fn new(audio: &AudioData, report: &'a AnalysisReport) -> Self {
        Self {
            file: audio.display_name(),
            label: report.classification.label(),
            report,
        }
    }
}
