//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::state::StepSequence;

/// Largest `--limit` whose length in seconds still fits a `u64`
pub const MAX_LIMIT_MINUTES: u64 = u64::MAX / 60;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "breath-pacer")]
#[command(about = "A state-managed HTTP server that paces guided breathing sessions")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Breathing cycle as phase:seconds pairs
    #[arg(short, long, default_value = "inhale:4,hold:7,exhale:8")]
    pub steps: StepSequence,

    /// Stop the session after this many minutes of active breathing
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=MAX_LIMIT_MINUTES))]
    pub limit: Option<u64>,

    /// Command that plays a cue; the cue id is appended as the last argument
    #[arg(long)]
    pub cue_command: Option<String>,

    /// Start the countdown as soon as the server is up
    #[arg(long)]
    pub autostart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Active breathing cap, if one was requested
    pub fn playback_limit(&self) -> Option<Duration> {
        self.limit
            .and_then(|minutes| minutes.checked_mul(60))
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }
}
