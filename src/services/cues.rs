//! Audio cue playback through an external command

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::state::Phase;

/// Something audible the session asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Looping ambience started when breathing begins
    Background,
    /// Spoken or chimed cue at the start of a phase
    Phase(Phase),
}

impl Cue {
    pub fn id(&self) -> &'static str {
        match self {
            Cue::Background => "background",
            Cue::Phase(phase) => phase.cue_id(),
        }
    }
}

/// Destination for cues. Failures are reported, never fatal.
pub trait CueSink: Send {
    /// Start playing `cue`, replacing any cue on the same channel
    fn play(&mut self, cue: Cue) -> Result<(), String>;

    /// Stop everything that is playing
    fn silence(&mut self);
}

/// Sink used when no player command is configured
#[derive(Debug, Default)]
pub struct LogCueSink;

impl CueSink for LogCueSink {
    fn play(&mut self, cue: Cue) -> Result<(), String> {
        info!("Cue: {}", cue.id());
        Ok(())
    }

    fn silence(&mut self) {
        debug!("Silencing cues");
    }
}

/// Runs `<program> [args..] <cue id>` for every cue.
///
/// The background cue and phase cues each keep one child process; a new cue
/// on a channel kills the previous one.
#[derive(Debug)]
pub struct CommandCueSink {
    program: String,
    args: Vec<String>,
    background: Option<Child>,
    phase: Option<Child>,
}

impl CommandCueSink {
    /// Build from a whitespace separated command line, e.g. `play-cue --volume 0.5`
    pub fn from_command_line(command_line: &str) -> Result<Self, String> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| "Cue command is empty".to_string())?;
        Ok(Self {
            program,
            args: parts.collect(),
            background: None,
            phase: None,
        })
    }

    fn spawn(&self, cue: Cue) -> Result<Child, String> {
        debug!("Spawning {} for cue {}", self.program, cue.id());
        Command::new(&self.program)
            .args(&self.args)
            .arg(cue.id())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("Failed to run cue command {}: {}", self.program, e))
    }
}

impl CueSink for CommandCueSink {
    fn play(&mut self, cue: Cue) -> Result<(), String> {
        let slot = match cue {
            Cue::Background => &mut self.background,
            Cue::Phase(_) => &mut self.phase,
        };
        stop_child(slot);
        let child = self.spawn(cue)?;
        match cue {
            Cue::Background => self.background = Some(child),
            Cue::Phase(_) => self.phase = Some(child),
        }
        Ok(())
    }

    fn silence(&mut self) {
        stop_child(&mut self.background);
        stop_child(&mut self.phase);
    }
}

fn stop_child(slot: &mut Option<Child>) {
    if let Some(mut child) = slot.take() {
        if let Err(e) = child.start_kill() {
            // Already exited on its own.
            debug!("Cue process not killed: {}", e);
        }
    }
}

/// Pick the sink for an optional configured command line
pub fn cue_sink_for(command_line: Option<&str>) -> Box<dyn CueSink> {
    match command_line.map(CommandCueSink::from_command_line) {
        Some(Ok(sink)) => {
            info!("Playing cues with {}", sink.program);
            Box::new(sink)
        }
        Some(Err(e)) => {
            warn!("{}, falling back to logging cues", e);
            Box::new(LogCueSink)
        }
        None => Box::new(LogCueSink),
    }
}
