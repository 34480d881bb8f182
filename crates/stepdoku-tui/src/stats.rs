use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use stepdoku_core::{Outcome, Trial, Verdict};

/// Format a duration as m:ss.t
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    let minutes = total_ms / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let tenths = (total_ms % 1000) / 100;
    format!("{minutes}:{seconds:02}.{tenths}")
}

/// Live counters for one solve run
#[derive(Debug, Clone)]
pub struct SolveStats {
    /// Accepted trial placements
    pub placements: u64,
    /// Rejected candidates
    pub rejections: u64,
    started: Instant,
    frozen: Option<Duration>,
}

impl SolveStats {
    pub fn new() -> Self {
        Self {
            placements: 0,
            rejections: 0,
            started: Instant::now(),
            frozen: None,
        }
    }

    /// Total candidate probes so far
    pub fn steps(&self) -> u64 {
        self.placements + self.rejections
    }

    /// Count one observer notification
    pub fn record(&mut self, trial: Option<&Trial>) {
        if let Some(trial) = trial {
            match trial.verdict {
                Verdict::Accepted => self.placements += 1,
                Verdict::Rejected => self.rejections += 1,
            }
        }
    }

    /// Time since the run started, or the frozen value once finished
    pub fn elapsed(&self) -> Duration {
        self.frozen.unwrap_or_else(|| self.started.elapsed())
    }

    /// Stop the clock
    pub fn finish(&mut self) {
        if self.frozen.is_none() {
            self.frozen = Some(self.started.elapsed());
        }
    }
}

impl Default for SolveStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of one finished run, kept in the history file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub puzzle: String,
    pub size: usize,
    pub outcome: Outcome,
    pub placements: u64,
    pub rejections: u64,
    pub duration_ms: u64,
    /// Seconds since the Unix epoch
    pub finished_at: u64,
}

impl RunRecord {
    pub fn new(puzzle: &str, size: usize, outcome: Outcome, stats: &SolveStats) -> Self {
        Self {
            puzzle: puzzle.to_string(),
            size,
            outcome,
            placements: stats.placements,
            rejections: stats.rejections,
            duration_ms: stats.elapsed().as_millis() as u64,
            finished_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

/// On-disk run history; load and save are best effort
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunHistory {
    runs: Vec<RunRecord>,
}

impl RunHistory {
    /// Get the save file path
    fn save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stepdoku_history.json")
    }

    /// Load the history from file
    pub fn load() -> Self {
        match fs::read_to_string(Self::save_path()) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Append a record
    pub fn record(&mut self, record: RunRecord) {
        self.runs.push(record);
    }

    /// Save the history to file
    pub fn save(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(Self::save_path(), json) {
                    log::warn!("could not save run history: {e}");
                }
            }
            Err(e) => log::warn!("could not serialize run history: {e}"),
        }
    }
}
