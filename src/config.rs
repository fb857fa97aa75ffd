//! Runtime configuration loaded from environment variables
//!
//! `.env` is loaded in `main` before any of these are read. Every value has a
//! default matching the classic party rules; bad values are logged and ignored.

use crate::game::{GameError, GameResult};
use crate::types::ToneCue;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Which duration the warning ramp is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampBasis {
    /// Ramp over the un-jittered base duration (classic behavior)
    Base,
    /// Ramp over the actual jittered end time, so the fastest flashes line up with expiry
    End,
}

impl FromStr for RampBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base" => Ok(RampBasis::Base),
            "end" => Ok(RampBasis::End),
            other => Err(format!("Unknown ramp basis: {}", other)),
        }
    }
}

/// Timing and escalation parameters for a single round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundConfig {
    /// Lower bound (inclusive) of the base round duration
    pub min_duration_ms: f64,
    /// Upper bound (exclusive) of the base round duration
    pub max_duration_ms: f64,
    /// Hidden jitter is drawn from [-max_jitter_ms, +max_jitter_ms)
    pub max_jitter_ms: f64,
    pub tick_interval: Duration,
    /// Fraction of the ramp basis after which the warning phase begins
    pub warning_threshold: f64,
    pub flash_interval_start_ms: f64,
    pub flash_interval_end_ms: f64,
    pub pitch_start_hz: f64,
    pub pitch_end_hz: f64,
    pub beep_secs: f64,
    pub flash_overlay_ms: u64,
    /// End-of-round signal
    pub buzzer: ToneCue,
    pub ramp_basis: RampBasis,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: 45_000.0,
            max_duration_ms: 90_000.0,
            max_jitter_ms: 5_000.0,
            tick_interval: Duration::from_millis(30),
            warning_threshold: 0.4,
            flash_interval_start_ms: 1_500.0,
            flash_interval_end_ms: 150.0,
            pitch_start_hz: 400.0,
            pitch_end_hz: 1_200.0,
            beep_secs: 0.15,
            flash_overlay_ms: 80,
            buzzer: ToneCue {
                frequency_hz: 150.0,
                duration_secs: 0.8,
            },
            ramp_basis: RampBasis::Base,
        }
    }
}

impl RoundConfig {
    /// Reject configurations that could produce a negative or empty round
    pub fn validate(&self) -> GameResult<()> {
        let values = [
            self.min_duration_ms,
            self.max_duration_ms,
            self.max_jitter_ms,
            self.warning_threshold,
            self.flash_interval_start_ms,
            self.flash_interval_end_ms,
            self.pitch_start_hz,
            self.pitch_end_hz,
            self.beep_secs,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(GameError::InvalidDuration(
                "round config contains a non-finite value".to_string(),
            ));
        }
        if self.min_duration_ms <= 0.0 || self.max_duration_ms <= self.min_duration_ms {
            return Err(GameError::InvalidDuration(format!(
                "round duration range [{}, {}) is empty or negative",
                self.min_duration_ms, self.max_duration_ms
            )));
        }
        if self.max_jitter_ms < 0.0 || self.max_jitter_ms >= self.min_duration_ms {
            return Err(GameError::InvalidDuration(format!(
                "jitter {} must be non-negative and smaller than the minimum duration {}",
                self.max_jitter_ms, self.min_duration_ms
            )));
        }
        if self.tick_interval.is_zero() {
            return Err(GameError::InvalidDuration(
                "tick interval must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.warning_threshold) {
            return Err(GameError::InvalidDuration(format!(
                "warning threshold {} outside [0, 1)",
                self.warning_threshold
            )));
        }
        if self.flash_interval_end_ms <= 0.0
            || self.flash_interval_end_ms > self.flash_interval_start_ms
        {
            return Err(GameError::InvalidDuration(format!(
                "flash interval must shrink from {} to a positive {}",
                self.flash_interval_start_ms, self.flash_interval_end_ms
            )));
        }
        Ok(())
    }
}

/// Match rules
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// First team to reach this score wins
    pub win_score: u32,
    pub round: RoundConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_score: 7,
            round: RoundConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load match rules from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let win_score = env_parse::<u32>("WIN_SCORE")
            .filter(|score| {
                let ok = *score > 0;
                if !ok {
                    tracing::warn!("WIN_SCORE must be positive, using default");
                }
                ok
            })
            .unwrap_or(defaults.win_score);

        let round = RoundConfig {
            min_duration_ms: env_parse("ROUND_MIN_MS").unwrap_or(defaults.round.min_duration_ms),
            max_duration_ms: env_parse("ROUND_MAX_MS").unwrap_or(defaults.round.max_duration_ms),
            max_jitter_ms: env_parse("ROUND_JITTER_MS").unwrap_or(defaults.round.max_jitter_ms),
            tick_interval: env_parse::<u64>("TICK_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.round.tick_interval),
            ramp_basis: env_parse("RAMP_BASIS").unwrap_or(defaults.round.ramp_basis),
            ..defaults.round.clone()
        };

        let round = match round.validate() {
            Ok(()) => round,
            Err(e) => {
                tracing::warn!("Ignoring round configuration from environment: {}", e);
                defaults.round
            }
        };

        Self { win_score, round }
    }
}

/// Display bridge settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory holding the presentation frontend
    pub static_dir: PathBuf,
    /// Optional JSON phrase book replacing the built-in lists
    pub phrases_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // 6573 is ascii for "AI"
            port: 6573,
            static_dir: PathBuf::from("static"),
            phrases_file: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env_parse("PORT").unwrap_or(defaults.port),
            static_dir: env_var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            phrases_file: env_var("PHRASES_FILE").map(PathBuf::from),
        }
    }
}

/// Read a trimmed, non-empty environment variable
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = env_var(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid value for {}: {:?}, using default", key, raw);
            None
        }
    }
}
