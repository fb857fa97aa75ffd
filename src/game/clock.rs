//! Round timing and the escalating warning schedule
//!
//! A round has a randomized base duration and a hidden jitter on top of it, so
//! players can never predict the exact cutoff. Past the warning threshold the
//! clock emits flashes that get faster and higher-pitched as time runs out.

use super::{GameError, GameResult};
use crate::config::{RampBasis, RoundConfig};
use crate::types::{FlashCue, ToneCue};
use rand::Rng;

/// Fixed timing of one round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundTiming {
    start_ms: u64,
    base_duration_ms: f64,
    jitter_ms: f64,
}

impl RoundTiming {
    pub fn new(start_ms: u64, base_duration_ms: f64, jitter_ms: f64) -> GameResult<Self> {
        if !base_duration_ms.is_finite() || base_duration_ms <= 0.0 {
            return Err(GameError::InvalidDuration(format!(
                "base duration must be positive, got {}",
                base_duration_ms
            )));
        }
        if !jitter_ms.is_finite() || base_duration_ms + jitter_ms <= 0.0 {
            return Err(GameError::InvalidDuration(format!(
                "jitter {} leaves no time in a {} ms round",
                jitter_ms, base_duration_ms
            )));
        }
        Ok(Self {
            start_ms,
            base_duration_ms,
            jitter_ms,
        })
    }

    /// Sample base duration and jitter once for a round starting at `start_ms`.
    /// `config` must already be validated.
    pub fn sample<R: Rng + ?Sized>(
        start_ms: u64,
        config: &RoundConfig,
        rng: &mut R,
    ) -> GameResult<Self> {
        let base = rng.random_range(config.min_duration_ms..config.max_duration_ms);
        let jitter = if config.max_jitter_ms > 0.0 {
            rng.random_range(-config.max_jitter_ms..config.max_jitter_ms)
        } else {
            0.0
        };
        Self::new(start_ms, base, jitter)
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn base_duration_ms(&self) -> f64 {
        self.base_duration_ms
    }

    pub fn jitter_ms(&self) -> f64 {
        self.jitter_ms
    }

    /// Elapsed time after which the round is over
    pub fn end_time_ms(&self) -> f64 {
        self.base_duration_ms + self.jitter_ms
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_ms)
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.elapsed_ms(now_ms) as f64 >= self.end_time_ms()
    }

    /// Fraction of the ramp basis that has elapsed, capped at 1
    pub fn progress(&self, now_ms: u64, basis: RampBasis) -> f64 {
        let denominator = match basis {
            RampBasis::Base => self.base_duration_ms,
            RampBasis::End => self.end_time_ms(),
        };
        (self.elapsed_ms(now_ms) as f64 / denominator).min(1.0)
    }
}

/// Warning-phase parameters at a given progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Warning {
    /// 0 at the warning threshold, 1 at the end of the ramp
    pub intensity: f64,
    pub flash_interval_ms: f64,
    pub pitch_hz: f64,
}

/// Returns `None` until progress passes the warning threshold
pub fn warning_at(config: &RoundConfig, progress: f64) -> Option<Warning> {
    if progress <= config.warning_threshold {
        return None;
    }
    let intensity =
        ((progress - config.warning_threshold) / (1.0 - config.warning_threshold)).min(1.0);
    Some(Warning {
        intensity,
        flash_interval_ms: config.flash_interval_start_ms
            - intensity * (config.flash_interval_start_ms - config.flash_interval_end_ms),
        pitch_hz: config.pitch_start_hz + intensity * (config.pitch_end_hz - config.pitch_start_hz),
    })
}

/// What a single tick produced
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickOutcome {
    pub flash: Option<FlashCue>,
    /// The round's end time has been reached
    pub expired: bool,
}

/// Drives one round at a time. Idle between rounds.
#[derive(Debug, Clone)]
pub struct RoundClock {
    config: RoundConfig,
    timing: Option<RoundTiming>,
    last_flash_ms: Option<u64>,
}

impl RoundClock {
    pub fn new(config: RoundConfig) -> GameResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            timing: None,
            last_flash_ms: None,
        })
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn timing(&self) -> Option<&RoundTiming> {
        self.timing.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.timing.is_some()
    }

    /// Start a round at `now_ms` with freshly sampled timing
    pub fn start<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> GameResult<RoundTiming> {
        let timing = RoundTiming::sample(now_ms, &self.config, rng)?;
        self.start_with(timing);
        Ok(timing)
    }

    /// Start a round with pre-computed timing
    pub fn start_with(&mut self, timing: RoundTiming) {
        self.timing = Some(timing);
        self.last_flash_ms = None;
    }

    /// Halt the clock. Safe to call when already stopped.
    pub fn stop(&mut self) -> bool {
        self.last_flash_ms = None;
        self.timing.take().is_some()
    }

    /// Advance to `now_ms`. Flash emission is decided before expiry, so the
    /// final tick of a round may still carry a warning pulse.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        let Some(timing) = self.timing else {
            return TickOutcome::default();
        };

        let progress = timing.progress(now_ms, self.config.ramp_basis);
        let mut flash = None;
        if let Some(warning) = warning_at(&self.config, progress) {
            let due = match self.last_flash_ms {
                Some(last) => now_ms.saturating_sub(last) as f64 >= warning.flash_interval_ms,
                None => true,
            };
            if due {
                self.last_flash_ms = Some(now_ms);
                flash = Some(FlashCue {
                    tone: ToneCue {
                        frequency_hz: warning.pitch_hz,
                        duration_secs: self.config.beep_secs,
                    },
                    overlay_ms: self.config.flash_overlay_ms,
                    intensity: warning.intensity,
                });
            }
        }

        TickOutcome {
            flash,
            expired: timing.is_expired(now_ms),
        }
    }
}
