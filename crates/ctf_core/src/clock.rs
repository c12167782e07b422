//! Phase countdown
//!
//! The host ticks the clock once per second. When it reaches zero the tick
//! reports [`ClockTick::Expired`] exactly once and the host calls
//! `MatchController::next_phase`, then re-arms the clock for the new phase.

use crate::config::MatchConfig;
use crate::phase::Phase;
use crate::timefmt::{clock_display, time_to_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Nothing armed
    Idle,
    Running(u32),
    /// Remaining time hit one of the phase's warning marks
    Warning(u32),
    /// Countdown reached zero on this tick
    Expired,
}

#[derive(Debug, Clone, Default)]
pub struct PhaseClock {
    phase: Option<Phase>,
    remaining: u32,
}

impl PhaseClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, phase: Phase, seconds: u32) {
        tracing::debug!(%phase, seconds, "clock armed");
        self.phase = Some(phase);
        self.remaining = seconds;
    }

    pub fn arm_for(&mut self, phase: Phase, config: &MatchConfig) {
        self.arm(phase, config.phase_duration(phase));
    }

    /// Start the lobby wait once enough players are online. Does nothing if
    /// the clock is already counting.
    pub fn arm_lobby_if_ready(&mut self, online_players: u32, config: &MatchConfig) -> bool {
        if self.is_running() || online_players < config.min_players_to_start {
            return false;
        }
        self.arm_for(Phase::Lobby, config);
        true
    }

    pub fn tick(&mut self) -> ClockTick {
        if self.remaining == 0 {
            return ClockTick::Idle;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            return ClockTick::Expired;
        }
        let marks = self.phase.map_or(&[][..], warning_marks);
        if marks.contains(&self.remaining) {
            ClockTick::Warning(self.remaining)
        } else {
            ClockTick::Running(self.remaining)
        }
    }

    pub fn extend(&mut self, seconds: u32) {
        self.remaining = self.remaining.saturating_add(seconds);
    }

    /// Zero the countdown. Returns whether it was running; the host then
    /// advances the phase itself.
    pub fn skip(&mut self) -> bool {
        let was_running = self.is_running();
        self.remaining = 0;
        was_running
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    pub fn display(&self) -> String {
        clock_display(self.remaining)
    }

    /// Announcement for a [`ClockTick::Warning`]
    pub fn warning_message(&self, remaining: u32) -> Option<String> {
        let time = time_to_string(remaining, true);
        let msg = match self.phase? {
            Phase::Lobby => format!("Game will start in {}.", time),
            Phase::Preparation => format!("{} left for preparation phase.", time),
            Phase::Combat => format!("{} left for combat phase.", time),
            Phase::SuddenDeath => format!("{} left for sudden death.", time),
            Phase::Ended => format!("The map will regenerate in {}.", time),
        };
        Some(msg)
    }
}

fn warning_marks(phase: Phase) -> &'static [u32] {
    match phase {
        Phase::Lobby => &[60, 30],
        Phase::Preparation => &[60],
        Phase::Combat => &[300, 60],
        Phase::SuddenDeath => &[60],
        Phase::Ended => &[20, 10],
    }
}
