//! Session length and offline gap sampling

use serde::{Deserialize, Serialize};

use crate::core::rng::{DrawKind, SimRng};
use crate::core::types::{Seconds, SECONDS_PER_DAY};

/// First sessions use fixed bounds measured from live cohorts
const FIRST_SESSION_BOUNDS: (f64, f64) = (204.0, 1126.0);
const SECOND_SESSION_BOUNDS: (f64, f64) = (208.0, 901.0);

/// Bound on session length as a function of the session number `n`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DurationFormula {
    /// `alpha * ln(n) + beta`
    Log { alpha: f64, beta: f64 },
    /// `alpha * n + beta`
    Linear { alpha: f64, beta: f64 },
    Fixed { value: f64 },
}

impl DurationFormula {
    pub fn evaluate(&self, session: u32) -> f64 {
        let n = f64::from(session.max(1));
        match *self {
            DurationFormula::Log { alpha, beta } => alpha * n.ln() + beta,
            DurationFormula::Linear { alpha, beta } => alpha * n + beta,
            DurationFormula::Fixed { value } => value,
        }
    }
}

/// How often and for how long a player plays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionProfile {
    /// Mean sessions per day (Poisson rate)
    pub sessions_per_day: f64,
    pub duration_min: DurationFormula,
    pub duration_max: DurationFormula,
}

impl Default for SessionProfile {
    fn default() -> Self {
        Self {
            sessions_per_day: 4.0,
            duration_min: DurationFormula::Log {
                alpha: 30.0,
                beta: 180.0,
            },
            duration_max: DurationFormula::Log {
                alpha: 90.0,
                beta: 700.0,
            },
        }
    }
}

impl SessionProfile {
    /// Online length of session `session` in whole seconds (at least 1)
    pub fn sample_session_length(&self, session: u32, rng: &mut SimRng) -> Seconds {
        let (lo, hi) = match session {
            0 | 1 => FIRST_SESSION_BOUNDS,
            2 => SECOND_SESSION_BOUNDS,
            n => (self.duration_min.evaluate(n), self.duration_max.evaluate(n)),
        };

        let secs = rng.uniform(lo, hi, DrawKind::Integer).floor();
        secs.max(1.0) as Seconds
    }

    /// Seconds from the end of a session until the next one starts.
    ///
    /// The gap between session starts is exponential with mean `1 / rate`
    /// days, where the day's rate is itself a Poisson draw (at least 1).
    /// The session just played is taken out of that gap.
    pub fn sample_offline(&self, session_online: Seconds, rng: &mut SimRng) -> Seconds {
        let rate = rng.poisson(self.sessions_per_day).max(1);
        let gap = rng.exponential(1.0 / rate as f64) * SECONDS_PER_DAY as f64;
        (gap.floor() as Seconds).saturating_sub(session_online)
    }
}
