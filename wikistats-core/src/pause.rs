// Pause between requests: fixed, uniform-random or Gaussian-random

use crate::error::{CoreError, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_PAUSE: &str = "3s";

const DEFAULT_PAUSE_SECS: f64 = 3.0;

/// A parsed pause expression.
///
/// Grammar:
/// - `<n>` (milliseconds), `<n>ms`, `<n>s`
/// - `<lo>-<hi>` uniform range, each bound in the plain grammar
/// - `gauss:<mean>/<sigma>`, both in the plain grammar
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PauseSpec {
    Fixed(f64),
    Uniform { lo: f64, hi: f64 },
    Gauss { mean: f64, sigma: f64 },
}

/// Converts `"500ms"`, `"2s"` or a bare number of milliseconds to seconds.
pub fn parse_duration_secs(value: &str) -> Result<f64> {
    let value = value.trim();
    let (number, scale) = if let Some(n) = value.strip_suffix("ms") {
        (n, 1000.0)
    } else if let Some(n) = value.strip_suffix('s') {
        (n, 1.0)
    } else {
        (value, 1000.0)
    };

    let parsed: f64 = number
        .trim()
        .parse()
        .map_err(|_| CoreError::config(format!("'{}' is not a valid duration", value)))?;
    if !parsed.is_finite() {
        return Err(CoreError::config(format!("'{}' is not a finite duration", value)));
    }
    let secs = parsed / scale;
    if Duration::try_from_secs_f64(secs.abs()).is_err() {
        return Err(CoreError::config(format!("'{}' is too long to wait for", value)));
    }
    Ok(secs)
}

impl FromStr for PauseSpec {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self> {
        let pause = raw.trim().trim_matches('\'');
        if pause.is_empty() {
            return Err(CoreError::config("pause expression is empty"));
        }

        if let Some(rest) = pause.strip_prefix("gauss:") {
            let (mean, sigma) = rest.split_once('/').ok_or_else(|| {
                CoreError::config(format!(
                    "'{}' is not a Gauss pause, expected gauss:<mean>/<sigma>",
                    pause
                ))
            })?;
            let mean = parse_duration_secs(mean)?;
            let sigma = parse_duration_secs(sigma)?;
            if sigma < 0.0 {
                return Err(CoreError::config(format!(
                    "Gauss pause sigma must not be negative, got {}s",
                    sigma
                )));
            }
            return Ok(PauseSpec::Gauss { mean, sigma });
        }

        if pause.starts_with('-') || pause.matches('-').count() > 1 {
            return Err(CoreError::config(format!(
                "'{}' is a negative duration; pauses can only be positive",
                pause
            )));
        }

        if let Some((lo, hi)) = pause.split_once('-') {
            let lo = parse_duration_secs(lo)?;
            let hi = parse_duration_secs(hi)?;
            if lo > hi {
                return Err(CoreError::config(format!(
                    "left bound of '{}' is greater than the right one",
                    pause
                )));
            }
            return Ok(PauseSpec::Uniform { lo, hi });
        }

        Ok(PauseSpec::Fixed(parse_duration_secs(pause)?))
    }
}

impl fmt::Display for PauseSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PauseSpec::Fixed(secs) if *secs == DEFAULT_PAUSE_SECS => write!(f, "default"),
            PauseSpec::Fixed(_) => write!(f, "fixed"),
            PauseSpec::Uniform { lo, hi } => write!(f, "uniform [{}s, {}s]", lo, hi),
            PauseSpec::Gauss { mean, sigma } => write!(f, "gauss (mean {}s, sigma {}s)", mean, sigma),
        }
    }
}

impl PauseSpec {
    /// Draws the concrete pause, in seconds. Never negative.
    pub fn resolve_with<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            PauseSpec::Fixed(secs) => secs,
            PauseSpec::Uniform { lo, hi } => rng.gen_range(lo..=hi),
            PauseSpec::Gauss { mean, sigma } => match Normal::new(mean, sigma) {
                Ok(normal) => normal.sample(rng).abs(),
                Err(_) => mean.abs(),
            },
        }
    }

    /// Resolves once for the whole run and logs what was picked.
    pub fn resolve(&self) -> f64 {
        let secs = self.resolve_with(&mut rand::thread_rng());
        info!("Pause ({}) resolved to {}s", self, secs);
        secs
    }
}

/// The resolved pause as a `Duration`. A draw that cannot be slept for is
/// an error, never a zero pause.
pub fn pause_duration(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs)
        .map_err(|e| CoreError::config(format!("cannot pause for {}s: {}", secs, e)))
}
