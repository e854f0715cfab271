use std::time::Duration;

use crate::foundation::error::{TelestratorError, TelestratorResult};

/// Tunables for [`crate::PlaybackEngine`].
///
/// Every field has a default, so a config file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Seconds before start / after end during which an annotation stays a render candidate.
    pub fade_margin: f64,
    /// Length of the eased fade-in and fade-out, in seconds.
    pub fade_duration: f64,
    /// Smoothed opacity at or below this is dropped from render output.
    pub opacity_epsilon: f64,
    /// Per-frame convergence factor for position, rotation and scale.
    pub smoothing_alpha: f64,
    /// Multiplier applied to `smoothing_alpha` for opacity.
    pub opacity_alpha_scale: f64,
    /// A display scale change above this (either axis) clears smoothing state.
    pub rescale_reset_threshold: f64,
    /// A pause scene triggers while `start <= t < start + pause_trigger_window`.
    pub pause_trigger_window: f64,
    /// Wall-clock interval between countdown decrements, in seconds.
    pub countdown_interval: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fade_margin: 0.1,
            fade_duration: 0.5,
            opacity_epsilon: 0.01,
            smoothing_alpha: 0.12,
            opacity_alpha_scale: 1.5,
            rescale_reset_threshold: 0.01,
            pause_trigger_window: 0.25,
            countdown_interval: 1.0,
        }
    }
}

impl EngineConfig {
    /// Reject values that would stall or destabilize playback.
    pub fn validate(&self) -> TelestratorResult<()> {
        let positive = [
            ("fadeDuration", self.fade_duration),
            ("pauseTriggerWindow", self.pause_trigger_window),
            ("countdownInterval", self.countdown_interval),
            ("opacityAlphaScale", self.opacity_alpha_scale),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(TelestratorError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }

        let non_negative = [
            ("fadeMargin", self.fade_margin),
            ("opacityEpsilon", self.opacity_epsilon),
            ("rescaleResetThreshold", self.rescale_reset_threshold),
        ];
        for (name, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return Err(TelestratorError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }

        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(TelestratorError::validation(
                "smoothingAlpha must be in (0, 1]",
            ));
        }
        if self.opacity_alpha() > 1.0 {
            return Err(TelestratorError::validation(
                "smoothingAlpha * opacityAlphaScale must be <= 1",
            ));
        }
        Ok(())
    }

    /// Convergence factor used for opacity.
    pub fn opacity_alpha(&self) -> f64 {
        self.smoothing_alpha * self.opacity_alpha_scale
    }

    pub(crate) fn countdown_step(&self) -> Duration {
        Duration::from_secs_f64(self.countdown_interval.max(1e-3))
    }

    /// Parse a JSON config and validate it.
    pub fn from_json(s: &str) -> TelestratorResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
