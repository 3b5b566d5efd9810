use serde::Deserialize;

/// Increments used to ease the displayed percentage toward a new target
pub const ANIMATION_STEPS: u32 = 20;
/// Tick interval of the easing loop
pub const ANIMATION_TICK_MS: u32 = 30;
/// Pause between completion detection and the refresh notification, so the
/// 100% state is visibly rendered before the charts reload
pub const REFRESH_DELAY_MS: u32 = 500;

/// Server-pushed processing update; either field may be absent
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgressEvent {
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
}

impl ProgressEvent {
    /// Terminal when the numeric progress hits 100 or the step label carries a
    /// completion marker ("Completado" as well as "complete")
    pub fn is_terminal(&self) -> bool {
        let by_number = self.progress.is_some_and(|p| p == 100.0);
        let by_label = self
            .step
            .as_deref()
            .is_some_and(|step| step.to_lowercase().contains("complet"));
        by_number || by_label
    }
}

/// Decode one push-channel frame. Malformed frames are `None`; the channel
/// drops them instead of surfacing an error nobody can act on.
pub fn decode_progress_frame(raw: &str) -> Option<ProgressEvent> {
    serde_json::from_str(raw).ok()
}

/// One easing run advancing a displayed percentage toward a target in
/// ANIMATION_STEPS equal increments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressAnimator {
    start: f64,
    target: f64,
    step: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub value: f64,
    pub done: bool,
}

impl ProgressAnimator {
    pub fn new(current: f64, target: f64) -> Self {
        Self {
            start: current,
            target,
            step: 0,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Advance one tick. Values are capped at the target, the run ends after
    /// ANIMATION_STEPS ticks or as soon as the target is reached, and the
    /// final frame lands on the exact target value.
    pub fn tick(&mut self) -> AnimationFrame {
        self.step += 1;
        let increment = (self.target - self.start) / ANIMATION_STEPS as f64;
        let value = (self.start + increment * self.step as f64).min(self.target);
        let done = self.step >= ANIMATION_STEPS || value >= self.target;
        AnimationFrame {
            value: if done { self.target } else { value },
            done,
        }
    }
}
