use std::collections::BTreeSet;
use std::time::Duration;

use crate::analysis::model::Annotation;

/// Instruction for the external media player.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", content = "time", rename_all = "camelCase")]
pub enum PlaybackDirective {
    /// Stop advancing media time.
    Pause,
    /// Resume advancing media time.
    Play,
    /// Jump to a media time in seconds.
    SeekTo(f64),
}

/// The pause scene currently holding playback.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivePauseScene {
    /// Annotation that triggered the pause.
    pub annotation_id: String,
    /// Where playback resumes once the countdown ends or is skipped.
    pub end_time: f64,
    /// Whole countdown intervals left.
    pub countdown_remaining: u32,
    ticked_at: Duration,
}

/// Whether normal playback or a pause scene is in control.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PauseState {
    /// Media time advances normally.
    #[default]
    Running,
    /// A pause scene holds playback and its countdown runs on wall-clock time.
    Paused(ActivePauseScene),
}

/// Pause-scene state machine.
///
/// Pure with respect to the outside world: every transition returns the directives the host must
/// forward to its media player. At most one pause scene is active; when several untriggered pause
/// scenes share a trigger window only the first in scan order fires.
#[derive(Clone, Debug)]
pub struct PauseSceneSession {
    triggered: BTreeSet<String>,
    state: PauseState,
    trigger_window: f64,
    interval: Duration,
}

impl PauseSceneSession {
    /// Session that triggers within `trigger_window` seconds of a start time and decrements the
    /// countdown once per `interval`.
    pub fn new(trigger_window: f64, interval: Duration) -> Self {
        Self {
            triggered: BTreeSet::new(),
            state: PauseState::Running,
            trigger_window,
            interval,
        }
    }

    /// Current state.
    pub fn state(&self) -> &PauseState {
        &self.state
    }

    /// Active pause scene, if any.
    pub fn active(&self) -> Option<&ActivePauseScene> {
        match &self.state {
            PauseState::Running => None,
            PauseState::Paused(active) => Some(active),
        }
    }

    /// Remaining countdown of the active pause scene.
    pub fn countdown_remaining(&self) -> Option<u32> {
        self.active().map(|a| a.countdown_remaining)
    }

    /// Ids that have fired on the current forward pass.
    pub fn triggered(&self) -> &BTreeSet<String> {
        &self.triggered
    }

    /// `true` if `id` has fired and not been rewound past.
    pub fn is_triggered(&self, id: &str) -> bool {
        self.triggered.contains(id)
    }

    /// React to a new media time: clear trigger flags the time has rewound past, then fire the
    /// first eligible pause scene if none is active.
    pub fn observe_time(
        &mut self,
        t: f64,
        annotations: &[Annotation],
        now: Duration,
    ) -> Vec<PlaybackDirective> {
        self.rewind_to(t, annotations);

        if self.active().is_some() {
            return Vec::new();
        }

        let Some(ann) = annotations.iter().find(|a| self.is_eligible(a, t)) else {
            return Vec::new();
        };

        let countdown = ann.pause_countdown_secs();
        tracing::debug!(annotation = %ann.id, t, countdown, "pause scene triggered");
        self.triggered.insert(ann.id.clone());
        self.state = PauseState::Paused(ActivePauseScene {
            annotation_id: ann.id.clone(),
            end_time: ann.end_time,
            countdown_remaining: countdown,
            ticked_at: now,
        });
        vec![PlaybackDirective::Pause]
    }

    /// Forget trigger flags of annotations that start after `t`, so they fire again on the next
    /// forward pass. Flags of annotations no longer in `annotations` are dropped too.
    ///
    /// The active scene's flag is cleared like any other; the active state is left untouched.
    pub fn rewind_to(&mut self, t: f64, annotations: &[Annotation]) {
        self.triggered.retain(|id| {
            let keep = annotations
                .iter()
                .find(|a| &a.id == id)
                .is_some_and(|a| t >= a.start_time);
            if !keep {
                tracing::debug!(annotation = %id, t, "pause scene re-armed");
            }
            keep
        });
    }

    /// Advance the countdown to wall-clock `now`. Each elapsed interval decrements once; reaching
    /// zero resumes playback at the scene's end time.
    pub fn poll(&mut self, now: Duration) -> Vec<PlaybackDirective> {
        let PauseState::Paused(active) = &mut self.state else {
            return Vec::new();
        };

        while active.countdown_remaining > 0
            && now.saturating_sub(active.ticked_at) >= self.interval
        {
            active.countdown_remaining -= 1;
            active.ticked_at += self.interval;
            tracing::debug!(
                annotation = %active.annotation_id,
                remaining = active.countdown_remaining,
                "pause scene countdown"
            );
        }

        if active.countdown_remaining > 0 {
            return Vec::new();
        }
        tracing::debug!(annotation = %active.annotation_id, "pause scene finished");
        self.resume_at_end()
    }

    /// Cancel the active pause scene early and resume at its end time.
    pub fn skip(&mut self) -> Vec<PlaybackDirective> {
        if let Some(active) = self.active() {
            tracing::debug!(annotation = %active.annotation_id, "pause scene skipped");
        }
        self.resume_at_end()
    }

    /// Drop all state for a deleted annotation. Deleting the active scene resumes playback in
    /// place.
    pub fn forget(&mut self, id: &str) -> Vec<PlaybackDirective> {
        self.triggered.remove(id);
        match &self.state {
            PauseState::Paused(active) if active.annotation_id == id => {
                tracing::debug!(annotation = %id, "active pause scene deleted");
                self.state = PauseState::Running;
                vec![PlaybackDirective::Play]
            }
            _ => Vec::new(),
        }
    }

    /// Stop any countdown without issuing directives.
    pub fn cancel(&mut self) {
        self.state = PauseState::Running;
    }

    fn resume_at_end(&mut self) -> Vec<PlaybackDirective> {
        match std::mem::take(&mut self.state) {
            PauseState::Running => Vec::new(),
            PauseState::Paused(active) => vec![
                PlaybackDirective::SeekTo(active.end_time),
                PlaybackDirective::Play,
            ],
        }
    }

    fn is_eligible(&self, ann: &Annotation, t: f64) -> bool {
        ann.is_pause_scene
            && !ann.window().is_empty()
            && !self.triggered.contains(&ann.id)
            && ann.start_time <= t
            && t < ann.start_time + self.trigger_window
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/pause_scene.rs"]
mod tests;
