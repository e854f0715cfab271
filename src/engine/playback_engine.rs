use std::collections::BTreeSet;

use crate::{
    analysis::model::Annotation,
    analysis::snapshot::AnalysisSnapshot,
    animation::smoothing::{SmoothedState, SmoothingFilter},
    engine::config::EngineConfig,
    engine::target::target_state,
    foundation::clock::Clock,
    foundation::core::Size,
    foundation::error::{TelestratorError, TelestratorResult},
    playback::media::{MediaController, apply_directives},
    playback::pause_scene::{ActivePauseScene, PauseSceneSession, PlaybackDirective},
    render::descriptor::{RenderDescriptor, resolve_descriptor},
    store::analysis_store::AnalysisStore,
    transform::viewport::{DisplayScale, ScaleChange, Viewport},
};

/// Drives one review session: reacts to media time, smooths annotation motion, runs pause scenes
/// and produces render descriptors in display space.
///
/// The host forwards media events (`on_time_update`, `on_play`, `on_pause`, `on_metadata`),
/// layout events (`on_resize`, `set_canvas`) and animation frames (`animate`, or `tick` to do
/// both at once). Playback commands flow back through the owned [`MediaController`].
///
/// Once [`dispose`](Self::dispose)d every event is ignored and no further frames are requested.
#[derive(Debug)]
pub struct PlaybackEngine<M: MediaController, C: Clock> {
    config: EngineConfig,
    snapshot: AnalysisSnapshot,
    media: M,
    clock: C,
    viewport: Viewport,
    smoothing: SmoothingFilter,
    pause: PauseSceneSession,
    current_time: f64,
    duration: Option<f64>,
    playing: bool,
    disposed: bool,
}

impl<M: MediaController, C: Clock> PlaybackEngine<M, C> {
    /// Validate `config` and build an engine at media time zero, not playing.
    #[tracing::instrument(skip_all, fields(analysis = %snapshot.id()))]
    pub fn create(
        snapshot: AnalysisSnapshot,
        config: EngineConfig,
        media: M,
        clock: C,
    ) -> TelestratorResult<Self> {
        config.validate()?;
        let viewport = Viewport::with_canvas(snapshot.canvas());
        let smoothing = SmoothingFilter::new(config.smoothing_alpha, config.opacity_alpha());
        let pause = PauseSceneSession::new(config.pause_trigger_window, config.countdown_step());
        tracing::debug!(
            annotations = snapshot.annotations().len(),
            pause_scenes = snapshot.pause_scenes().len(),
            "playback engine created"
        );
        Ok(Self {
            config,
            snapshot,
            media,
            clock,
            viewport,
            smoothing,
            pause,
            current_time: 0.0,
            duration: None,
            playing: false,
            disposed: false,
        })
    }

    // Media events.

    /// Media time advanced (or jumped) to `t` seconds.
    ///
    /// A backward jump re-arms every pause scene starting after `t`, including the one currently
    /// held. The hold itself is not cancelled: its countdown keeps running and still ends with a
    /// seek to its `end_time`, after which its id is absent from [`Self::triggered_ids`].
    pub fn on_time_update(&mut self, t: f64) {
        if self.disposed || !t.is_finite() {
            return;
        }
        self.current_time = t;
        let now = self.clock.now();
        let directives = self.pause.observe_time(t, self.snapshot.annotations(), now);
        self.dispatch(&directives);
    }

    /// The media player started playing.
    pub fn on_play(&mut self) {
        if !self.disposed {
            self.playing = true;
        }
    }

    /// The media player paused.
    pub fn on_pause(&mut self) {
        if !self.disposed {
            self.playing = false;
        }
    }

    /// Media duration became known.
    pub fn set_duration(&mut self, duration: f64) {
        if self.disposed {
            return;
        }
        if duration.is_finite() && duration >= 0.0 {
            self.duration = Some(duration);
        } else {
            tracing::warn!(duration, "ignoring invalid media duration");
        }
    }

    /// Intrinsic video size became known.
    pub fn on_metadata(&mut self, video: Size) {
        if self.disposed {
            return;
        }
        let change = self.viewport.set_video(video);
        self.on_scale_change(change);
    }

    /// The container the video is laid out in was resized.
    pub fn on_resize(&mut self, container: Size) {
        if self.disposed {
            return;
        }
        let change = self.viewport.set_container(container);
        self.on_scale_change(change);
    }

    /// Authored canvas size changed.
    pub fn set_canvas(&mut self, canvas: Size) {
        if self.disposed {
            return;
        }
        self.snapshot.set_canvas(canvas);
        let change = self.viewport.set_canvas(canvas);
        self.on_scale_change(change);
    }

    // Animation.

    /// `true` while the host should keep scheduling animation frames.
    pub fn wants_animation_frame(&self) -> bool {
        !self.disposed && (self.playing || self.pause.active().is_some())
    }

    /// Advance smoothing one step toward the current targets and return the visible descriptors.
    ///
    /// Annotations that leave the candidate set lose their smoothing state, so they start fresh
    /// when they reappear.
    pub fn animate(&mut self) -> Vec<RenderDescriptor> {
        if self.disposed {
            return Vec::new();
        }
        let t = self.current_time;
        let scale = self.viewport.scale();

        let mut visible: Vec<(&Annotation, SmoothedState)> = Vec::new();
        let mut candidates: BTreeSet<&str> = BTreeSet::new();
        for ann in self.snapshot.annotations() {
            let Some(target) = target_state(ann, t, &self.config) else {
                continue;
            };
            candidates.insert(ann.id.as_str());
            visible.push((ann, self.smoothing.update(&ann.id, target)));
        }
        self.smoothing.retain(|id| candidates.contains(id));

        describe(visible, scale, self.config.opacity_epsilon)
    }

    /// Convenience for hosts that deliver time with each frame: `on_time_update(t)` then
    /// `animate()`.
    pub fn tick(&mut self, t: f64) -> Vec<RenderDescriptor> {
        self.on_time_update(t);
        self.animate()
    }

    /// Descriptors for the current state without advancing smoothing.
    pub fn frame(&self) -> Vec<RenderDescriptor> {
        if self.disposed {
            return Vec::new();
        }
        let t = self.current_time;
        let visible = self.snapshot.annotations().iter().filter_map(|ann| {
            let target = target_state(ann, t, &self.config)?;
            let state = self.smoothing.get(&ann.id).copied().unwrap_or(target);
            Some((ann, state))
        });
        describe(visible, self.viewport.scale(), self.config.opacity_epsilon)
    }

    // Pause scenes.

    /// Advance the active countdown to the clock's current time.
    pub fn poll_countdown(&mut self) {
        if self.disposed {
            return;
        }
        let now = self.clock.now();
        let directives = self.pause.poll(now);
        self.dispatch(&directives);
    }

    /// End the active pause scene early. Returns `false` when none was active.
    pub fn skip_pause_scene(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let directives = self.pause.skip();
        self.dispatch(&directives);
        !directives.is_empty()
    }

    /// Seek the media player to `t`, clamped to `[0, duration]` when the duration is known.
    ///
    /// Seeking backward re-arms pause scenes the same way [`Self::on_time_update`] does. An
    /// active hold survives the seek and resumes at its own `end_time` when the countdown ends;
    /// call [`Self::skip_pause_scene`] first to release it at the new position instead.
    pub fn seek(&mut self, t: f64) {
        if self.disposed || !t.is_finite() {
            return;
        }
        let mut t = t.max(0.0);
        if let Some(d) = self.duration {
            t = t.min(d);
        }
        self.dispatch(&[PlaybackDirective::SeekTo(t)]);
        self.pause.rewind_to(t, self.snapshot.annotations());
    }

    // Editing.

    /// Delete an annotation and persist the remaining document through `store`.
    ///
    /// Local state changes before the save is attempted and is not rolled back when it fails.
    /// Deleting the active pause scene resumes playback in place.
    #[tracing::instrument(skip(self, store), fields(analysis = %self.snapshot.id()))]
    pub fn delete_annotation<S: AnalysisStore + ?Sized>(
        &mut self,
        id: &str,
        store: &mut S,
    ) -> TelestratorResult<()> {
        if self.disposed {
            return Err(TelestratorError::playback("engine has been disposed"));
        }
        if self.snapshot.remove_annotation(id).is_none() {
            return Err(TelestratorError::validation(format!(
                "unknown annotation '{id}'"
            )));
        }
        self.smoothing.remove(id);
        let directives = self.pause.forget(id);
        self.dispatch(&directives);

        store
            .save(
                self.snapshot.id(),
                self.snapshot.clips(),
                self.snapshot.annotations(),
                self.snapshot.canvas(),
            )
            .map_err(|err| {
                tracing::warn!(error = %err, "failed to persist annotation deletion");
                match err {
                    TelestratorError::Persistence(_) => err,
                    other => TelestratorError::persistence(other.to_string()),
                }
            })
    }

    /// Stop everything: cancel the countdown, forget smoothing state and ignore later events.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.pause.cancel();
        self.smoothing.reset();
        self.playing = false;
        self.disposed = true;
        tracing::debug!(analysis = %self.snapshot.id(), "playback engine disposed");
    }

    // Accessors.

    /// Last media time seen.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Media duration, once known.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// `true` while the media player is believed to be playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// `true` after [`dispose`](Self::dispose).
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// The pause scene holding playback, if any.
    pub fn active_pause_scene(&self) -> Option<&ActivePauseScene> {
        self.pause.active()
    }

    /// Whole seconds left on the active countdown.
    pub fn countdown_remaining(&self) -> Option<u32> {
        self.pause.countdown_remaining()
    }

    /// Pause scenes already fired on the current forward pass.
    pub fn triggered_ids(&self) -> &BTreeSet<String> {
        self.pause.triggered()
    }

    /// Pause-scene annotations ordered by start time.
    pub fn pause_scenes(&self) -> Vec<&Annotation> {
        self.snapshot.pause_scenes()
    }

    /// Current display scale.
    pub fn scale(&self) -> DisplayScale {
        self.viewport.scale()
    }

    /// Displayed video size, once container and video sizes are known.
    pub fn display_size(&self) -> Option<Size> {
        self.viewport.display()
    }

    /// Smoothed authored-space state of `id`, if it is being tracked.
    pub fn smoothed_state(&self, id: &str) -> Option<&SmoothedState> {
        self.smoothing.get(id)
    }

    /// The annotation document being played.
    pub fn snapshot(&self) -> &AnalysisSnapshot {
        &self.snapshot
    }

    /// Active tunables.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The media controller.
    pub fn media(&self) -> &M {
        &self.media
    }

    /// The media controller, mutably.
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// The wall clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn dispatch(&mut self, directives: &[PlaybackDirective]) {
        if directives.is_empty() {
            return;
        }
        apply_directives(&mut self.media, directives);
        for d in directives {
            match *d {
                PlaybackDirective::Pause => self.playing = false,
                PlaybackDirective::Play => self.playing = true,
                PlaybackDirective::SeekTo(t) => self.current_time = t,
            }
        }
    }

    fn on_scale_change(&mut self, change: ScaleChange) {
        if change
            .previous
            .differs_from(change.current, self.config.rescale_reset_threshold)
        {
            tracing::debug!(
                from_x = change.previous.x,
                from_y = change.previous.y,
                to_x = change.current.x,
                to_y = change.current.y,
                "display scale changed; smoothing reset"
            );
            self.smoothing.reset();
        }
    }
}

fn describe<'a>(
    visible: impl IntoIterator<Item = (&'a Annotation, SmoothedState)>,
    scale: DisplayScale,
    opacity_epsilon: f64,
) -> Vec<RenderDescriptor> {
    visible
        .into_iter()
        .filter(|(_, state)| state.opacity > opacity_epsilon)
        .map(|(ann, state)| resolve_descriptor(ann, &state, scale))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/engine/playback_engine.rs"]
mod tests;
