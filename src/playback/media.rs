use crate::playback::pause_scene::PlaybackDirective;

/// The external media player the engine steers.
pub trait MediaController {
    /// Stop advancing media time.
    fn pause(&mut self);

    /// Resume advancing media time.
    fn play(&mut self);

    /// Jump to `time` seconds.
    fn seek_to(&mut self, time: f64);
}

impl<M: MediaController + ?Sized> MediaController for &mut M {
    fn pause(&mut self) {
        (**self).pause();
    }

    fn play(&mut self) {
        (**self).play();
    }

    fn seek_to(&mut self, time: f64) {
        (**self).seek_to(time);
    }
}

pub(crate) fn apply_directives<M: MediaController + ?Sized>(
    media: &mut M,
    directives: &[PlaybackDirective],
) {
    for d in directives {
        match *d {
            PlaybackDirective::Pause => media.pause(),
            PlaybackDirective::Play => media.play(),
            PlaybackDirective::SeekTo(t) => media.seek_to(t),
        }
    }
}

/// Headless player with a settable clock, for previews and tests.
///
/// Records every directive it receives.
#[derive(Clone, Debug, Default)]
pub struct SimulatedPlayer {
    time: f64,
    duration: Option<f64>,
    playing: bool,
    history: Vec<PlaybackDirective>,
}

impl SimulatedPlayer {
    /// Paused player at time zero with unknown duration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Player with a known duration; time is clamped to `[0, duration]`.
    pub fn with_duration(duration: f64) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    /// Current media time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Media duration, if known.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// `true` while media time advances.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Directives received so far, oldest first.
    pub fn history(&self) -> &[PlaybackDirective] {
        &self.history
    }

    /// Advance media time by `dt` if playing. Reaching the end stops playback.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if self.playing && dt > 0.0 {
            self.time += dt;
            if let Some(d) = self.duration
                && self.time >= d
            {
                self.time = d;
                self.playing = false;
            }
        }
        self.time
    }

    fn clamp(&self, t: f64) -> f64 {
        let t = t.max(0.0);
        match self.duration {
            Some(d) => t.min(d),
            None => t,
        }
    }
}

impl MediaController for SimulatedPlayer {
    fn pause(&mut self) {
        self.playing = false;
        self.history.push(PlaybackDirective::Pause);
    }

    fn play(&mut self) {
        self.playing = true;
        self.history.push(PlaybackDirective::Play);
    }

    fn seek_to(&mut self, time: f64) {
        self.time = self.clamp(time);
        self.history.push(PlaybackDirective::SeekTo(time));
    }
}
