/// Media player seam and a headless player.
pub(crate) mod media;
/// Pause-scene state machine.
pub(crate) mod pause_scene;
