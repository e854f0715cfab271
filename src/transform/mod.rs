/// Fit the video into its container and derive canvas-to-display scale factors.
pub mod viewport;
