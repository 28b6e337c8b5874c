//! Playback length estimation from raw sequence timing fields.

use model_format::SequenceTiming;
use thiserror::Error;

/// Smallest frame count treated as plausible.
pub const MIN_PLAUSIBLE_FRAMES: i32 = 1;
/// Largest frame count treated as plausible.
pub const MAX_PLAUSIBLE_FRAMES: i32 = 10_000;
/// Lowest accepted playback rate.
pub const MIN_FPS: f64 = 1.0;
/// Highest accepted playback rate.
pub const MAX_FPS: f64 = 200.0;
/// Rate substituted when the stored one is unusable.
pub const DEFAULT_FPS: f64 = 30.0;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DurationError {
    #[error("no plausible frame count among ({a}, {b})")]
    NoPlausibleFrames { a: i32, b: i32 },
}

fn plausible(frames: i32) -> bool {
    (MIN_PLAUSIBLE_FRAMES..=MAX_PLAUSIBLE_FRAMES).contains(&frames)
}

/// Chooses between the two frame count candidates.
///
/// The fields are alternates from different format revisions; when both look
/// sane the smaller wins, since the larger is usually a misread neighbour.
pub fn pick_frames(a: i32, b: i32) -> Result<u32, DurationError> {
    match (plausible(a), plausible(b)) {
        (true, true) => Ok(a.min(b) as u32),
        (true, false) => Ok(a as u32),
        (false, true) => Ok(b as u32),
        (false, false) => Err(DurationError::NoPlausibleFrames { a, b }),
    }
}

/// Integer rate sanitising: anything outside `[1, 200]` becomes 30.
pub fn sanitize_fps(raw: i32) -> f64 {
    let fps = f64::from(raw);
    if (MIN_FPS..=MAX_FPS).contains(&fps) {
        fps
    } else {
        DEFAULT_FPS
    }
}

/// Seconds needed to play `timing` once, never negative.
///
/// Clamping to the configured session bounds is left to the caller.
pub fn estimate(timing: SequenceTiming) -> Result<f64, DurationError> {
    let frames = pick_frames(timing.frames_a, timing.frames_b)?;
    let fps = sanitize_fps(timing.fps);
    Ok((f64::from(frames) / fps).max(0.0))
}
