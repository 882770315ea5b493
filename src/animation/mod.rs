//! # Animation of the tracked bodies
//!
//! ## Overview
//! -----------------
//! * [`FrameComposer`] – turns an animation ratio into a [`Frame`]: one marker position per
//!   body and the time label. Pure; shared read-only between frames.
//! * [`cycle_clock::CycleClock`] – maps elapsed time onto `(cycle, ratio)` with linear easing.
//! * [`animation_loop::AnimationLoop`] – the repeating task driving a [`FrameSink`] on a
//!   tokio interval, with an explicit `start()` / `stop()` handle.
//!
//! ## Frame contents
//! -----------------
//! For body `0` (primary) the time label comes from the discrete pick and the marker
//! follows the continuous blend. Every other body uses the discrete pick. Positions that
//! project to a non-finite point (malformed ephemeris rows) are reported as `None` and
//! the marker keeps its previous place.
use log::trace;

use crate::{
    constants::Ratio,
    ephemeris::EphemerisTrack,
    interpolation::{interpolate_ratio_of, ratio_of},
    projection::{Projection, ScreenPoint},
    starpath_errors::StarpathError,
};

pub mod animation_loop;
pub mod cycle_clock;

/// Index of the primary body among the tracks.
pub const PRIMARY_BODY: usize = 0;

/// Everything a frame changes on the canvas.
///
/// Fields
/// -----------------
/// * `cycle` – Index of the animation cycle this frame belongs to.
/// * `ratio` – Position inside the cycle, `[0, 1]`.
/// * `time_label` – Text of the time label (primary body, discrete pick).
/// * `positions` – New marker position per body, `None` to leave the marker in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub cycle: u64,
    pub ratio: Ratio,
    pub time_label: String,
    pub positions: Vec<Option<ScreenPoint>>,
}

impl Frame {
    pub fn primary_position(&self) -> Option<ScreenPoint> {
        self.positions.get(PRIMARY_BODY).copied().flatten()
    }
}

/// Receiver of animation frames, owned by the animation task while it runs.
pub trait FrameSink: Send + 'static {
    /// Apply one frame. An error is logged by the loop and the next frame proceeds.
    fn apply_frame(&mut self, frame: &Frame) -> Result<(), StarpathError>;

    /// Called once per finished cycle, right before the next one starts.
    fn cycle_completed(&mut self, _cycle: u64) {}
}

/// Frame builder over the frozen projection and the body tracks.
#[derive(Debug, Clone)]
pub struct FrameComposer {
    projection: Projection,
    tracks: Vec<EphemerisTrack>,
}

impl FrameComposer {
    /// Arguments
    /// -----------------
    /// * `projection` – Frozen sky → screen mapping.
    /// * `tracks` – One track per body, primary first. Must not be empty.
    pub fn new(projection: Projection, tracks: Vec<EphemerisTrack>) -> Result<Self, StarpathError> {
        if tracks.is_empty() {
            return Err(StarpathError::InvalidConfig(
                "at least one tracked body is required".to_string(),
            ));
        }
        Ok(FrameComposer { projection, tracks })
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn tracks(&self) -> &[EphemerisTrack] {
        &self.tracks
    }

    pub fn primary(&self) -> &EphemerisTrack {
        &self.tracks[PRIMARY_BODY]
    }

    /// Compose the frame shown at `ratio` of cycle `cycle`.
    pub fn compose(&self, cycle: u64, ratio: Ratio) -> Frame {
        let positions = self
            .tracks
            .iter()
            .enumerate()
            .map(|(body, track)| {
                let position = if body == PRIMARY_BODY {
                    self.projection
                        .project_finite(&interpolate_ratio_of(track, ratio))
                } else {
                    self.projection.project_finite(ratio_of(track, ratio))
                };
                if position.is_none() {
                    trace!("body {body}: non-finite position at ratio {ratio}, marker left in place");
                }
                position
            })
            .collect();

        Frame {
            cycle,
            ratio,
            time_label: ratio_of(self.primary(), ratio).time.clone(),
            positions,
        }
    }
}
