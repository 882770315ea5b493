//! # Repeating animation task
//!
//! [`AnimationLoop`] runs the animation of a chart on the tokio runtime. While running,
//! a task ticks a [`tokio::time::interval`] at the configured frame rate; each tick reads
//! the [`CycleClock`], composes a [`Frame`] and hands it to the [`FrameSink`].
//!
//! ## Lifecycle
//! -----------------
//! * `new` – the loop is idle and owns the sink.
//! * [`AnimationLoop::start`] – the sink moves into the task; the loop is running.
//! * [`AnimationLoop::stop`] – the stop signal is observed on the next tick, the task hands
//!   the sink back and the loop is idle again. A later `start` begins a fresh animation
//!   from ratio `0`.
//!
//! Dropping a running loop closes the stop channel, which ends the task as well.
//!
//! ## Cycle boundaries
//! -----------------
//! When a tick lands in a new cycle, the finished cycle is closed first: its frame at
//! ratio `1` (last samples) is applied, [`FrameSink::cycle_completed`] is called, then the
//! frame of the new cycle is applied within the same tick. No tick is spent idle between
//! cycles.
//!
//! ## Concurrency
//! -----------------
//! The sink is owned by the task alone, no lock is involved. The [`FrameComposer`] is
//! immutable and shared through an [`Arc`].
use std::{sync::Arc, time::Duration};

use log::{debug, info, warn};
use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::{interval, Instant, MissedTickBehavior},
};

use crate::{
    animation::{cycle_clock::CycleClock, Frame, FrameComposer, FrameSink},
    config::ChartConfig,
    starpath_errors::StarpathError,
};

/// Cycle length and frame pacing of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    pub cycle: Duration,
    pub frame_interval: Duration,
}

impl AnimationTiming {
    pub fn from_config(config: &ChartConfig) -> Result<Self, StarpathError> {
        Ok(AnimationTiming {
            cycle: config.cycle_duration()?,
            frame_interval: config.frame_interval()?,
        })
    }
}

enum LoopState<S> {
    Idle(S),
    Running {
        stop_tx: oneshot::Sender<()>,
        task: JoinHandle<S>,
    },
    /// The task failed and took the sink with it.
    Lost,
}

/// Start/stop handle over the repeating animation task.
pub struct AnimationLoop<S: FrameSink> {
    composer: Arc<FrameComposer>,
    timing: AnimationTiming,
    state: LoopState<S>,
}

impl<S: FrameSink> AnimationLoop<S> {
    pub fn new(composer: Arc<FrameComposer>, sink: S, timing: AnimationTiming) -> Self {
        AnimationLoop {
            composer,
            timing,
            state: LoopState::Idle(sink),
        }
    }

    pub fn timing(&self) -> AnimationTiming {
        self.timing
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// The sink, when the loop is idle.
    pub fn sink(&self) -> Option<&S> {
        match &self.state {
            LoopState::Idle(sink) => Some(sink),
            _ => None,
        }
    }

    /// Consume the loop and return the sink, when idle.
    pub fn into_sink(self) -> Option<S> {
        match self.state {
            LoopState::Idle(sink) => Some(sink),
            _ => None,
        }
    }

    /// Spawn the animation task on the current tokio runtime.
    ///
    /// Return
    /// ----------
    /// * `Ok(())` once spawned, [`StarpathError::AnimationAlreadyRunning`] if the loop runs
    ///   already, or [`StarpathError::InvalidConfig`] for a zero cycle length or frame
    ///   interval.
    ///
    /// Panics
    /// ----------
    /// * Outside of a tokio runtime, like [`tokio::spawn`].
    pub fn start(&mut self) -> Result<(), StarpathError> {
        let clock = CycleClock::new(self.timing.cycle)?;
        if self.timing.frame_interval.is_zero() {
            return Err(StarpathError::InvalidConfig(
                "frame interval must be longer than zero".to_string(),
            ));
        }
        let sink = match std::mem::replace(&mut self.state, LoopState::Lost) {
            LoopState::Idle(sink) => sink,
            running @ LoopState::Running { .. } => {
                self.state = running;
                return Err(StarpathError::AnimationAlreadyRunning);
            }
            LoopState::Lost => return Err(StarpathError::SinkLost),
        };

        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(run_cycles(
            Arc::clone(&self.composer),
            sink,
            clock,
            self.timing.frame_interval,
            stop_rx,
        ));
        info!(
            "animation started: {:?} per cycle, one frame every {:?}",
            self.timing.cycle, self.timing.frame_interval
        );
        self.state = LoopState::Running { stop_tx, task };
        Ok(())
    }

    /// Signal the task to stop and wait for the sink to come back.
    ///
    /// Return
    /// ----------
    /// * `Ok(())` once idle, [`StarpathError::AnimationNotRunning`] if the loop was idle,
    ///   [`StarpathError::TaskJoinError`] if the task panicked (the sink is lost).
    pub async fn stop(&mut self) -> Result<(), StarpathError> {
        match std::mem::replace(&mut self.state, LoopState::Lost) {
            LoopState::Running { stop_tx, task } => {
                // the task may be gone already; joining reports why
                let _ = stop_tx.send(());
                let sink = task.await?;
                self.state = LoopState::Idle(sink);
                info!("animation stopped");
                Ok(())
            }
            idle @ LoopState::Idle(_) => {
                self.state = idle;
                Err(StarpathError::AnimationNotRunning)
            }
            LoopState::Lost => Err(StarpathError::SinkLost),
        }
    }
}

fn apply<S: FrameSink>(sink: &mut S, frame: &Frame) {
    if let Err(e) = sink.apply_frame(frame) {
        warn!(
            "frame at cycle {} ratio {:.4} not applied: {e}",
            frame.cycle, frame.ratio
        );
    }
}

async fn run_cycles<S: FrameSink>(
    composer: Arc<FrameComposer>,
    mut sink: S,
    clock: CycleClock,
    frame_interval: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) -> S {
    let mut ticker = interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let started = Instant::now();
    let mut current_cycle = 0;

    loop {
        tokio::select! {
            biased;
            _ = &mut stop_rx => break,
            tick = ticker.tick() => {
                let position = clock.position(tick.saturating_duration_since(started));
                if position.cycle > current_cycle {
                    apply(&mut sink, &composer.compose(current_cycle, 1.0));
                    sink.cycle_completed(current_cycle);
                    debug!("cycle {current_cycle} complete, restarting");
                    current_cycle = position.cycle;
                }
                apply(&mut sink, &composer.compose(position.cycle, position.ratio));
            }
        }
    }
    sink
}
