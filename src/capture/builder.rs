//! Builder object which constructs [`InputCapture`] subsystems.
//!
//! [`InputCapture`]: crate::capture::InputCapture

use crate::{capture::InputCapture, wheel::DEFAULT_ACTIVE_FRAMES};

/// Default motion threshold in pixels. Displacements shorter than this are
/// treated as jitter and accumulate instead of reporting.
pub const DEFAULT_MOTION_THRESHOLD: f64 = 10.0;

/// Default capacity of the subscriber event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// A builder pattern object which simplifies the process of creating an
/// [`InputCapture`].
///
/// The same builder can be re-used to create multiple subsystems with the
/// same configuration. The process-wide hook registrations go to the first
/// subsystem to start; any other instance reports the affected channels as
/// unavailable until the holder stops.
///
/// [`InputCapture`]: crate::capture::InputCapture
#[derive(Clone, Debug)]
pub struct Builder {
    motion_threshold: f64,
    scroll_frames: u8,
    event_capacity: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Construct a new builder. Default values will be used for all
    /// properties until explicitly set.
    pub fn new() -> Self {
        Self {
            motion_threshold: DEFAULT_MOTION_THRESHOLD,
            scroll_frames: DEFAULT_ACTIVE_FRAMES,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    /// Set the minimum cursor displacement, in pixels, that reports as
    /// motion. Smaller movements accumulate until they cross this threshold.
    ///
    /// Defaults to [`DEFAULT_MOTION_THRESHOLD`] if not set.
    pub fn with_motion_threshold(self, motion_threshold: f64) -> Self {
        Self {
            motion_threshold,
            ..self
        }
    }

    /// Set the number of poll ticks a scroll direction stays active after a
    /// wheel event.
    ///
    /// Defaults to [`DEFAULT_ACTIVE_FRAMES`] if not set.
    ///
    /// [`DEFAULT_ACTIVE_FRAMES`]: crate::wheel::DEFAULT_ACTIVE_FRAMES
    pub fn with_scroll_frames(self, scroll_frames: u8) -> Self {
        Self {
            scroll_frames,
            ..self
        }
    }

    /// Set the capacity of the subscriber event channel. Slow subscribers
    /// which fall further behind than this lose the oldest events.
    ///
    /// Defaults to [`DEFAULT_EVENT_CAPACITY`] if not set.
    pub fn with_event_capacity(self, event_capacity: usize) -> Self {
        Self {
            event_capacity,
            ..self
        }
    }

    /// Gets the currently set motion threshold.
    pub fn motion_threshold(&self) -> f64 {
        self.motion_threshold
    }

    /// Gets the currently set scroll frame count.
    pub fn scroll_frames(&self) -> u8 {
        self.scroll_frames
    }

    /// Gets the currently set event channel capacity.
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    /// Build a new [`InputCapture`] with the properties of the builder.
    ///
    /// Construction never fails; hook registration is attempted by
    /// [`InputCapture::start`] and reported there.
    ///
    /// [`InputCapture`]: crate::capture::InputCapture
    /// [`InputCapture::start`]: crate::capture::InputCapture::start
    pub fn build(&self) -> InputCapture {
        InputCapture::new(self.motion_threshold, self.scroll_frames, self.event_capacity)
    }
}
