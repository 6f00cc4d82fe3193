//! Fixed-cadence cursor sampling with noise thresholding.

use ::geoms::d2::Point2D;
use ::tracing::trace;

use super::Direction;
use crate::events::MotionEvent;

/// Source of absolute cursor positions in screen coordinates.
///
/// The production implementation queries the platform; tests substitute a
/// scripted source. A source that cannot produce a position this tick
/// returns `None` and the sampler degrades to "no motion" — this code runs
/// every frame and must never bring the host down.
pub trait CursorSource {
    fn position(&mut self) -> Option<Point2D<i32>>;
}

/// Polls the cursor position and emits a [`MotionEvent`] whenever the
/// displacement since the last qualifying sample crosses a threshold.
///
/// The first sample after construction or [`reset`] only establishes a
/// baseline; without one, a spurious large-distance event would fire against
/// an uninitialized origin. Sub-threshold samples leave the baseline in
/// place, so small jitters do not repeatedly reset it and a slow drag still
/// crosses the threshold cumulatively.
///
/// [`reset`]: Self::reset
pub struct MotionSampler<C> {
    source: C,
    last: Option<Point2D<i32>>,
}

impl<C> MotionSampler<C>
where
    C: CursorSource,
{
    pub fn new(source: C) -> Self {
        Self { source, last: None }
    }

    /// Discards the baseline. The next call to [`sample`] will only
    /// re-establish it. Call after the subsystem was disabled and re-enabled
    /// so the intervening cursor travel is not reported as one huge move.
    ///
    /// [`sample`]: Self::sample
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Takes one sample and returns a motion event if the displacement since
    /// the baseline is at least `threshold` pixels.
    pub fn sample(&mut self, threshold: f64) -> Option<MotionEvent> {
        let position = self.source.position()?;

        let Some(last) = self.last else {
            self.last = Some(position);
            return None;
        };

        let dx = position.x - last.x;
        let dy = position.y - last.y;
        let distance = f64::from(dx).hypot(f64::from(dy));
        if distance < threshold {
            // Leave the baseline untouched so sub-threshold motion
            // accumulates across ticks.
            return None;
        }

        trace!(dx, dy, distance, "Qualifying cursor motion");
        self.last = Some(position);
        Some(MotionEvent {
            dx,
            dy,
            direction: Direction::classify(f64::from(dx), f64::from(dy)),
            distance,
        })
    }
}

/// Cursor source backed by the Win32 cursor-position query.
#[cfg(windows)]
pub struct SystemCursor;

#[cfg(windows)]
impl CursorSource for SystemCursor {
    fn position(&mut self) -> Option<Point2D<i32>> {
        use ::tracing::warn;
        use ::windows::Win32::{Foundation::POINT, UI::WindowsAndMessaging::GetCursorPos};

        use crate::errors::Context;

        let mut point = POINT::default();
        match unsafe { GetCursorPos(&mut point) }
            .ok()
            .context("Failed to query cursor position")
            .function("GetCursorPos")
        {
            Ok(()) => Some(Point2D {
                x: point.x,
                y: point.y,
            }),
            Err(err) => {
                // Degrade to "no motion this tick".
                warn!(error = %err, "Cursor query failed");
                None
            }
        }
    }
}
