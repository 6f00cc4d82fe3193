//! Decaying scroll-activity signal built from discrete wheel notifications.

use ::std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Number of poll ticks a scroll direction stays lit after a wheel event,
/// unless a fresh event re-arms it first.
pub const DEFAULT_ACTIVE_FRAMES: u8 = 5;

/// A wheel rotation direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Accumulates wheel notifications into a per-direction "recently scrolled"
/// countdown, consumed once per poll tick.
///
/// The hook-callback context calls [`on_wheel`] and the poll context calls
/// [`tick`]/[`is_active`]; all state is atomic so neither side ever blocks
/// the other. A fresh wheel event while a countdown is running restarts the
/// full duration rather than adding to it.
///
/// # Example
///
/// ```
/// use ::keylight::wheel::{ScrollDirection, WheelAggregator};
///
/// let wheel = WheelAggregator::default();
/// wheel.on_wheel(120);
/// wheel.tick();
/// assert!(wheel.is_active(ScrollDirection::Up));
/// assert!(!wheel.is_active(ScrollDirection::Down));
/// ```
///
/// [`on_wheel`]: Self::on_wheel
/// [`tick`]: Self::tick
/// [`is_active`]: Self::is_active
pub struct WheelAggregator {
    active_frames: u8,
    up: Lane,
    down: Lane,
}

/// Pending flag plus remaining-tick countdown for one direction.
#[derive(Default)]
struct Lane {
    pending: AtomicBool,
    ticks: AtomicU8,
}

impl Lane {
    fn tick(&self, active_frames: u8) {
        if self.pending.swap(false, Ordering::SeqCst) {
            // Re-arm, never accumulate.
            self.ticks.store(active_frames, Ordering::SeqCst);
        }
        // Decrement any running countdown.
        let _ = self
            .ticks
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| t.checked_sub(1));
    }

    fn reset(&self) {
        self.pending.store(false, Ordering::SeqCst);
        self.ticks.store(0, Ordering::SeqCst);
    }
}

impl Default for WheelAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVE_FRAMES)
    }
}

impl WheelAggregator {
    /// Constructs an aggregator whose directions stay active for
    /// `active_frames` poll ticks after each wheel event.
    pub fn new(active_frames: u8) -> Self {
        Self {
            active_frames,
            up: Lane::default(),
            down: Lane::default(),
        }
    }

    /// Records one wheel notification. Positive rotation flags up, negative
    /// flags down; a single hardware notification is never both. Zero deltas
    /// are malformed and ignored.
    pub fn on_wheel(&self, delta: i16) {
        if delta > 0 {
            self.up.pending.store(true, Ordering::SeqCst);
        } else if delta < 0 {
            self.down.pending.store(true, Ordering::SeqCst);
        }
    }

    /// Advances the countdowns by one poll tick. Directions flagged since the
    /// last tick are re-armed to the full frame count first, then every
    /// running countdown is decremented.
    pub fn tick(&self) {
        self.up.tick(self.active_frames);
        self.down.tick(self.active_frames);
    }

    /// Whether the given direction was scrolled recently enough to display.
    pub fn is_active(&self, direction: ScrollDirection) -> bool {
        let lane = match direction {
            ScrollDirection::Up => &self.up,
            ScrollDirection::Down => &self.down,
        };
        lane.ticks.load(Ordering::SeqCst) > 0
    }

    /// Clears pending flags and countdowns. Used on subsystem stop.
    pub fn reset(&self) {
        self.up.reset();
        self.down.reset();
    }
}
