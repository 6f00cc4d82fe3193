//! Concurrent press-state tracking for every key and mouse button.

use ::std::{
    array,
    sync::atomic::{AtomicBool, Ordering},
};
use ::tracing::trace;

use crate::codes::InputCode;

/// Size of the tracked code space. The platform virtual-key space is one
/// byte, and the synthetic mouse-button codes sit inside it.
const CODE_SPACE: usize = 256;

/// Thread-safe table of "is this code currently held" booleans.
///
/// The table is written by the hook-callback context (one keyboard channel,
/// one mouse channel, on disjoint code ranges) and read by the overlay's poll
/// context. Each code is an independent atomic, so a reader never blocks a
/// writer and the hook callbacks stay within their latency budget.
///
/// Press and release records are idempotent and edge-detecting: the record
/// methods report whether the boolean actually flipped, which callers use to
/// fire change notifications exactly once per true transition. Auto-repeat
/// delivers duplicate down notifications in practice; those produce no second
/// edge.
///
/// # Example
///
/// ```
/// use ::keylight::{codes::KeyCode, state::InputState};
///
/// let state = InputState::new();
/// let code = KeyCode::A.code();
///
/// assert!(state.record_down(code)); // edge: released -> pressed
/// assert!(!state.record_down(code)); // auto-repeat, no edge
/// assert!(state.is_pressed(code));
///
/// assert!(state.record_up(code));
/// assert!(!state.is_pressed(code));
/// ```
pub struct InputState {
    pressed: [AtomicBool; CODE_SPACE],
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Constructs an empty table; every code reads as not pressed.
    pub fn new() -> Self {
        Self {
            pressed: array::from_fn(|_| AtomicBool::new(false)),
        }
    }

    /// Records a press. Returns `true` if the state actually flipped from
    /// released to pressed, `false` for duplicates and untracked codes.
    pub fn record_down(&self, code: InputCode) -> bool {
        if !Self::tracked(code) {
            return false;
        }
        !self.pressed[code.index()].swap(true, Ordering::SeqCst)
    }

    /// Records a release. Returns `true` if the state actually flipped from
    /// pressed to released.
    pub fn record_up(&self, code: InputCode) -> bool {
        if !Self::tracked(code) {
            return false;
        }
        self.pressed[code.index()].swap(false, Ordering::SeqCst)
    }

    /// Returns `true` if the given code is currently held. Lock-free; safe to
    /// call from any thread at any rate.
    pub fn is_pressed(&self, code: InputCode) -> bool {
        Self::tracked(code) && self.pressed[code.index()].load(Ordering::SeqCst)
    }

    /// Resets every tracked code to not-pressed. Called on subsystem stop,
    /// after the hooks are removed, so released-while-stopped keys cannot be
    /// left stuck on the overlay.
    pub fn clear_all(&self) {
        trace!("Clearing all press state");
        for slot in &self.pressed {
            slot.store(false, Ordering::SeqCst);
        }
    }

    /// The sentinel and out-of-range codes are never stored and always read
    /// as not pressed.
    fn tracked(code: InputCode) -> bool {
        code.is_observable() && code.index() < CODE_SPACE
    }
}
